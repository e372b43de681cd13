//! Provider-facing descriptors (data), strategies (behavior), and error-response types.
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering HTTPS-only
//! endpoints, supported grant flags, and provider quirks (scope delimiter).
//! `strategy` defines [`ProviderStrategy`], the override point the token engine calls to
//! decorate outgoing token requests and to vet error responses. `response` holds the
//! transport-agnostic view of a failed token-endpoint response and the
//! [`IdentityProviderError`] built from it.

pub mod descriptor;
pub mod response;
pub mod strategy;

pub use descriptor::*;
pub use response::*;
pub use strategy::*;
