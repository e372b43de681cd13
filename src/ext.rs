//! Extension contracts for consuming issued tokens.
//!
//! [`RequestSignerExt`] keeps the adapter free of any particular API client; the bundled
//! [`BearerSigner`] covers the common reqwest case.

pub mod request_signer;

pub use request_signer::*;
