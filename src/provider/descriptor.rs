//! Provider descriptor data structures shared by the adapter and the token engine.
//!
//! The module exposes validated metadata, supporting builder utilities, and
//! grant-specific helpers so providers can describe their capabilities in a
//! transport-agnostic way.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Grant helpers wired into provider descriptors.
pub mod grant;

pub use builder::*;
pub use grant::*;

// self
use crate::{_prelude::*, auth::ProviderId};

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint end-users are redirected to.
	pub authorization: Url,
	/// Token endpoint used for exchanges and refreshes.
	pub token: Url,
}

/// Provider-specific quirks that influence request construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuirks {
	/// Character used to join scopes when constructing `scope` parameters.
	pub scope_delimiter: char,
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self { scope_delimiter: ' ' }
	}
}

/// Immutable provider descriptor consumed by the token engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Supported grant flags.
	pub supported_grants: SupportedGrants,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Checks whether the descriptor supports a given grant.
	pub fn supports(&self, grant: GrantType) -> bool {
		self.supported_grants.supports(grant)
	}

	/// Returns a builder pre-populated with this descriptor's values.
	pub fn to_builder(&self) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::from(self)
	}
}
