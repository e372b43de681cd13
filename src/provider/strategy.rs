//! Provider strategy hooks that customize token exchanges.
//!
//! Implementations decorate outgoing token requests and vet error responses without tying
//! the token engine to any particular HTTP client.

// std
use std::collections::BTreeMap;
// self
use crate::{
	_prelude::*,
	provider::{GrantType, IdentityProviderError, RawResponse},
};

/// Strategy hook that lets providers decorate requests and reject error responses.
///
/// Implementors are required to be `Send + Sync`, and the hooks use crate-owned data
/// types so downstream crates never depend on reqwest-specific structures. Override only
/// what you need: `augment_token_request` defaults to a no-op.
pub trait ProviderStrategy: Send + Sync {
	/// Inspects a token-endpoint response whose status was not a success.
	///
	/// Returning an [`IdentityProviderError`] surfaces it to the caller unchanged; returning
	/// `Ok(())` lets the engine report the response as unexpected.
	fn check_response(&self, response: &RawResponse) -> Result<(), IdentityProviderError>;

	/// Gives providers a chance to add form parameters before dispatching.
	///
	/// The map holds the caller's options; the grant-specific credential (`code`,
	/// `refresh_token`) is still present when the hook runs. Implementations that inject
	/// client authentication should only fill keys the caller left unset.
	fn augment_token_request(
		&self,
		_grant: GrantType,
		_form: &mut BTreeMap<String, String>,
	) -> Result<()> {
		Ok(())
	}
}
