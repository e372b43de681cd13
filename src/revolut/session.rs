//! Authorization requests and state validation.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, auth::ScopeSet, provider::ProviderDescriptor};

const STATE_LEN: usize = 32;

/// Authorization redirect metadata returned by [`Revolut::authorization_request`](crate::Revolut::authorization_request).
#[derive(Clone, Debug)]
pub struct AuthorizationSession {
	/// Requested scope set.
	pub scope: ScopeSet,
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Redirect URI supplied when constructing the authorize URL.
	pub redirect_uri: Url,
	/// Fully-formed authorize URL that callers should send end-users to.
	pub authorize_url: Url,
}
impl AuthorizationSession {
	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}
}

pub(super) fn build_session(
	descriptor: &ProviderDescriptor,
	client_id: &str,
	scope: ScopeSet,
	redirect_uri: Url,
) -> AuthorizationSession {
	let state = random_string(STATE_LEN);
	let authorize_url = build_authorize_url(descriptor, client_id, &redirect_uri, &scope, &state);

	AuthorizationSession { scope, state, redirect_uri, authorize_url }
}

fn build_authorize_url(
	descriptor: &ProviderDescriptor,
	client_id: &str,
	redirect_uri: &Url,
	scope: &ScopeSet,
	state: &str,
) -> Url {
	let mut url = descriptor.endpoints.authorization.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", client_id);
	pairs.append_pair("redirect_uri", redirect_uri.as_str());

	if !scope.is_empty() {
		pairs.append_pair("scope", &scope.join(descriptor.quirks.scope_delimiter));
	}

	pairs.append_pair("state", state);

	drop(pairs);

	url
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
