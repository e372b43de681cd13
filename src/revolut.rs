//! Revolut Business provider adapter.
//!
//! [`Revolut`] composes the `oauth2` token engine with a [`RevolutStrategy`]: every token
//! request is signed with a fresh client assertion, and every error status is normalized
//! into an [`IdentityProviderError`](crate::provider::IdentityProviderError).

pub mod assertion;
pub mod config;
pub mod endpoint;
pub mod session;
pub mod strategy;

pub use assertion::*;
pub use config::*;
pub use endpoint::*;
pub use session::*;
pub use strategy::*;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeSet},
	error::ConfigError,
	http::TokenHttpClient,
	oauth::{BasicFacade, OAuth2Facade, TransportErrorMapper},
	obs::{self, ExchangeOutcome, ExchangeSpan},
	provider::{GrantType, ProviderDescriptor, ProviderStrategy},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Adapter specialized for the crate's default reqwest transport stack.
pub type ReqwestRevolut = Revolut<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// OAuth 2.0 client for Revolut Business.
///
/// The adapter holds only immutable state behind `Arc`s, so clones are cheap and can be
/// shared across tasks.
#[derive(Clone)]
pub struct Revolut<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every token request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Provider descriptor derived from the configuration.
	pub descriptor: ProviderDescriptor,
	/// Strategy that signs requests and normalizes error responses.
	pub strategy: Arc<dyn ProviderStrategy>,
	config: Arc<RevolutConfig>,
}
impl<C, M> Revolut<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates an adapter that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: RevolutConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let descriptor = endpoint::descriptor(&config)?;
		let config = Arc::new(config);

		Ok(Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			strategy: Arc::new(RevolutStrategy::new(config.clone())),
			config,
		})
	}

	/// Points token requests at a different endpoint, e.g. a local mock server.
	pub fn with_token_endpoint(mut self, token_url: Url) -> Result<Self> {
		self.descriptor =
			self.descriptor.to_builder().token_endpoint(token_url).build().map_err(ConfigError::from)?;

		Ok(self)
	}

	/// Configuration the adapter was built from.
	pub fn config(&self) -> &RevolutConfig {
		&self.config
	}

	/// Authorization endpoint for the configured environment.
	pub fn base_authorization_url(&self) -> &Url {
		&self.descriptor.endpoints.authorization
	}

	/// Token endpoint for the configured environment and API version.
	pub fn base_access_token_url(&self) -> &Url {
		&self.descriptor.endpoints.token
	}

	/// Revolut exposes no resource-owner details endpoint.
	pub fn resource_owner_details_url(&self, _token: &AccessToken) -> Result<Url> {
		Err(Error::UnsupportedOperation { operation: "resource_owner_details_url" })
	}

	/// Revolut exposes no resource-owner model.
	pub fn create_resource_owner(
		&self,
		_response: &JsonMap<String, JsonValue>,
		_token: &AccessToken,
	) -> Result<JsonMap<String, JsonValue>> {
		Err(Error::UnsupportedOperation { operation: "create_resource_owner" })
	}

	/// Starts an authorization request with the default scopes.
	pub fn authorization_request(&self) -> AuthorizationSession {
		self.authorization_request_with(self.config.default_scopes().clone())
	}

	/// Starts an authorization request for explicit scopes.
	pub fn authorization_request_with(&self, scope: ScopeSet) -> AuthorizationSession {
		session::build_session(
			&self.descriptor,
			self.config.client_id(),
			scope,
			self.config.redirect_uri().clone(),
		)
	}

	/// Exchanges the authorization `code` returned on the redirect.
	pub async fn exchange_code(&self, code: impl Into<String>) -> Result<AccessToken> {
		let options = BTreeMap::from([("code".to_owned(), code.into())]);

		self.get_access_token(GrantType::AuthorizationCode, options).await
	}

	/// Redeems a refresh token for a new access token.
	pub async fn refresh(&self, refresh_token: impl Into<String>) -> Result<AccessToken> {
		let options = BTreeMap::from([("refresh_token".to_owned(), refresh_token.into())]);

		self.get_access_token(GrantType::RefreshToken, options).await
	}

	/// Requests an access token, signing the request with a fresh client assertion.
	///
	/// `options` holds the grant credential (`code` or `refresh_token`) plus any extra form
	/// parameters. `client_assertion_type` and `client_assertion` are filled in unless
	/// already present.
	pub async fn get_access_token(
		&self,
		grant: GrantType,
		mut options: BTreeMap<String, String>,
	) -> Result<AccessToken> {
		let span = ExchangeSpan::new(grant, "get_access_token");

		obs::record_exchange_outcome(grant, ExchangeOutcome::Attempt);

		let result = span
			.instrument(async {
				self.ensure_grant_supported(grant)?;
				self.strategy.augment_token_request(grant, &mut options)?;

				let facade: BasicFacade<C, M> = BasicFacade::from_descriptor(
					&self.descriptor,
					self.config.client_id(),
					self.config.redirect_uri(),
					self.http_client.clone(),
					self.transport_mapper.clone(),
				)?;

				facade.exchange(self.strategy.as_ref(), grant, &options).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_exchange_outcome(grant, ExchangeOutcome::Success),
			Err(_) => obs::record_exchange_outcome(grant, ExchangeOutcome::Failure),
		}

		result
	}

	fn ensure_grant_supported(&self, grant: GrantType) -> Result<()> {
		if self.descriptor.supports(grant) {
			Ok(())
		} else {
			Err(ConfigError::UnsupportedGrant {
				descriptor: self.descriptor.id.to_string(),
				grant: grant.as_str(),
			}
			.into())
		}
	}
}
#[cfg(feature = "reqwest")]
impl Revolut<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates an adapter backed by its own reqwest transport.
	pub fn new(config: RevolutConfig) -> Result<Self> {
		Self::with_http_client(config, ReqwestHttpClient::new()?, Arc::new(ReqwestTransportErrorMapper))
	}

	/// Creates an adapter from a JSON options object; see [`RevolutConfig::from_options`].
	pub fn from_options(options: &JsonMap<String, JsonValue>) -> Result<Self> {
		Self::new(RevolutConfig::from_options(options)?)
	}
}
impl<C, M> Debug for Revolut<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Revolut")
			.field("descriptor", &self.descriptor)
			.field("config", &self.config)
			.finish()
	}
}
