//! Token engine built on the `oauth2` crate.
//!
//! The engine owns request construction, form encoding, and token-response parsing. It
//! accepts any JSON object as an error body so the provider strategy can normalize
//! non-standard error payloads, and it routes transport failures through a
//! [`TransportErrorMapper`].

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthUrl, AuthorizationCode, Client, ClientId as OAuthClientId, EndpointNotSet,
	EndpointSet, ErrorResponse, ExtraTokenFields, HttpClientError, RedirectUrl, RefreshToken,
	RequestTokenError, RevocationErrorResponseType, StandardErrorResponse, StandardRevocableToken,
	StandardTokenIntrospectionResponse, StandardTokenResponse, TokenResponse, TokenUrl,
	basic::BasicTokenType,
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientId, ScopeSet},
	error::{ConfigError, TokenResponseError, TransportError},
	http::{ResponseMetadata, ResponseMetadataSlot, TokenHttpClient},
	provider::{GrantType, ProviderDescriptor, ProviderStrategy, RawResponse},
};

type EngineTokenResponse = StandardTokenResponse<ExtraFields, BasicTokenType>;
type ConfiguredClient = Client<
	ErrorBody,
	EngineTokenResponse,
	StandardTokenIntrospectionResponse<ExtraFields, BasicTokenType>,
	StandardRevocableToken,
	StandardErrorResponse<RevocationErrorResponseType>,
	EndpointSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
>;
type EngineRequestError<E> = RequestTokenError<HttpClientError<E>, ErrorBody>;
type FacadeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Error payload accepted from the token endpoint: any JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorBody(pub JsonMap<String, JsonValue>);
impl Display for ErrorBody {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}", JsonValue::Object(self.0.clone()))
	}
}
impl ErrorResponse for ErrorBody {}

/// Token response fields beyond the RFC 6749 set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraFields(pub JsonMap<String, JsonValue>);
impl ExtraTokenFields for ExtraFields {}

/// Maps HTTP transport failures into adapter [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into an adapter error.
	fn map_transport_error(
		&self,
		grant: GrantType,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		_grant: GrantType,
		_meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) =>
				if inner.is_builder() {
					ConfigError::from(*inner).into()
				} else {
					TransportError::from(*inner).into()
				},
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TransportError::Other { message }.into(),
			_ => TransportError::Other { message: "unknown transport failure".into() }.into(),
		}
	}
}

pub(crate) trait OAuth2Facade {
	fn exchange<'a, 'strategy, 'params>(
		&'a self,
		strategy: &'strategy dyn ProviderStrategy,
		grant: GrantType,
		params: &'params BTreeMap<String, String>,
	) -> FacadeFuture<'a, AccessToken>
	where
		'strategy: 'a,
		'params: 'a;
}

pub(crate) struct BasicFacade<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> BasicFacade<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds a request-body authenticated client: the assertion travels in the form, so no
	/// client secret is configured.
	pub(crate) fn from_descriptor(
		descriptor: &ProviderDescriptor,
		client_id: &ClientId,
		redirect_uri: &Url,
		http_client: impl Into<Arc<C>>,
		error_mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let auth_url = AuthUrl::new(descriptor.endpoints.authorization.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;
		let token_url = TokenUrl::new(descriptor.endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;
		let redirect_url = RedirectUrl::new(redirect_uri.to_string())
			.map_err(|source| ConfigError::InvalidRedirect { source })?;
		let oauth_client = Client::new(OAuthClientId::new(client_id.to_string()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_redirect_uri(redirect_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self {
			oauth_client,
			http_client: http_client.into(),
			error_mapper: error_mapper.into(),
		})
	}
}
impl<C, M> OAuth2Facade for BasicFacade<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn exchange<'a, 'strategy, 'params>(
		&'a self,
		strategy: &'strategy dyn ProviderStrategy,
		grant: GrantType,
		params: &'params BTreeMap<String, String>,
	) -> FacadeFuture<'a, AccessToken>
	where
		'strategy: 'a,
		'params: 'a,
	{
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let instrumented = self.http_client.with_metadata(meta.clone());
			let option = grant.credential_option();
			let credential = params
				.get(option)
				.ok_or(ConfigError::MissingGrantOption { grant: grant.as_str(), option })?;
			let extra = params.iter().filter(|(key, _)| key.as_str() != option);
			let response = match grant {
				GrantType::AuthorizationCode => {
					let mut request = self
						.oauth_client
						.exchange_code(AuthorizationCode::new(credential.to_owned()));

					for (key, value) in extra {
						request = request.add_extra_param(key, value);
					}

					request.request_async(&instrumented).await
				},
				GrantType::RefreshToken => {
					let refresh_token = RefreshToken::new(credential.to_owned());
					let mut request = self.oauth_client.exchange_refresh_token(&refresh_token);

					for (key, value) in extra {
						request = request.add_extra_param(key, value);
					}

					request.request_async(&instrumented).await
				},
			}
			.map_err(|err| {
				map_request_error(strategy, grant, meta.take(), err, self.error_mapper.as_ref())
			})?;

			map_token_response(response)
		})
	}
}

fn map_token_response(response: EngineTokenResponse) -> Result<AccessToken> {
	let token_type: &str = response.token_type().as_ref();
	let issued_at = OffsetDateTime::now_utc();
	let mut builder = AccessToken::builder(response.access_token().secret().to_owned())
		.token_type(token_type)
		.issued_at(issued_at)
		.extra(response.extra_fields().0.clone());

	// A zero `expires_in` means the token carries no expiry.
	if let Some(expires_in) = response.expires_in().filter(|delta| !delta.is_zero()) {
		let delta = i64::try_from(expires_in.as_secs())
			.map(Duration::seconds)
			.map_err(|_| TokenResponseError::ExpiresInOutOfRange)?;

		if issued_at.checked_add(delta).is_none() {
			return Err(TokenResponseError::ExpiresInOutOfRange.into());
		}

		builder = builder.expires_in(delta);
	}
	if let Some(refresh) = response.refresh_token() {
		builder = builder.refresh_token(refresh.secret().to_owned());
	}
	if let Some(scopes) = response.scopes() {
		// Revolut echoes comma-joined scopes, which the engine leaves as a single entry.
		let echoed = scopes.iter().map(|scope| scope.as_ref()).collect::<Vec<&str>>().join(" ");
		let scope = ScopeSet::parse(&echoed).map_err(TokenResponseError::from)?;

		builder = builder.scope(scope);
	}

	builder.build().map_err(|err| TokenResponseError::from(err).into())
}

fn map_request_error<E, M>(
	strategy: &dyn ProviderStrategy,
	grant: GrantType,
	meta: Option<ResponseMetadata>,
	err: EngineRequestError<E>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let status = meta.as_ref().and_then(|value| value.status);

	match err {
		RequestTokenError::Request(error) => mapper.map_transport_error(grant, meta.as_ref(), error),
		RequestTokenError::ServerResponse(body) =>
			check_error_response(strategy, meta, JsonValue::Object(body.0)).unwrap_or_else(|| {
				TokenResponseError::Unexpected {
					message: "token endpoint rejected the request without an error status".into(),
					status,
				}
				.into()
			}),
		RequestTokenError::Parse(source, body) =>
			check_error_response(strategy, meta, RawResponse::decode_body(&body))
				.unwrap_or_else(|| TokenResponseError::Parse { source, status }.into()),
		RequestTokenError::Other(message) =>
			check_error_response(strategy, meta, JsonValue::Object(JsonMap::new()))
				.unwrap_or_else(|| TokenResponseError::Unexpected { message, status }.into()),
	}
}

/// Runs the strategy's response check when the transport reported an error status.
fn check_error_response(
	strategy: &dyn ProviderStrategy,
	meta: Option<ResponseMetadata>,
	body: JsonValue,
) -> Option<Error> {
	let ResponseMetadata { status, reason } = meta?;
	let mut response = RawResponse::new(status?, body);

	response.reason = reason;

	if !response.is_error() {
		return None;
	}

	strategy.check_response(&response).err().map(Error::from)
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{
		auth::ProviderId,
		http::ReqwestHttpClient,
		provider::{IdentityProviderError, ProviderDescriptor},
	};

	struct RejectAll;
	impl ProviderStrategy for RejectAll {
		fn check_response(&self, response: &RawResponse) -> Result<(), IdentityProviderError> {
			Err(IdentityProviderError::new("rejected", i64::from(response.status), response.clone()))
		}
	}

	fn descriptor() -> ProviderDescriptor {
		ProviderDescriptor::builder(ProviderId::new("test-provider").expect("Valid provider id."))
			.authorization_endpoint(
				Url::parse("https://example.com/authorize").expect("Valid authorization URL."),
			)
			.token_endpoint(Url::parse("https://example.com/token").expect("Valid token URL."))
			.support_grant(GrantType::AuthorizationCode)
			.build()
			.expect("Failed to build provider descriptor.")
	}

	fn meta(status: u16) -> Option<ResponseMetadata> {
		Some(ResponseMetadata { status: Some(status), reason: None })
	}

	#[test]
	fn builds_request_body_client() {
		let redirect =
			Url::parse("https://example.com/callback").expect("Failed to parse redirect URI.");
		let result = <BasicFacade<ReqwestHttpClient, ReqwestTransportErrorMapper>>::from_descriptor(
			&descriptor(),
			&ClientId::new("client-id").expect("Valid client id."),
			&redirect,
			Arc::new(ReqwestHttpClient::with_client(ReqwestClient::new())),
			Arc::new(ReqwestTransportErrorMapper),
		);

		assert!(result.is_ok());
	}

	#[test]
	fn error_status_routes_through_strategy() {
		let err = check_error_response(&RejectAll, meta(401), json!({}))
			.expect("Error statuses should be checked.");

		assert!(matches!(err, Error::IdentityProvider(IdentityProviderError { code: 401, .. })));
	}

	#[test]
	fn non_error_status_skips_strategy() {
		assert!(check_error_response(&RejectAll, meta(302), json!({})).is_none());
		assert!(check_error_response(&RejectAll, None, json!({})).is_none());
	}

	#[test]
	fn token_response_maps_optional_fields() {
		let response: EngineTokenResponse = serde_json::from_value(json!({
			"access_token": "test_access_token",
			"token_type": "Bearer",
			"expires_in": 3600,
			"refresh_token": "test_refresh_token",
			"scope": "READ,WRITE",
			"merchant_id": "m-1",
		}))
		.expect("Token response fixture should deserialize.");
		let token = map_token_response(response).expect("Token response should map.");

		assert_eq!(token.access_token.expose(), "test_access_token");
		assert_eq!(token.refresh_token.as_ref().map(|secret| secret.expose()), Some("test_refresh_token"));
		assert_eq!(token.expires_at, Some(token.issued_at + Duration::hours(1)));
		assert_eq!(token.scope.as_ref().map(ScopeSet::normalized), Some("READ WRITE".into()));
		assert_eq!(token.extra_field("merchant_id"), Some(&json!("m-1")));
	}

	#[test]
	fn zero_expires_in_means_no_expiry() {
		let response: EngineTokenResponse = serde_json::from_value(json!({
			"access_token": "test_access_token",
			"token_type": "bearer",
			"expires_in": 0,
		}))
		.expect("Token response fixture should deserialize.");
		let token = map_token_response(response).expect("Zero expiry should still map.");

		assert_eq!(token.expires_at, None);
		assert!(!token.is_expired());
	}

	#[test]
	fn unrepresentable_expires_in_is_rejected() {
		let response: EngineTokenResponse = serde_json::from_value(json!({
			"access_token": "test_access_token",
			"token_type": "bearer",
			"expires_in": 1_000_000_000_000_000_u64,
		}))
		.expect("Token response fixture should deserialize.");

		assert!(matches!(
			map_token_response(response),
			Err(Error::TokenResponse(TokenResponseError::ExpiresInOutOfRange))
		));
	}
}
