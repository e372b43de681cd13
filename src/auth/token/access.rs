//! Access token returned by a successful token exchange, plus its builder.

// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, token::secret::TokenSecret},
};

/// Errors produced by [`AccessTokenBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum AccessTokenBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when the relative expiry is zero or negative.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Issued when the expiry instant cannot be represented.
	#[error("The expires_in value overflows the issued instant.")]
	ExpiryOverflow,
}

/// Tokens issued by the Revolut token endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Token type reported by the provider (normally `bearer`).
	pub token_type: String,
	/// Scopes echoed by the provider, when present.
	pub scope: Option<ScopeSet>,
	/// Instant the exchange completed.
	pub issued_at: OffsetDateTime,
	/// Expiry derived from `expires_in`, when the provider supplied one.
	pub expires_at: Option<OffsetDateTime>,
	/// Response fields beyond the RFC 6749 set.
	pub extra: JsonMap<String, JsonValue>,
}
impl AccessToken {
	/// Returns a builder seeded with the access token value.
	pub fn builder(access_token: impl Into<String>) -> AccessTokenBuilder {
		AccessTokenBuilder::new(access_token)
	}

	/// Returns `true` once `expires_at` has passed at the provided instant.
	///
	/// Tokens without an expiry never report as expired.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Value for the `Authorization` header of resource requests.
	pub fn authorization_header(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}

	/// Looks up a non-standard response field.
	pub fn extra_field(&self, name: &str) -> Option<&JsonValue> {
		self.extra.get(name)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("token_type", &self.token_type)
			.field("scope", &self.scope)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.field("extra", &self.extra.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Builder for [`AccessToken`].
#[derive(Clone, Debug)]
pub struct AccessTokenBuilder {
	access_token: TokenSecret,
	refresh_token: Option<TokenSecret>,
	token_type: String,
	scope: Option<ScopeSet>,
	issued_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
	extra: JsonMap<String, JsonValue>,
}
impl AccessTokenBuilder {
	const DEFAULT_TOKEN_TYPE: &'static str = "bearer";

	fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: None,
			token_type: Self::DEFAULT_TOKEN_TYPE.into(),
			scope: None,
			issued_at: None,
			expires_in: None,
			extra: JsonMap::new(),
		}
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(token));

		self
	}

	/// Overrides the token type (defaults to `bearer`).
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = token_type.into();

		self
	}

	/// Records the scopes echoed by the provider.
	pub fn scope(mut self, scope: ScopeSet) -> Self {
		self.scope = Some(scope);

		self
	}

	/// Sets the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets a relative expiry duration from the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Attaches non-standard response fields.
	pub fn extra(mut self, extra: JsonMap<String, JsonValue>) -> Self {
		self.extra = extra;

		self
	}

	/// Consumes the builder and produces an [`AccessToken`].
	pub fn build(self) -> Result<AccessToken, AccessTokenBuilderError> {
		if self.access_token.expose().is_empty() {
			return Err(AccessTokenBuilderError::MissingAccessToken);
		}

		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let expires_at = match self.expires_in {
			Some(delta) if !delta.is_positive() =>
				return Err(AccessTokenBuilderError::NonPositiveExpiresIn),
			Some(delta) =>
				Some(issued_at.checked_add(delta).ok_or(AccessTokenBuilderError::ExpiryOverflow)?),
			None => None,
		};

		Ok(AccessToken {
			access_token: self.access_token,
			refresh_token: self.refresh_token,
			token_type: self.token_type,
			scope: self.scope,
			issued_at,
			expires_at,
			extra: self.extra,
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn builder_derives_expiry_from_expires_in() {
		let token = AccessToken::builder("access")
			.refresh_token("refresh")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::hours(1))
			.build()
			.expect("Access token builder should support relative expiry.");

		assert_eq!(token.expires_at, Some(macros::datetime!(2025-01-01 01:00 UTC)));
		assert!(!token.is_expired_at(macros::datetime!(2025-01-01 00:59 UTC)));
		assert!(token.is_expired_at(macros::datetime!(2025-01-01 01:00 UTC)));
		assert_eq!(token.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh"));
	}

	#[test]
	fn tokens_without_expiry_never_expire() {
		let token = AccessToken::builder("access").build().expect("Minimal token should build.");

		assert_eq!(token.expires_at, None);
		assert!(!token.is_expired());
		assert_eq!(token.token_type, "bearer");
	}

	#[test]
	fn builder_rejects_invalid_values() {
		assert_eq!(
			AccessToken::builder("").build().expect_err("Empty tokens must be rejected."),
			AccessTokenBuilderError::MissingAccessToken
		);
		assert_eq!(
			AccessToken::builder("access")
				.expires_in(Duration::ZERO)
				.build()
				.expect_err("Zero expiry must be rejected."),
			AccessTokenBuilderError::NonPositiveExpiresIn
		);
		assert_eq!(
			AccessToken::builder("access")
				.expires_in(Duration::MAX)
				.build()
				.expect_err("Unrepresentable expiry must be rejected."),
			AccessTokenBuilderError::ExpiryOverflow
		);
	}

	#[test]
	fn authorization_header_uses_bearer_scheme() {
		let token = AccessToken::builder("abc").build().expect("Token fixture should build.");

		assert_eq!(token.authorization_header(), "Bearer abc");
	}

	#[test]
	fn debug_redacts_secrets() {
		let mut extra = JsonMap::new();

		extra.insert("merchant".into(), JsonValue::from("m-1"));

		let token = AccessToken::builder("top-secret")
			.refresh_token("also-secret")
			.extra(extra)
			.build()
			.expect("Token fixture should build.");
		let rendered = format!("{token:?}");

		assert!(!rendered.contains("top-secret"));
		assert!(!rendered.contains("also-secret"));
		assert_eq!(token.extra_field("merchant"), Some(&JsonValue::from("m-1")));
	}
}
