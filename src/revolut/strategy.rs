//! Revolut-specific token request decoration and error normalization.

// self
use crate::{
	_prelude::*,
	obs,
	provider::{GrantType, IdentityProviderError, ProviderStrategy, RawResponse},
	revolut::{AssertionClaims, CLIENT_ASSERTION_TYPE, ClientAssertion, RevolutConfig},
};

/// Strategy that signs every token request with a fresh client assertion.
#[derive(Clone, Debug)]
pub struct RevolutStrategy {
	config: Arc<RevolutConfig>,
}
impl RevolutStrategy {
	/// Form key carrying the assertion type.
	pub const ASSERTION_TYPE_PARAM: &'static str = "client_assertion_type";
	/// Form key carrying the signed assertion.
	pub const ASSERTION_PARAM: &'static str = "client_assertion";

	/// Creates a strategy for the given configuration.
	pub fn new(config: Arc<RevolutConfig>) -> Self {
		Self { config }
	}

	/// Mints an assertion issued now.
	pub fn mint_assertion(&self) -> Result<ClientAssertion> {
		let claims = AssertionClaims::new(
			self.config.client_id(),
			self.config.redirect_uri(),
			OffsetDateTime::now_utc(),
		)?;

		Ok(ClientAssertion::sign(self.config.private_key(), claims)?)
	}
}
impl ProviderStrategy for RevolutStrategy {
	/// Error statuses become an [`IdentityProviderError`].
	///
	/// The message is the first truthy of `error_description`, `message`, and the reason
	/// phrase; the code is the first truthy integer `code`, falling back to the status.
	fn check_response(&self, response: &RawResponse) -> Result<(), IdentityProviderError> {
		if !response.is_error() {
			return Ok(());
		}

		let message = response
			.field("error_description")
			.or_else(|| response.field("message"))
			.map(text)
			.unwrap_or_else(|| response.reason_phrase().to_owned());
		let code = response.field("code").and_then(integer).unwrap_or(i64::from(response.status));

		obs::trace_normalized_error(response.status, code, &message);

		Err(IdentityProviderError::new(message, code, response.clone()))
	}

	/// Fills `client_assertion_type` and `client_assertion` unless the caller set them.
	///
	/// The assertion is minted on every call, even when the caller's value wins.
	fn augment_token_request(
		&self,
		_grant: GrantType,
		form: &mut BTreeMap<String, String>,
	) -> Result<()> {
		let assertion = self.mint_assertion()?;

		form.entry(Self::ASSERTION_TYPE_PARAM.into())
			.or_insert_with(|| CLIENT_ASSERTION_TYPE.into());
		form.entry(Self::ASSERTION_PARAM.into()).or_insert_with(|| assertion.into_string());

		Ok(())
	}
}

fn text(value: &JsonValue) -> String {
	match value {
		JsonValue::String(text) => text.to_owned(),
		other => other.to_string(),
	}
}

fn integer(value: &JsonValue) -> Option<i64> {
	match value {
		JsonValue::Number(number) => number.as_i64(),
		JsonValue::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{_preludet::*, error::AssertionError};

	const MESSAGE: &str = "The request is invalid.";

	fn strategy() -> RevolutStrategy {
		RevolutStrategy::new(Arc::new(test_config()))
	}

	fn rejected(response: RawResponse) -> IdentityProviderError {
		strategy().check_response(&response).expect_err("Error statuses should be rejected.")
	}

	#[test]
	fn non_error_statuses_pass() {
		assert!(strategy().check_response(&RawResponse::new(200, json!({}))).is_ok());
		assert!(strategy().check_response(&RawResponse::new(399, json!({ "message": "x" }))).is_ok());
	}

	#[test]
	fn error_description_wins() {
		let err = rejected(RawResponse::new(
			400,
			json!({ "error_description": MESSAGE, "message": "other", "code": 400 }),
		));

		assert_eq!(err.message, MESSAGE);
		assert_eq!(err.code, 400);
	}

	#[test]
	fn message_is_second_choice() {
		let err = rejected(RawResponse::new(401, json!({ "message": MESSAGE, "code": 401 })));

		assert_eq!(err.message, MESSAGE);
		assert_eq!(err.code, 401);
	}

	#[test]
	fn falsy_fields_fall_through_to_reason_and_status() {
		let err = rejected(
			RawResponse::new(
				500,
				json!({ "error_description": "", "message": null, "code": 0 }),
			)
			.with_reason("Unknown Reason"),
		);

		assert_eq!(err.message, "Unknown Reason");
		assert_eq!(err.code, 500);
	}

	#[test]
	fn body_code_overrides_status() {
		let err = rejected(RawResponse::new(400, json!({ "code": 9001 })));

		assert_eq!(err.message, "Bad Request");
		assert_eq!(err.code, 9001);
		assert_eq!(err.status(), 400);
	}

	#[test]
	fn non_integer_code_falls_back_to_status() {
		assert_eq!(rejected(RawResponse::new(403, json!({ "code": "forbidden" }))).code, 403);
		assert_eq!(rejected(RawResponse::new(403, json!({ "code": 1.5 }))).code, 403);
		assert_eq!(rejected(RawResponse::new(403, json!({ "code": "42" }))).code, 42);
	}

	#[test]
	fn augment_fills_missing_assertion_fields() {
		let mut form = BTreeMap::from([("code".to_owned(), "abc".to_owned())]);

		strategy()
			.augment_token_request(GrantType::AuthorizationCode, &mut form)
			.expect("Fixture key should sign.");

		assert_eq!(form.get("client_assertion_type").map(String::as_str), Some(CLIENT_ASSERTION_TYPE));
		assert_eq!(form.get("client_assertion").map(|jwt| jwt.split('.').count()), Some(3));
		assert_eq!(form.get("code").map(String::as_str), Some("abc"));
	}

	#[test]
	fn augment_keeps_caller_values() {
		let mut form = BTreeMap::from([
			("client_assertion".to_owned(), "caller".to_owned()),
			("client_assertion_type".to_owned(), "custom".to_owned()),
		]);

		strategy()
			.augment_token_request(GrantType::RefreshToken, &mut form)
			.expect("Fixture key should sign.");

		assert_eq!(form.get("client_assertion").map(String::as_str), Some("caller"));
		assert_eq!(form.get("client_assertion_type").map(String::as_str), Some("custom"));
	}

	#[test]
	fn unreadable_key_fails_augmentation() {
		let config = RevolutConfig::builder(TEST_CLIENT_ID, "/nonexistent/key.pem")
			.redirect_uri(Url::parse(TEST_REDIRECT_URI).expect("Redirect should parse."))
			.build()
			.expect("Locator is only read at signing time.");
		let mut form = BTreeMap::new();
		let err = RevolutStrategy::new(Arc::new(config))
			.augment_token_request(GrantType::AuthorizationCode, &mut form)
			.expect_err("Missing key file should fail.");

		assert!(matches!(err, Error::Assertion(AssertionError::KeyRead { .. })));
		assert!(form.is_empty());
	}
}
