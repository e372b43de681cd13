//! Transport-agnostic view of token-endpoint error responses.
//!
//! The token engine decodes every error body into a [`RawResponse`] before handing it to
//! [`ProviderStrategy::check_response`](crate::provider::ProviderStrategy::check_response).
//! Strategies that reject the response build an [`IdentityProviderError`] which keeps the
//! raw response around for caller inspection.

// crates.io
use oauth2::http::StatusCode;
// self
use crate::_prelude::*;

/// Status, reason phrase, and decoded body of a token-endpoint response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Reason phrase reported by the transport, when it supplied one.
	pub reason: Option<String>,
	/// Decoded JSON body; an empty object when the body was empty or not JSON.
	pub body: JsonValue,
}
impl RawResponse {
	/// Creates a response view without a transport-supplied reason phrase.
	pub fn new(status: u16, body: JsonValue) -> Self {
		Self { status, reason: None, body }
	}

	/// Overrides the reason phrase.
	pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
		self.reason = Some(reason.into());

		self
	}

	/// Decodes a body, substituting an empty object for empty or non-JSON payloads.
	pub fn decode_body(bytes: &[u8]) -> JsonValue {
		serde_json::from_slice(bytes).unwrap_or_else(|_| JsonValue::Object(JsonMap::new()))
	}

	/// Returns `true` for client and server error statuses (`>= 400`).
	pub fn is_error(&self) -> bool {
		self.status >= 400
	}

	/// Reason phrase from the transport, falling back to the canonical phrase for the status.
	pub fn reason_phrase(&self) -> &str {
		self.reason.as_deref().filter(|reason| !reason.is_empty()).unwrap_or_else(|| {
			StatusCode::from_u16(self.status)
				.ok()
				.and_then(|status| status.canonical_reason())
				.unwrap_or("")
		})
	}

	/// Looks up a top-level body field, treating falsy values as absent.
	pub fn field(&self, name: &str) -> Option<&JsonValue> {
		self.body.get(name).filter(|value| is_truthy(value))
	}
}

/// Failure reported by the authorization server for a token request.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("{message}")]
pub struct IdentityProviderError {
	/// Human-readable message chosen from the response.
	pub message: String,
	/// Provider error code, or the HTTP status when the body has none.
	pub code: i64,
	/// Response the error was derived from.
	pub response: RawResponse,
}
impl IdentityProviderError {
	/// Creates a new error from its parts.
	pub fn new(message: impl Into<String>, code: i64, response: RawResponse) -> Self {
		Self { message: message.into(), code, response }
	}

	/// HTTP status of the underlying response.
	pub fn status(&self) -> u16 {
		self.response.status
	}
}

/// Loose truthiness used when reading optional body fields.
///
/// `null`, `false`, `0`, `""`, `"0"`, and empty arrays or objects count as absent.
pub fn is_truthy(value: &JsonValue) -> bool {
	match value {
		JsonValue::Null => false,
		JsonValue::Bool(flag) => *flag,
		JsonValue::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		JsonValue::String(text) => !text.is_empty() && text != "0",
		JsonValue::Array(items) => !items.is_empty(),
		JsonValue::Object(fields) => !fields.is_empty(),
	}
}
