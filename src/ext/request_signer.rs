//! Request signing contracts that attach issued access tokens to outbound API calls.

// self
use crate::{_prelude::*, auth::AccessToken};

/// Describes how to attach an [`AccessToken`] to an outbound request without constraining
/// the HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects authorization state derived from `token`.
	fn attach_token(&self, request: Request, token: &AccessToken) -> Result<Request, Error>;
}

/// Failures raised by [`BearerSigner`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum BearerSignerError {
	/// Token expired before the request was signed.
	#[error("Access token expired at {expired_at}.")]
	Expired {
		/// Expiry instant recorded on the token.
		expired_at: OffsetDateTime,
	},
}

/// Signs requests with the `Authorization: Bearer <token>` header.
#[derive(Clone, Copy, Debug, Default)]
pub struct BearerSigner {
	reject_expired: bool,
}
impl BearerSigner {
	/// Creates a signer that attaches tokens regardless of expiry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Refuses to sign with tokens whose expiry has passed.
	pub fn reject_expired(mut self) -> Self {
		self.reject_expired = true;

		self
	}

	/// Validates the token and returns the header value to send.
	pub fn header_value(&self, token: &AccessToken) -> Result<String, BearerSignerError> {
		self.check(token, OffsetDateTime::now_utc())?;

		Ok(token.authorization_header())
	}

	fn check(&self, token: &AccessToken, now: OffsetDateTime) -> Result<(), BearerSignerError> {
		match token.expires_at {
			Some(expired_at) if self.reject_expired && token.is_expired_at(now) =>
				Err(BearerSignerError::Expired { expired_at }),
			_ => Ok(()),
		}
	}
}
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::RequestBuilder, BearerSignerError> for BearerSigner {
	fn attach_token(
		&self,
		request: reqwest::RequestBuilder,
		token: &AccessToken,
	) -> Result<reqwest::RequestBuilder, BearerSignerError> {
		self.check(token, OffsetDateTime::now_utc())?;

		Ok(request.bearer_auth(token.access_token.expose()))
	}
}
