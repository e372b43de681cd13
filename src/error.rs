//! Adapter-level error types shared across configuration, assertions, and token exchanges.

// self
use crate::{_prelude::*, provider::IdentityProviderError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical adapter error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Client assertion could not be minted.
	#[error(transparent)]
	Assertion(#[from] AssertionError),
	/// Authorization server answered with a client or server error status.
	#[error(transparent)]
	IdentityProvider(#[from] IdentityProviderError),
	/// Token endpoint answered successfully but the payload could not be used.
	#[error(transparent)]
	TokenResponse(#[from] TokenResponseError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Operation is not offered by the upstream provider.
	#[error("Operation `{operation}` is not supported by Revolut.")]
	UnsupportedOperation {
		/// Name of the rejected operation.
		operation: &'static str,
	},
	/// Authorization redirect carried an unexpected `state` value.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Configuration and validation failures raised while building the adapter.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The `privateKey` option was not supplied.
	#[error("privateKey option is required.")]
	MissingPrivateKey,
	/// The `privateKey` option was null or an empty string.
	#[error("privateKey option cannot be empty.")]
	EmptyPrivateKey,
	/// A string option carried another JSON type.
	#[error("{option} option must be a string.")]
	NonStringOption {
		/// Option name as spelled in the options object.
		option: &'static str,
	},
	/// The `version` option was not numeric.
	#[error("version option must be numeric.")]
	NonNumericVersion,
	/// The `version` option was zero, negative, or not finite.
	#[error("version option must be a positive number.")]
	NonPositiveVersion,
	/// The `isSandbox` option was not a boolean.
	#[error("isSandbox option must be boolean.")]
	NonBooleanSandbox,
	/// The `clientId` option was not supplied.
	#[error("clientId option is required.")]
	MissingClientId,
	/// The `clientId` option failed identifier validation.
	#[error("clientId option is invalid.")]
	InvalidClientId(#[from] crate::auth::IdentifierError),
	/// The `redirectUri` option was not supplied.
	#[error("redirectUri option is required.")]
	MissingRedirectUri,
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Default scopes cannot be normalized.
	#[error("Default scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Provider descriptor failed validation.
	#[error("Provider descriptor is invalid.")]
	InvalidDescriptor(#[from] crate::provider::ProviderDescriptorError),
	/// Endpoint URL could not be assembled.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Grant requires an option that was not supplied.
	#[error("The {grant} grant requires the `{option}` option.")]
	MissingGrantOption {
		/// Grant label.
		grant: &'static str,
		/// Missing option name.
		option: &'static str,
	},
	/// Grant is not enabled by the provider descriptor.
	#[error("Descriptor `{descriptor}` does not enable the {grant} grant.")]
	UnsupportedGrant {
		/// Provider identifier string.
		descriptor: String,
		/// Disabled grant label.
		grant: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while minting the signed client assertion.
#[derive(Debug, ThisError)]
pub enum AssertionError {
	/// Private key file could not be read.
	#[error("Private key at {path} could not be read.")]
	KeyRead {
		/// Resolved key path.
		path: String,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Private key material is not a usable RSA PEM key.
	#[error("Private key is not a valid RSA PEM key.")]
	InvalidKey(#[source] jsonwebtoken::errors::Error),
	/// Signing the assertion failed.
	#[error("Client assertion could not be signed.")]
	Signing(#[source] jsonwebtoken::errors::Error),
	/// Redirect URI has no host to use as the assertion issuer.
	#[error("Redirect URI `{redirect_uri}` has no host to use as the assertion issuer.")]
	MissingIssuer {
		/// Offending redirect URI.
		redirect_uri: String,
	},
}

/// Unusable success responses from the token endpoint.
#[derive(Debug, ThisError)]
pub enum TokenResponseError {
	/// Token endpoint responded with malformed JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint returned a response the engine could not classify.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	Unexpected {
		/// Engine-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Token endpoint returned scopes that fail normalization.
	#[error("Token endpoint returned invalid scopes.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Access token could not be assembled from the response.
	#[error("Unable to build access token.")]
	Build(#[from] crate::auth::AccessTokenBuilderError),
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request timed out before the token endpoint answered.
	#[error("Request timed out while calling the token endpoint.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// Transport failed with a message-only error.
	#[error("HTTP client error occurred while calling the token endpoint: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout { source: Box::new(e) } } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn config_messages_match_option_names() {
		assert_eq!(ConfigError::MissingPrivateKey.to_string(), "privateKey option is required.");
		assert_eq!(ConfigError::EmptyPrivateKey.to_string(), "privateKey option cannot be empty.");
		assert_eq!(ConfigError::NonNumericVersion.to_string(), "version option must be numeric.");
		assert_eq!(ConfigError::NonBooleanSandbox.to_string(), "isSandbox option must be boolean.");
		assert_eq!(
			ConfigError::NonStringOption { option: "clientId" }.to_string(),
			"clientId option must be a string."
		);
	}

	#[test]
	fn config_errors_surface_transparently() {
		let err: Error = ConfigError::MissingPrivateKey.into();

		assert_eq!(err.to_string(), "privateKey option is required.");
		assert!(matches!(err, Error::Config(ConfigError::MissingPrivateKey)));
	}

	#[test]
	fn unsupported_operation_names_the_call() {
		let err = Error::UnsupportedOperation { operation: "resource_owner_details_url" };

		assert_eq!(
			err.to_string(),
			"Operation `resource_owner_details_url` is not supported by Revolut."
		);
	}
}
