//! Endpoint selection for production and sandbox environments.

// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	error::ConfigError,
	provider::{GrantType, ProviderDescriptor},
	revolut::{ApiVersion, RevolutConfig},
};

/// Identifier of the Revolut provider descriptor.
pub const PROVIDER_ID: &str = "revolut";

const AUTHORIZATION_URL: &str = "https://business.revolut.com/app-confirm";
const SANDBOX_AUTHORIZATION_URL: &str = "https://sandbox-business.revolut.com/app-confirm";
const TOKEN_HOST: &str = "https://b2b.revolut.com";
const SANDBOX_TOKEN_HOST: &str = "https://sandbox-b2b.revolut.com";
const SCOPE_DELIMITER: char = ',';

/// Authorization endpoint for the selected environment.
pub fn authorization_url(sandbox: bool) -> &'static str {
	if sandbox { SANDBOX_AUTHORIZATION_URL } else { AUTHORIZATION_URL }
}

/// Token endpoint for the selected environment and API version.
pub fn token_url(sandbox: bool, version: ApiVersion) -> String {
	let host = if sandbox { SANDBOX_TOKEN_HOST } else { TOKEN_HOST };

	format!("{host}/api/{version}/auth/token")
}

/// Builds the validated descriptor for a configuration.
pub fn descriptor(config: &RevolutConfig) -> Result<ProviderDescriptor, ConfigError> {
	let parse = |url: &str| Url::parse(url).map_err(|source| ConfigError::InvalidEndpoint { source });
	let descriptor = ProviderDescriptor::builder(ProviderId::new(PROVIDER_ID)?)
		.authorization_endpoint(parse(authorization_url(config.is_sandbox()))?)
		.token_endpoint(parse(&token_url(config.is_sandbox(), config.version()))?)
		.support_grants([GrantType::AuthorizationCode, GrantType::RefreshToken])
		.scope_delimiter(SCOPE_DELIMITER)
		.build()?;

	Ok(descriptor)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn version(value: f64) -> ApiVersion {
		ApiVersion::new(value).expect("Version fixture should be valid.")
	}

	#[test]
	fn endpoints_follow_environment() {
		assert_eq!(authorization_url(false), "https://business.revolut.com/app-confirm");
		assert_eq!(authorization_url(true), "https://sandbox-business.revolut.com/app-confirm");
		assert_eq!(
			token_url(false, ApiVersion::DEFAULT),
			"https://b2b.revolut.com/api/1.0/auth/token"
		);
		assert_eq!(
			token_url(true, ApiVersion::DEFAULT),
			"https://sandbox-b2b.revolut.com/api/1.0/auth/token"
		);
	}

	#[test]
	fn token_url_renders_version_with_one_fraction_digit() {
		assert_eq!(token_url(false, version(2.0)), "https://b2b.revolut.com/api/2.0/auth/token");
		assert_eq!(token_url(true, version(1.5)), "https://sandbox-b2b.revolut.com/api/1.5/auth/token");
	}

	#[test]
	fn descriptor_enables_code_and_refresh_grants() {
		let config = RevolutConfig::builder("client", "/keys/private.pem")
			.redirect_uri(Url::parse("https://example.com/callback").expect("Redirect should parse."))
			.build()
			.expect("Config fixture should build.");
		let descriptor = descriptor(&config).expect("Descriptor should validate.");

		assert_eq!(descriptor.id.as_ref(), PROVIDER_ID);
		assert!(descriptor.supports(GrantType::AuthorizationCode));
		assert!(descriptor.supports(GrantType::RefreshToken));
		assert_eq!(descriptor.quirks.scope_delimiter, ',');
	}
}
