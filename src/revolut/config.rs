//! Construction options for the Revolut adapter.
//!
//! Options arrive either through [`RevolutConfig::builder`] or as a loosely typed JSON
//! object via [`RevolutConfig::from_options`]. The JSON path validates the adapter's own
//! options first, in a fixed order, before checking the options every OAuth client needs.

// self
use crate::{
	_prelude::*,
	auth::{ClientId, ScopeSet},
	error::ConfigError,
	revolut::PrivateKeySource,
};

/// Revolut Business API version used in token endpoint paths.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ApiVersion(f64);
impl ApiVersion {
	/// Version used when none is configured.
	pub const DEFAULT: Self = Self(1.0);

	/// Validates a version number.
	pub fn new(version: f64) -> Result<Self, ConfigError> {
		if version.is_finite() && version > 0.0 {
			Ok(Self(version))
		} else {
			Err(ConfigError::NonPositiveVersion)
		}
	}

	/// Raw version number.
	pub fn get(self) -> f64 {
		self.0
	}
}
impl Default for ApiVersion {
	fn default() -> Self {
		Self::DEFAULT
	}
}
impl Display for ApiVersion {
	/// Renders one fractional digit, rounding halves away from zero (`2` → `2.0`).
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let rounded = (self.0 * 10.0).round() / 10.0;

		write!(f, "{rounded:.1}")
	}
}

/// Immutable adapter configuration.
#[derive(Clone, Debug)]
pub struct RevolutConfig {
	client_id: ClientId,
	private_key: PrivateKeySource,
	redirect_uri: Url,
	version: ApiVersion,
	sandbox: bool,
	default_scopes: ScopeSet,
}
impl RevolutConfig {
	/// Option key holding the OAuth client identifier.
	pub const CLIENT_ID: &'static str = "clientId";
	/// Option key holding the redirect URI.
	pub const REDIRECT_URI: &'static str = "redirectUri";
	/// Option key holding the private key locator.
	pub const PRIVATE_KEY: &'static str = "privateKey";
	/// Option key holding the API version.
	pub const VERSION: &'static str = "version";
	/// Option key holding the sandbox flag.
	pub const IS_SANDBOX: &'static str = "isSandbox";

	/// Starts a builder for the given client and private key locator.
	pub fn builder(
		client_id: impl Into<String>,
		private_key: impl Into<String>,
	) -> RevolutConfigBuilder {
		RevolutConfigBuilder::new(client_id, private_key)
	}

	/// Builds a configuration from a JSON options object.
	///
	/// Checks run in order and stop at the first failure:
	///
	/// 1. `privateKey` must be present.
	/// 2. `privateKey` must not be `null` or `""`.
	/// 3. `version`, when present, must be numeric (a number or a numeric string).
	/// 4. `isSandbox`, when present, must be a boolean.
	///
	/// `clientId` and `redirectUri` are validated afterwards.
	pub fn from_options(options: &JsonMap<String, JsonValue>) -> Result<Self, ConfigError> {
		let private_key = match options.get(Self::PRIVATE_KEY) {
			None => return Err(ConfigError::MissingPrivateKey),
			Some(JsonValue::Null) => return Err(ConfigError::EmptyPrivateKey),
			Some(JsonValue::String(locator)) if locator.is_empty() =>
				return Err(ConfigError::EmptyPrivateKey),
			Some(value) => value,
		};
		let version = match options.get(Self::VERSION) {
			Some(value) => Some(numeric_value(value).ok_or(ConfigError::NonNumericVersion)?),
			None => None,
		};
		let sandbox = match options.get(Self::IS_SANDBOX) {
			Some(JsonValue::Bool(flag)) => *flag,
			Some(_) => return Err(ConfigError::NonBooleanSandbox),
			None => false,
		};
		let private_key = string_option(Self::PRIVATE_KEY, private_key)?;
		let client_id = string_option(
			Self::CLIENT_ID,
			options.get(Self::CLIENT_ID).ok_or(ConfigError::MissingClientId)?,
		)?;
		let redirect_uri = string_option(
			Self::REDIRECT_URI,
			options.get(Self::REDIRECT_URI).ok_or(ConfigError::MissingRedirectUri)?,
		)?;
		let redirect_uri =
			Url::parse(redirect_uri).map_err(|source| ConfigError::InvalidRedirect { source })?;
		let mut builder =
			Self::builder(client_id, private_key).redirect_uri(redirect_uri).sandbox(sandbox);

		if let Some(version) = version {
			builder = builder.version(version);
		}

		builder.build()
	}

	/// OAuth client identifier; also the assertion subject.
	pub fn client_id(&self) -> &ClientId {
		&self.client_id
	}

	/// Signing key location.
	pub fn private_key(&self) -> &PrivateKeySource {
		&self.private_key
	}

	/// Redirect URI; its host is the assertion issuer.
	pub fn redirect_uri(&self) -> &Url {
		&self.redirect_uri
	}

	/// API version used in the token endpoint path.
	pub fn version(&self) -> ApiVersion {
		self.version
	}

	/// Whether the sandbox environment is targeted.
	pub fn is_sandbox(&self) -> bool {
		self.sandbox
	}

	/// Scopes requested when the caller does not name any.
	pub fn default_scopes(&self) -> &ScopeSet {
		&self.default_scopes
	}
}

/// Builder for [`RevolutConfig`].
#[derive(Clone, Debug)]
pub struct RevolutConfigBuilder {
	client_id: String,
	private_key: String,
	redirect_uri: Option<Url>,
	version: f64,
	sandbox: bool,
	default_scopes: Option<ScopeSet>,
}
impl RevolutConfigBuilder {
	const DEFAULT_SCOPE: &'static str = "READ";

	fn new(client_id: impl Into<String>, private_key: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			private_key: private_key.into(),
			redirect_uri: None,
			version: ApiVersion::DEFAULT.get(),
			sandbox: false,
			default_scopes: None,
		}
	}

	/// Sets the redirect URI registered with Revolut.
	pub fn redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Overrides the API version (defaults to `1`).
	pub fn version(mut self, version: f64) -> Self {
		self.version = version;

		self
	}

	/// Targets the sandbox environment.
	pub fn sandbox(mut self, sandbox: bool) -> Self {
		self.sandbox = sandbox;

		self
	}

	/// Overrides the default scopes (defaults to `READ`).
	pub fn default_scopes(mut self, scopes: ScopeSet) -> Self {
		self.default_scopes = Some(scopes);

		self
	}

	/// Validates the options and produces a [`RevolutConfig`].
	pub fn build(self) -> Result<RevolutConfig, ConfigError> {
		let private_key = PrivateKeySource::parse(&self.private_key)?;
		let client_id = ClientId::new(&self.client_id)?;
		let redirect_uri = self.redirect_uri.ok_or(ConfigError::MissingRedirectUri)?;
		let version = ApiVersion::new(self.version)?;
		let default_scopes = match self.default_scopes {
			Some(scopes) => scopes,
			None => ScopeSet::new([Self::DEFAULT_SCOPE])?,
		};

		Ok(RevolutConfig {
			client_id,
			private_key,
			redirect_uri,
			version,
			sandbox: self.sandbox,
			default_scopes,
		})
	}
}

/// Numeric in the lenient sense: a JSON number, or a string holding a finite number.
fn numeric_value(value: &JsonValue) -> Option<f64> {
	match value {
		JsonValue::Number(number) => number.as_f64(),
		JsonValue::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
		_ => None,
	}
}

fn string_option<'a>(option: &'static str, value: &'a JsonValue) -> Result<&'a str, ConfigError> {
	value.as_str().ok_or(ConfigError::NonStringOption { option })
}
