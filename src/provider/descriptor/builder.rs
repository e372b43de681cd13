// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	provider::{GrantType, ProviderDescriptor, ProviderEndpoints, ProviderQuirks, SupportedGrants},
};

/// Errors raised while assembling a [`ProviderDescriptor`].
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// No authorization endpoint was set.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// No token endpoint was set.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// No grant was enabled.
	#[error("Descriptor must enable at least one grant type.")]
	NoSupportedGrants,
	/// An endpoint does not use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint role.
		endpoint: &'static str,
		/// Rejected URL.
		url: String,
	},
	/// The scope delimiter is a control character.
	#[error("Scope delimiter must be a printable character.")]
	InvalidScopeDelimiter {
		/// Rejected delimiter.
		delimiter: char,
	},
}

/// Incrementally assembles a [`ProviderDescriptor`]; nothing is validated until
/// [`ProviderDescriptorBuilder::build`].
#[derive(Clone, Debug)]
pub struct ProviderDescriptorBuilder {
	id: ProviderId,
	authorization: Option<Url>,
	token: Option<Url>,
	grants: SupportedGrants,
	quirks: ProviderQuirks,
}
impl ProviderDescriptorBuilder {
	/// Starts an empty descriptor named `id`.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			authorization: None,
			token: None,
			grants: SupportedGrants::default(),
			quirks: ProviderQuirks::default(),
		}
	}

	/// Sets the page end-users are redirected to for consent.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization = Some(url);

		self
	}

	/// Sets the endpoint that exchanges codes and refresh tokens.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token = Some(url);

		self
	}

	/// Enables `grant`.
	pub fn support_grant(self, grant: GrantType) -> Self {
		self.support_grants([grant])
	}

	/// Enables every grant in `grants`.
	pub fn support_grants(mut self, grants: impl IntoIterator<Item = GrantType>) -> Self {
		self.grants = grants.into_iter().fold(self.grants, SupportedGrants::enable);

		self
	}

	/// Sets the character placed between scopes in `scope` parameters.
	pub fn scope_delimiter(mut self, delimiter: char) -> Self {
		self.quirks.scope_delimiter = delimiter;

		self
	}

	/// Validates the collected values.
	///
	/// Missing endpoints are reported before grants, and HTTPS is checked for the
	/// authorization endpoint before the token endpoint.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let authorization =
			self.authorization.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let token = self.token.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;

		if self.grants.is_empty() {
			return Err(ProviderDescriptorError::NoSupportedGrants);
		}

		require_https("authorization", &authorization)?;
		require_https("token", &token)?;

		if self.quirks.scope_delimiter.is_control() {
			return Err(ProviderDescriptorError::InvalidScopeDelimiter {
				delimiter: self.quirks.scope_delimiter,
			});
		}

		Ok(ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { authorization, token },
			supported_grants: self.grants,
			quirks: self.quirks,
		})
	}
}
impl From<&ProviderDescriptor> for ProviderDescriptorBuilder {
	fn from(descriptor: &ProviderDescriptor) -> Self {
		Self {
			id: descriptor.id.clone(),
			authorization: Some(descriptor.endpoints.authorization.clone()),
			token: Some(descriptor.endpoints.token.clone()),
			grants: descriptor.supported_grants,
			quirks: descriptor.quirks,
		}
	}
}

fn require_https(endpoint: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	match url.scheme() {
		"https" => Ok(()),
		_ => Err(ProviderDescriptorError::InsecureEndpoint { endpoint, url: url.to_string() }),
	}
}
