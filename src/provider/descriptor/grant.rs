// self
use crate::_prelude::*;

/// OAuth 2.0 grant types the token engine can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant; consumes the `code` option.
	AuthorizationCode,
	/// Refresh Token grant; consumes the `refresh_token` option.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}

	/// Option the grant reads its credential from.
	pub const fn credential_option(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl FromStr for GrantType {
	type Err = UnknownGrantType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"authorization_code" => Ok(GrantType::AuthorizationCode),
			"refresh_token" => Ok(GrantType::RefreshToken),
			other => Err(UnknownGrantType { grant: other.to_owned() }),
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unrecognized grant identifier.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown grant type `{grant}`.")]
pub struct UnknownGrantType {
	/// Rejected grant identifier.
	pub grant: String,
}

/// Collection of grant flags wired into the descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedGrants {
	/// Indicates whether the Authorization Code grant is enabled.
	pub authorization_code: bool,
	/// Indicates whether the Refresh Token grant is enabled.
	pub refresh_token: bool,
}
impl SupportedGrants {
	/// Returns true if the provided grant is supported.
	pub fn supports(self, grant: GrantType) -> bool {
		match grant {
			GrantType::AuthorizationCode => self.authorization_code,
			GrantType::RefreshToken => self.refresh_token,
		}
	}

	/// Marks a grant as supported.
	pub fn enable(mut self, grant: GrantType) -> Self {
		match grant {
			GrantType::AuthorizationCode => self.authorization_code = true,
			GrantType::RefreshToken => self.refresh_token = true,
		}

		self
	}

	/// Returns true when no grants are enabled.
	pub fn is_empty(self) -> bool {
		!self.authorization_code && !self.refresh_token
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn grant_identifiers_round_trip() {
		for grant in [GrantType::AuthorizationCode, GrantType::RefreshToken] {
			assert_eq!(GrantType::from_str(grant.as_str()), Ok(grant));
		}

		assert!(GrantType::from_str("password").is_err());
		assert!(GrantType::from_str("client_credentials").is_err());
	}

	#[test]
	fn supported_grants_track_enabled_flags() {
		let grants = SupportedGrants::default().enable(GrantType::AuthorizationCode);

		assert!(grants.supports(GrantType::AuthorizationCode));
		assert!(!grants.supports(GrantType::RefreshToken));
		assert!(!grants.is_empty());
		assert!(SupportedGrants::default().is_empty());
	}
}
