//! Validated identifiers for OAuth clients and provider descriptors.

// std
use std::{borrow::Borrow, marker::PhantomData, ops::Deref};
// self
use crate::_prelude::*;

/// Compile-time tag naming what an [`Identifier`] identifies.
pub trait IdentifierKind: 'static {
	/// Human-readable kind used in errors and `Debug` output.
	const NAME: &'static str;
	/// Longest accepted identifier, in bytes.
	const MAX_LEN: usize = 128;
}

/// Tag for OAuth client identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClientKind {}
impl IdentifierKind for ClientKind {
	const NAME: &'static str = "Client";
}

/// Tag for provider descriptor identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProviderKind {}
impl IdentifierKind for ProviderKind {
	const NAME: &'static str = "Provider";
	const MAX_LEN: usize = 64;
}

/// OAuth 2.0 client identifier issued by Revolut when the certificate is uploaded.
pub type ClientId = Identifier<ClientKind>;
/// Identifier for an OAuth provider descriptor.
pub type ProviderId = Identifier<ProviderKind>;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier.
		kind: &'static str,
	},
	/// The identifier exceeded the allowed length.
	#[error("{kind} identifier exceeds {max} bytes.")]
	TooLong {
		/// Kind of identifier.
		kind: &'static str,
		/// Maximum permitted length.
		max: usize,
	},
}

/// Non-empty identifier without whitespace, tagged with its kind.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(
	try_from = "String",
	into = "String",
	bound(serialize = "", deserialize = "K: IdentifierKind")
)]
pub struct Identifier<K> {
	value: Arc<str>,
	kind: PhantomData<K>,
}
impl<K> Identifier<K>
where
	K: IdentifierKind,
{
	/// Validates `value` and wraps it.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let value = value.as_ref();

		if value.is_empty() {
			return Err(IdentifierError::Empty { kind: K::NAME });
		}
		if value.chars().any(char::is_whitespace) {
			return Err(IdentifierError::ContainsWhitespace { kind: K::NAME });
		}
		if value.len() > K::MAX_LEN {
			return Err(IdentifierError::TooLong { kind: K::NAME, max: K::MAX_LEN });
		}

		Ok(Self { value: Arc::from(value), kind: PhantomData })
	}
}
impl<K> Clone for Identifier<K> {
	fn clone(&self) -> Self {
		Self { value: self.value.clone(), kind: PhantomData }
	}
}
impl<K> Deref for Identifier<K> {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.value
	}
}
impl<K> AsRef<str> for Identifier<K> {
	fn as_ref(&self) -> &str {
		&self.value
	}
}
impl<K> Borrow<str> for Identifier<K> {
	fn borrow(&self) -> &str {
		&self.value
	}
}
impl<K> From<Identifier<K>> for String {
	fn from(id: Identifier<K>) -> Self {
		id.value.to_string()
	}
}
impl<K> TryFrom<String> for Identifier<K>
where
	K: IdentifierKind,
{
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl<K> FromStr for Identifier<K>
where
	K: IdentifierKind,
{
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl<K> Debug for Identifier<K>
where
	K: IdentifierKind,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}({})", K::NAME, self.value)
	}
}
impl<K> Display for Identifier<K> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.value)
	}
}
