//! Scope sets requested in authorization URLs and echoed by token responses.
//!
//! Revolut joins scopes with commas while RFC 6749 uses spaces, so parsing accepts both and
//! rendering takes the delimiter from the provider descriptor.

// std
use std::collections::BTreeSet;
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError};
// self
use crate::_prelude::*;

const COMMA: char = ',';

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain whitespace or delimiter characters.
	#[error("Scope contains a separator character: {scope}.")]
	ContainsSeparator {
		/// The offending scope string.
		scope: String,
	},
}

/// Sorted, deduplicated set of OAuth scopes.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeSet(Arc<[String]>);
impl ScopeSet {
	/// Creates a scope set from individual scope names.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut set = BTreeSet::new();

		for scope in scopes {
			let scope: String = scope.into();

			if scope.is_empty() {
				return Err(ScopeValidationError::Empty);
			}
			if scope.chars().any(is_separator) {
				return Err(ScopeValidationError::ContainsSeparator { scope });
			}

			set.insert(scope);
		}

		Ok(Self(set.into_iter().collect()))
	}

	/// Parses a scope string separated by whitespace, commas, or both.
	///
	/// An empty string yields an empty set; a string made only of separators is rejected.
	pub fn parse(text: &str) -> Result<Self, ScopeValidationError> {
		if text.is_empty() {
			return Ok(Self::default());
		}

		let scopes = text.split(is_separator).filter(|scope| !scope.is_empty()).collect::<Vec<_>>();

		if scopes.is_empty() {
			return Err(ScopeValidationError::Empty);
		}

		Self::new(scopes)
	}

	/// Number of distinct scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the set contains `scope`.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.binary_search_by(|candidate| candidate.as_str().cmp(scope)).is_ok()
	}

	/// Iterator over scopes in sorted order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Joins the scopes with `delimiter`.
	pub fn join(&self, delimiter: char) -> String {
		self.0.join(delimiter.encode_utf8(&mut [0; 4]))
	}

	/// Space-delimited form (RFC 6749).
	pub fn normalized(&self) -> String {
		self.join(' ')
	}
}
impl Debug for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_set().entries(self.iter()).finish()
	}
}
impl Display for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.normalized())
	}
}
impl FromStr for ScopeSet {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
impl Serialize for ScopeSet {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_seq(self.iter())
	}
}
impl<'de> Deserialize<'de> for ScopeSet {
	/// Accepts a sequence of scope names or a single delimited string.
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Wire {
			List(Vec<String>),
			Text(String),
		}

		match Wire::deserialize(deserializer)? {
			Wire::List(scopes) => ScopeSet::new(scopes),
			Wire::Text(text) => ScopeSet::parse(&text),
		}
		.map_err(DeError::custom)
	}
}

fn is_separator(c: char) -> bool {
	c == COMMA || c.is_whitespace()
}
