//! Revolut Business provider for the `oauth2` crate.
//!
//! Token requests are authenticated with signed JWT client assertions instead of a client
//! secret. Endpoints follow the sandbox flag and API version, and error responses from the
//! token endpoint are normalized into [`provider::IdentityProviderError`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod ext;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
pub mod revolut;

pub use revolut::*;

#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::path::PathBuf;
	// self
	use crate::{
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		revolut::{Revolut, RevolutConfig},
	};

	/// Revolut adapter type alias used by reqwest-backed integration tests.
	pub type ReqwestTestRevolut = Revolut<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Client identifier shared by test fixtures.
	pub const TEST_CLIENT_ID: &str = "test_client_id";
	/// Redirect URI shared by test fixtures.
	pub const TEST_REDIRECT_URI: &str = "https://example.com/callback";

	/// Absolute path of the RSA private key fixture used to sign assertions.
	pub fn test_private_key_path() -> PathBuf {
		PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/test_key.pem")
	}

	/// Absolute path of the RSA public key matching [`test_private_key_path`].
	pub fn test_public_key_path() -> PathBuf {
		PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/test_key.pub.pem")
	}

	/// `file://` locator pointing at the private key fixture.
	pub fn test_private_key_locator() -> String {
		format!("file://{}", test_private_key_path().display())
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a sandbox configuration signed with the private key fixture.
	pub fn test_config() -> RevolutConfig {
		RevolutConfig::builder(TEST_CLIENT_ID, test_private_key_locator())
			.redirect_uri(Url::parse(TEST_REDIRECT_URI).expect("Failed to parse test redirect URI."))
			.sandbox(true)
			.build()
			.expect("Failed to build test Revolut configuration.")
	}

	/// Constructs a [`Revolut`] adapter whose token endpoint is redirected to `token_url`
	/// (typically an `httpmock` server) using the reqwest transport.
	pub fn build_reqwest_test_revolut(token_url: Url) -> ReqwestTestRevolut {
		Revolut::with_http_client(
			test_config(),
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
		.and_then(|revolut| revolut.with_token_endpoint(token_url))
		.expect("Failed to build test Revolut adapter.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use jsonwebtoken;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
