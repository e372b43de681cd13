//! HTTP seam between the adapter and the token endpoint.
//!
//! `oauth2` hides the status line once a response is parsed, yet Revolut error normalization
//! falls back to the reason phrase. Every transport therefore reports the status and reason of
//! the last response through a [`ResponseMetadataSlot`] shared with the engine.

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::_prelude::*;

/// Transport able to execute token requests while publishing response metadata.
///
/// Handles returned by [`TokenHttpClient::with_metadata`] must own their state so the request
/// future stays `Send` for the whole exchange.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Error raised by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Per-request [`AsyncHttpClient`] bound to a metadata slot.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Returns a handle that clears `slot` before sending and fills it once a status line
	/// arrives, for success and error statuses alike.
	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle;
}

/// Status line of the most recent token-endpoint response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code, if a response arrived.
	pub status: Option<u16>,
	/// Reason phrase, if the transport exposes one.
	pub reason: Option<String>,
}
impl ResponseMetadata {
	/// Metadata carrying the canonical reason phrase of `status`.
	pub fn from_status(status: oauth2::http::StatusCode) -> Self {
		Self::from_status_line(status, None)
	}

	/// Metadata for a status line whose reason phrase may differ from the canonical one.
	///
	/// The canonical phrase is used only when the server sent none of its own.
	pub fn from_status_line(status: oauth2::http::StatusCode, reason: Option<&str>) -> Self {
		Self {
			status: Some(status.as_u16()),
			reason: reason.or_else(|| status.canonical_reason()).map(ToOwned::to_owned),
		}
	}
}

/// Shared cell the transport writes and the engine drains after each request.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Replaces the stored metadata.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Drains the stored metadata.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Reqwest transport for token requests.
///
/// Clients built by [`ReqwestHttpClient::new`] never follow redirects; clients passed to
/// [`ReqwestHttpClient::with_client`] should be configured the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
	inner: ReqwestClient,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client that never follows redirects.
	pub fn new() -> Result<Self> {
		let inner = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(crate::error::ConfigError::from)?;

		Ok(Self { inner })
	}

	/// Uses an existing reqwest client as is.
	pub fn with_client(inner: ReqwestClient) -> Self {
		Self { inner }
	}
}
#[cfg(feature = "reqwest")]
impl std::ops::Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = ReqwestTokenHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		ReqwestTokenHandle { client: self.inner.clone(), slot }
	}
}

/// [`AsyncHttpClient`] handle produced by [`ReqwestHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTokenHandle {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}
#[cfg(feature = "reqwest")]
impl ReqwestTokenHandle {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError<ReqwestError>> {
		self.slot.take();

		let response = self.client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
		let status = response.status();
		// hyper keeps the server's phrase only when it differs from the canonical one.
		let reason = response
			.extensions()
			.get::<hyper::ext::ReasonPhrase>()
			.and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok());

		self.slot.store(ResponseMetadata::from_status_line(status, reason));

		let headers = response.headers().clone();
		let mut relayed = HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

		*relayed.status_mut() = status;
		*relayed.headers_mut() = headers;

		Ok(relayed)
	}
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestTokenHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(self.send(request))
	}
}
