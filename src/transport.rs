//! Transport primitives for API exchanges.
//!
//! The module exposes [`ApiHttpClient`] alongside the [`TransportRequest`] and
//! [`TransportResponse`] artifacts so downstream crates can plug in a custom HTTP stack without
//! touching the executor's URL rules or outcome classification. A transport performs exactly one
//! call per [`ApiHttpClient::execute`]; it must not retry, follow redirects, or interpret the
//! status code.

// crates.io
use http::{HeaderMap, Method};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, error::ConfigError};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing a single API exchange.
///
/// The trait is the executor's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can back several executors, and the returned future
/// must be `Send` so callers can spawn it on a multi-threaded runtime.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport (connection, DNS, TLS, timeout).
	type TransportError: 'static + Send + Sync + StdError;

	/// Performs the call described by `request`, honoring [`TransportRequest::timeout`].
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Fully resolved request handed to an [`ApiHttpClient`].
#[derive(Clone, Debug)]
pub struct TransportRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute URL rooted under the configured base.
	pub url: Url,
	/// Headers to send, including the fixed JSON headers.
	pub headers: HeaderMap,
	/// JSON body for non-GET requests.
	pub body: Option<Vec<u8>>,
	/// Upper bound for the whole exchange.
	pub timeout: StdDuration,
}

/// Raw outcome of a completed HTTP exchange, before classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Redirects are never followed: a `3xx` from the API surfaces as a status error instead of
/// sending the request (and its bearer token) to another location. Reqwest itself only speaks
/// `http` and `https`, which keeps the transport inside the allowed protocol set.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a reqwest client honoring the configured timeout with redirects disabled.
	pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.timeout(config.timeout())
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// The per-request timeout is still applied, but redirect handling is whatever the supplied
	/// client was configured with.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: TransportRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let TransportRequest { method, url, headers, body, timeout } = request;
			let mut builder = client.request(method, url).headers(headers).timeout(timeout);

			if let Some(body) = body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(TransportResponse { status, body })
		})
	}
}
