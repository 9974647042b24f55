//! Single-attempt request execution and outcome classification.
//!
//! [`RequestExecutor::request`] resolves an [`ApiRequest`] against the configured base URL,
//! performs exactly one call through the [`ApiHttpClient`], and classifies the result in a fixed
//! order: transport failure, non-2xx status, empty body, undecodable JSON, success. Nothing is
//! retried here; callers own that decision.

mod request;
mod response;
mod route;

pub use request::*;
pub use response::*;

// crates.io
use http::{
	HeaderMap, HeaderName, HeaderValue,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	error::ConfigError,
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::{ApiHttpClient, TransportRequest, TransportResponse},
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestHttpClient;

const APPLICATION_JSON: &str = "application/json";

#[cfg(feature = "reqwest")]
/// Executor specialized for the crate's default reqwest transport.
pub type ReqwestExecutor = RequestExecutor<ReqwestHttpClient>;

/// Performs API exchanges rooted under a fixed base URL.
///
/// Cloning is cheap: the transport is shared behind an [`Arc`].
pub struct RequestExecutor<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	config: ClientConfig,
}
impl<C> RequestExecutor<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates an executor that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config }
	}

	/// Configuration the executor was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Resolves `request` into the exact artifact handed to the transport, without sending it.
	pub fn prepare(&self, request: &ApiRequest) -> Result<TransportRequest> {
		let mut url = route::join_endpoint(self.config.base_url(), &request.endpoint)?;

		if !matches!(url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { scheme: url.scheme().to_owned() }.into());
		}

		let body = if request.uses_query() {
			route::append_query(&mut url, &request.fields);

			None
		} else {
			Some(encode_body(&request.fields)?)
		};
		let headers = build_headers(request)?;

		Ok(TransportRequest {
			method: request.method.clone(),
			url,
			headers,
			body,
			timeout: self.config.timeout(),
		})
	}

	/// Performs one exchange and returns the decoded JSON document.
	pub async fn request(&self, request: ApiRequest) -> Result<JsonPayload> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "request");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.dispatch(&request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	async fn dispatch(&self, request: &ApiRequest) -> Result<JsonPayload> {
		let prepared = self.prepare(request)?;
		let url = prepared.url.clone();

		obs::debug_event!(method = %prepared.method, url = %url, "dispatching API request");

		let response = self
			.http_client
			.execute(prepared)
			.await
			.map_err(|source| Error::Transport { url: url.clone(), source: Box::new(source) })?;

		classify(url, response)
	}
}
#[cfg(feature = "reqwest")]
impl RequestExecutor<ReqwestHttpClient> {
	/// Creates an executor that provisions its own reqwest transport from `config`.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::new(&config)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Clone for RequestExecutor<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), config: self.config.clone() }
	}
}
impl<C> Debug for RequestExecutor<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestExecutor").field("config", &self.config).finish()
	}
}

fn build_headers(request: &ApiRequest) -> Result<HeaderMap, ConfigError> {
	let mut headers = HeaderMap::new();

	for (name, value) in &request.extra_headers {
		let header_name = HeaderName::from_bytes(name.trim().as_bytes())
			.map_err(|source| ConfigError::InvalidHeaderName { name: name.clone(), source })?;
		let header_value = HeaderValue::from_str(value.trim()).map_err(|source| {
			ConfigError::InvalidHeaderValue { name: name.clone(), source }
		})?;

		headers.append(header_name, header_value);
	}

	headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
	headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

	if let Some(token) = &request.bearer {
		let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose())).map_err(
			|source| ConfigError::InvalidHeaderValue { name: AUTHORIZATION.as_str().to_owned(), source },
		)?;

		value.set_sensitive(true);
		headers.insert(AUTHORIZATION, value);
	}

	Ok(headers)
}

/// Turns a raw transport response into a JSON document or a classified error.
fn classify(url: Url, response: TransportResponse) -> Result<JsonPayload> {
	let TransportResponse { status, body } = response;

	if !(200..=299).contains(&status) {
		return Err(Error::HttpStatus { url, status, body: lossy(&body) });
	}
	if body.is_empty() {
		return Err(Error::EmptyResponse { url });
	}

	let deserializer = &mut serde_json::Deserializer::from_slice(&body);

	match serde_path_to_error::deserialize::<_, serde_json::Value>(deserializer) {
		Ok(serde_json::Value::Object(object)) => Ok(JsonPayload::Object(object)),
		Ok(serde_json::Value::Array(items)) => Ok(JsonPayload::Array(items)),
		Ok(other) => Err(Error::MalformedJson {
			url,
			detail: format!("expected a JSON object or array, found {}", json_kind(&other)),
			body: lossy(&body),
		}),
		Err(err) => Err(Error::MalformedJson {
			url,
			detail: describe_parse_error(&err),
			body: lossy(&body),
		}),
	}
}

fn describe_parse_error(err: &serde_path_to_error::Error<serde_json::Error>) -> String {
	let path = err.path().to_string();

	if path.is_empty() || path == "." {
		err.inner().to_string()
	} else {
		format!("{} at `{path}`", err.inner())
	}
}

fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "a boolean",
		serde_json::Value::Number(_) => "a number",
		serde_json::Value::String(_) => "a string",
		serde_json::Value::Array(_) => "an array",
		serde_json::Value::Object(_) => "an object",
	}
}

fn lossy(body: &[u8]) -> String {
	String::from_utf8_lossy(body).into_owned()
}
