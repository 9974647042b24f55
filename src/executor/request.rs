//! Structured request options consumed by [`RequestExecutor`](crate::executor::RequestExecutor).

// crates.io
use http::Method;
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::BearerToken, error::ConfigError};

/// Decoded JSON object returned by successful calls and accepted as request fields.
pub type JsonObject = Map<String, Value>;

/// One API call: verb, relative endpoint, fields, extra headers, and an optional bearer token.
///
/// For `GET` the fields travel as query parameters; for every other verb they travel as the JSON
/// body.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Endpoint relative to the configured base URL.
	pub endpoint: String,
	/// Query (GET) or body (other verbs) fields.
	pub fields: JsonObject,
	/// Caller-supplied headers such as `Signature`.
	pub extra_headers: Vec<(String, String)>,
	/// Bearer token sent as `Authorization: Bearer <token>`.
	pub bearer: Option<BearerToken>,
}
impl ApiRequest {
	/// Creates a request with no fields, headers, or token.
	pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
		Self {
			method,
			endpoint: endpoint.into(),
			fields: JsonObject::new(),
			extra_headers: Vec::new(),
			bearer: None,
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(endpoint: impl Into<String>) -> Self {
		Self::new(Method::GET, endpoint)
	}

	/// Shorthand for a `POST` request.
	pub fn post(endpoint: impl Into<String>) -> Self {
		Self::new(Method::POST, endpoint)
	}

	/// Shorthand for a `PUT` request.
	pub fn put(endpoint: impl Into<String>) -> Self {
		Self::new(Method::PUT, endpoint)
	}

	/// Shorthand for a `PATCH` request.
	pub fn patch(endpoint: impl Into<String>) -> Self {
		Self::new(Method::PATCH, endpoint)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(endpoint: impl Into<String>) -> Self {
		Self::new(Method::DELETE, endpoint)
	}

	/// Replaces all fields.
	pub fn fields(mut self, fields: JsonObject) -> Self {
		self.fields = fields;

		self
	}

	/// Adds or replaces one field.
	pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.fields.insert(key.into(), value.into());

		self
	}

	/// Appends an extra header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_headers.push((name.into(), value.into()));

		self
	}

	/// Attaches a bearer token.
	pub fn bearer(mut self, token: BearerToken) -> Self {
		self.bearer = Some(token);

		self
	}

	/// Returns `true` when fields belong in the query string rather than the body.
	pub fn uses_query(&self) -> bool {
		self.method == Method::GET
	}
}

/// Serializes request fields into the exact bytes sent as a JSON body.
///
/// The signer uses this same encoder, so a signature always covers the bytes on the wire.
pub fn encode_body(fields: &JsonObject) -> Result<Vec<u8>, ConfigError> {
	serde_json::to_vec(fields).map_err(ConfigError::BodyEncode)
}
