//! Client-level error types shared by the executor, the token provider, and the facade.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every failure of a call lands in exactly one variant; nothing is retried or downgraded to a
/// default value before reaching the caller.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Private key material could not be loaded.
	#[error(transparent)]
	Credentials(#[from] CredentialsError),
	/// Signing primitive failed to produce a signature.
	#[error(transparent)]
	Signing(#[from] SigningError),

	/// Transport failure (connection, DNS, TLS, timeout).
	#[error("Transport error while calling {url}.")]
	Transport {
		/// Fully resolved request URL.
		url: Url,
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// Remote side answered outside the 200-299 range.
	#[error("HTTP status {status} from {url}: {body}.")]
	HttpStatus {
		/// Fully resolved request URL.
		url: Url,
		/// HTTP status code returned by the server.
		status: u16,
		/// Raw response body, lossily decoded as UTF-8.
		body: String,
	},
	/// Successful status but no response body.
	#[error("Empty response from {url}.")]
	EmptyResponse {
		/// Fully resolved request URL.
		url: Url,
	},
	/// Body could not be decoded into a JSON object.
	#[error("Invalid JSON from {url}: {detail}.")]
	MalformedJson {
		/// Fully resolved request URL.
		url: Url,
		/// Parser diagnostic, including the JSON path when known.
		detail: String,
		/// Raw response body, lossily decoded as UTF-8.
		body: String,
	},
	/// Authentication succeeded at the HTTP level but the payload carries no token.
	#[error("Invalid token response: {raw}.")]
	InvalidTokenResponse {
		/// Decoded response re-serialized as JSON.
		raw: String,
	},
}
impl Error {
	/// Returns the HTTP status attached to the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::HttpStatus { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Returns the request URL attached to the error, if any.
	pub fn url(&self) -> Option<&Url> {
		match self {
			Self::Transport { url, .. }
			| Self::HttpStatus { url, .. }
			| Self::EmptyResponse { url }
			| Self::MalformedJson { url, .. } => Some(url),
			_ => None,
		}
	}

	/// Returns `true` when the failure happened below HTTP (connection, DNS, TLS, timeout).
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport { .. })
	}
}
impl From<crate::config::ClientConfigError> for Error {
	fn from(e: crate::config::ClientConfigError) -> Self {
		Self::Config(e.into())
	}
}

/// Configuration and request-construction failures raised before any network call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint would escape the configured base URL or is otherwise unusable.
	#[error("Endpoint `{endpoint}` is invalid: {reason}.")]
	InvalidEndpoint {
		/// Endpoint as supplied by the caller.
		endpoint: String,
		/// Why the endpoint was refused.
		reason: &'static str,
	},
	/// Resolved URL uses a scheme other than HTTP or HTTPS.
	#[error("Only http and https URLs are allowed, got `{scheme}`.")]
	UnsupportedScheme {
		/// Offending scheme.
		scheme: String,
	},
	/// Caller supplied a header name that is not valid HTTP.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Offending header name.
		name: String,
		/// Underlying parsing failure.
		#[source]
		source: http::header::InvalidHeaderName,
	},
	/// Caller supplied a header value that is not valid HTTP.
	#[error("Header `{name}` carries an invalid value.")]
	InvalidHeaderValue {
		/// Header whose value was rejected.
		name: String,
		/// Underlying parsing failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// Request fields could not be serialized as JSON.
	#[error("Request fields could not be encoded as JSON.")]
	BodyEncode(#[source] serde_json::Error),
	/// Client configuration failed validation.
	#[error(transparent)]
	Client(#[from] crate::config::ClientConfigError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Private key material could not be turned into a signer.
#[derive(Debug, ThisError)]
pub enum CredentialsError {
	/// PEM input is neither a PKCS#8 nor a PKCS#1 RSA private key.
	#[error("Private key is not a PKCS#8 or PKCS#1 RSA key in PEM format.")]
	InvalidPrivateKey {
		/// PKCS#8 decoding failure (the last format attempted).
		#[source]
		source: rsa::pkcs8::Error,
	},
	/// Username is empty.
	#[error("Username cannot be empty.")]
	EmptyUsername,
}

/// Signing primitive failure.
#[derive(Debug, ThisError)]
#[error("Signing the authentication payload failed.")]
pub struct SigningError {
	#[source]
	source: BoxError,
}
impl SigningError {
	/// Wraps a signer-specific failure.
	pub fn new(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self { source: Box::new(src) }
	}
}
