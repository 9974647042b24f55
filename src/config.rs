//! Client configuration: base address, per-request timeout, and token defaults.
//!
//! [`ClientConfig`] is immutable once built. Use [`ClientConfig::builder`] to start from the
//! defaults; [`ClientConfigBuilder::build`] validates the result so the executor never has to
//! re-check the base URL on the hot path.

// self
use crate::_prelude::*;

/// Base address of the order-management API.
pub const DEFAULT_BASE_URL: &str = "http://orders.ne.localhost/api/v1";
/// Per-request transport timeout.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);
/// Requested token lifetime, in seconds.
pub const DEFAULT_TOKEN_LIFETIME: i64 = 1800;

/// Relative endpoints exposed by the API.
pub mod endpoint {
	/// Authentication handshake.
	pub const AUTH: &str = "auth";
	/// Liveness probe.
	pub const PING: &str = "ping";
	/// Order collection.
	pub const ORDERS: &str = "orders";
}

/// Errors raised while validating a [`ClientConfig`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// Base URL could not be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw base URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than HTTP or HTTPS.
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL cannot be used as a path prefix: {url}.")]
	CannotBeABase {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL carries a query string or fragment.
	#[error("Base URL must not carry a query or fragment: {url}.")]
	QueryOrFragment {
		/// Base URL that failed validation.
		url: String,
	},
	/// Timeout of zero would fail every request.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
	/// Authentication endpoint is blank.
	#[error("Authentication endpoint cannot be empty.")]
	EmptyAuthEndpoint,
}

/// Immutable configuration shared by the executor and the token provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClientConfig", into = "RawClientConfig")]
pub struct ClientConfig {
	base_url: Url,
	timeout: StdDuration,
	auth_endpoint: String,
	default_token_lifetime: i64,
}
impl ClientConfig {
	/// Creates a new builder seeded with the crate defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Base URL every endpoint is rooted under.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Per-request transport timeout.
	pub fn timeout(&self) -> StdDuration {
		self.timeout
	}

	/// Endpoint used for the signed authentication exchange.
	pub fn auth_endpoint(&self) -> &str {
		&self.auth_endpoint
	}

	/// Token lifetime requested when callers do not pass one, in seconds.
	pub fn default_token_lifetime(&self) -> i64 {
		self.default_token_lifetime
	}

	fn validate(&self) -> Result<(), ClientConfigError> {
		let url = &self.base_url;

		if !matches!(url.scheme(), "http" | "https") {
			return Err(ClientConfigError::UnsupportedScheme { url: url.to_string() });
		}
		if url.cannot_be_a_base() {
			return Err(ClientConfigError::CannotBeABase { url: url.to_string() });
		}
		if url.query().is_some() || url.fragment().is_some() {
			return Err(ClientConfigError::QueryOrFragment { url: url.to_string() });
		}
		if self.timeout.is_zero() {
			return Err(ClientConfigError::ZeroTimeout);
		}
		if self.auth_endpoint.trim_matches('/').is_empty() {
			return Err(ClientConfigError::EmptyAuthEndpoint);
		}

		Ok(())
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	/// Raw base URL; parsed during [`build`](Self::build).
	pub base_url: Option<String>,
	/// Per-request transport timeout.
	pub timeout: Option<StdDuration>,
	/// Authentication endpoint override.
	pub auth_endpoint: Option<String>,
	/// Default token lifetime override, in seconds.
	pub default_token_lifetime: Option<i64>,
}
impl ClientConfigBuilder {
	/// Sets the base URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Sets the per-request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Overrides the authentication endpoint.
	pub fn auth_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.auth_endpoint = Some(endpoint.into());

		self
	}

	/// Overrides the default token lifetime, in seconds.
	pub fn default_token_lifetime(mut self, seconds: i64) -> Self {
		self.default_token_lifetime = Some(seconds);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
		let config = ClientConfig {
			base_url,
			timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
			auth_endpoint: self.auth_endpoint.unwrap_or_else(|| endpoint::AUTH.into()),
			default_token_lifetime: self.default_token_lifetime.unwrap_or(DEFAULT_TOKEN_LIFETIME),
		};

		config.validate()?;

		Ok(config)
	}
}

/// Serde representation; the timeout travels as whole seconds.
#[derive(Serialize, Deserialize)]
struct RawClientConfig {
	#[serde(default = "default_base_url_string")]
	base_url: String,
	#[serde(default = "default_timeout_secs")]
	timeout_secs: u64,
	#[serde(default = "default_auth_endpoint")]
	auth_endpoint: String,
	#[serde(default = "default_token_lifetime")]
	default_token_lifetime: i64,
}
impl TryFrom<RawClientConfig> for ClientConfig {
	type Error = ClientConfigError;

	fn try_from(raw: RawClientConfig) -> Result<Self, Self::Error> {
		ClientConfig::builder()
			.base_url(raw.base_url)
			.timeout(StdDuration::from_secs(raw.timeout_secs))
			.auth_endpoint(raw.auth_endpoint)
			.default_token_lifetime(raw.default_token_lifetime)
			.build()
	}
}
impl From<ClientConfig> for RawClientConfig {
	fn from(config: ClientConfig) -> Self {
		Self {
			base_url: config.base_url.into(),
			timeout_secs: config.timeout.as_secs(),
			auth_endpoint: config.auth_endpoint,
			default_token_lifetime: config.default_token_lifetime,
		}
	}
}

fn parse_base_url(raw: &str) -> Result<Url, ClientConfigError> {
	Url::parse(raw).map_err(|source| ClientConfigError::InvalidBaseUrl { url: raw.into(), source })
}

fn default_base_url_string() -> String {
	DEFAULT_BASE_URL.into()
}

fn default_timeout_secs() -> u64 {
	DEFAULT_TIMEOUT.as_secs()
}

fn default_auth_endpoint() -> String {
	endpoint::AUTH.into()
}

fn default_token_lifetime() -> i64 {
	DEFAULT_TOKEN_LIFETIME
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_the_api() {
		let config = ClientConfig::builder().build().expect("Default config should validate.");

		assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
		assert_eq!(config.timeout(), StdDuration::from_secs(10));
		assert_eq!(config.auth_endpoint(), "auth");
		assert_eq!(config.default_token_lifetime(), 1800);
	}

	#[test]
	fn builder_rejects_non_http_schemes() {
		let err = ClientConfig::builder()
			.base_url("ftp://orders.example.com/api")
			.build()
			.expect_err("FTP base URLs must be rejected.");

		assert!(matches!(err, ClientConfigError::UnsupportedScheme { .. }));

		let err = ClientConfig::builder()
			.base_url("file:///etc/passwd")
			.build()
			.expect_err("File base URLs must be rejected.");

		assert!(matches!(err, ClientConfigError::UnsupportedScheme { .. }));
	}

	#[test]
	fn builder_rejects_query_zero_timeout_and_garbage() {
		assert!(matches!(
			ClientConfig::builder().base_url("https://orders.example.com/api?x=1").build(),
			Err(ClientConfigError::QueryOrFragment { .. })
		));
		assert_eq!(
			ClientConfig::builder().timeout(StdDuration::ZERO).build(),
			Err(ClientConfigError::ZeroTimeout)
		);
		assert!(matches!(
			ClientConfig::builder().base_url("not a url").build(),
			Err(ClientConfigError::InvalidBaseUrl { .. })
		));
		assert_eq!(
			ClientConfig::builder().auth_endpoint("//").build(),
			Err(ClientConfigError::EmptyAuthEndpoint)
		);
	}

	#[test]
	fn config_deserializes_with_defaults() {
		let config: ClientConfig =
			serde_json::from_str(r#"{"base_url":"https://orders.example.com/api/v2","timeout_secs":3}"#)
				.expect("Partial config should deserialize.");

		assert_eq!(config.base_url().as_str(), "https://orders.example.com/api/v2");
		assert_eq!(config.timeout(), StdDuration::from_secs(3));
		assert_eq!(config.auth_endpoint(), "auth");
		assert_eq!(config.default_token_lifetime(), 1800);

		let err = serde_json::from_str::<ClientConfig>(r#"{"base_url":"gopher://x"}"#)
			.expect_err("Invalid config should fail to deserialize.");

		assert!(err.to_string().contains("http or https"));
	}
}
