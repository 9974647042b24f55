//! High-level facade pairing the request executor with the token provider.

// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	auth::AuthCredentials,
	clock::Clock,
	config::{ClientConfig, endpoint},
	executor::{ApiRequest, JsonObject, JsonPayload, RequestExecutor},
	provider::TokenProvider,
	transport::ApiHttpClient,
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestOrderClient = OrderClient<ReqwestHttpClient>;

/// Authenticated API client.
///
/// Every business call first obtains a bearer token for the supplied session identifier (served
/// from the cache while fresh) and then performs one exchange carrying that token.
pub struct OrderClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	provider: TokenProvider<C>,
}
impl<C> OrderClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		credentials: AuthCredentials,
	) -> Self {
		Self::from_provider(TokenProvider::new(
			RequestExecutor::with_http_client(config, http_client),
			credentials,
		))
	}

	/// Wraps an already configured provider.
	pub fn from_provider(provider: TokenProvider<C>) -> Self {
		Self { provider }
	}

	/// Replaces the clock used for token expiry decisions.
	pub fn with_clock(self, clock: impl 'static + Clock) -> Self {
		Self { provider: self.provider.with_clock(clock) }
	}

	/// Token provider backing this client.
	pub fn provider(&self) -> &TokenProvider<C> {
		&self.provider
	}

	/// Executor shared with the token provider.
	pub fn executor(&self) -> &RequestExecutor<C> {
		self.provider.executor()
	}

	/// Performs `request` with a bearer token for `identifier`.
	///
	/// Any bearer already attached to `request` is replaced.
	pub async fn call(&self, identifier: &str, request: ApiRequest) -> Result<JsonPayload> {
		let token = self.provider.get_token(identifier).await?;

		self.executor().request(request.bearer(token)).await
	}

	/// Connectivity check against the `ping` endpoint.
	pub async fn ping(&self, identifier: &str) -> Result<JsonPayload> {
		self.call(identifier, ApiRequest::get(endpoint::PING)).await
	}

	/// Lists orders, passing `filters` as query parameters.
	pub async fn orders(&self, identifier: &str, filters: JsonObject) -> Result<JsonPayload> {
		self.call(identifier, ApiRequest::get(endpoint::ORDERS).fields(filters)).await
	}

	/// Authenticated `GET`.
	pub async fn get(
		&self,
		identifier: &str,
		endpoint: &str,
		fields: JsonObject,
	) -> Result<JsonPayload> {
		self.send(identifier, Method::GET, endpoint, fields).await
	}

	/// Authenticated `POST`.
	pub async fn post(
		&self,
		identifier: &str,
		endpoint: &str,
		fields: JsonObject,
	) -> Result<JsonPayload> {
		self.send(identifier, Method::POST, endpoint, fields).await
	}

	/// Authenticated `PUT`.
	pub async fn put(
		&self,
		identifier: &str,
		endpoint: &str,
		fields: JsonObject,
	) -> Result<JsonPayload> {
		self.send(identifier, Method::PUT, endpoint, fields).await
	}

	/// Authenticated `PATCH`.
	pub async fn patch(
		&self,
		identifier: &str,
		endpoint: &str,
		fields: JsonObject,
	) -> Result<JsonPayload> {
		self.send(identifier, Method::PATCH, endpoint, fields).await
	}

	/// Authenticated `DELETE`.
	pub async fn delete(
		&self,
		identifier: &str,
		endpoint: &str,
		fields: JsonObject,
	) -> Result<JsonPayload> {
		self.send(identifier, Method::DELETE, endpoint, fields).await
	}

	async fn send(
		&self,
		identifier: &str,
		method: Method,
		endpoint: &str,
		fields: JsonObject,
	) -> Result<JsonPayload> {
		self.call(identifier, ApiRequest::new(method, endpoint).fields(fields)).await
	}
}
#[cfg(feature = "reqwest")]
impl OrderClient<ReqwestHttpClient> {
	/// Creates a client that provisions its own reqwest transport from `config`.
	pub fn new(config: ClientConfig, credentials: AuthCredentials) -> Result<Self> {
		let executor = RequestExecutor::new(config)?;

		Ok(Self::from_provider(TokenProvider::new(executor, credentials)))
	}
}
impl<C> Debug for OrderClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OrderClient").field("provider", &self.provider).finish()
	}
}
