//! Bearer token acquisition with per-session caching + singleflight guards.
//!
//! [`TokenProvider::get_token`] serves a cached token while it is fresh and otherwise performs the
//! signed handshake: the login payload is encoded once, signed with the account's private key,
//! and posted to the authentication endpoint with the signature in a `Signature` header and no
//! bearer token. The returned token is cached under the caller's session identifier with an
//! expiry computed locally from the requested lifetime. A per-identifier guard ensures concurrent
//! callers that miss the cache piggy-back on one in-flight exchange instead of each
//! authenticating.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{self, AuthCredentials, BearerToken, CachedToken},
	cache::TokenCache,
	clock::{Clock, SystemClock},
	executor::{self, ApiRequest, JsonObject, JsonPayload, RequestExecutor},
	obs::{self, CacheLookup, CallKind, CallOutcome, CallSpan},
	transport::ApiHttpClient,
};

/// Header carrying the base64 signature of the authentication body.
pub const SIGNATURE_HEADER: &str = "Signature";

/// Login payload signed and posted to the authentication endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthPayload {
	/// Account login.
	pub login: String,
	/// Session identifier, doubling as the cache key.
	pub nonce: String,
	/// Requested token lifetime in seconds, passed through unvalidated.
	pub lifetime: i64,
}
impl AuthPayload {
	/// Creates the payload for one handshake.
	pub fn new(login: impl Into<String>, nonce: impl Into<String>, lifetime: i64) -> Self {
		Self { login: login.into(), nonce: nonce.into(), lifetime }
	}

	/// Converts the payload into request fields.
	pub fn to_fields(&self) -> JsonObject {
		let mut fields = JsonObject::new();

		fields.insert("login".into(), Value::from(self.login.as_str()));
		fields.insert("nonce".into(), Value::from(self.nonce.as_str()));
		fields.insert("lifetime".into(), Value::from(self.lifetime));

		fields
	}
}

/// Produces bearer tokens for caller-defined session identifiers.
pub struct TokenProvider<C>
where
	C: ?Sized + ApiHttpClient,
{
	executor: RequestExecutor<C>,
	credentials: AuthCredentials,
	clock: Arc<dyn Clock>,
	cache: TokenCache,
	guards: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}
impl<C> TokenProvider<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a provider that authenticates through `executor` using the system clock.
	pub fn new(executor: RequestExecutor<C>, credentials: AuthCredentials) -> Self {
		Self {
			executor,
			credentials,
			clock: Arc::new(SystemClock),
			cache: TokenCache::default(),
			guards: Default::default(),
		}
	}

	/// Replaces the clock used for expiry decisions.
	pub fn with_clock(mut self, clock: impl 'static + Clock) -> Self {
		self.clock = Arc::new(clock);

		self
	}

	/// Executor used for the authentication exchange.
	pub fn executor(&self) -> &RequestExecutor<C> {
		&self.executor
	}

	/// Credentials used to sign the login payload.
	pub fn credentials(&self) -> &AuthCredentials {
		&self.credentials
	}

	/// Cache owned by this provider.
	pub fn cache(&self) -> &TokenCache {
		&self.cache
	}

	/// Returns a token for `identifier`, requesting the configured default lifetime on a miss.
	pub async fn get_token(&self, identifier: &str) -> Result<BearerToken> {
		let lifetime = self.executor.config().default_token_lifetime();

		self.get_token_with_lifetime(identifier, lifetime).await
	}

	/// Returns a token for `identifier`, requesting `lifetime_secs` on a miss.
	///
	/// A fresh cached token is returned without any network call. Zero or negative lifetimes are
	/// sent as-is and produce a token that is already expired locally.
	pub async fn get_token_with_lifetime(
		&self,
		identifier: &str,
		lifetime_secs: i64,
	) -> Result<BearerToken> {
		if let Some(token) = self.cache.fresh(identifier, self.clock.now()) {
			obs::record_cache_lookup(CacheLookup::Hit);
			obs::debug_event!(identifier, "serving cached token");

			return Ok(token);
		}

		obs::record_cache_lookup(CacheLookup::Miss);

		const KIND: CallKind = CallKind::Authenticate;

		let span = CallSpan::new(KIND, "get_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let guard = self.guard(identifier);
				let _singleflight = guard.lock().await;

				// Another caller may have finished the exchange while this one waited.
				if let Some(token) = self.cache.fresh(identifier, self.clock.now()) {
					return Ok(token);
				}

				self.authenticate(identifier, lifetime_secs).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	async fn authenticate(&self, identifier: &str, lifetime_secs: i64) -> Result<BearerToken> {
		let fields = AuthPayload::new(self.credentials.username(), identifier, lifetime_secs)
			.to_fields();
		let body = executor::encode_body(&fields)?;
		let signature = auth::signature_header(self.credentials.signer(), &body)?;
		let request = ApiRequest::post(self.executor.config().auth_endpoint())
			.fields(fields)
			.header(SIGNATURE_HEADER, signature);
		let response = self.executor.request(request).await?;
		let token = extract_token(response)?;

		self.cache.store(
			identifier,
			CachedToken::issued(token.clone(), self.clock.now(), lifetime_secs),
		);

		obs::info_event!(identifier, lifetime_secs, "authenticated session");

		Ok(token)
	}

	/// Returns (and creates on demand) the singleflight guard for an identifier.
	fn guard(&self, identifier: &str) -> Arc<AsyncMutex<()>> {
		let mut guards = self.guards.lock();

		guards.entry(identifier.to_owned()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
	}
}
impl<C> Debug for TokenProvider<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("executor", &self.executor)
			.field("credentials", &self.credentials)
			.field("cached_sessions", &self.cache.len())
			.finish()
	}
}

fn extract_token(response: JsonPayload) -> Result<BearerToken> {
	match response.get("token") {
		Some(Value::String(token)) => Ok(BearerToken::new(token.as_str())),
		_ => Err(Error::InvalidTokenResponse { raw: response.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn payload_fields_carry_login_nonce_and_lifetime() {
		let fields = AuthPayload::new("merchant", "session-1", -5).to_fields();

		assert_eq!(
			Value::Object(fields),
			json!({ "login": "merchant", "nonce": "session-1", "lifetime": -5 })
		);
	}

	fn payload(value: Value) -> JsonPayload {
		serde_json::from_value(value).expect("Fixture should be an object or array.")
	}

	#[test]
	fn token_must_be_a_string_field() {
		let token = extract_token(payload(json!({ "token": "abc123", "expires": 60 })))
			.expect("String token should be accepted.");

		assert_eq!(token.expose(), "abc123");

		for bad in [
			json!({ "jwt": "abc123" }),
			json!({ "token": 42 }),
			json!({ "token": null }),
			json!([{ "token": "abc123" }]),
		] {
			let err = extract_token(payload(bad))
				.expect_err("Missing or non-string tokens must be rejected.");

			assert!(matches!(err, Error::InvalidTokenResponse { .. }));
		}

		let err = extract_token(payload(json!({ "error": "nope" })))
			.expect_err("Missing token must be rejected.");

		assert_eq!(err.to_string(), r#"Invalid token response: {"error":"nope"}."#);
	}
}
