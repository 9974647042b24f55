//! Thread-safe in-memory token cache owned by a single [`TokenProvider`](crate::provider::TokenProvider).
//!
//! Entries are keyed by the caller's session identifier and are never evicted; an expired entry
//! simply stops being served and is overwritten by the next successful exchange.

// self
use crate::{
	_prelude::*,
	auth::{BearerToken, CachedToken},
};

type CacheMap = RwLock<HashMap<String, CachedToken>>;

/// Session-identifier → token map with expiry-aware lookups.
#[derive(Debug, Default)]
pub struct TokenCache(CacheMap);
impl TokenCache {
	/// Returns the cached token for `identifier` if it is still usable at `now`.
	///
	/// Lookups never mutate the cache.
	pub fn fresh(&self, identifier: &str, now: OffsetDateTime) -> Option<BearerToken> {
		self.0
			.read()
			.get(identifier)
			.filter(|token| token.is_usable_at(now))
			.map(|token| token.value.clone())
	}

	/// Returns the raw entry for `identifier`, expired or not.
	pub fn entry(&self, identifier: &str) -> Option<CachedToken> {
		self.0.read().get(identifier).cloned()
	}

	/// Number of identifiers with an entry (fresh or expired).
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when no exchange has been cached yet.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	/// Stores or replaces the entry for `identifier`.
	pub(crate) fn store(&self, identifier: &str, token: CachedToken) {
		self.0.write().insert(identifier.to_owned(), token);
	}
}
