//! Bearer token values and their cached, time-bounded form.

// self
use crate::_prelude::*;

/// Redacted bearer token wrapper keeping the credential out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);
impl BearerToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for BearerToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BearerToken").field(&"<redacted>").finish()
	}
}
impl Display for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Token issued by the authentication endpoint together with its client-side expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedToken {
	/// Bearer token value.
	pub value: BearerToken,
	/// Instant from which the token must be treated as invalid.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Creates a token that expires `lifetime_secs` after `issued_at`.
	///
	/// Zero or negative lifetimes yield a token that is already expired at `issued_at`.
	pub fn issued(value: BearerToken, issued_at: OffsetDateTime, lifetime_secs: i64) -> Self {
		let expires_at = issued_at.saturating_add(Duration::seconds(lifetime_secs));

		Self { value, expires_at }
	}

	/// Returns `true` while `now` is strictly before the expiry instant.
	pub fn is_usable_at(&self, now: OffsetDateTime) -> bool {
		now < self.expires_at
	}

	/// Time left before expiry, clamped at zero.
	pub fn remaining_at(&self, now: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - now;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn token_formatters_redact() {
		let token = BearerToken::new("super-secret");

		assert_eq!(format!("{token:?}"), "BearerToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert_eq!(token.expose(), "super-secret");
	}

	#[test]
	fn usability_is_strictly_before_expiry() {
		let issued = macros::datetime!(2025-11-10 12:00 UTC);
		let token = CachedToken::issued(BearerToken::new("abc123"), issued, 60);

		assert!(token.is_usable_at(issued));
		assert!(token.is_usable_at(issued + Duration::seconds(59)));
		assert!(!token.is_usable_at(issued + Duration::seconds(60)));
		assert_eq!(token.remaining_at(issued + Duration::seconds(30)), Duration::seconds(30));
		assert_eq!(token.remaining_at(issued + Duration::seconds(90)), Duration::ZERO);
	}

	#[test]
	fn non_positive_lifetimes_are_expired_on_arrival() {
		let issued = macros::datetime!(2025-11-10 12:00 UTC);

		assert!(!CachedToken::issued(BearerToken::new("zero"), issued, 0).is_usable_at(issued));
		assert!(!CachedToken::issued(BearerToken::new("neg"), issued, -5).is_usable_at(issued));
		assert_eq!(
			CachedToken::issued(BearerToken::new("neg"), issued, -5).expires_at,
			issued - Duration::seconds(5)
		);
	}
}
