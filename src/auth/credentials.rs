//! Login credentials used for the signed authentication exchange.

// self
use crate::{
	_prelude::*,
	auth::{PayloadSigner, RsaSha512Signer},
	error::CredentialsError,
};

/// Account login plus the signer holding the private key.
///
/// The key never leaves the signer and is never transmitted; only signatures are.
#[derive(Clone)]
pub struct AuthCredentials {
	username: String,
	signer: Arc<dyn PayloadSigner>,
}
impl AuthCredentials {
	/// Builds credentials from a login and any [`PayloadSigner`].
	pub fn new(
		username: impl Into<String>,
		signer: impl 'static + PayloadSigner,
	) -> Result<Self, CredentialsError> {
		Self::with_shared_signer(username, Arc::new(signer))
	}

	/// Builds credentials around a signer that is already shared elsewhere.
	pub fn with_shared_signer(
		username: impl Into<String>,
		signer: Arc<dyn PayloadSigner>,
	) -> Result<Self, CredentialsError> {
		let username = username.into();

		if username.trim().is_empty() {
			return Err(CredentialsError::EmptyUsername);
		}

		Ok(Self { username, signer })
	}

	/// Builds credentials from a login and a PEM-encoded RSA private key.
	pub fn from_pem(
		username: impl Into<String>,
		private_key_pem: &str,
	) -> Result<Self, CredentialsError> {
		Self::new(username, RsaSha512Signer::from_pem(private_key_pem)?)
	}

	/// Account login sent in the authentication payload.
	pub fn username(&self) -> &str {
		&self.username
	}

	/// Signer used to prove possession of the private key.
	pub fn signer(&self) -> &dyn PayloadSigner {
		self.signer.as_ref()
	}
}
impl Debug for AuthCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthCredentials")
			.field("username", &self.username)
			.field("private_key", &"<redacted>")
			.finish()
	}
}
