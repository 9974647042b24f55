//! Asymmetric signing of authentication payloads.
//!
//! The remote side verifies an RSA PKCS#1 v1.5 signature with SHA-512 over the exact JSON bytes of
//! the login payload. [`RsaSha512Signer`] is the production primitive; [`PayloadSigner`] is the
//! seam tests and alternative key stores plug into.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use rsa::{
	RsaPrivateKey,
	pkcs1::DecodeRsaPrivateKey,
	pkcs1v15::SigningKey,
	pkcs8::DecodePrivateKey,
	signature::{SignatureEncoding, Signer},
};
use sha2::Sha512;
// self
use crate::{
	_prelude::*,
	error::{CredentialsError, SigningError},
};

/// Produces a detached signature over an arbitrary byte payload.
pub trait PayloadSigner
where
	Self: Send + Sync,
{
	/// Signs `payload`, returning the raw signature bytes.
	fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, SigningError>;
}

/// RSA PKCS#1 v1.5 signer using SHA-512.
#[derive(Clone)]
pub struct RsaSha512Signer {
	key: SigningKey<Sha512>,
}
impl RsaSha512Signer {
	/// Wraps an already decoded RSA private key.
	pub fn new(key: RsaPrivateKey) -> Self {
		Self { key: SigningKey::new(key) }
	}

	/// Loads a PEM private key in PKCS#8 (`BEGIN PRIVATE KEY`) or PKCS#1
	/// (`BEGIN RSA PRIVATE KEY`) form.
	pub fn from_pem(pem: &str) -> Result<Self, CredentialsError> {
		let pem = pem.trim();
		let key = match RsaPrivateKey::from_pkcs1_pem(pem) {
			Ok(key) => key,
			Err(_) => RsaPrivateKey::from_pkcs8_pem(pem)
				.map_err(|source| CredentialsError::InvalidPrivateKey { source })?,
		};

		Ok(Self::new(key))
	}
}
impl PayloadSigner for RsaSha512Signer {
	fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, SigningError> {
		let signature = self.key.try_sign(payload).map_err(SigningError::new)?;

		Ok(signature.to_vec())
	}
}
impl Debug for RsaSha512Signer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RsaSha512Signer(<redacted>)")
	}
}

/// Signs `payload` and encodes the signature for the `Signature` header (standard base64, padded).
pub fn signature_header(
	signer: &dyn PayloadSigner,
	payload: &[u8],
) -> Result<String, SigningError> {
	let signature = signer.sign(payload)?;

	Ok(STANDARD.encode(signature))
}
