//! Shared fixtures for integration tests.

#![allow(dead_code)]

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use httpmock::MockServer;
use rsa::{
	RsaPublicKey,
	pkcs1v15::{Signature, VerifyingKey},
	pkcs8::DecodePublicKey,
	signature::Verifier,
};
use serde_json::Value;
use sha2::Sha512;
// self
use order_api_client::{
	auth::AuthCredentials,
	client::ReqwestOrderClient,
	config::ClientConfig,
	executor::{JsonObject, ReqwestExecutor},
	provider::TokenProvider,
	transport::ReqwestHttpClient,
};

pub const USERNAME: &str = "merchant";
pub const PRIVATE_KEY: &str = include_str!("../fixtures/signing_key.pem");
pub const PUBLIC_KEY: &str = include_str!("../fixtures/signing_key.pub.pem");
pub const BASE_PATH: &str = "/api/v1";

pub fn credentials() -> AuthCredentials {
	AuthCredentials::from_pem(USERNAME, PRIVATE_KEY).expect("Fixture credentials should load.")
}

pub fn config_for(server: &MockServer) -> ClientConfig {
	ClientConfig::builder()
		.base_url(server.url(BASE_PATH))
		.build()
		.expect("Mock server config should validate.")
}

pub fn build_executor(server: &MockServer) -> ReqwestExecutor {
	ReqwestExecutor::new(config_for(server)).expect("Reqwest executor should build.")
}

pub fn build_provider(server: &MockServer) -> TokenProvider<ReqwestHttpClient> {
	TokenProvider::new(build_executor(server), credentials())
}

pub fn build_client(server: &MockServer) -> ReqwestOrderClient {
	ReqwestOrderClient::new(config_for(server), credentials())
		.expect("Reqwest order client should build.")
}

/// Returns `true` when `header` is a valid base64 RSA-SHA512 signature of `body`.
pub fn verify_signature(body: &[u8], header: &str) -> bool {
	let public =
		RsaPublicKey::from_public_key_pem(PUBLIC_KEY).expect("Public key fixture should parse.");
	let Ok(raw) = STANDARD.decode(header) else {
		return false;
	};
	let Ok(signature) = Signature::try_from(raw.as_slice()) else {
		return false;
	};

	VerifyingKey::<Sha512>::new(public).verify(body, &signature).is_ok()
}

/// Unwraps a `json!` literal into request fields.
pub fn object(value: Value) -> JsonObject {
	match value {
		Value::Object(object) => object,
		other => panic!("Expected a JSON object fixture, got {other}."),
	}
}
