//! Demonstrates the signed handshake and an authenticated ping against a local mock server,
//! reusing one cached token for two calls.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use order_api_client::{
	auth::{self, AuthCredentials},
	client::ReqwestOrderClient,
	config::ClientConfig,
};

const DEMO_KEY: &str = include_str!("../tests/fixtures/signing_key.pem");

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let auth_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/auth").header_exists("signature");
			then.status(201).header("content-type", "application/json").body("{\"token\":\"demo\"}");
		})
		.await;
	let ping_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/ping").header("authorization", "Bearer demo");
			then.status(200).header("content-type", "application/json").body("{\"pong\":true}");
		})
		.await;
	let config = ClientConfig::builder().base_url(server.url("/api/v1")).build()?;
	let credentials = AuthCredentials::from_pem("demo-merchant", DEMO_KEY)?;
	let client = ReqwestOrderClient::new(config, credentials)?;
	let session = auth::generate_nonce();

	for _ in 0..2 {
		let pong = client.ping(&session).await?;

		println!("Ping answered: {pong}.");
	}

	auth_mock.assert_calls_async(1).await;
	ping_mock.assert_calls_async(2).await;

	Ok(())
}
