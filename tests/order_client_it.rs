mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use order_api_client::error::Error;

#[tokio::test]
async fn ping_and_orders_carry_the_session_token() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let auth = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v1/auth")
				.header_exists("signature")
				.header_missing("authorization");
			then.status(201).body("{\"token\":\"abc123\"}");
		})
		.await;
	let ping = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/ping").header("authorization", "Bearer abc123");
			then.status(200).body("{\"pong\":true}");
		})
		.await;
	let orders = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/v1/orders")
				.query_param("status", "open")
				.header("authorization", "Bearer abc123");
			then.status(200).body("{\"orders\":[]}");
		})
		.await;
	let pong = client.ping("session-1").await.expect("Ping should succeed.");
	let listed = client
		.orders("session-1", object(json!({ "status": "open" })))
		.await
		.expect("Order listing should succeed.");

	assert_eq!(pong.get("pong"), Some(&json!(true)));
	assert_eq!(listed.get("orders"), Some(&json!([])));

	auth.assert_calls_async(1).await;
	ping.assert_calls_async(1).await;
	orders.assert_calls_async(1).await;
}

#[tokio::test]
async fn write_verbs_send_json_bodies() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _auth = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/auth");
			then.status(201).body("{\"token\":\"abc123\"}");
		})
		.await;
	let update = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/api/v1/orders/7")
				.header("authorization", "Bearer abc123")
				.json_body(json!({ "status": "shipped" }));
			then.status(200).body("{\"id\":7,\"status\":\"shipped\"}");
		})
		.await;
	let removal = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/v1/orders/7").header("authorization", "Bearer abc123");
			then.status(200).body("{}");
		})
		.await;
	let updated = client
		.patch("session-2", "orders/7", object(json!({ "status": "shipped" })))
		.await
		.expect("Order update should succeed.");
	let removed = client
		.delete("session-2", "/orders/7/", Default::default())
		.await
		.expect("Order removal should succeed.");

	assert_eq!(updated.get("status"), Some(&json!("shipped")));
	assert!(removed.is_empty());

	update.assert_calls_async(1).await;
	removal.assert_calls_async(1).await;
}

#[tokio::test]
async fn auth_failure_skips_the_business_call() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _auth = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/auth");
			then.status(401).body("{\"error\":\"bad signature\"}");
		})
		.await;
	let ping = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/ping");
			then.status(200).body("{}");
		})
		.await;
	let err = client.ping("session-3").await.expect_err("Failed auth should fail the call.");

	assert!(
		matches!(&err, Error::HttpStatus { status: 401, url, .. } if url.path() == "/api/v1/auth"),
		"Unexpected error: {err:?}."
	);

	ping.assert_calls_async(0).await;
}
