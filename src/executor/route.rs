//! URL construction: endpoint joining under the base URL and form-style query encoding.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, error::ConfigError, executor::JsonObject};

/// Joins `endpoint` under `base`, keeping the result rooted at the base.
///
/// Leading and trailing slashes are ignored, so `orders` and `/orders/` resolve identically.
/// Each remaining segment is appended percent-encoded; an endpoint can therefore never replace the
/// host, port, scheme, or base path. Endpoints that look like absolute URLs or contain dot
/// segments are refused outright. A query part after `?` is preserved verbatim.
///
/// Path segments are raw values, not pre-encoded text: `%` is encoded like any other reserved
/// byte, so `ABC%2F123` reaches the server as `ABC%252F123`. Pass `ABC/123` split across segments
/// or the unencoded identifier instead.
pub(crate) fn join_endpoint(base: &Url, endpoint: &str) -> Result<Url, ConfigError> {
	let invalid = |reason| ConfigError::InvalidEndpoint { endpoint: endpoint.to_owned(), reason };
	let (path, query) = match endpoint.split_once('?') {
		Some((path, query)) => (path, Some(query)),
		None => (endpoint, None),
	};

	if path.contains("://") || path.starts_with("//") {
		return Err(invalid("absolute URLs are not allowed"));
	}
	if path.contains('\\') {
		return Err(invalid("backslashes are not allowed"));
	}
	if path.contains('#') {
		return Err(invalid("fragments are not allowed"));
	}

	let segments = path.trim_matches('/').split('/').collect::<Vec<_>>();

	if segments.iter().any(|segment| matches!(*segment, "." | "..")) {
		return Err(invalid("dot segments are not allowed"));
	}
	if segments.iter().any(|segment| segment.is_empty()) && segments.len() > 1 {
		return Err(invalid("empty path segments are not allowed"));
	}

	let mut url = base.clone();

	{
		let mut parts = url
			.path_segments_mut()
			.map_err(|_| ConfigError::UnsupportedScheme { scheme: base.scheme().to_owned() })?;

		parts.pop_if_empty();

		for segment in segments.into_iter().filter(|segment| !segment.is_empty()) {
			parts.push(segment);
		}
	}

	if let Some(query) = query.filter(|query| !query.is_empty()) {
		url.set_query(Some(query));
	}

	Ok(url)
}

/// Appends `fields` to the URL query using form encoding.
///
/// Scalars are rendered as text (`true`/`false` as `1`/`0`), `null` is skipped, arrays expand to
/// `key[0]`, `key[1]`, … and objects to `key[sub]`, recursively.
pub(crate) fn append_query(url: &mut Url, fields: &JsonObject) {
	if fields.is_empty() {
		return;
	}

	let mut pairs = Vec::new();

	for (key, value) in fields {
		flatten(key.clone(), value, &mut pairs);
	}

	if pairs.is_empty() {
		return;
	}

	let mut query = url.query_pairs_mut();

	for (key, value) in pairs {
		query.append_pair(&key, &value);
	}
}

fn flatten(key: String, value: &Value, out: &mut Vec<(String, String)>) {
	match value {
		Value::Null => {},
		Value::Bool(flag) => out.push((key, if *flag { "1" } else { "0" }.to_owned())),
		Value::Number(number) => out.push((key, number.to_string())),
		Value::String(text) => out.push((key, text.clone())),
		Value::Array(items) =>
			for (idx, item) in items.iter().enumerate() {
				flatten(format!("{key}[{idx}]"), item, out);
			},
		Value::Object(map) =>
			for (sub, item) in map {
				flatten(format!("{key}[{sub}]"), item, out);
			},
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn base() -> Url {
		Url::parse("http://orders.ne.localhost/api/v1").expect("Base URL fixture should parse.")
	}

	#[test]
	fn slashes_are_normalized() {
		let plain = join_endpoint(&base(), "orders").expect("Plain endpoint should join.");
		let padded = join_endpoint(&base(), "/orders/").expect("Padded endpoint should join.");

		assert_eq!(plain, padded);
		assert_eq!(plain.as_str(), "http://orders.ne.localhost/api/v1/orders");
		assert_eq!(
			join_endpoint(&base(), "orders/42/lines").expect("Nested endpoint should join.").as_str(),
			"http://orders.ne.localhost/api/v1/orders/42/lines"
		);
	}

	#[test]
	fn trailing_slash_on_base_is_tolerated() {
		let base = Url::parse("https://api.example.com/v1/").expect("Base URL should parse.");

		assert_eq!(
			join_endpoint(&base, "ping").expect("Endpoint should join.").as_str(),
			"https://api.example.com/v1/ping"
		);
	}

	#[test]
	fn host_changing_endpoints_are_rejected() {
		for endpoint in [
			"https://evil.example.com/orders",
			"//evil.example.com/orders",
			"../../other",
			"orders/../../admin",
			"./orders",
			"orders\\..\\admin",
			"orders#frag",
			"orders//42",
		] {
			let err = join_endpoint(&base(), endpoint)
				.expect_err("Escaping endpoints must be rejected.");

			assert!(matches!(err, ConfigError::InvalidEndpoint { .. }), "{endpoint}: {err}");
		}
	}

	#[test]
	fn special_characters_stay_inside_the_segment() {
		let url = join_endpoint(&base(), "orders/a b@evil.com:80")
			.expect("Endpoint with special characters should join.");

		assert_eq!(url.host_str(), Some("orders.ne.localhost"));
		assert!(url.path().starts_with("/api/v1/orders/"));
	}

	#[test]
	fn percent_signs_are_encoded_as_raw_bytes() {
		let url = join_endpoint(&base(), "orders/ABC%2F123").expect("Endpoint should join.");

		assert_eq!(url.as_str(), "http://orders.ne.localhost/api/v1/orders/ABC%252F123");
		assert_eq!(url.path_segments().map(Iterator::count), Some(4));
	}

	#[test]
	fn endpoint_query_is_preserved_and_extended() {
		let mut url = join_endpoint(&base(), "orders?page=2").expect("Endpoint should join.");
		let fields = json!({ "status": "open" });

		append_query(&mut url, fields.as_object().expect("Fixture should be an object."));

		assert_eq!(url.as_str(), "http://orders.ne.localhost/api/v1/orders?page=2&status=open");
	}

	#[test]
	fn query_flattens_nested_values() {
		let mut url = base();
		let fields = json!({
			"a": 1,
			"filter": { "state": "open", "tag": "x y" },
			"flag": true,
			"ids": [3, 4],
			"missing": null,
			"off": false
		});

		append_query(&mut url, fields.as_object().expect("Fixture should be an object."));

		assert_eq!(
			url.query(),
			Some("a=1&filter%5Bstate%5D=open&filter%5Btag%5D=x+y&flag=1&ids%5B0%5D=3&ids%5B1%5D=4&off=0")
		);
	}

	#[test]
	fn empty_fields_leave_the_url_untouched() {
		let mut url = base();

		append_query(&mut url, &JsonObject::new());

		assert_eq!(url.query(), None);

		append_query(&mut url, json!({ "gone": null }).as_object().expect("Object fixture."));

		assert_eq!(url.query(), None);
	}
}
