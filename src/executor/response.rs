//! Decoded success payloads returned by [`RequestExecutor`](crate::executor::RequestExecutor).

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, executor::JsonObject};

/// Structured JSON document returned by a successful call.
///
/// Both containers are accepted, including empty ones: `{}` for an acknowledged write and `[]` for
/// an empty listing are legitimate answers. Scalars and `null` never reach this type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonPayload {
	/// Top-level JSON object.
	Object(JsonObject),
	/// Top-level JSON array.
	Array(Vec<Value>),
}
impl JsonPayload {
	/// Looks up `key` when the payload is an object.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_object().and_then(|object| object.get(key))
	}

	/// Borrows the object form, if any.
	pub fn as_object(&self) -> Option<&JsonObject> {
		match self {
			Self::Object(object) => Some(object),
			Self::Array(_) => None,
		}
	}

	/// Borrows the array form, if any.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			Self::Object(_) => None,
		}
	}

	/// Consumes the payload, keeping only the object form.
	pub fn into_object(self) -> Option<JsonObject> {
		match self {
			Self::Object(object) => Some(object),
			Self::Array(_) => None,
		}
	}

	/// Returns `true` for `{}` and `[]`.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Object(object) => object.is_empty(),
			Self::Array(items) => items.is_empty(),
		}
	}
}
impl From<JsonObject> for JsonPayload {
	fn from(object: JsonObject) -> Self {
		Self::Object(object)
	}
}
impl From<JsonPayload> for Value {
	fn from(payload: JsonPayload) -> Self {
		match payload {
			JsonPayload::Object(object) => Value::Object(object),
			JsonPayload::Array(items) => Value::Array(items),
		}
	}
}
impl Display for JsonPayload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Object(object) => write!(f, "{}", Value::Object(object.clone())),
			Self::Array(items) => write!(f, "{}", Value::Array(items.clone())),
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn accessors_follow_the_container_kind() {
		let listing: JsonPayload =
			serde_json::from_value(json!([{ "id": 1 }])).expect("Array should decode.");

		assert_eq!(listing.as_array().map(<[Value]>::len), Some(1));
		assert!(listing.get("id").is_none());
		assert!(listing.clone().into_object().is_none());
		assert_eq!(listing.to_string(), r#"[{"id":1}]"#);

		let ack: JsonPayload = serde_json::from_value(json!({})).expect("Object should decode.");

		assert!(ack.is_empty());
		assert!(ack.as_array().is_none());
		assert_eq!(Value::from(ack), json!({}));
		assert!(serde_json::from_value::<JsonPayload>(json!(7)).is_err());
	}
}
