//! Request and response models for the create-masked-record operation.
//!
//! # Design
//! `CreateMapRequest` is built once, consumed once, and serialized straight
//! to the wire shape via serde renames (`tpKey`, `type`). Optional fields
//! get their documented defaults in `new` so an omitted field and an
//! explicitly-defaulted field are indistinguishable, matching the server's
//! expectations.
//!
//! `CreateMapResponse` is decoded defensively from a raw JSON value rather
//! than through a strict `Deserialize` derive: a structurally odd success
//! body degrades to defaults instead of failing, so callers can always
//! inspect `is_success()` and `message()`. Absent data is an explicit
//! `Option`, never a panic.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Request payload for creating a masked record (a short-link mapping from
/// a key under a domain to a destination URL).
///
/// Required fields are supplied to [`CreateMapRequest::new`]; optional
/// fields default as documented and are overridden with the consuming
/// `with_*` builders. Values are stored unchanged — no trimming, casing, or
/// escaping. `settings` is an opaque string expected to contain a JSON
/// object; it is not validated client-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateMapRequest {
    uid: i64,
    #[serde(rename = "tpKey")]
    tp_key: String,
    domain: String,
    destination: String,
    status: String,
    #[serde(rename = "type")]
    kind: String,
    is_set: i64,
    tags: String,
    notes: String,
    settings: String,
    cache_content: i64,
}

impl CreateMapRequest {
    /// Build a request with the four required fields and every default:
    /// `status="active"`, `type="redirect"`, `is_set=0`, `tags=""`,
    /// `notes=""`, `settings="{}"`, `cache_content=0`.
    pub fn new(uid: i64, tp_key: &str, domain: &str, destination: &str) -> Self {
        Self {
            uid,
            tp_key: tp_key.to_string(),
            domain: domain.to_string(),
            destination: destination.to_string(),
            status: "active".to_string(),
            kind: "redirect".to_string(),
            is_set: 0,
            tags: String::new(),
            notes: String::new(),
            settings: "{}".to_string(),
            cache_content: 0,
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    /// Record type; serialized under the wire key `type`.
    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn with_is_set(mut self, is_set: i64) -> Self {
        self.is_set = is_set;
        self
    }

    /// Comma-separated tag list.
    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = tags.to_string();
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    /// Opaque settings string, expected to contain a JSON object. Passed
    /// through unvalidated.
    pub fn with_settings(mut self, settings: &str) -> Self {
        self.settings = settings.to_string();
        self
    }

    pub fn with_cache_content(mut self, cache_content: i64) -> Self {
        self.cache_content = cache_content;
        self
    }

    pub fn uid(&self) -> i64 {
        self.uid
    }

    pub fn tp_key(&self) -> &str {
        &self.tp_key
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_set(&self) -> i64 {
        self.is_set
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn settings(&self) -> &str {
        &self.settings
    }

    pub fn cache_content(&self) -> i64 {
        self.cache_content
    }
}

/// Outcome of one create-masked-record call.
///
/// `source`, when present, is the server's full record representation;
/// the derived accessors ([`mid`](Self::mid), [`tp_key`](Self::tp_key),
/// [`domain`](Self::domain), [`destination`](Self::destination)) read
/// individual keys out of it and return `None` when `source` is absent,
/// the key is missing, or the value has an unexpected type.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMapResponse {
    message: String,
    success: bool,
    source: Option<Map<String, Value>>,
}

impl CreateMapResponse {
    /// Build a response directly from already-typed values.
    pub fn new(message: &str, success: bool, source: Option<Map<String, Value>>) -> Self {
        Self {
            message: message.to_string(),
            success,
            source,
        }
    }

    /// Decode a raw JSON value, degrading missing or ill-typed fields to
    /// defaults: `message` must be a string (else empty), `success` a
    /// boolean (else false), `source` a non-null object (else `None`).
    /// Never fails.
    pub fn from_value(value: &Value) -> Self {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let success = value.get("success").and_then(Value::as_bool).unwrap_or(false);
        let source = value.get("source").and_then(Value::as_object).cloned();

        Self {
            message,
            success,
            source,
        }
    }

    /// Reconstruct the `{message, success, source}` mapping; `source` is
    /// `null` when absent. Round-trips through [`from_value`](Self::from_value).
    pub fn to_value(&self) -> Value {
        json!({
            "message": self.message,
            "success": self.success,
            "source": self.source,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn source(&self) -> Option<&Map<String, Value>> {
        self.source.as_ref()
    }

    /// Server-assigned record identifier.
    pub fn mid(&self) -> Option<i64> {
        self.source_field("mid").and_then(Value::as_i64)
    }

    pub fn tp_key(&self) -> Option<&str> {
        self.source_field("tpKey").and_then(Value::as_str)
    }

    pub fn domain(&self) -> Option<&str> {
        self.source_field("domain").and_then(Value::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.source_field("destination").and_then(Value::as_str)
    }

    fn source_field(&self, key: &str) -> Option<&Value> {
        self.source.as_ref().and_then(|source| source.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_applied_when_omitted() {
        let request = CreateMapRequest::new(125, "testkey", "dev.trfc.link", "https://example.com");
        assert_eq!(request.status(), "active");
        assert_eq!(request.kind(), "redirect");
        assert_eq!(request.is_set(), 0);
        assert_eq!(request.tags(), "");
        assert_eq!(request.notes(), "");
        assert_eq!(request.settings(), "{}");
        assert_eq!(request.cache_content(), 0);
    }

    #[test]
    fn request_builders_override_defaults() {
        let request = CreateMapRequest::new(125, "testkey", "dev.trfc.link", "https://example.com")
            .with_status("paused")
            .with_kind("frame")
            .with_is_set(1)
            .with_tags("test,demo")
            .with_notes("Test note")
            .with_settings(r#"{"foo":"bar"}"#)
            .with_cache_content(1);

        assert_eq!(request.uid(), 125);
        assert_eq!(request.tp_key(), "testkey");
        assert_eq!(request.domain(), "dev.trfc.link");
        assert_eq!(request.destination(), "https://example.com");
        assert_eq!(request.status(), "paused");
        assert_eq!(request.kind(), "frame");
        assert_eq!(request.is_set(), 1);
        assert_eq!(request.tags(), "test,demo");
        assert_eq!(request.notes(), "Test note");
        assert_eq!(request.settings(), r#"{"foo":"bar"}"#);
        assert_eq!(request.cache_content(), 1);
    }

    #[test]
    fn request_values_stored_unchanged() {
        let request = CreateMapRequest::new(1, "  Key ", "Dev.TRFC.link", "https://example.com/?q= x")
            .with_notes(" padded ");
        assert_eq!(request.tp_key(), "  Key ");
        assert_eq!(request.domain(), "Dev.TRFC.link");
        assert_eq!(request.notes(), " padded ");
    }

    #[test]
    fn request_serializes_with_wire_keys() {
        let request = CreateMapRequest::new(125, "testkey", "dev.trfc.link", "https://example.com");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["uid"], 125);
        assert_eq!(body["tpKey"], "testkey");
        assert_eq!(body["domain"], "dev.trfc.link");
        assert_eq!(body["destination"], "https://example.com");
        assert_eq!(body["status"], "active");
        assert_eq!(body["type"], "redirect");
        assert_eq!(body["is_set"], 0);
        assert_eq!(body["tags"], "");
        assert_eq!(body["notes"], "");
        assert_eq!(body["settings"], "{}");
        assert_eq!(body["cache_content"], 0);
    }

    #[test]
    fn request_never_emits_camel_case_flag_keys() {
        let request = CreateMapRequest::new(125, "testkey", "dev.trfc.link", "https://example.com");
        let body = serde_json::to_value(&request).unwrap();

        assert!(body.get("isSet").is_none());
        assert!(body.get("cacheContent").is_none());
        assert!(body.get("kind").is_none());
        assert!(body.get("tp_key").is_none());
    }

    #[test]
    fn response_from_full_mapping() {
        let value = json!({
            "message": "Record Created",
            "success": true,
            "source": {
                "mid": 123,
                "tpKey": "k",
                "domain": "d",
                "destination": "https://e.com",
                "status": "active",
            },
        });

        let response = CreateMapResponse::from_value(&value);
        assert_eq!(response.message(), "Record Created");
        assert!(response.is_success());
        assert_eq!(response.mid(), Some(123));
        assert_eq!(response.tp_key(), Some("k"));
        assert_eq!(response.domain(), Some("d"));
        assert_eq!(response.destination(), Some("https://e.com"));
        assert!(response.source().unwrap().contains_key("status"));
    }

    #[test]
    fn response_from_empty_mapping_degrades_to_defaults() {
        let response = CreateMapResponse::from_value(&json!({}));
        assert_eq!(response.message(), "");
        assert!(!response.is_success());
        assert!(response.source().is_none());
        assert_eq!(response.mid(), None);
        assert_eq!(response.tp_key(), None);
        assert_eq!(response.domain(), None);
        assert_eq!(response.destination(), None);
    }

    #[test]
    fn response_null_source_is_absent() {
        let value = json!({"message": "Error", "success": false, "source": null});
        let response = CreateMapResponse::from_value(&value);
        assert_eq!(response.message(), "Error");
        assert!(!response.is_success());
        assert!(response.source().is_none());
        assert_eq!(response.mid(), None);
    }

    #[test]
    fn response_source_missing_keys_yield_none() {
        let value = json!({"message": "Test", "success": true, "source": {"other_field": "value"}});
        let response = CreateMapResponse::from_value(&value);
        assert!(response.is_success());
        assert_eq!(response.mid(), None);
        assert_eq!(response.tp_key(), None);
        assert_eq!(response.domain(), None);
        assert_eq!(response.destination(), None);
    }

    #[test]
    fn response_ill_typed_fields_degrade_to_defaults() {
        let value = json!({"message": 42, "success": "yes", "source": ["not", "a", "map"]});
        let response = CreateMapResponse::from_value(&value);
        assert_eq!(response.message(), "");
        assert!(!response.is_success());
        assert!(response.source().is_none());
    }

    #[test]
    fn response_ill_typed_source_values_yield_none() {
        let value = json!({"success": true, "source": {"mid": "not-a-number", "tpKey": 7}});
        let response = CreateMapResponse::from_value(&value);
        assert_eq!(response.mid(), None);
        assert_eq!(response.tp_key(), None);
    }

    #[test]
    fn response_direct_construction_matches_decoded() {
        let mut source = Map::new();
        source.insert("mid".to_string(), json!(123));
        source.insert("tpKey".to_string(), json!("testkey"));
        let response = CreateMapResponse::new("Record Created", true, Some(source));

        assert_eq!(response.message(), "Record Created");
        assert!(response.is_success());
        assert_eq!(response.mid(), Some(123));

        let value = response.to_value();
        assert_eq!(value["message"], "Record Created");
        assert_eq!(value["success"], true);
        assert_eq!(value["source"]["mid"], 123);
    }

    #[test]
    fn response_round_trips_through_to_value() {
        let original = json!({
            "message": "Record Created",
            "success": true,
            "source": {"mid": 123, "tpKey": "k", "domain": "d", "destination": "https://e.com"},
        });

        let first = CreateMapResponse::from_value(&original);
        let second = CreateMapResponse::from_value(&first.to_value());
        assert_eq!(first, second);
        assert_eq!(second.mid(), Some(123));
        assert_eq!(second.tp_key(), Some("k"));
    }

    #[test]
    fn response_round_trip_preserves_absent_source() {
        let first = CreateMapResponse::from_value(&json!({}));
        let value = first.to_value();
        assert!(value["source"].is_null());

        let second = CreateMapResponse::from_value(&value);
        assert_eq!(first, second);
    }
}
