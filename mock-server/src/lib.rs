//! In-process emulation of the TrafficPortal create-map endpoint.
//!
//! Implements the documented wire behavior so the client crate's
//! integration tests run against real HTTP without the dev environment:
//! requests must carry the expected `x-api-key` (401 otherwise), a
//! `(domain, tpKey)` pair can only be created once (400 on a duplicate),
//! and successful creations return the `{message, success, source}`
//! envelope with the full stored record and a server-assigned `mid`.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// A stored masked record, serialized with the API's wire keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaskedRecord {
    pub mid: i64,
    pub uid: i64,
    #[serde(rename = "tpKey")]
    pub tp_key: String,
    pub domain: String,
    pub destination: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_set: i64,
    pub tags: String,
    pub notes: String,
    pub settings: String,
    pub cache_content: i64,
}

/// Request payload for creating a masked record. Optional fields default
/// the same way the real server defaults them.
#[derive(Deserialize)]
pub struct CreateMap {
    pub uid: i64,
    #[serde(rename = "tpKey")]
    pub tp_key: String,
    pub domain: String,
    pub destination: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub is_set: i64,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_settings")]
    pub settings: String,
    #[serde(default)]
    pub cache_content: i64,
}

fn default_status() -> String {
    "active".to_string()
}

fn default_kind() -> String {
    "redirect".to_string()
}

fn default_settings() -> String {
    "{}".to_string()
}

/// Response envelope shared by success and failure answers.
#[derive(Serialize)]
pub struct ApiResponse {
    pub message: String,
    pub success: bool,
    pub source: Option<MaskedRecord>,
}

pub struct AppState {
    api_key: String,
    next_mid: AtomicI64,
    records: RwLock<HashMap<(String, String), MaskedRecord>>,
}

pub type SharedState = Arc<AppState>;

pub fn app(api_key: &str) -> Router {
    let state: SharedState = Arc::new(AppState {
        api_key: api_key.to_string(),
        next_mid: AtomicI64::new(1),
        records: RwLock::new(HashMap::new()),
    });
    Router::new()
        .route("/create-map", post(create_map))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn create_map(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(input): Json<CreateMap>,
) -> (StatusCode, Json<ApiResponse>) {
    let presented = headers.get("x-api-key").and_then(|value| value.to_str().ok());
    if presented != Some(state.api_key.as_str()) {
        return reply(StatusCode::UNAUTHORIZED, "Unauthorized", None);
    }

    let key = (input.domain.clone(), input.tp_key.clone());
    let mut records = state.records.write().await;
    if records.contains_key(&key) {
        return reply(StatusCode::BAD_REQUEST, "Key already exists for this domain", None);
    }

    let record = MaskedRecord {
        mid: state.next_mid.fetch_add(1, Ordering::SeqCst),
        uid: input.uid,
        tp_key: input.tp_key,
        domain: input.domain,
        destination: input.destination,
        status: input.status,
        kind: input.kind,
        is_set: input.is_set,
        tags: input.tags,
        notes: input.notes,
        settings: input.settings,
        cache_content: input.cache_content,
    };
    records.insert(key, record.clone());

    reply(StatusCode::OK, "Record Created", Some(record))
}

fn reply(
    status: StatusCode,
    message: &str,
    source: Option<MaskedRecord>,
) -> (StatusCode, Json<ApiResponse>) {
    (
        status,
        Json(ApiResponse {
            message: message.to_string(),
            success: status == StatusCode::OK,
            source,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MaskedRecord {
        MaskedRecord {
            mid: 1,
            uid: 125,
            tp_key: "testkey".to_string(),
            domain: "dev.trfc.link".to_string(),
            destination: "https://example.com".to_string(),
            status: "active".to_string(),
            kind: "redirect".to_string(),
            is_set: 0,
            tags: String::new(),
            notes: String::new(),
            settings: "{}".to_string(),
            cache_content: 0,
        }
    }

    #[test]
    fn masked_record_serializes_with_wire_keys() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["mid"], 1);
        assert_eq!(json["tpKey"], "testkey");
        assert_eq!(json["type"], "redirect");
        assert_eq!(json["is_set"], 0);
        assert_eq!(json["cache_content"], 0);
        assert!(json.get("tp_key").is_none());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn create_map_applies_defaults() {
        let input: CreateMap = serde_json::from_str(
            r#"{"uid":125,"tpKey":"k","domain":"d","destination":"https://example.com"}"#,
        )
        .unwrap();
        assert_eq!(input.status, "active");
        assert_eq!(input.kind, "redirect");
        assert_eq!(input.is_set, 0);
        assert_eq!(input.tags, "");
        assert_eq!(input.settings, "{}");
        assert_eq!(input.cache_content, 0);
    }

    #[test]
    fn create_map_accepts_full_payload() {
        let input: CreateMap = serde_json::from_str(
            r#"{"uid":1,"tpKey":"k","domain":"d","destination":"https://e.com","status":"paused","type":"frame","is_set":1,"tags":"a,b","notes":"n","settings":"{\"x\":1}","cache_content":1}"#,
        )
        .unwrap();
        assert_eq!(input.status, "paused");
        assert_eq!(input.kind, "frame");
        assert_eq!(input.is_set, 1);
        assert_eq!(input.cache_content, 1);
    }

    #[test]
    fn create_map_rejects_missing_tp_key() {
        let result: Result<CreateMap, _> = serde_json::from_str(
            r#"{"uid":125,"domain":"d","destination":"https://example.com"}"#,
        );
        assert!(result.is_err());
    }
}
