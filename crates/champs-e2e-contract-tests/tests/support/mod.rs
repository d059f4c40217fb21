//! Shared loaders and fake backends for contract scenarios.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use champs_e2e_harness::{ApiRequest, ApiResponse, HttpTransport, Method, TransportError};
use champs_e2e_schema::SchemaRegistry;
use serde_json::{Value, json};

/// Host used by every mocked scenario.
#[allow(dead_code)]
pub const MOCK_HOST: &str = "https://api.example.test/api";

/// Loads the shipped schema document.
pub fn registry() -> SchemaRegistry {
    SchemaRegistry::from_path(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/sport_swagger.json"
    ))
    .expect("shipped schema document should load")
}

/// Loads a fixture from `contracts/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> Value {
    let path = format!(
        "{}/../../contracts/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    );
    let raw = std::fs::read_to_string(&path).expect("fixture should be readable");
    serde_json::from_str(&raw).expect("fixture should be valid json")
}

/// Returns one fixed response for every request.
#[allow(dead_code)]
pub struct FixedResponse {
    pub status: u16,
    pub body: Value,
}

#[async_trait]
impl HttpTransport for FixedResponse {
    async fn send(&self, _request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        Ok(ApiResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// In-memory players endpoint: `POST .../players` stores the posted player
/// with a generated id and `GET .../players/{id}` returns it.
#[allow(dead_code)]
#[derive(Default)]
pub struct InMemoryPlayers {
    players: Mutex<HashMap<String, Value>>,
    /// When set, stored players report this tournament instead of the posted one.
    tournament_override: Option<String>,
}

#[allow(dead_code)]
impl InMemoryPlayers {
    /// Backend that rewrites `tournament_id` on every stored player.
    pub fn rewriting_tournament(tournament_id: &str) -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
            tournament_override: Some(tournament_id.to_string()),
        }
    }
}

#[async_trait]
impl HttpTransport for InMemoryPlayers {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut players = self.players.lock().expect("player store lock should work");

        match request.method {
            Method::Post if request.url.ends_with("/players") => {
                let mut player = request
                    .body
                    .as_ref()
                    .and_then(|body| body.get("player"))
                    .cloned()
                    .unwrap_or(Value::Null);
                let id = format!("player-{}", players.len() + 1);
                if let Some(record) = player.as_object_mut() {
                    record.insert("id".to_string(), json!(id));
                    if let Some(tournament) = &self.tournament_override {
                        record.insert("tournament_id".to_string(), json!(tournament));
                    }
                }
                players.insert(id, player.clone());
                Ok(ApiResponse {
                    status: 201,
                    body: json!({ "player": player }),
                })
            }
            Method::Get => {
                let id = request.url.rsplit('/').next().unwrap_or_default();
                Ok(match players.get(id) {
                    Some(player) => ApiResponse {
                        status: 200,
                        body: json!({ "player": player }),
                    },
                    None => ApiResponse {
                        status: 404,
                        body: json!({ "error": "not found" }),
                    },
                })
            }
            _ => Ok(ApiResponse {
                status: 405,
                body: Value::Null,
            }),
        }
    }
}
