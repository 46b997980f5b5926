// src/api.rs
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::fetch::NewsFetcher;
use crate::tool::{self, NewsInput, NewsOutput, TOOL_NAME};

pub const MCP_PROTOCOL_VERSION: &str = "2025-03-26";

// JSON-RPC 2.0 error codes
const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INVALID_REQUEST: i64 = -32600;
const INTERNAL_ERROR: i64 = -32603;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<NewsFetcher>,
}

impl AppState {
    pub fn new(fetcher: NewsFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/tools", get(list_tools))
        .route("/tools/news_fetcher", post(call_news_fetcher))
        .route("/mcp", post(mcp))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn list_tools() -> Json<Value> {
    Json(json!({ "tools": [tool::descriptor()] }))
}

async fn call_news_fetcher(
    State(state): State<AppState>,
    Json(input): Json<NewsInput>,
) -> Json<NewsOutput> {
    Json(tool::fetch_news(&state.fetcher, input).await)
}

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<NewsInput>,
}

/// Minimal JSON-RPC tool endpoint: `initialize`, `tools/list`, `tools/call`.
///
/// Malformed bodies get a JSON-RPC parse error (-32700), not a plain-text 400.
async fn mcp(State(state): State<AppState>, body: Bytes) -> Response {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => return rpc_error(Value::Null, PARSE_ERROR, format!("parse error: {e}")),
    };
    let req: RpcRequest = match serde_json::from_value(body) {
        Ok(r) => r,
        Err(e) => return rpc_error(Value::Null, INVALID_REQUEST, format!("invalid request: {e}")),
    };

    // Notifications get no JSON-RPC reply.
    let Some(id) = req.id else {
        tracing::debug!(method = %req.method, "rpc notification");
        return StatusCode::ACCEPTED.into_response();
    };

    match req.method.as_str() {
        "initialize" => rpc_result(
            id,
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": TOOL_NAME, "version": env!("CARGO_PKG_VERSION") }
            }),
        ),
        "ping" => rpc_result(id, json!({})),
        "tools/list" => rpc_result(id, json!({ "tools": [tool::descriptor()] })),
        "tools/call" => {
            let params: CallParams = match serde_json::from_value(req.params) {
                Ok(p) => p,
                Err(e) => return rpc_error(id, INVALID_PARAMS, format!("invalid params: {e}")),
            };
            if params.name != TOOL_NAME {
                return rpc_error(id, INVALID_PARAMS, format!("unknown tool: {}", params.name));
            }
            let input = params.arguments.unwrap_or_default();
            let report = tool::fetch_news(&state.fetcher, input).await;
            match serde_json::to_value(&report) {
                Ok(structured) => rpc_result(
                    id,
                    json!({
                        "content": [{ "type": "text", "text": structured.to_string() }],
                        "structuredContent": structured,
                        "isError": false
                    }),
                ),
                Err(e) => rpc_error(id, INTERNAL_ERROR, format!("serializing report: {e}")),
            }
        }
        other => rpc_error(id, METHOD_NOT_FOUND, format!("method not found: {other}")),
    }
}

fn rpc_result(id: Value, result: Value) -> Response {
    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result })).into_response()
}

fn rpc_error(id: Value, code: i64, message: String) -> Response {
    Json(json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    }))
    .into_response()
}
