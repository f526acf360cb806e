//! REST API Server for the trading command relay
//!
//! Exposes the agent to the browser extension over HTTP.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::agent::AgentSlot;
use crate::models::{ActionResponse, PageContext};
use crate::Result;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub command: Option<String>,
    /// Kept loose so a non-object context does not reject the whole body
    #[serde(default)]
    pub page_context: Option<Value>,
}

impl CommandRequest {
    /// Objects pass through; any other value counts as no context
    fn take_page_context(&mut self) -> Option<PageContext> {
        match self.page_context.take()? {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                warn!(kind = json_kind(&other), "Ignoring non-object page_context");
                None
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HealthQuery {
    #[serde(default)]
    pub probe: bool,
}

/// =============================
/// Error Response
/// =============================

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub agent: AgentSlot,
}

/// =============================
/// Command Endpoint
/// =============================

async fn process_command(
    State(state): State<ApiState>,
    payload: std::result::Result<Json<CommandRequest>, JsonRejection>,
) -> std::result::Result<Json<ActionResponse>, ApiError> {
    let Json(mut req) = payload.map_err(|rejection| {
        warn!(%rejection, "Rejected command payload");
        match rejection {
            JsonRejection::JsonDataError(e) => {
                ApiError::bad_request(format!("Invalid request body: {}", e.body_text()))
            }
            _ => ApiError::bad_request("No data received"),
        }
    })?;

    let page_context = req.take_page_context();

    let command = req
        .command
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("No command provided"))?;

    let agent = state
        .agent
        .agent()
        .ok_or_else(|| ApiError::internal("Trading agent not initialized"))?;

    let request_id = Uuid::new_v4();
    let span = info_span!("process_command", %request_id);

    let response = async move {
        info!(%command, has_context = page_context.is_some(), "Processing command");

        let response = agent.process_command(&command, page_context.as_ref()).await;

        info!(intent = response.intent().unwrap_or("<none>"), "Command processed");
        response
    }
    .instrument(span)
    .await;

    Ok(Json(response))
}

/// =============================
/// Health Endpoints
/// =============================

async fn health(
    State(state): State<ApiState>,
    query: std::result::Result<Query<HealthQuery>, QueryRejection>,
) -> (StatusCode, Json<Value>) {
    let query = query.map(|Query(q)| q).unwrap_or_else(|rejection| {
        warn!(%rejection, "Ignoring unparseable health query");
        HealthQuery::default()
    });

    match &state.agent {
        AgentSlot::Ready(agent) => {
            let mut body = json!({
                "status": "healthy",
                "model_info": agent.model_info(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            });
            if query.probe {
                body["connection"] = json!(agent.check_connection().await);
            }
            (StatusCode::OK, Json(body))
        }
        AgentSlot::Unavailable(reason) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "message": format!("Agent not initialized: {}", reason),
            })),
        ),
    }
}

async fn test_endpoint() -> Json<Value> {
    Json(json!({ "message": "Backend is working!" }))
}

/// =============================
/// Router
/// =============================

pub fn create_router(agent: AgentSlot) -> Router {
    let state = ApiState { agent };

    Router::new()
        .route("/process_command", post(process_command))
        .route("/health", get(health))
        .route("/test", get(test_endpoint))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(agent: AgentSlot, addr: &str) -> Result<()> {
    let router = create_router(agent);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
