//! HTTP + WebSocket feed for the display page
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /log - Current log state
//! - POST /refresh - Fold the newest snapshot into the log
//! - WS /ws - Every accepted log state, as JSON

use axum::{
    extract::{State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::config::DeskConfig;
use crate::core::{JsonFileStore, LogReconciler, LogStore};
use crate::error::{DeskError, DeskResult};
use crate::types::{LogState, UpdateOutcome, UpdateReason};

/// App state
pub struct AppState {
    pub config: DeskConfig,
    pub reconciler: LogReconciler,
    /// Single writer for the log document; held across load-compare-save
    pub store: Mutex<JsonFileStore>,
    pub update_tx: broadcast::Sender<LogState>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppState {
    pub fn new(config: DeskConfig) -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            reconciler: LogReconciler::new(config.max_history),
            store: Mutex::new(JsonFileStore::new(&config.log_path)),
            config,
            update_tx: tx,
        }
    }
}

/// Create the API router
pub fn create_router(config: DeskConfig) -> Router {
    router(Arc::new(AppState::new(config)))
}

/// Router over existing state; subscribe to `update_tx` before serving to
/// observe accepted updates
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/log", get(get_log))
        .route("/refresh", post(refresh))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Current log state
async fn get_log(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LogState>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.store.lock().await;
    match store.load() {
        Ok(Some(log)) => Ok(Json(log)),
        Ok(None) => Err(error_response(StatusCode::NOT_FOUND, "no log yet")),
        Err(e) => {
            log::error!("GET /log: {}", e);
            Err(error_response(StatusCode::SERVICE_UNAVAILABLE, e))
        }
    }
}

/// Run one update under the writer lock
async fn refresh(State(state): State<Arc<AppState>>) -> (StatusCode, Json<UpdateOutcome>) {
    let outcome = {
        let mut store = state.store.lock().await;
        state
            .reconciler
            .update_log(&state.config.input_path, &mut *store)
    };

    if let Some(log) = &outcome.state {
        // No subscribers is fine
        let _ = state.update_tx.send(log.clone());
    }

    (status_for(outcome.reason), Json(outcome))
}

/// HTTP status for an update outcome
pub fn status_for(reason: UpdateReason) -> StatusCode {
    match reason {
        UpdateReason::U001_UPDATED
        | UpdateReason::U002_INPUT_MISSING
        | UpdateReason::U003_ALREADY_UP_TO_DATE => StatusCode::OK,
        UpdateReason::U004_MALFORMED_INPUT => StatusCode::UNPROCESSABLE_ENTITY,
        UpdateReason::U005_STORE_UNAVAILABLE
        | UpdateReason::U006_STORE_WRITE_FAILED
        | UpdateReason::U007_INPUT_UNREADABLE => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.update_tx.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Handle WebSocket connection
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<LogState>) {
    loop {
        match rx.recv().await {
            Ok(log) => {
                let json = serde_json::to_string(&log).unwrap_or_default();
                if socket.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                log::warn!("websocket client lagged, {} updates skipped", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn error_response(status: StatusCode, error: impl std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// Run the API server
pub async fn run_server(config: DeskConfig) -> DeskResult<()> {
    let addr = config.api_addr.clone();
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DeskError::Config(format!("cannot bind {}: {}", addr, e)))?;
    log::info!("deskwatch API running on {}", addr);
    log::info!("  GET  /health  - Health check");
    log::info!("  GET  /log     - Current log state");
    log::info!("  POST /refresh - Apply newest snapshot");
    log::info!("  WS   /ws      - Live updates");
    axum::serve(listener, router).await?;
    Ok(())
}
