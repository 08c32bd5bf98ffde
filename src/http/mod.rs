/// HTTP API
///
/// This module wires the habit endpoints and the listener upgrade path into
/// one axum router served on a single port.

pub mod response;
pub mod routes;

pub use response::{ApiError, ApiResponse, ResponseStatus};

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;

use crate::realtime::{ws_handler, ListenerRegistry};
use crate::storage::HabitStorage;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn HabitStorage>,
    pub listeners: ListenerRegistry,
}

impl AppState {
    pub fn new(storage: Arc<dyn HabitStorage>, listeners: ListenerRegistry) -> Self {
        Self { storage, listeners }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/habits", get(routes::list_habits).post(routes::create_habit))
        .route("/habits/report", get(routes::weekly_report))
        .route("/habits/:id", put(routes::update_habit))
        .route("/ws", get(ws_handler))
        .method_not_allowed_fallback(routes::method_not_allowed)
        .fallback(routes::not_found)
        .with_state(state)
}
