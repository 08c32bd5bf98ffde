/// Request handlers for the habit endpoints
///
/// Handlers validate input, call the matching service operation and wrap
/// the result in the response envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, Uri};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::debug;

use crate::domain::{CompletionRecord, Habit, HabitId, HabitStatus, NewHabit, WeeklyProgress};
use crate::http::{ApiError, ApiResponse, AppState};
use crate::service;

/// Body of `POST /habits`
#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: Option<String>,
    pub daily_goal: Option<Number>,
}

/// Data of `GET /habits/report`
#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyReportResponse {
    pub weekly_report: Vec<WeeklyProgress>,
}

/// `POST /habits`
pub async fn create_habit(
    State(state): State<AppState>,
    payload: Result<Json<CreateHabitRequest>, JsonRejection>,
) -> Result<ApiResponse<Habit>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected habit body: {}", rejection);
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let new_habit = NewHabit::validate(request.name, request.daily_goal)?;
    let habit = service::add_habit(
        state.storage.as_ref(),
        new_habit.name,
        new_habit.daily_goal,
    )?;
    Ok(ApiResponse::success(habit))
}

/// `PUT /habits/:id`
pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<CompletionRecord>, ApiError> {
    let habit_id: HabitId = id.parse()?;
    let record = service::update_habit_progress(state.storage.as_ref(), habit_id)?;
    Ok(ApiResponse::success(record))
}

/// `GET /habits`
pub async fn list_habits(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<HabitStatus>>, ApiError> {
    let habits = service::get_habits(state.storage.as_ref())?;
    debug!("Listing {} habits", habits.len());
    Ok(ApiResponse::success(habits))
}

/// `GET /habits/report`
pub async fn weekly_report(
    State(state): State<AppState>,
) -> Result<ApiResponse<WeeklyReportResponse>, ApiError> {
    let weekly_report = service::get_weekly_report(state.storage.as_ref())?;
    Ok(ApiResponse::success(WeeklyReportResponse { weekly_report }))
}

/// Any route not listed above
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// A listed route called with a method it does not serve
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    debug!("No {} handler for {}", method, uri.path());
    ApiError::MethodNotAllowed(format!("Method {} not allowed on {}", method, uri.path()))
}
