//! # REST API for the Attendance Journal
//!
//! CRUD endpoints for journal entries plus the read-only study view.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error::ApiResult;
use super::mappers::{journal_mapper::JournalMapper, RequestMode};
use crate::AppState;
use shared::{JournalEntryRequest, JournalEntryResponse};

/// List all journal entries
pub async fn list_entries(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("GET /api/journal");

    let entries = state.journal_service.list_entries().await?;
    Ok(Json(JournalMapper::to_entry_list_dto(entries)))
}

/// List journal entries of children currently flagged as studying
pub async fn list_study_entries(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("GET /api/journal/study");

    let entries = state.journal_service.list_study_entries().await?;
    Ok(Json(JournalMapper::to_entry_list_dto(entries)))
}

/// Create a journal entry
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<JournalEntryRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    info!("POST /api/journal - request: {:?}", request);

    let changes = JournalMapper::to_changes(request, RequestMode::Full)?;
    let entry = state.journal_service.create_entry(changes).await?;

    Ok((
        StatusCode::CREATED,
        Json(JournalMapper::to_entry_response_dto(entry, "Journal entry created successfully")),
    ))
}

/// Get a journal entry by ID
pub async fn get_entry(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(entry_id) = id?;
    info!("GET /api/journal/{}", entry_id);

    let entry = state.journal_service.get_entry(entry_id).await?;
    Ok(Json(JournalMapper::to_dto(entry)))
}

/// Replace a journal entry; `child_id` is required and omitted
/// income/outcome fields keep their stored values
pub async fn replace_entry(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<JournalEntryRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(entry_id) = id?;
    let Json(request) = payload?;
    info!("PUT /api/journal/{} - request: {:?}", entry_id, request);

    update(state, entry_id, request, RequestMode::Full).await
}

/// Patch any subset of a journal entry's fields
pub async fn patch_entry(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<JournalEntryRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(entry_id) = id?;
    let Json(request) = payload?;
    info!("PATCH /api/journal/{} - request: {:?}", entry_id, request);

    update(state, entry_id, request, RequestMode::Partial).await
}

async fn update(
    state: AppState,
    entry_id: i64,
    request: JournalEntryRequest,
    mode: RequestMode,
) -> ApiResult<Json<JournalEntryResponse>> {
    let changes = JournalMapper::to_changes(request, mode)?;
    let entry = state.journal_service.update_entry(entry_id, changes).await?;

    Ok(Json(JournalMapper::to_entry_response_dto(
        entry,
        "Journal entry updated successfully",
    )))
}

/// Delete a journal entry
pub async fn delete_entry(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(entry_id) = id?;
    info!("DELETE /api/journal/{}", entry_id);

    state.journal_service.delete_entry(entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
