//! # REST API for Child Management
//!
//! Endpoints for creating, retrieving, updating, and deleting children.

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
use super::mappers::{child_mapper::ChildMapper, RequestMode};
use crate::AppState;
use shared::ChildRequest;

/// List all children
pub async fn list_children(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    info!("GET /api/children");

    let children = state.child_service.list_children().await?;
    Ok(Json(ChildMapper::to_child_list_dto(children)))
}

/// Create a new child
pub async fn create_child(
    State(state): State<AppState>,
    payload: Result<Json<ChildRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    info!("POST /api/children - request: {:?}", request);

    let new_child = ChildMapper::to_new_child(request)?;
    let child = state.child_service.create_child(new_child).await?;

    Ok((
        StatusCode::CREATED,
        Json(ChildMapper::to_child_response_dto(child, "Child created successfully")),
    ))
}

/// Get a child by ID
pub async fn get_child(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(child_id) = id?;
    info!("GET /api/children/{}", child_id);

    let child = state.child_service.get_child(child_id).await?;
    Ok(Json(ChildMapper::to_dto(child)))
}

/// Replace a child; name, gender and birthday are required
pub async fn replace_child(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ChildRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(child_id) = id?;
    let Json(request) = payload?;
    info!("PUT /api/children/{} - request: {:?}", child_id, request);

    update(state, child_id, request, RequestMode::Full).await
}

/// Patch any subset of a child's fields
pub async fn patch_child(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ChildRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(child_id) = id?;
    let Json(request) = payload?;
    info!("PATCH /api/children/{} - request: {:?}", child_id, request);

    update(state, child_id, request, RequestMode::Partial).await
}

async fn update(
    state: AppState,
    child_id: i64,
    request: ChildRequest,
    mode: RequestMode,
) -> ApiResult<Json<shared::ChildResponse>> {
    let changes = ChildMapper::to_changes(request, mode)?;
    let child = state.child_service.update_child(child_id, changes).await?;

    Ok(Json(ChildMapper::to_child_response_dto(child, "Child updated successfully")))
}

/// Delete a child and its journal entries
pub async fn delete_child(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(child_id) = id?;
    info!("DELETE /api/children/{}", child_id);

    state.child_service.delete_child(child_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
