//! # REST API Interface Layer
//!
//! HTTP endpoints for the daycare journal. Handlers only translate: request
//! bodies go through the mappers (shape validation), the domain services do
//! the work, and [`error::ApiError`] turns failures into status codes with a
//! JSON body keyed by field name.

pub mod child_apis;
pub mod error;
pub mod journal_apis;
pub mod mappers;

#[cfg(test)]
mod tests;

use axum::response::Json;
use serde_json::{json, Value};
use tracing::info;

/// Index of the available resources
pub async fn api_root() -> Json<Value> {
    info!("GET /api");

    Json(json!({
        "children": "/api/children",
        "journal": "/api/journal",
        "journal_study": "/api/journal/study",
    }))
}
