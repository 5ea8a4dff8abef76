//! # Daycare Journal Backend
//!
//! Record keeping for a daycare: the enrolled children and a journal of their
//! daily arrivals (income) and departures (outcome) with the escorting parent.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, mappers, error translation)
//!     ↓
//! Domain Layer (models, journal validator, services)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{ChildService, JournalService};
use crate::storage::{ChildRepository, DbConnection, JournalRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub child_service: ChildService,
    pub journal_service: JournalService,
}

impl AppState {
    /// Wire the services on top of an open database
    pub fn new(db: DbConnection) -> Self {
        let children = Arc::new(ChildRepository::new(db.clone()));
        let journal = Arc::new(JournalRepository::new(db));

        Self {
            child_service: ChildService::new(children.clone()),
            journal_service: JournalService::new(journal, children),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    Ok(api_router(app_state).layer(cors))
}

fn api_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(io::api_root))
        .route(
            "/children",
            get(io::child_apis::list_children).post(io::child_apis::create_child),
        )
        .route(
            "/children/:id",
            get(io::child_apis::get_child)
                .put(io::child_apis::replace_child)
                .patch(io::child_apis::patch_child)
                .delete(io::child_apis::delete_child),
        )
        .route(
            "/journal",
            get(io::journal_apis::list_entries).post(io::journal_apis::create_entry),
        )
        .route("/journal/study", get(io::journal_apis::list_study_entries))
        .route(
            "/journal/:id",
            get(io::journal_apis::get_entry)
                .put(io::journal_apis::replace_entry)
                .patch(io::journal_apis::patch_entry)
                .delete(io::journal_apis::delete_entry),
        );

    Router::new().nest("/api", api_routes).with_state(app_state)
}
