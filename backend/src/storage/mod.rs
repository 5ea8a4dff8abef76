//! # Storage Module
//!
//! Data persistence for the daycare journal.
//!
//! - **connection**: SQLite pool creation and schema setup
//! - **traits**: storage interfaces the domain services depend on
//! - **repositories**: SQLite implementations of those interfaces
//!
//! Journal entries reference children with `ON DELETE CASCADE`, so removing
//! a child removes its journal as well.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{ChildRepository, JournalRepository};
pub use traits::{ChildStorage, JournalStorage};
