//! # Domain Module
//!
//! Business rules of the daycare journal, independent of HTTP and SQL.
//!
//! - **models**: children, journal entries and the escort/gender enums
//! - **journal_validator**: pure check of the income/outcome invariants
//! - **child_service**: child CRUD
//! - **journal_service**: journal CRUD and the study view
//! - **errors**: field errors and the service error type
//!
//! ## Business Rules
//!
//! - Income time and escort are recorded together, and so are outcome time and escort
//! - An outcome needs an income and cannot precede it
//! - Entries must reference an existing child; deleting the child deletes its entries

pub mod child_service;
pub mod errors;
pub mod journal_service;
pub mod journal_validator;
pub mod models;

pub use child_service::ChildService;
pub use errors::{DomainError, DomainResult, FieldErrors};
pub use journal_service::JournalService;
pub use journal_validator::JournalValidationError;
