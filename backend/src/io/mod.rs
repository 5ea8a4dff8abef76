//! # IO Module
//!
//! Interface layer between HTTP clients and the domain logic. It handles
//! request/response serialization, shape validation of incoming payloads and
//! the translation of domain errors into HTTP status codes.
//!
//! ## Supported Operations
//!
//! - **/api/children**: list, create, retrieve, replace, patch, delete
//! - **/api/journal**: list, create, retrieve, replace, patch, delete
//! - **GET /api/journal/study**: entries of children currently studying

pub mod rest;

pub use rest::*;
