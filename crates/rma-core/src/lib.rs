//! # rma-core
//!
//! Core crate for the RMA portal. Contains the unified error system,
//! configuration schemas, store-assigned identifiers, the injectable
//! clock, and the ticket lifecycle events.
//!
//! This crate has **no** internal dependencies on other RMA crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
