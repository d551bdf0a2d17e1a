//! Core type definitions used across the RMA workspace.

pub mod id;

pub use id::*;
