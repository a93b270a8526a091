//! Core types and configuration for the wine dataset builder.
//!
//! This crate provides shared types used across all other crates:
//! - Table and cell types (rows, field values, typed price rows)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
