//! # Portfolio X-Ray Common Library
//!
//! Shared code for the Portfolio X-Ray services including:
//! - API request/response types
//! - Configuration loading
//! - Batch identifier generation
//! - Common error type

pub mod api;
pub mod batch_id;
pub mod config;
pub mod error;

pub use error::{Error, Result};
