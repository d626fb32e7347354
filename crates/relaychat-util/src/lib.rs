//! Shared utilities for relaychat.
//!
//! This crate provides common utilities used across the relaychat workspace:
//! - Error handling patterns
//! - Identifier generation
//! - Logging setup with tracing
//! - Path utilities for config, data and log directories

pub mod error;
pub mod id;
pub mod log;
pub mod path;

pub use error::{Error, ErrorKind, Result};
