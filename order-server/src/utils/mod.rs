//! Utilities Module
//!
//! Cross-cutting helpers for the HTTP layer and process setup.

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, AppResult, ok};
pub use logger::{init_logger, init_logger_with_file};
