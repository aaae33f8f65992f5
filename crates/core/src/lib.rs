//! docslice core library
//!
//! Foundational utilities shared by the chunking engine and the CLI:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Application configuration

pub mod config;
pub mod error;
pub mod logging;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
