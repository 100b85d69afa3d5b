//! Domain layer - core business logic and types.
//!
//! This layer contains pure domain models, configuration, and error types
//! without any external dependencies (DB, network, IO, etc.).

pub mod config;
pub mod error;
pub mod models;

pub use config::{AppConfig, BatchPolicy};
pub use error::{AppError, Result};
pub use models::{ConversationDetail, ConversationSummary, ExportArtifact};
