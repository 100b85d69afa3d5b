//! Application layer - export flows and orchestration.
//!
//! This layer contains the main business logic for locating, fetching,
//! and assembling conversation exports.

pub mod assembler;
pub mod batch;
pub mod credentials;
pub mod dispatch;
pub mod flows;
pub mod listing;
pub mod locator;

#[cfg(test)]
pub mod testing;

pub use dispatch::{dispatch, dispatch_line, ActionMessage};
pub use flows::ExportPipeline;
pub use listing::format_summary_table;
