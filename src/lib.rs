//! callgrid - Analyze call-log history between two parties across two time zones
//!
//! This library provides functionality to:
//! - Parse JSONL call logs carrying both parties' local-time views
//! - Split each call across wall-clock hour boundaries
//! - Aggregate minutes into a dense weekday × hour-of-day heatmap grid
//! - Produce calendar, trend, distribution, and summary reports
//! - Render reports as terminal tables or JSON
//!
//! # Examples
//!
//! ```no_run
//! use callgrid::{
//!     aggregation::Aggregator,
//!     data_loader::DataLoader,
//!     timezone::TimezonePair,
//! };
//!
//! #[tokio::main]
//! async fn main() -> callgrid::Result<()> {
//!     let zones = TimezonePair::from_cli(Some("Asia/Singapore"), Some("Pacific/Auckland"))?;
//!     let loader = DataLoader::new(None).await?;
//!     let aggregator = Aggregator::new(zones);
//!
//!     let records = loader.load_calls(zones);
//!     let grid = aggregator.aggregate_heatmap(records).await?;
//!     assert_eq!(grid.cells().len(), 168);
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod data_loader;
pub mod error;
pub mod filters;
pub mod output;
pub mod splitter;
pub mod timezone;
pub mod types;

// Re-export commonly used types
pub use error::{CallgridError, Result};
pub use splitter::{HourSlice, split_by_hour};
pub use types::{CallId, CallRecord, LocalInterval};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
