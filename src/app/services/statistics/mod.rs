//! Descriptive statistics for telemetry columns
//!
//! Statistics are computed over the numeric-parseable cells of a column;
//! unparseable cells are excluded before any computation.

pub mod describe;
pub mod series;

pub use describe::{ColumnStats, ColumnSummary, describe, describe_dataset};
pub use series::{ChartType, SeriesPoint, extract_series};
