// Core logic: normalize the query, resolve the account, derive the metrics
pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod resolver;

pub use config::Config;
pub use error::Error;
pub use export::{ExportFormat, Exporter, ProfileReport};
pub use metrics::{derive_metrics, ChartSeries, DerivedMetrics};
pub use models::{ProfileKind, ProfileRecord, Resolution, ResolvedProfile};
pub use normalize::normalize;
pub use resolver::{ProfileResolver, ProfileSource};

/// Result type alias used across the core crate
pub type Result<T> = std::result::Result<T, Error>;
