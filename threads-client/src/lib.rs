pub mod aggregator;
pub mod api;
pub mod metrics;
pub mod pacing;
pub mod posts;
pub mod views;


pub use aggregator::ImpressionsAggregator;
pub use api::ThreadsApiClient;
pub use metrics::{ApiMetrics, EndpointMetrics, MetricsCollector};
pub use pacing::{PacingConfig, Pacer, TokioPacer};
pub use posts::{POST_FIELDS, POST_PAGE_LIMIT};
