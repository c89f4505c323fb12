pub mod config;
pub mod engine;
pub mod metrics;
pub mod validation;

pub use config::ScoringWeights;
pub use engine::{calculate_score, score_record, DomainRecord, LengthWindow};
pub use metrics::{compute_metrics, readable_ratio, DomainMetrics};
pub use validation::validate_scoring;
