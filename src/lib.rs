pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod sanitize;
pub mod scoring;
pub mod source;
pub mod stderr_buffer;
pub mod tui;

pub use error::{FilterError, SourceError};
pub use filter::{DomainEngine, EngineSettings, FilterCache, FilterConfig, MatchMode, SortBy};
pub use sanitize::{sanitize, Candidate, CandidateList, SanitizerRules};
pub use scoring::{compute_metrics, DomainRecord, ScoringWeights};
