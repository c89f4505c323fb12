pub mod cache;
pub mod config;
pub mod deferred;
pub mod engine;
pub mod predicate;

pub use cache::FilterCache;
pub use config::{FieldKind, FilterConfig, FilterField, MatchMode, SortBy};
pub use deferred::{DeferredQuery, DEFAULT_DEBOUNCE};
pub use engine::{filter_domains, sort_records, DomainEngine, EngineSettings};
pub use predicate::CompiledFilter;
