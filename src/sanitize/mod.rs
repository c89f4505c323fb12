pub mod sanitizer;
pub mod types;

pub use sanitizer::{sanitize, sanitize_with_stats, SanitizeStats, SanitizerRules};
pub use types::{Candidate, CandidateList};
