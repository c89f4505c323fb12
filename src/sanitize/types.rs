use std::ops::Deref;
use std::sync::Arc;

use crate::scoring::{compute_metrics, DomainMetrics};

/// A normalized, deduplicated line that survived sanitization.
///
/// Metrics depend on the text alone, so they are computed once when the
/// candidate is created and reused by every filter pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    domain: String,
    metrics: DomainMetrics,
}

impl Candidate {
    pub fn new(domain: String) -> Self {
        let metrics = compute_metrics(&domain);
        Self { domain, metrics }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn metrics(&self) -> &DomainMetrics {
        &self.metrics
    }
}

/// Immutable, shared list of candidates in first-seen order.
///
/// Clones share the same allocation; two lists are the "same list" for
/// memoization only if they point at the same allocation.
#[derive(Debug, Clone)]
pub struct CandidateList {
    entries: Arc<[Candidate]>,
}

impl CandidateList {
    pub fn new(entries: Vec<Candidate>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn same_list(&self, other: &CandidateList) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Candidate::domain)
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Deref for CandidateList {
    type Target = [Candidate];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl FromIterator<Candidate> for CandidateList {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
