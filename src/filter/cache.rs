use std::sync::Arc;

use super::config::FilterConfig;
use super::engine::DomainEngine;
use crate::sanitize::CandidateList;
use crate::scoring::DomainRecord;

struct CacheEntry {
    candidates: CandidateList,
    config: FilterConfig,
    records: Arc<[DomainRecord]>,
}

/// Remembers the last filter result, keyed on the candidate list's identity
/// and the configuration value.
#[derive(Default)]
pub struct FilterCache {
    last: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        engine: &DomainEngine,
        candidates: &CandidateList,
        config: &FilterConfig,
    ) -> Arc<[DomainRecord]> {
        if let Some(entry) = &self.last {
            if entry.candidates.same_list(candidates) && entry.config == *config {
                self.hits += 1;
                return Arc::clone(&entry.records);
            }
        }

        self.misses += 1;
        let records: Arc<[DomainRecord]> = engine.filter(candidates, config).into();
        self.last = Some(CacheEntry {
            candidates: candidates.clone(),
            config: config.clone(),
            records: Arc::clone(&records),
        });
        records
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
