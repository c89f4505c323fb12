use serde::Serialize;

use super::config::ScoringWeights;
use super::metrics::DomainMetrics;

/// Inclusive length range the length term is normalized across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthWindow {
    pub min: usize,
    pub max: usize,
}

impl LengthWindow {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Map a length onto `[0, 1]` across the window, clipping outside values.
    pub fn normalize(&self, length: usize) -> f64 {
        if self.max <= self.min {
            return if length <= self.min { 0.0 } else { 1.0 };
        }
        let offset = length.saturating_sub(self.min) as f64;
        (offset / (self.max - self.min) as f64).clamp(0.0, 1.0)
    }
}

/// A candidate with its metrics and score, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    pub domain: String,
    pub length: usize,
    pub hyphen_count: usize,
    pub digit_count: usize,
    pub readable_ratio: f64,
    pub score: f64,
}

fn count_penalty(count: usize, cap: u32) -> f64 {
    (count as f64 / f64::from(cap.max(1))).min(1.0)
}

/// Score a domain's metrics: shorter, pronounceable, hyphen-free and
/// digit-free domains rank higher.
pub fn calculate_score(
    metrics: &DomainMetrics,
    weights: &ScoringWeights,
    window: LengthWindow,
) -> f64 {
    let score = weights.length * (1.0 - window.normalize(metrics.length))
        + weights.readable * metrics.readable_ratio
        + weights.hyphens * (1.0 - count_penalty(metrics.hyphen_count, weights.penalty_cap))
        + weights.digits * (1.0 - count_penalty(metrics.digit_count, weights.penalty_cap));

    score.clamp(0.0, 1.0)
}

pub fn score_record(
    domain: &str,
    metrics: &DomainMetrics,
    weights: &ScoringWeights,
    window: LengthWindow,
) -> DomainRecord {
    DomainRecord {
        domain: domain.to_string(),
        length: metrics.length,
        hyphen_count: metrics.hyphen_count,
        digit_count: metrics.digit_count,
        readable_ratio: metrics.readable_ratio,
        score: calculate_score(metrics, weights, window),
    }
}
