use super::config::ScoringWeights;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate scoring weights at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(weights: &ScoringWeights) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let named = [
        ("length", weights.length),
        ("readable", weights.readable),
        ("hyphens", weights.hyphens),
        ("digits", weights.digits),
    ];

    for (name, value) in named {
        if !value.is_finite() {
            errors.push(format!("scoring.{}: must be a finite number", name));
        } else if value < 0.0 {
            errors.push(format!("scoring.{}: must be non-negative (got {})", name, value));
        }
    }

    let total = weights.total();
    if total.is_finite() && (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        errors.push(format!("scoring: weights must sum to 1 (got {})", total));
    }

    if weights.penalty_cap == 0 {
        errors.push("scoring.penalty_cap: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
