use serde::{Deserialize, Serialize};

/// Weights of the premium-ness score.
///
/// Each weight scales one quality term in `[0, 1]`; the weights are expected
/// to sum to 1 so the score stays in `[0, 1]` (see `validate_scoring`).
///
/// Example YAML:
/// ```yaml
/// scoring:
///   length: 0.3
///   readable: 0.4
///   hyphens: 0.15
///   digits: 0.15
///   penalty_cap: 3
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ScoringWeights {
    /// Reward for being short within the configured length window
    pub length: f64,

    /// Reward for pronounceability (readable ratio)
    pub readable: f64,

    /// Reward for having no hyphens
    pub hyphens: f64,

    /// Reward for having no digits
    pub digits: f64,

    /// Hyphen/digit count at which the respective penalty saturates
    pub penalty_cap: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            length: 0.30,
            readable: 0.40,
            hyphens: 0.15,
            digits: 0.15,
            penalty_cap: 3,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.length + self.readable + self.hyphens + self.digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-9);
        assert_eq!(weights.penalty_cap, 3);
    }

    #[test]
    fn test_weights_serde_roundtrip() {
        let weights = ScoringWeights::default();
        let yaml = serde_saphyr::to_string(&weights).unwrap();
        let parsed: ScoringWeights = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(weights, parsed);
    }

    #[test]
    fn test_partial_weights_parse() {
        let yaml = r#"
length: 0.5
readable: 0.2
"#;
        let weights: ScoringWeights = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(weights.length, 0.5);
        assert_eq!(weights.readable, 0.2);
        assert_eq!(weights.hyphens, 0.15);
        assert_eq!(weights.digits, 0.15);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "vowels: 0.5";
        let result: Result<ScoringWeights, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
