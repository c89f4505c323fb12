use std::cmp::Ordering;

use super::config::{FilterConfig, SortBy};
use super::predicate::CompiledFilter;
use crate::sanitize::{sanitize, CandidateList, SanitizerRules};
use crate::scoring::{score_record, DomainRecord, LengthWindow, ScoringWeights};

/// Design constants of the engine, passed in rather than global.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineSettings {
    pub sanitizer: SanitizerRules,
    pub scoring: ScoringWeights,
}

/// Sanitizes source text and turns candidate lists into ranked records.
///
/// Holds no state between calls besides its settings.
#[derive(Debug, Clone, Default)]
pub struct DomainEngine {
    settings: EngineSettings,
}

impl DomainEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn sanitize(&self, raw: &str) -> CandidateList {
        sanitize(raw, &self.settings.sanitizer)
    }

    pub fn filter(&self, candidates: &CandidateList, config: &FilterConfig) -> Vec<DomainRecord> {
        filter_domains(candidates, config, &self.settings.scoring)
    }
}

/// Apply every active predicate of `config` and sort the survivors.
///
/// Never fails: invalid patterns simply match nothing.
pub fn filter_domains(
    candidates: &CandidateList,
    config: &FilterConfig,
    weights: &ScoringWeights,
) -> Vec<DomainRecord> {
    let filter = CompiledFilter::compile(config);
    if filter.matches_nothing() {
        return Vec::new();
    }

    let window = LengthWindow::new(config.min_length, config.max_length);
    let mut records: Vec<DomainRecord> = candidates
        .iter()
        .filter(|c| filter.accepts(c.domain(), c.metrics()))
        .map(|c| score_record(c.domain(), c.metrics(), weights, window))
        .collect();

    sort_records(&mut records, config.sort_by);

    tracing::trace!(
        total = candidates.len(),
        kept = records.len(),
        sort_by = %config.sort_by,
        "filtered domains"
    );

    records
}

/// Stable sort, so ties keep sanitizer insertion order.
pub fn sort_records(records: &mut [DomainRecord], sort_by: SortBy) {
    let cmp: fn(&DomainRecord, &DomainRecord) -> Ordering = match sort_by {
        SortBy::Score => |a, b| b.score.total_cmp(&a.score),
        SortBy::Length => |a, b| a.length.cmp(&b.length),
        SortBy::Domain => |a, b| a.domain.cmp(&b.domain),
        SortBy::ReadableRatio => |a, b| b.readable_ratio.total_cmp(&a.readable_ratio),
    };
    records.sort_by(cmp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MatchMode;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn engine() -> DomainEngine {
        DomainEngine::default()
    }

    fn names(records: &[DomainRecord]) -> Vec<&str> {
        records.iter().map(|r| r.domain.as_str()).collect()
    }

    #[test]
    fn test_length_and_digit_example() {
        let engine = engine();
        let list = engine.sanitize("abc\nab12\nabcdefg");
        let config = FilterConfig {
            min_length: 3,
            max_length: 6,
            allow_numbers: false,
            ..FilterConfig::default()
        };
        assert_eq!(names(&engine.filter(&list, &config)), vec!["abc"]);
    }

    #[test]
    fn test_starts_with_example() {
        let engine = engine();
        let list = engine.sanitize("minhacryptoz.com\ncryptoarte.com");
        let config = FilterConfig {
            query: "crypto".to_string(),
            mode: MatchMode::StartsWith,
            ..FilterConfig::default()
        };
        assert_eq!(names(&engine.filter(&list, &config)), vec!["cryptoarte.com"]);
    }

    #[test]
    fn test_invalid_regex_yields_empty() {
        let engine = engine();
        let list = engine.sanitize("abc.com\ndef.com");
        let config = FilterConfig {
            regex: "[".to_string(),
            ..FilterConfig::default()
        };
        assert!(engine.filter(&list, &config).is_empty());
    }

    #[test]
    fn test_sort_by_score_descending() {
        let engine = engine();
        let list = engine.sanitize("x-1-2.com\nbanana\nxkcdq");
        let records = engine.filter(&list, &FilterConfig::default());
        assert_eq!(records[0].domain, "banana");
        for pair in records.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_sort_by_other_fields() {
        let engine = engine();
        let list = engine.sanitize("zeta.com\nab.com\nmango.net");

        let by_length = FilterConfig {
            sort_by: SortBy::Length,
            ..FilterConfig::default()
        };
        assert_eq!(
            names(&engine.filter(&list, &by_length)),
            vec!["ab.com", "zeta.com", "mango.net"]
        );

        let by_domain = FilterConfig {
            sort_by: SortBy::Domain,
            ..FilterConfig::default()
        };
        assert_eq!(
            names(&engine.filter(&list, &by_domain)),
            vec!["ab.com", "mango.net", "zeta.com"]
        );

        let by_readable = FilterConfig {
            sort_by: SortBy::ReadableRatio,
            ..FilterConfig::default()
        };
        let records = engine.filter(&list, &by_readable);
        for pair in records.windows(2) {
            assert!(pair[0].readable_ratio >= pair[1].readable_ratio);
        }
    }

    #[test]
    fn test_equal_scores_keep_insertion_order() {
        let engine = engine();
        // Same shape, same metrics, same score
        let list = engine.sanitize("toba\nkela\nbomu\nfari");
        let records = engine.filter(&list, &FilterConfig::default());
        assert_eq!(names(&records), vec!["toba", "kela", "bomu", "fari"]);

        let by_length = FilterConfig {
            sort_by: SortBy::Length,
            ..FilterConfig::default()
        };
        assert_eq!(
            names(&engine.filter(&list, &by_length)),
            vec!["toba", "kela", "bomu", "fari"]
        );
    }

    #[test]
    fn test_narrower_config_is_subset() {
        let engine = engine();
        let list = engine.sanitize(
            "abc\nabcdef\nabcdefghij\nab-cd\na1b2c3\nbanana.com\nxkcdqz\nre-vi-ew.net\nlongerdomainname.com",
        );
        let wide = FilterConfig {
            max_length: 30,
            max_hyphens: 3,
            ..FilterConfig::default()
        };
        let narrow = FilterConfig {
            max_length: 8,
            max_hyphens: 1,
            min_readable: 0.3,
            allow_numbers: false,
            ..wide.clone()
        };

        let wide_result = engine.filter(&list, &wide);
        let narrow_result = engine.filter(&list, &narrow);
        assert!(narrow_result.len() < wide_result.len());
        for record in &narrow_result {
            assert!(wide_result.iter().any(|w| w.domain == record.domain));
        }
    }

    #[test]
    fn test_records_within_unit_interval() {
        let engine = engine();
        let list = engine.sanitize("a\nzz\nqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq\n1-2-3-4-5\nbanana.com.br");
        let config = FilterConfig {
            min_length: 0,
            max_length: 100,
            max_hyphens: 10,
            ..FilterConfig::default()
        };
        let records = engine.filter(&list, &config);
        assert_eq!(records.len(), 5);
        for r in records {
            assert!((0.0..=1.0).contains(&r.readable_ratio));
            assert!((0.0..=1.0).contains(&r.score));
        }
    }

    #[test]
    fn test_alternate_weights_via_settings() {
        let engine = DomainEngine::new(EngineSettings {
            scoring: ScoringWeights {
                length: 1.0,
                readable: 0.0,
                hyphens: 0.0,
                digits: 0.0,
                penalty_cap: 3,
            },
            ..EngineSettings::default()
        });
        let list = engine.sanitize("banana\nxkq");
        let records = engine.filter(&list, &FilterConfig::default());
        assert_eq!(names(&records), vec!["xkq", "banana"]);
    }

    #[test]
    fn test_empty_candidates() {
        let engine = engine();
        let list = engine.sanitize("");
        assert!(engine.filter(&list, &FilterConfig::default()).is_empty());
    }

    fn source_text() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z0-9\\-]{1,10}(\\.com|\\.net)?", 0..60)
            .prop_map(|lines| lines.join("\n"))
    }

    fn filter_config() -> impl Strategy<Value = FilterConfig> {
        (
            "[a-z]{0,2}",
            prop::sample::select(MatchMode::ALL.to_vec()),
            0usize..12,
            4usize..40,
            0usize..4,
            0.0f64..0.8,
            any::<bool>(),
            prop::sample::select(SortBy::ALL.to_vec()),
        )
            .prop_map(
                |(query, mode, min_length, max_length, max_hyphens, min_readable, allow_numbers, sort_by)| {
                    FilterConfig {
                        query,
                        mode,
                        min_length,
                        max_length,
                        max_hyphens,
                        min_readable,
                        allow_numbers,
                        sort_by,
                        ..FilterConfig::default()
                    }
                },
            )
    }

    /// A configuration at least as strict as `wide` in every option.
    fn narrower(wide: FilterConfig) -> impl Strategy<Value = (FilterConfig, FilterConfig)> {
        (
            0usize..5,
            0usize..5,
            0usize..2,
            0.0f64..1.0,
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            "[a-z]{0,1}",
        )
            .prop_map(
                move |(raise_min, lower_max, lower_hyphens, readable_step, no_numbers, no_hyphen, letters, prefix)| {
                    let narrow = FilterConfig {
                        min_length: wide.min_length + raise_min,
                        max_length: wide.max_length.saturating_sub(lower_max),
                        max_hyphens: wide.max_hyphens.saturating_sub(lower_hyphens),
                        min_readable: wide.min_readable + readable_step * (1.0 - wide.min_readable),
                        allow_numbers: wide.allow_numbers && !no_numbers,
                        only_no_hyphen: wide.only_no_hyphen || no_hyphen,
                        only_letters: wide.only_letters || letters,
                        starts_with: prefix,
                        ..wide.clone()
                    };
                    (wide.clone(), narrow)
                },
            )
    }

    fn same_key(a: &DomainRecord, b: &DomainRecord, sort_by: SortBy) -> bool {
        match sort_by {
            SortBy::Score => a.score == b.score,
            SortBy::Length => a.length == b.length,
            SortBy::Domain => a.domain == b.domain,
            SortBy::ReadableRatio => a.readable_ratio == b.readable_ratio,
        }
    }

    proptest! {
        #[test]
        fn test_narrowing_only_removes_records(
            raw in source_text(),
            (wide, narrow) in filter_config().prop_flat_map(narrower),
        ) {
            let engine = engine();
            let list = engine.sanitize(&raw);
            let wide_result = engine.filter(&list, &wide);
            let narrow_result = engine.filter(&list, &narrow);

            prop_assert!(narrow_result.len() <= wide_result.len());
            for record in &narrow_result {
                prop_assert!(wide_result.iter().any(|w| w.domain == record.domain));
            }
        }

        #[test]
        fn test_ties_keep_insertion_order(raw in source_text(), config in filter_config()) {
            let engine = engine();
            let list = engine.sanitize(&raw);
            let position: HashMap<&str, usize> =
                list.domains().enumerate().map(|(i, d)| (d, i)).collect();

            let records = engine.filter(&list, &config);
            for pair in records.windows(2) {
                if same_key(&pair[0], &pair[1], config.sort_by) {
                    prop_assert!(position[pair[0].domain.as_str()] < position[pair[1].domain.as_str()]);
                }
            }
        }

        #[test]
        fn test_records_bounded(raw in source_text(), config in filter_config()) {
            let engine = engine();
            let list = engine.sanitize(&raw);
            for r in engine.filter(&list, &config) {
                prop_assert!((0.0..=1.0).contains(&r.readable_ratio));
                prop_assert!((0.0..=1.0).contains(&r.score));
            }
        }
    }
}
