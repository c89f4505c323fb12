use regex::{Regex, RegexBuilder};

use super::config::{FilterConfig, MatchMode};
use crate::scoring::DomainMetrics;

/// A string constraint after compilation.
///
/// An invalid pattern becomes `Nothing` so a half-typed regex yields an
/// empty result instead of an error.
#[derive(Debug, Clone)]
enum TextMatcher {
    Contains(String),
    Prefix(String),
    Suffix(String),
    Pattern(Regex),
    Nothing,
}

impl TextMatcher {
    fn matches(&self, domain: &str) -> bool {
        match self {
            TextMatcher::Contains(needle) => domain.contains(needle.as_str()),
            TextMatcher::Prefix(prefix) => domain.starts_with(prefix.as_str()),
            TextMatcher::Suffix(suffix) => domain.ends_with(suffix.as_str()),
            TextMatcher::Pattern(re) => re.is_match(domain),
            TextMatcher::Nothing => false,
        }
    }
}

/// Compile a user pattern case-insensitively: `[A-Z]` and `CRYPTO` match the
/// lower-case candidates. `(?-i)` inside the pattern restores case-sensitive
/// matching.
fn compile_pattern(pattern: &str) -> TextMatcher {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => TextMatcher::Pattern(re),
        Err(e) => {
            tracing::debug!(pattern, error = %e, "invalid pattern, matching nothing");
            TextMatcher::Nothing
        }
    }
}

fn query_matcher(query: &str, mode: MatchMode) -> Option<TextMatcher> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(match mode {
        MatchMode::Contains => TextMatcher::Contains(query.to_lowercase()),
        MatchMode::StartsWith => TextMatcher::Prefix(query.to_lowercase()),
        MatchMode::EndsWith => TextMatcher::Suffix(query.to_lowercase()),
        MatchMode::Regex => compile_pattern(query),
    })
}

/// All active predicates of a `FilterConfig`, compiled once per filter pass.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    min_length: usize,
    max_length: usize,
    max_hyphens: usize,
    min_readable: f64,
    allow_numbers: bool,
    only_no_hyphen: bool,
    only_letters: bool,
    matchers: Vec<TextMatcher>,
}

impl CompiledFilter {
    pub fn compile(config: &FilterConfig) -> Self {
        let mut matchers = Vec::new();

        if let Some(m) = query_matcher(&config.query, config.mode) {
            matchers.push(m);
        }
        if !config.regex.trim().is_empty() {
            matchers.push(compile_pattern(config.regex.trim()));
        }
        if !config.starts_with.trim().is_empty() {
            matchers.push(TextMatcher::Prefix(config.starts_with.trim().to_lowercase()));
        }
        if !config.ends_with.trim().is_empty() {
            matchers.push(TextMatcher::Suffix(config.ends_with.trim().to_lowercase()));
        }

        // Substring checks are cheaper than regexes
        matchers.sort_by_key(|m| matches!(m, TextMatcher::Pattern(_)));

        Self {
            min_length: config.min_length,
            max_length: config.max_length,
            max_hyphens: config.max_hyphens,
            min_readable: config.min_readable,
            allow_numbers: config.allow_numbers,
            only_no_hyphen: config.only_no_hyphen,
            only_letters: config.only_letters,
            matchers,
        }
    }

    /// True when some string constraint can never match.
    pub fn matches_nothing(&self) -> bool {
        self.matchers.iter().any(|m| matches!(m, TextMatcher::Nothing))
    }

    fn passes_metrics(&self, m: &DomainMetrics) -> bool {
        m.length >= self.min_length
            && m.length <= self.max_length
            && m.hyphen_count <= self.max_hyphens
            && m.readable_ratio >= self.min_readable
            && (self.allow_numbers || m.digit_count == 0)
            && (!self.only_no_hyphen || m.hyphen_count == 0)
    }

    /// Logical AND of every active predicate; numeric checks run first.
    pub fn accepts(&self, domain: &str, metrics: &DomainMetrics) -> bool {
        self.passes_metrics(metrics)
            && (!self.only_letters || domain.chars().all(char::is_alphabetic))
            && self.matchers.iter().all(|m| m.matches(domain))
    }
}
