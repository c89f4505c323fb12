use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::{Candidate, CandidateList};

/// Rules deciding which source lines become candidates.
///
/// Example YAML:
/// ```yaml
/// sanitizer:
///   comment_marker: "#"
///   extra_chars: "-."
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct SanitizerRules {
    /// Lines whose first non-whitespace character is this marker are dropped
    pub comment_marker: char,

    /// Characters accepted in addition to ASCII letters and digits
    pub extra_chars: String,
}

impl Default for SanitizerRules {
    fn default() -> Self {
        Self {
            comment_marker: '#',
            extra_chars: "-.".to_string(),
        }
    }
}

impl SanitizerRules {
    pub fn accepts(&self, c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || self.extra_chars.contains(c)
    }

    fn is_comment(&self, trimmed: &str) -> bool {
        trimmed.starts_with(self.comment_marker)
    }

    /// Check that accepted characters keep exported rows unquoted and
    /// comment lines unambiguous. Reports every problem at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for c in self.extra_chars.chars() {
            if c.is_whitespace() || c.is_control() {
                errors.push(format!(
                    "sanitizer.extra_chars: must not contain whitespace or control characters (found {:?})",
                    c
                ));
            } else if c == ',' || c == '"' {
                errors.push(format!(
                    "sanitizer.extra_chars: must not contain CSV separators or quotes (found {:?})",
                    c
                ));
            } else if c == self.comment_marker {
                errors.push(format!(
                    "sanitizer.extra_chars: must not contain the comment marker {:?}",
                    c
                ));
            }
        }

        if self.comment_marker.is_whitespace() || self.comment_marker.is_control() {
            errors.push(format!(
                "sanitizer.comment_marker: must be a visible character (found {:?})",
                self.comment_marker
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeStats {
    pub lines: usize,
    pub skipped: usize,
    pub malformed: usize,
    pub duplicates: usize,
}

/// Turn raw source text into a normalized, deduplicated candidate list.
///
/// Blank lines, comment lines and lines with characters outside the accepted
/// alphabet are dropped silently; this never fails.
pub fn sanitize(raw: &str, rules: &SanitizerRules) -> CandidateList {
    sanitize_with_stats(raw, rules).0
}

pub fn sanitize_with_stats(raw: &str, rules: &SanitizerRules) -> (CandidateList, SanitizeStats) {
    let mut stats = SanitizeStats::default();
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    // `lines` handles "\n" and "\r\n"; a lone "\r" still splits old Mac files
    for line in raw.lines().flat_map(|l| l.split('\r')) {
        stats.lines += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || rules.is_comment(trimmed) {
            stats.skipped += 1;
            continue;
        }

        let domain = trimmed.to_lowercase();
        if !domain.chars().all(|c| rules.accepts(c)) {
            stats.malformed += 1;
            continue;
        }

        if !seen.insert(domain.clone()) {
            stats.duplicates += 1;
            continue;
        }

        entries.push(Candidate::new(domain));
    }

    tracing::debug!(
        lines = stats.lines,
        kept = entries.len(),
        skipped = stats.skipped,
        malformed = stats.malformed,
        duplicates = stats.duplicates,
        "sanitized source text"
    );

    (CandidateList::new(entries), stats)
}
