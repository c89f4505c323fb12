use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::DomainRecord;

/// Number of top-ranked domains shown as suggestions.
pub const SUGGESTION_COUNT: usize = 12;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score or ratio with two decimals ("0.91")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a domain to fit available width, accounting for Unicode
pub fn truncate_domain(domain: &str, max_width: usize) -> String {
    let chars: Vec<char> = domain.chars().collect();
    if chars.len() <= max_width {
        domain.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format records as a ranked table.
/// Columns: index, score, readable ratio, length, hyphens, digits, domain.
pub fn format_records_table(records: &[DomainRecord], use_colors: bool) -> String {
    format_records_table_with_width(records, use_colors, get_terminal_width())
}

fn format_records_table_with_width(
    records: &[DomainRecord],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if records.is_empty() {
        return "No domains match the current filters.".to_string();
    }

    let index_width = records.len().to_string().len().max(2) + 1;
    // index + "  score  read  len  hy  dg  "
    let fixed_width = index_width + 28;

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let index_str = format!("{:>width$}", format!("{}.", idx + 1), width = index_width);
            let score = format!("{:>5}", format_score(record.score));
            let readable = format!("{:>4}", format_score(record.readable_ratio));
            let counts = format!(
                "{:>3}  {:>2}  {:>2}",
                record.length, record.hyphen_count, record.digit_count
            );

            let domain = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_domain(&record.domain, width - fixed_width)
                }
                Some(_) => truncate_domain(&record.domain, 20),
                None => record.domain.clone(),
            };

            if use_colors {
                format!(
                    "{}  {}  {}  {}  {}",
                    index_str.dimmed(),
                    score.bold(),
                    readable.cyan(),
                    counts.dimmed(),
                    domain
                )
            } else {
                format!("{}  {}  {}  {}  {}", index_str, score, readable, counts, domain)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format records as tab-separated values for scripting
/// Columns: score, readable ratio, length, hyphens, digits, domain (no headers, no colors)
pub fn format_tsv(records: &[DomainRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                format_score(r.score),
                format_score(r.readable_ratio),
                r.length,
                r.hyphen_count,
                r.digit_count,
                r.domain
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Headline numbers for the current result set
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub filtered: usize,
    pub suggestions: Vec<String>,
}

impl Summary {
    pub fn new(total: usize, records: &[DomainRecord]) -> Self {
        Self {
            total,
            filtered: records.len(),
            suggestions: records
                .iter()
                .take(SUGGESTION_COUNT)
                .map(|r| r.domain.clone())
                .collect(),
        }
    }

    pub fn suggestions_line(&self) -> String {
        if self.suggestions.is_empty() {
            "---".to_string()
        } else {
            self.suggestions.join(", ")
        }
    }
}

pub fn format_summary(summary: &Summary, use_colors: bool) -> String {
    let counts = format!(
        "{} of {} domains match",
        summary.filtered, summary.total
    );
    let suggestions = format!("Top picks: {}", summary.suggestions_line());
    if use_colors {
        format!("{}\n{}", counts.bold(), suggestions.dimmed())
    } else {
        format!("{}\n{}", counts, suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domain: &str, score: f64) -> DomainRecord {
        DomainRecord {
            domain: domain.to_string(),
            length: domain.chars().count(),
            hyphen_count: domain.matches('-').count(),
            digit_count: domain.chars().filter(|c| c.is_ascii_digit()).count(),
            readable_ratio: 0.83,
            score,
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.912), "0.91");
        assert_eq!(format_score(1.0), "1.00");
        assert_eq!(format_score(0.0), "0.00");
    }

    #[test]
    fn test_truncate_domain() {
        assert_eq!(truncate_domain("short.com", 20), "short.com");
        assert_eq!(truncate_domain("exact", 5), "exact");
        assert_eq!(truncate_domain("averyveryverylongdomain.com", 15), "averyveryver...");
        assert_eq!(truncate_domain("hello", 3), "hel");
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(
            format_records_table(&[], false),
            "No domains match the current filters."
        );
    }

    #[test]
    fn test_table_rows() {
        let records = vec![record("abc.com", 0.91), record("ab-12.com", 0.4)];
        let result = format_records_table_with_width(&records, false, None);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("0.91"));
        assert!(lines[0].ends_with("abc.com"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].ends_with("ab-12.com"));
    }

    #[test]
    fn test_table_truncates_on_narrow_terminal() {
        let records = vec![record("averyveryverylongdomainnamethatkeepsgoing.com", 0.5)];
        let result = format_records_table_with_width(&records, false, Some(60));
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_tsv() {
        let records = vec![record("abc.com", 0.91)];
        assert_eq!(format_tsv(&records), "0.91\t0.83\t7\t0\t0\tabc.com");
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_summary_top_suggestions() {
        let records: Vec<_> = (0..20).map(|i| record(&format!("d{}.com", i), 0.5)).collect();
        let summary = Summary::new(100, &records);
        assert_eq!(summary.total, 100);
        assert_eq!(summary.filtered, 20);
        assert_eq!(summary.suggestions.len(), SUGGESTION_COUNT);
        assert_eq!(summary.suggestions[0], "d0.com");
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::new(5, &[]);
        assert_eq!(summary.suggestions_line(), "---");
        assert_eq!(
            format_summary(&summary, false),
            "0 of 5 domains match\nTop picks: ---"
        );
    }
}
