use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;

use super::formatter::format_score;
use crate::scoring::DomainRecord;

pub const CSV_HEADER: &str = "domain,length,hyphenCount,digitCount,readableRatio,score";

/// Default export file name when none is configured.
pub const DEFAULT_EXPORT_FILE: &str = "filtered-domains.csv";

/// One CSV line per record, in display order.
///
/// Domains are restricted to the sanitizer alphabet, so no quoting is needed.
pub fn format_csv(records: &[DomainRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + records.len() * 32);
    out.push_str(CSV_HEADER);
    for r in records {
        out.push('\n');
        out.push_str(&format_csv_row(r));
    }
    out
}

pub fn format_csv_row(r: &DomainRecord) -> String {
    format!(
        "{},{},{},{},{},{}",
        r.domain,
        r.length,
        r.hyphen_count,
        r.digit_count,
        format_score(r.readable_ratio),
        format_score(r.score)
    )
}

/// Write the CSV export atomically; the file is never left half-written.
pub fn write_csv(path: &Path, records: &[DomainRecord]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open export file at {}", path.display()))?;

    file.write_all(format_csv(records).as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .with_context(|| format!("Failed to write export file at {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save export file at {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = records.len(), "exported csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DomainRecord {
        DomainRecord {
            domain: "abc.com".to_string(),
            length: 7,
            hyphen_count: 0,
            digit_count: 0,
            readable_ratio: 0.83,
            score: 0.91,
        }
    }

    #[test]
    fn test_single_record() {
        assert_eq!(
            format_csv(&[sample()]),
            "domain,length,hyphenCount,digitCount,readableRatio,score\nabc.com,7,0,0,0.83,0.91"
        );
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(format_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn test_keeps_display_order() {
        let mut second = sample();
        second.domain = "zz-9.net".to_string();
        second.hyphen_count = 1;
        second.digit_count = 1;
        second.score = 0.456;

        let csv = format_csv(&[second, sample()]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "zz-9.net,7,1,1,0.83,0.46");
        assert_eq!(lines[2], "abc.com,7,0,0,0.83,0.91");
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&path, &[sample()]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, format!("{}\nabc.com,7,0,0,0.83,0.91\n", CSV_HEADER));
    }
}
