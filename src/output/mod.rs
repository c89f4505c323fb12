pub mod csv;
pub mod formatter;

pub use csv::{format_csv, write_csv, CSV_HEADER, DEFAULT_EXPORT_FILE};
pub use formatter::{
    format_records_table, format_score, format_summary, format_tsv, should_use_colors, Summary,
    SUGGESTION_COUNT,
};
