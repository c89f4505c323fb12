use std::path::PathBuf;

use thiserror::Error;

/// The source text could not be acquired.
///
/// The display string is what the user sees; no candidate list is produced.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unable to read the selected file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read the source list from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("No source file given. Pass a path or set `source` in the config file")]
    Missing,
}

/// A filter option could not be updated from raw widget input.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Unknown filter option '{0}'")]
    UnknownField(String),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}
