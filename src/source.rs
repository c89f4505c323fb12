use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// Where the raw domain list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
}

impl Source {
    /// `-` selects stdin, anything else is a file path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Source::Stdin
        } else {
            Source::File(arg.to_path_buf())
        }
    }

    /// Short name for status lines.
    pub fn display_name(&self) -> String {
        match self {
            Source::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Source::Stdin => "<stdin>".to_string(),
        }
    }

    pub fn can_reload(&self) -> bool {
        matches!(self, Source::File(_))
    }

    /// Read the complete source text. Invalid UTF-8 sequences are replaced,
    /// the sanitizer drops those lines afterwards.
    pub fn read(&self) -> Result<String, SourceError> {
        match self {
            Source::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| SourceError::Read {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "read source file");
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Source::Stdin => {
                let mut bytes = Vec::new();
                std::io::stdin()
                    .lock()
                    .read_to_end(&mut bytes)
                    .map_err(SourceError::Stdin)?;
                tracing::debug!(bytes = bytes.len(), "read source from stdin");
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

/// Resolve the source from the CLI argument, falling back to the config file.
pub fn resolve_source(arg: Option<&Path>, configured: Option<&Path>) -> Result<Source, SourceError> {
    arg.or(configured)
        .map(Source::from_arg)
        .ok_or(SourceError::Missing)
}
