use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::Config;

const HEADER: &str = "\
# domain-radar configuration
#
# scoring:   weights of the premium-ness score (must sum to 1)
# sanitizer: comment marker and characters accepted besides letters and digits
# filters:   starting filter values (query, mode, min_length, max_length, ...)
# tui:       query_debounce delays applying the search text while typing
";

/// Write a config file holding the built-in defaults.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_default_config(path: &Path, source: Option<PathBuf>, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite it.",
            path.display()
        );
    }

    let config = Config {
        source,
        ..Config::default()
    };
    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open config file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .and_then(|_| file.write_all(yaml.as_bytes()))
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}
