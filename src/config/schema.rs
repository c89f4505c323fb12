use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::filter::{EngineSettings, FilterConfig, DEFAULT_DEBOUNCE};
use crate::sanitize::SanitizerRules;
use crate::scoring::{validate_scoring, ScoringWeights};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Domain list loaded when no path is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Where the TUI export key writes the CSV (default: ./filtered-domains.csv)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,

    pub scoring: ScoringWeights,
    pub sanitizer: SanitizerRules,

    /// Starting filter values
    pub filters: FilterConfig,

    pub tui: TuiConfig,
}

impl Config {
    /// Validate every section at startup.
    /// Returns all validation errors at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        for result in [
            validate_scoring(&self.scoring),
            self.sanitizer.validate(),
            self.filters.validate(),
        ] {
            if let Err(section) = result {
                errors.extend(section);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            sanitizer: self.sanitizer.clone(),
            scoring: self.scoring.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct TuiConfig {
    /// How long the search text must be stable before it is applied,
    /// as a humantime string ("150ms", "1s")
    pub query_debounce: String,

    pub theme: ThemeMode,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            query_debounce: humantime::format_duration(DEFAULT_DEBOUNCE).to_string(),
            theme: ThemeMode::Auto,
        }
    }
}

impl TuiConfig {
    pub fn debounce(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(self.query_debounce.trim())
    }
}
