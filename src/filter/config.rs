use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// How the free-text query is matched against a domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    #[default]
    Contains,
    StartsWith,
    EndsWith,
    Regex,
}

impl MatchMode {
    pub const ALL: [MatchMode; 4] = [
        MatchMode::Contains,
        MatchMode::StartsWith,
        MatchMode::EndsWith,
        MatchMode::Regex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Contains => "contains",
            MatchMode::StartsWith => "startsWith",
            MatchMode::EndsWith => "endsWith",
            MatchMode::Regex => "regex",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

/// Field the result set is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Score,
    Length,
    Domain,
    ReadableRatio,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [
        SortBy::Score,
        SortBy::Length,
        SortBy::Domain,
        SortBy::ReadableRatio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Score => "score",
            SortBy::Length => "length",
            SortBy::Domain => "domain",
            SortBy::ReadableRatio => "readableRatio",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

/// Lowercase with `_`/`-` removed, so `startsWith`, `starts_with` and
/// `starts-with` all compare equal.
fn fold_name(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_name(s);
        Self::ALL
            .into_iter()
            .find(|m| fold_name(m.as_str()) == folded)
            .ok_or_else(|| "expected contains, startsWith, endsWith or regex".to_string())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_name(s);
        Self::ALL
            .into_iter()
            .find(|m| fold_name(m.as_str()) == folded)
            .ok_or_else(|| "expected score, length, domain or readableRatio".to_string())
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every recognized filter option, in filter panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Query,
    Mode,
    Regex,
    StartsWith,
    EndsWith,
    MinLength,
    MaxLength,
    MaxHyphens,
    MinReadable,
    AllowNumbers,
    OnlyNoHyphen,
    OnlyLetters,
    SortBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Flag,
    Choice,
}

impl FilterField {
    pub const ALL: [FilterField; 13] = [
        FilterField::Query,
        FilterField::Mode,
        FilterField::Regex,
        FilterField::StartsWith,
        FilterField::EndsWith,
        FilterField::MinLength,
        FilterField::MaxLength,
        FilterField::MaxHyphens,
        FilterField::MinReadable,
        FilterField::AllowNumbers,
        FilterField::OnlyNoHyphen,
        FilterField::OnlyLetters,
        FilterField::SortBy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Query => "query",
            FilterField::Mode => "mode",
            FilterField::Regex => "regex",
            FilterField::StartsWith => "startsWith",
            FilterField::EndsWith => "endsWith",
            FilterField::MinLength => "minLength",
            FilterField::MaxLength => "maxLength",
            FilterField::MaxHyphens => "maxHyphens",
            FilterField::MinReadable => "minReadable",
            FilterField::AllowNumbers => "allowNumbers",
            FilterField::OnlyNoHyphen => "onlyNoHyphen",
            FilterField::OnlyLetters => "onlyLetters",
            FilterField::SortBy => "sortBy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Query => "Search",
            FilterField::Mode => "Match mode",
            FilterField::Regex => "Regex",
            FilterField::StartsWith => "Starts with",
            FilterField::EndsWith => "Ends with",
            FilterField::MinLength => "Min length",
            FilterField::MaxLength => "Max length",
            FilterField::MaxHyphens => "Max hyphens",
            FilterField::MinReadable => "Min readable",
            FilterField::AllowNumbers => "Allow numbers",
            FilterField::OnlyNoHyphen => "No hyphens",
            FilterField::OnlyLetters => "Letters only",
            FilterField::SortBy => "Sort by",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FilterField::Query
            | FilterField::Regex
            | FilterField::StartsWith
            | FilterField::EndsWith => FieldKind::Text,
            FilterField::MinLength
            | FilterField::MaxLength
            | FilterField::MaxHyphens
            | FilterField::MinReadable => FieldKind::Number,
            FilterField::AllowNumbers | FilterField::OnlyNoHyphen | FilterField::OnlyLetters => {
                FieldKind::Flag
            }
            FilterField::Mode | FilterField::SortBy => FieldKind::Choice,
        }
    }
}

impl FromStr for FilterField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_name(s);
        Self::ALL
            .into_iter()
            .find(|f| fold_name(f.name()) == folded)
            .ok_or_else(|| FilterError::UnknownField(s.to_string()))
    }
}

/// The full set of filter options; fully determines the result set and its
/// order for a given candidate list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct FilterConfig {
    pub query: String,
    pub mode: MatchMode,
    pub regex: String,
    pub starts_with: String,
    pub ends_with: String,
    pub min_length: usize,
    pub max_length: usize,
    pub max_hyphens: usize,
    pub min_readable: f64,
    pub allow_numbers: bool,
    pub only_no_hyphen: bool,
    pub only_letters: bool,
    pub sort_by: SortBy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            mode: MatchMode::Contains,
            regex: String::new(),
            starts_with: String::new(),
            ends_with: String::new(),
            min_length: 3,
            max_length: 30,
            max_hyphens: 2,
            min_readable: 0.0,
            allow_numbers: true,
            only_no_hyphen: false,
            only_letters: false,
            sort_by: SortBy::Score,
        }
    }
}

fn invalid(field: FilterField, value: &str, reason: impl Into<String>) -> FilterError {
    FilterError::InvalidValue {
        field: field.name(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_flag(field: FilterField, raw: &str) -> Result<bool, FilterError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(field, raw, "expected true or false")),
    }
}

fn parse_count(field: FilterField, raw: &str) -> Result<usize, FilterError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(field, raw, "expected a non-negative whole number"))
}

impl FilterConfig {
    /// Update one option from raw widget text.
    ///
    /// On error the configuration is left unchanged.
    pub fn update(&mut self, field: FilterField, raw: &str) -> Result<(), FilterError> {
        match field {
            FilterField::Query => self.query = raw.to_string(),
            FilterField::Regex => self.regex = raw.to_string(),
            FilterField::StartsWith => self.starts_with = raw.to_string(),
            FilterField::EndsWith => self.ends_with = raw.to_string(),
            FilterField::Mode => {
                self.mode = raw.parse().map_err(|e: String| invalid(field, raw, e))?
            }
            FilterField::SortBy => {
                self.sort_by = raw.parse().map_err(|e: String| invalid(field, raw, e))?
            }
            FilterField::MinLength => self.min_length = parse_count(field, raw)?,
            FilterField::MaxLength => self.max_length = parse_count(field, raw)?,
            FilterField::MaxHyphens => self.max_hyphens = parse_count(field, raw)?,
            FilterField::MinReadable => {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| invalid(field, raw, "expected a number between 0 and 1"))?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(invalid(field, raw, "expected a number between 0 and 1"));
                }
                self.min_readable = value;
            }
            FilterField::AllowNumbers => self.allow_numbers = parse_flag(field, raw)?,
            FilterField::OnlyNoHyphen => self.only_no_hyphen = parse_flag(field, raw)?,
            FilterField::OnlyLetters => self.only_letters = parse_flag(field, raw)?,
        }
        Ok(())
    }

    /// Update an option by name (`minLength`, `min_length` and `min-length`
    /// are all accepted).
    pub fn update_filter(&mut self, name: &str, value: &str) -> Result<(), FilterError> {
        let field: FilterField = name.parse()?;
        self.update(field, value)
    }

    /// Clear the free-text and pattern fields, keeping every threshold.
    pub fn reset_filters(&mut self) {
        self.query.clear();
        self.regex.clear();
        self.starts_with.clear();
        self.ends_with.clear();
    }

    /// Current value of a field, formatted the way `update` accepts it.
    pub fn value_of(&self, field: FilterField) -> String {
        match field {
            FilterField::Query => self.query.clone(),
            FilterField::Mode => self.mode.to_string(),
            FilterField::Regex => self.regex.clone(),
            FilterField::StartsWith => self.starts_with.clone(),
            FilterField::EndsWith => self.ends_with.clone(),
            FilterField::MinLength => self.min_length.to_string(),
            FilterField::MaxLength => self.max_length.to_string(),
            FilterField::MaxHyphens => self.max_hyphens.to_string(),
            FilterField::MinReadable => format!("{:.2}", self.min_readable),
            FilterField::AllowNumbers => self.allow_numbers.to_string(),
            FilterField::OnlyNoHyphen => self.only_no_hyphen.to_string(),
            FilterField::OnlyLetters => self.only_letters.to_string(),
            FilterField::SortBy => self.sort_by.to_string(),
        }
    }

    /// Check values that did not come through `update`, such as the
    /// `filters` section of the config file.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.min_readable) {
            errors.push(format!(
                "filters.min_readable: must be a number between 0 and 1 (got {})",
                self.min_readable
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy of this configuration with the query replaced, used to apply a
    /// deferred query value.
    pub fn with_query(&self, query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.mode, MatchMode::Contains);
        assert_eq!(config.min_length, 3);
        assert_eq!(config.max_length, 30);
        assert_eq!(config.max_hyphens, 2);
        assert!(config.allow_numbers);
        assert!(!config.only_no_hyphen);
        assert!(!config.only_letters);
        assert_eq!(config.sort_by, SortBy::Score);
    }

    #[test]
    fn test_field_name_spellings() {
        assert_eq!("startsWith".parse::<FilterField>().unwrap(), FilterField::StartsWith);
        assert_eq!("starts_with".parse::<FilterField>().unwrap(), FilterField::StartsWith);
        assert_eq!("starts-with".parse::<FilterField>().unwrap(), FilterField::StartsWith);
        assert_eq!("MINREADABLE".parse::<FilterField>().unwrap(), FilterField::MinReadable);
    }

    #[test]
    fn test_update_filter_text_and_numbers() {
        let mut config = FilterConfig::default();
        config.update_filter("query", "crypto").unwrap();
        config.update_filter("mode", "startsWith").unwrap();
        config.update_filter("maxLength", "12").unwrap();
        config.update_filter("min_readable", "0.5").unwrap();
        config.update_filter("allowNumbers", "no").unwrap();
        config.update_filter("sortBy", "readable_ratio").unwrap();

        assert_eq!(config.query, "crypto");
        assert_eq!(config.mode, MatchMode::StartsWith);
        assert_eq!(config.max_length, 12);
        assert_eq!(config.min_readable, 0.5);
        assert!(!config.allow_numbers);
        assert_eq!(config.sort_by, SortBy::ReadableRatio);
    }

    #[test]
    fn test_update_unknown_field() {
        let mut config = FilterConfig::default();
        let err = config.update_filter("color", "red").unwrap_err();
        assert_eq!(err, FilterError::UnknownField("color".to_string()));
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_invalid_value_leaves_config_unchanged() {
        let mut config = FilterConfig::default();
        assert!(config.update_filter("minLength", "-3").is_err());
        assert!(config.update_filter("minReadable", "1.5").is_err());
        assert!(config.update_filter("onlyLetters", "maybe").is_err());
        assert!(config.update_filter("mode", "fuzzy").is_err());
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_reset_keeps_thresholds() {
        let mut config = FilterConfig {
            query: "abc".to_string(),
            regex: "^a".to_string(),
            starts_with: "a".to_string(),
            ends_with: ".com".to_string(),
            max_length: 8,
            allow_numbers: false,
            ..FilterConfig::default()
        };
        config.reset_filters();

        assert!(config.query.is_empty());
        assert!(config.regex.is_empty());
        assert!(config.starts_with.is_empty());
        assert!(config.ends_with.is_empty());
        assert_eq!(config.max_length, 8);
        assert!(!config.allow_numbers);
    }

    #[test]
    fn test_value_of_roundtrips_through_update() {
        let source = FilterConfig {
            query: "net".to_string(),
            mode: MatchMode::EndsWith,
            min_readable: 0.25,
            only_letters: true,
            sort_by: SortBy::Domain,
            ..FilterConfig::default()
        };
        let mut copy = FilterConfig::default();
        for field in FilterField::ALL {
            copy.update(field, &source.value_of(field)).unwrap();
        }
        assert_eq!(copy, source);
    }

    #[test]
    fn test_cycle_choices() {
        assert_eq!(MatchMode::Contains.next(), MatchMode::StartsWith);
        assert_eq!(MatchMode::Regex.next(), MatchMode::Contains);
        assert_eq!(SortBy::ReadableRatio.next(), SortBy::Score);
    }

    #[test]
    fn test_filters_section_parse() {
        let yaml = r#"
mode: endsWith
max_length: 12
allow_numbers: false
sort_by: readableRatio
"#;
        let config: FilterConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.mode, MatchMode::EndsWith);
        assert_eq!(config.max_length, 12);
        assert!(!config.allow_numbers);
        assert_eq!(config.sort_by, SortBy::ReadableRatio);
        assert_eq!(config.min_length, 3);
    }

    #[test]
    fn test_validate_min_readable() {
        assert!(FilterConfig::default().validate().is_ok());

        for bad in [5.0, -0.1, f64::NAN] {
            let config = FilterConfig {
                min_readable: bad,
                ..FilterConfig::default()
            };
            let errors = config.validate().unwrap_err();
            assert!(errors[0].contains("min_readable"));
        }
    }
}
