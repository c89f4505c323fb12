use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use domain_radar::config::Config;
use domain_radar::filter::{DomainEngine, FilterConfig};
use domain_radar::output::{self, Summary};
use domain_radar::sanitize::CandidateList;
use domain_radar::source::{resolve_source, Source};
use domain_radar::SourceError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_SOURCE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

/// Filter flags; each one is applied through `FilterConfig::update_filter`
/// on top of the config file's `filters` section.
#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Free-text search
    #[arg(short, long)]
    query: Option<String>,

    /// How the query matches: contains, startsWith, endsWith, regex
    #[arg(long)]
    mode: Option<String>,

    /// Additional regular expression every domain must match
    #[arg(long)]
    regex: Option<String>,

    #[arg(long, value_name = "PREFIX")]
    starts_with: Option<String>,

    #[arg(long, value_name = "SUFFIX")]
    ends_with: Option<String>,

    #[arg(long, value_name = "N")]
    min_length: Option<String>,

    #[arg(long, value_name = "N")]
    max_length: Option<String>,

    #[arg(long, value_name = "N")]
    max_hyphens: Option<String>,

    /// Minimum readable ratio, between 0 and 1
    #[arg(long, value_name = "RATIO")]
    min_readable: Option<String>,

    /// Sort order: score, length, domain, readableRatio
    #[arg(long)]
    sort_by: Option<String>,

    /// Exclude domains containing digits
    #[arg(long)]
    no_numbers: bool,

    /// Exclude domains containing hyphens
    #[arg(long)]
    no_hyphens: bool,

    /// Keep only domains made entirely of letters
    #[arg(long)]
    letters_only: bool,

    /// Set any filter option by name (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,
}

impl FilterArgs {
    fn apply(&self, filters: &mut FilterConfig) -> anyhow::Result<()> {
        let values = [
            ("query", &self.query),
            ("mode", &self.mode),
            ("regex", &self.regex),
            ("startsWith", &self.starts_with),
            ("endsWith", &self.ends_with),
            ("minLength", &self.min_length),
            ("maxLength", &self.max_length),
            ("maxHyphens", &self.max_hyphens),
            ("minReadable", &self.min_readable),
            ("sortBy", &self.sort_by),
        ];
        for (name, value) in values {
            if let Some(value) = value {
                filters.update_filter(name, value)?;
            }
        }

        if self.no_numbers {
            filters.update_filter("allowNumbers", "false")?;
        }
        if self.no_hyphens {
            filters.update_filter("onlyNoHyphen", "true")?;
        }
        if self.letters_only {
            filters.update_filter("onlyLetters", "true")?;
        }

        for pair in &self.set {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Expected NAME=VALUE, got '{}'", pair))?;
            filters.update_filter(name.trim(), value)?;
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone, Default)]
struct InputArgs {
    /// Domain list file, or `-` for stdin (defaults to `source` in the config)
    source: Option<PathBuf>,

    #[command(flatten)]
    filters: FilterArgs,
}

#[derive(Args, Debug, Clone)]
struct ListArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Show at most N domains
    #[arg(short = 'n', long, value_name = "N")]
    limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ranked, filtered domains (default if no subcommand)
    List(ListArgs),
    /// Write the filtered domains as CSV
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output file, or `-` for stdout (defaults to `export_path` in the
        /// config, then filtered-domains.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Browse and filter the list interactively
    Tui {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,

        /// Domain list to record as the default source
        #[arg(long)]
        source: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "domain-radar")]
#[command(about = "Rank and filter domain name lists", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/domain-radar/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    list: ListArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    domain_radar::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List(cli.list));

    // Init writes the config, so it must not depend on loading one
    if let Commands::Init { force, source } = command {
        let path = match cli.config.or_else(domain_radar::config::get_config_path) {
            Some(p) => p,
            None => {
                eprintln!("Config error: could not determine home directory");
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = domain_radar::config::write_default_config(&path, source, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match domain_radar::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup; values from the file skip the flag parsers
    if let Err(errors) = config.validate() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let engine = DomainEngine::new(config.engine_settings());

    let input = match &command {
        Commands::List(args) => &args.input,
        Commands::Export { input, .. } | Commands::Tui { input } => input,
        Commands::Init { .. } => unreachable!("handled above"),
    };

    let filters = match build_filters(&config, &input.filters) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Filter error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let start_time = Instant::now();
    let (source, candidates) =
        match load_candidates(&engine, input.source.as_deref(), config.source.as_deref()) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Source error: {}", e);
                std::process::exit(EXIT_SOURCE);
            }
        };
    tracing::debug!(
        source = %source.display_name(),
        candidates = candidates.len(),
        elapsed = ?start_time.elapsed(),
        "loaded candidates"
    );

    match command {
        Commands::List(args) => {
            let records = engine.filter(&candidates, &filters);
            let summary = Summary::new(candidates.len(), &records);
            let shown = &records[..args.limit.unwrap_or(records.len()).min(records.len())];

            match args.format {
                OutputFormat::Table => {
                    let use_colors = output::should_use_colors();
                    println!("{}", output::format_records_table(shown, use_colors));
                    println!();
                    println!("{}", output::format_summary(&summary, use_colors));
                }
                OutputFormat::Tsv => println!("{}", output::format_tsv(shown)),
                OutputFormat::Json => match serde_json::to_string_pretty(shown) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize results: {}", e);
                        std::process::exit(EXIT_FAILURE);
                    }
                },
            }
        }
        Commands::Export { output: path, .. } => {
            let records = engine.filter(&candidates, &filters);
            let path = path
                .or_else(|| config.export_path.clone())
                .unwrap_or_else(|| PathBuf::from(output::DEFAULT_EXPORT_FILE));

            if path == Path::new("-") {
                println!("{}", output::format_csv(&records));
            } else {
                if let Err(e) = output::write_csv(&path, &records) {
                    eprintln!("Export failed: {:#}", e);
                    std::process::exit(EXIT_FAILURE);
                }
                eprintln!("Exported {} domains to {}", records.len(), path.display());
            }
        }
        Commands::Tui { .. } => {
            let debounce = match config.tui.debounce() {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Config error: invalid tui.query_debounce: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let export_path = config
                .export_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(output::DEFAULT_EXPORT_FILE));
            let theme = domain_radar::tui::resolve_theme(config.tui.theme);

            let app = domain_radar::tui::App::new(
                engine,
                source,
                candidates,
                filters,
                debounce,
                export_path,
            );
            if let Err(e) = domain_radar::tui::run_tui(app, theme).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::Init { .. } => unreachable!("handled above"),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn build_filters(config: &Config, args: &FilterArgs) -> anyhow::Result<FilterConfig> {
    let mut filters = config.filters.clone();
    args.apply(&mut filters)?;
    Ok(filters)
}

fn load_candidates(
    engine: &DomainEngine,
    arg: Option<&Path>,
    configured: Option<&Path>,
) -> Result<(Source, CandidateList), SourceError> {
    let source = resolve_source(arg, configured)?;
    let text = source.read()?;
    let candidates = engine.sanitize(&text);
    Ok((source, candidates))
}
