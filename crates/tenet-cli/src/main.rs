//! tenet CLI - style-conformance checker for JavaScript
//!
//! Reads ESTree syntax trees (serialized `*.estree.json` files, or the output
//! of a configured parser command) and checks them against the built-in rules:
//! - no-var-declaration: Use let or const instead of var
//! - single-binding-per-declaration: One binding per declaration statement
//! - prefer-strict-equality: Use === and !== instead of == and !=
//! - casing-convention: Identifier casing follows the identifier's role
//! - prefer-literal-construction: Use [] and {} instead of new Array() and new Object()
//! - prefer-template: Use template literals instead of string concatenation
//! - no-nested-ternary: Conditional expressions must not nest
//! - no-ternary (off by default): Conditional expressions are not allowed
//! - no-class-properties (off by default): Assign fields in the constructor
//! - private-members-last (off by default): Underscore members follow public ones

mod cache;
mod config;
mod ignore;
mod logging;
mod output;
mod process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use cache::Cache;
use config::Config;
use process::{Scanned, Scanner};
use tenet_core::{format_report, OutputFormat, Report};
use tenet_estree::CommandProvider;
use tenet_rules::builtin_registry;

/// Exit code for errors that stop the run before any file is scanned
const FATAL_EXIT: u8 = 3;

#[derive(Parser)]
#[command(name = "tenet")]
#[command(version)]
#[command(about = "Style-conformance checker for JavaScript syntax trees")]
struct Cli {
    /// Files or directories to check
    #[arg(required_unless_present = "list_rules")]
    paths: Vec<PathBuf>,

    /// Show debug logging
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Rules to run (can be specified multiple times). Replaces the default selection.
    #[arg(long, short = 'r', value_name = "RULE")]
    rule: Vec<String>,

    /// Output format: text, json, github
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Path to config file (default: auto-detect .tenet.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Skip files unchanged since the last cached run
    #[arg(long)]
    cache: bool,

    /// Stop starting new files after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Number of worker threads (default: one per core)
    #[arg(long, short = 'j', value_name = "N")]
    jobs: Option<usize>,

    /// Write log records to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Disable colored terminal output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not errors
            return if e.use_stderr() {
                ExitCode::from(FATAL_EXIT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(FATAL_EXIT)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose, cli.log_file.as_deref())?;

    let registry = builtin_registry().context("Failed to register built-in rules")?;

    if cli.list_rules {
        output::print_rules(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration
    let (config, config_path) = if cli.no_config {
        (Config::default(), None)
    } else if let Some(path) = &cli.config {
        (Config::load_path(path)?, Some(path.clone()))
    } else {
        match Config::load()? {
            Some((config, path)) => (config, Some(path)),
            None => (Config::default(), None),
        }
    };
    if let Some(path) = &config_path {
        info!("using config {}", path.display());
    }

    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        let name = cli
            .format
            .as_deref()
            .or(config.output.format.as_deref())
            .unwrap_or("text");
        match OutputFormat::from_str(name) {
            Some(format) => format,
            None => bail!("Unknown output format: {} (expected text, json or github)", name),
        }
    };

    let rules = registry
        .select(&config.rules, &cli.rule)
        .context("Invalid rule selection")?;
    debug!("active rules: {}", rules.ids().join(", "));

    let command = CommandProvider::new(
        config.parser.command.clone(),
        config.parser.extensions.clone(),
    );
    let deadline = cli
        .timeout
        .or(config.run.timeout_secs)
        .map(|secs| Instant::now() + Duration::from_secs(secs));
    let scanner = Scanner::new(&rules, command, deadline);

    let discovered = scanner.discover(&cli.paths, &config);
    debug!("{} files to check", discovered.files.len());

    // The cache lives next to the config file, or in the working directory
    let cache_dir = match config_path.as_ref().and_then(|p| p.parent()) {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    let mut cache = if cli.cache {
        let cache = Cache::load(&cache_dir).unwrap_or_else(|e| {
            warn!("discarding cache: {:#}", e);
            Cache::default()
        });
        if cache.is_empty() {
            debug!("starting with an empty cache in {}", cache_dir.display());
        }
        Some(cache)
    } else {
        None
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.jobs.or(config.run.jobs).unwrap_or(0))
        .build()
        .context("Failed to start worker threads")?;

    let scanned: Vec<Scanned> = pool.install(|| {
        discovered
            .files
            .par_iter()
            .map(|path| scanner.scan(path, cache.as_ref()))
            .collect()
    });

    let mut outcomes: Vec<_> = discovered.rejected_outcomes().collect();
    for Scanned {
        outcome,
        cache_entry,
    } in scanned
    {
        if let (Some(cache), Some(entry)) = (cache.as_mut(), cache_entry) {
            cache.update(outcome.path.clone(), entry);
        }
        outcomes.push(outcome);
    }

    if let Some(cache) = &cache {
        cache.save(&cache_dir)?;
        debug!("cache holds {} files", cache.len());
    }

    let report = Report::build(outcomes, &rules);
    print!("{}", format_report(&report, output_format));
    if output_format == OutputFormat::Text {
        output::print_summary(&report);
    }

    Ok(ExitCode::from(report.exit_status().code()))
}
