//! # CloudForge truth-table generator
//!
//! ```bash
//! # Write truth-table.json and the HTML report to ./validation-results
//! truth-table-generator
//!
//! # Custom output directory and preferences file
//! truth-table-generator out/ --config truth-table.toml
//!
//! # Queries (nothing is written)
//! truth-table-generator --explain FARGATE_JENKINS_SERVICE_PRODUCTION_with-domain_ssl-enabled_no-subdomain
//! truth-table-generator --impact VpcFactory.java
//! truth-table-generator --strategy smoke_test
//! ```

use cfc_truth_table::config::constants::{APP_NAME, GENERATOR_VERSION};
use cfc_truth_table::logging::{self, codes, service, LogFormat, LogLevel};
use cfc_truth_table::config::LoggingPreferences;
use cfc_truth_table::{log_info, log_success};
use cfc_truth_table::{GeneratorError, GeneratorPreferences, TruthTableGenerator};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Enumerates every deployment configuration and writes the truth table
#[derive(Parser, Debug)]
#[command(name = "truth-table-generator")]
#[command(version)]
struct Args {
    /// Output directory (overrides preferences and CFC_OUTPUT_DIR)
    output_dir: Option<PathBuf>,

    /// TOML preferences file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,

    /// Log output: text, json or log
    #[arg(long, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,

    /// Least severe level to emit: error, warning, info or debug
    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Skip the HTML report
    #[arg(long)]
    no_html: bool,

    /// Write the data file without indentation
    #[arg(long)]
    compact: bool,

    /// Skip the consistency check before writing
    #[arg(long)]
    skip_verify: bool,

    /// Explain one configuration key and exit
    #[arg(long, value_name = "KEY", conflicts_with_all = ["impact", "strategy"])]
    explain: Option<String>,

    /// List configurations affected by an artifact and exit
    #[arg(long, value_name = "ARTIFACT", conflicts_with = "strategy")]
    impact: Option<String>,

    /// Print one test strategy and exit
    #[arg(long, value_name = "NAME")]
    strategy: Option<String>,
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    LogFormat::parse(value).ok_or_else(|| format!("unknown log format '{}'", value))
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let loaded = load_preferences(&args);
    let logging_preferences = match &loaded {
        Ok(preferences) => preferences.logging.clone(),
        Err(_) => apply_logging_flags(&args, LoggingPreferences::default()),
    };

    if let Err(message) = init_logging(&args, &logging_preferences) {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &message);
        if let Err(error) = &loaded {
            report_failure(error);
        }
        return ExitCode::FAILURE;
    }

    let preferences = match loaded {
        Ok(preferences) => preferences,
        Err(error) => {
            report_failure(&error);
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = &args.config {
        log_success!(codes::success::PREFERENCES_LOADED, "Preferences loaded",
            "path" => path.display()
        );
    }

    let generator = TruthTableGenerator::new(preferences);
    let result = if let Some(key) = &args.explain {
        generator.explain(key).and_then(|explanation| print_json(&explanation))
    } else if let Some(artifact) = &args.impact {
        generator.impact(artifact).and_then(|report| print_json(&report))
    } else if let Some(name) = &args.strategy {
        generator.strategy(name).and_then(|strategy| print_json(&strategy))
    } else {
        run(&generator, args.quiet)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_failure(&error);
            ExitCode::FAILURE
        }
    }
}

/// Log a fatal error with its code; stderr if logging never came up
fn report_failure(error: &GeneratorError) {
    logging::safe_log_error(error.code(), &error.to_string());
}

/// File, then environment, then defaults; flags win over all of them
fn load_preferences(args: &Args) -> Result<GeneratorPreferences, GeneratorError> {
    let mut preferences = match &args.config {
        Some(path) => GeneratorPreferences::load(path)?,
        None => GeneratorPreferences::default(),
    };

    if let Some(output_dir) = &args.output_dir {
        preferences = preferences.with_output_dir(output_dir);
    }
    if args.no_html {
        preferences = preferences.with_emit_html(false);
    }
    if args.compact {
        preferences = preferences.with_pretty_json(false);
    }
    if args.skip_verify {
        preferences = preferences.with_verify_invariants(false);
    }
    preferences.logging = apply_logging_flags(args, preferences.logging);

    preferences.validate()?;
    Ok(preferences)
}

fn apply_logging_flags(args: &Args, mut logging: LoggingPreferences) -> LoggingPreferences {
    if let Some(level) = args.log_level {
        logging.min_log_level = level;
    }
    if args.quiet {
        logging.min_log_level = LogLevel::Error;
    }
    logging
}

fn init_logging(args: &Args, preferences: &LoggingPreferences) -> Result<(), String> {
    let min_level = preferences.min_log_level;
    let format = args.log_format.unwrap_or(if preferences.use_structured_logging {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    if format == LogFormat::Log {
        env_logger::Builder::new()
            .filter_level(min_level.to_log_level().to_level_filter())
            .parse_default_env()
            .try_init()
            .map_err(|e| e.to_string())?;
    }

    logging::init_global_logging_with_service(Arc::new(service::create_service(format, min_level)))?;
    log_info!("Truth table generator starting",
        "app" => APP_NAME,
        "version" => GENERATOR_VERSION
    );
    Ok(())
}

fn run(generator: &TruthTableGenerator, quiet: bool) -> Result<(), GeneratorError> {
    let output = generator.run()?;

    if !quiet {
        println!();
        println!("Truth Table Generation Complete");
        for line in output.summary_lines() {
            println!("  {}", line);
        }
        println!("  Duration: {:.2?}", output.duration);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), GeneratorError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
