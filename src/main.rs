//! Binary entry point for credeq.
//!
//! This binary provides the CLI interface for the credit-equivalence
//! analysis engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use credeq::config::EngineConfig;
use credeq::models::AnalyzeRequest;
use credeq::observability::{self, LogFormat, LoggingConfig};
use credeq::services::AnalysisService;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Credeq - subject-matching and credit-equivalence decision engine.
#[derive(Parser)]
#[command(name = "credeq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyze one application and print the decision as JSON.
    Analyze {
        /// The subject being evaluated.
        #[arg(short, long)]
        subject: String,

        /// Application type: "Credit Transfer" or "Credit Exemption".
        #[arg(short = 't', long = "type", default_value = "Credit Exemption")]
        app_type: String,

        /// Alias for the subject (repeatable); defaults to the subject name.
        #[arg(short, long = "alias")]
        aliases: Vec<String>,

        /// Applicant document (repeatable): transcript and prior syllabus.
        #[arg(long = "applicant-file", required = true)]
        applicant_files: Vec<PathBuf>,

        /// Target institution document (repeatable).
        #[arg(long = "sunway-file", required = true)]
        sunway_files: Vec<PathBuf>,
    },

    /// Start the analysis HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    // Load a local .env when present; ignored otherwise.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config.with_env_overrides(),
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig {
        format: config
            .logging
            .format
            .as_deref()
            .map(LogFormat::parse)
            .unwrap_or_default(),
        verbose: cli.verbose,
    };
    if let Err(e) = observability::init(&logging) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let result = run_command(cli, config).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(cli: Cli, config: EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Analyze {
            subject,
            app_type,
            aliases,
            applicant_files,
            sunway_files,
        } => {
            cmd_analyze(
                &config,
                subject,
                app_type,
                aliases,
                applicant_files,
                sunway_files,
            )
            .await
        },

        Commands::Serve { port } => cmd_serve(&config, port).await,

        Commands::Config { show } => cmd_config(&config, show),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return EngineConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("CREDEQ_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return EngineConfig::load_from_file(std::path::Path::new(&config_path))
                .map_err(std::convert::Into::into);
        }
    }

    // Otherwise, load from default location
    Ok(EngineConfig::load_default())
}

/// Analyze command.
async fn cmd_analyze(
    config: &EngineConfig,
    subject: String,
    app_type: String,
    aliases: Vec<String>,
    applicant_files: Vec<PathBuf>,
    sunway_files: Vec<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = Arc::new(AnalysisService::from_config(config));
    let request = AnalyzeRequest {
        app_type,
        subject_name: subject,
        subject_aliases: aliases,
        applicant_files,
        sunway_files,
    };

    // The pipeline blocks on model calls; keep it off the async runtime.
    let response =
        tokio::task::spawn_blocking(move || service.analyze(&request)).await??;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Serve command.
async fn cmd_serve(config: &EngineConfig, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let service = Arc::new(AnalysisService::from_config(config));
    credeq::server::serve(service, port).await?;
    Ok(())
}

/// Config command.
fn cmd_config(config: &EngineConfig, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current Configuration");
        println!("=====================");
        println!();
        println!("Version: {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Minimum Match Score: {}", config.min_match_score);
        println!(
            "Minimum Similarity Percent: {}",
            config.min_similarity_percent
        );
        println!("Minimum Passing Grade: {}", config.min_passing_grade);
        println!("Minimum Credit Hours: {}", config.min_credit_hours);
        println!("Window Radius: {}", config.window_radius);
        println!();
        println!("Generative Fallback:");
        println!("  Enabled: {}", config.llm.enabled);
        println!(
            "  Endpoint: {}",
            config.llm.endpoint.as_deref().unwrap_or("(default)")
        );
        println!(
            "  Model: {}",
            config.llm.model.as_deref().unwrap_or("(default)")
        );
    } else {
        println!("Use --show to display configuration");
    }

    Ok(())
}
