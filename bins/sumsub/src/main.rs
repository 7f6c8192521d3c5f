//! Sumsub CLI - signed calls to the Sumsub verification API
//!
//! Credentials come from `APP_TOKEN` and `SECRET_KEY`.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::process::ExitCode;
use sumsub_api_client::endpoints::access_tokens::{DEFAULT_LEVEL_NAME, DEFAULT_TTL_SECS};
use sumsub_telemetry::TelemetryConfig;

mod commands;

use commands::{access_token, applicant, sign};

/// Signed access to the Sumsub verification API
#[derive(Parser)]
#[command(name = "sumsub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an SDK access token
    AccessToken {
        /// External user id (random if omitted)
        #[arg(short, long)]
        user_id: Option<String>,

        /// Verification level
        #[arg(short, long, default_value = DEFAULT_LEVEL_NAME)]
        level: String,

        /// Token lifetime in seconds
        #[arg(short, long, default_value_t = DEFAULT_TTL_SECS)]
        ttl: u32,
    },

    /// Show an applicant and its review status
    ApplicantStatus {
        /// Sumsub applicant id
        applicant_id: String,
    },

    /// List verification levels
    Levels,

    /// Print the authentication headers for a request without sending it
    Sign {
        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path including the encoded query string
        #[arg(short, long)]
        path: String,

        /// Unix timestamp in seconds (defaults to now)
        #[arg(short, long)]
        timestamp: Option<i64>,

        /// Request body, signed verbatim
        #[arg(short, long)]
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose(&["sumsub", "sumsub_api_client"])
    } else {
        TelemetryConfig {
            log_level: "warn".to_string(),
            ..TelemetryConfig::from_env()
        }
    };
    if let Err(e) = sumsub_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let result = match cli.command {
        Commands::AccessToken { user_id, level, ttl } => {
            access_token::run(user_id, &level, ttl, cli.format).await
        }

        Commands::ApplicantStatus { applicant_id } => {
            applicant::status(&applicant_id, cli.format).await
        }

        Commands::Levels => applicant::levels(cli.format).await,

        Commands::Sign { method, path, timestamp, body } => {
            sign::run(&method, &path, timestamp, body.as_deref(), cli.format)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
