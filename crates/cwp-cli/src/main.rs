use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "cwp")]
#[command(about = "Delete a configured list of CloudWatch alarms after confirmation", long_about = None)]
struct Cli {
    /// Environment name; selects the AWS shared-config profile
    /// (currentsite-dev | currentsite-prod, anything else -> currentsite-dev)
    #[arg(long = "env", env = "CWP_ENV", default_value = cwp_config::DEFAULT_PROFILE, global = true)]
    environment: String,

    /// AWS region (empty -> ap-northeast-1)
    #[arg(long, env = "CWP_REGION", default_value = cwp_config::DEFAULT_REGION, global = true)]
    region: String,

    /// YAML file holding `cloudwatch_alarm_list`
    #[arg(long, env = "CWP_ALARM_FILE", default_value = cwp_config::DEFAULT_ALARM_FILE, global = true)]
    file: PathBuf,

    /// Final report format. With `json`, progress goes to stderr.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every listed alarm, confirm, then delete the ones that exist
    Delete {
        /// Exit with status 2 when any deletion failed (default: exit 0)
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Check every listed alarm and report existence. Never prompts or deletes.
    Check,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env.local if present (dev convenience).
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let opts = commands::RunOptions {
        environment: cli.environment,
        region: cli.region,
        file: cli.file,
        format: cli.format,
    };

    match cli.cmd {
        Commands::Delete { strict } => commands::delete::run_delete(opts, strict).await,
        Commands::Check => commands::check::run_check(opts).await,
    }
}

fn init_tracing() {
    // stderr: stdout carries progress and the final report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
