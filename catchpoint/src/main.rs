mod commands;
mod config;
mod observability;

use crate::commands::CommandError;
use crate::config::{Config, ConfigError};
use catchpoint_api::TestId;
use catchpoint_provider::ResourceKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(about = "Manage Catchpoint synthetic tests from YAML documents")]
struct Cli {
    /// YAML file with provider, metrics and logging settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Check a document without contacting the API.
    Validate { file: PathBuf },
    /// Create the test described by a document.
    Create { file: PathBuf },
    /// Print the current state of a test.
    Read {
        /// Resource type such as `web_test` or `dns_test`.
        kind: ResourceKind,
        id: TestId,
    },
    /// Bring an existing test in line with a document.
    Update { file: PathBuf, id: TestId },
    /// Delete a test.
    Delete { id: TestId },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Observability(#[from] observability::ObservabilityError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("could not start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let _guard = observability::init(&config)?;

    let result = execute(&config, cli.command);
    if let Err(error) = &result {
        tracing::error!(error = %error, "command failed");
    }
    result
}

fn execute(config: &Config, command: CliCommand) -> Result<String, CliError> {
    if let CliCommand::Validate { file } = &command {
        return Ok(commands::validate(file)?);
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(run_async(config, command))?)
}

async fn run_async(config: &Config, command: CliCommand) -> Result<String, CommandError> {
    let settings = config.provider.resolve()?;
    let client = settings.client()?;

    match command {
        CliCommand::Validate { file } => commands::validate(&file),
        CliCommand::Create { file } => commands::create(&client, &file).await,
        CliCommand::Read { kind, id } => commands::read(&client, kind, id).await,
        CliCommand::Update { file, id } => commands::update(&client, &file, id).await,
        CliCommand::Delete { id } => commands::remove(&client, id).await,
    }
}
