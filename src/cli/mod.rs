//! # Command Line Interface
//!
//! `vault-kv-backup [-quiet] [-file <path>] <kv-mount-path>`
//!
//! Invalid invocations (unknown flags, bad flag values, a wrong number of
//! positionals) print the problem to stderr and the usage to stdout and exit
//! successfully without contacting Vault. Any failure once the backup has
//! started exits with status 1.

pub mod args;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use tracing::{info, warn};

use crate::backup::{run_backup, BackupSummary, Progress};
use crate::config::vault::parse_bool;
use crate::config::{BackupConfig, VaultConfig, DEFAULT_BACKUP_FILE};
use crate::errors::BackupError;
use crate::observability::{init_logging, log_config_info};
use crate::secrets::VaultClient;

#[derive(Parser, Debug)]
#[command(name = "vault-kv-backup")]
#[command(about = "Back up every secret of a Vault KV v2 mount into a JSON file")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(override_usage = "vault-kv-backup [OPTIONS] <kv-mount-path>")]
#[command(args_override_self = true)]
pub struct Cli {
    /// Quiet progress: print one dot per secret
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = parse_flag_bool
    )]
    pub quiet: bool,

    /// Vault kv backup json file path
    #[arg(long, value_name = "path", default_value = DEFAULT_BACKUP_FILE, allow_hyphen_values = true)]
    pub file: PathBuf,

    /// KV v2 mount to back up, e.g. "secret"
    #[arg(value_name = "kv-mount-path", trailing_var_arg = true)]
    pub mount_paths: Vec<String>,
}

/// Booleans take the same spellings as `VAULT_SKIP_VERIFY`.
fn parse_flag_bool(raw: &str) -> Result<bool, String> {
    parse_bool(raw).ok_or_else(|| format!("expected one of 1, t, true, 0, f, false; got {raw:?}"))
}

/// What a command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Run a backup
    Backup(BackupConfig),
    /// Print help or version text to stdout
    Display(String),
    /// Print the message to stderr and the usage to stdout
    Usage(String),
}

/// Interpret a full command line, program name first.
pub fn parse_invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let cli = match Cli::try_parse_from(args::normalize_go_style_flags(args)) {
        Ok(cli) => cli,
        Err(e) => {
            let rendered = e.render().to_string();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Invocation::Display(rendered),
                _ => Invocation::Usage(rendered.trim_end().to_string()),
            };
        }
    };

    match <[String; 1]>::try_from(cli.mount_paths) {
        Ok([mount_path]) => Invocation::Backup(
            BackupConfig::new(mount_path).with_quiet(cli.quiet).with_output_file(cli.file),
        ),
        Err(paths) => Invocation::Usage(format!(
            "invalid number of arguments: {}. expected 1 argument.",
            paths.len()
        )),
    }
}

/// Full help text, used as the usage message.
pub fn usage_text() -> String {
    Cli::command().render_help().to_string()
}

/// Run with the process arguments.
pub async fn run_cli() -> ExitCode {
    let args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    run_cli_from(args).await
}

/// Run with the given arguments and return the process exit code.
pub async fn run_cli_from<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let config = match parse_invocation(args) {
        Invocation::Backup(config) => config,
        Invocation::Display(text) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
        Invocation::Usage(message) => {
            eprintln!("{message}\n");
            print!("{}", usage_text());
            return ExitCode::SUCCESS;
        }
    };

    let dotenv = dotenvy::dotenv();
    init_logging();
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "Error loading .env file");
        }
    }

    match execute(&config).await {
        Ok(summary) => {
            info!(
                secrets = summary.secret_count,
                file = %summary.output_file.display(),
                "Backup complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn execute(config: &BackupConfig) -> anyhow::Result<BackupSummary> {
    let vault_config = VaultConfig::from_env().map_err(BackupError::from)?;
    log_config_info(config, &vault_config);

    let client = VaultClient::new(vault_config).map_err(BackupError::from)?;
    let mut progress = Progress::stdout(config.quiet);

    Ok(run_backup(config, &client, &mut progress).await?)
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<BackupError>().map_or(1, BackupError::exit_code)
}
