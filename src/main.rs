use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    vault_kv_backup::cli::run_cli().await
}
