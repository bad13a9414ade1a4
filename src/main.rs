// src/main.rs

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ativiza_admin::{
    api::{Navigator, SIGN_IN_ROUTE},
    cli::{Cli, Command},
    common::i18n::MessageKey,
    handlers, AppConfig, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs no stderr; o stdout fica só com os dados
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env();
    let is_login = matches!(cli.command, Command::Login { .. });
    let initial_route = if is_login { SIGN_IN_ROUTE } else { "/" };

    let state = AppState::new(&config, initial_route)?;

    if let Err(e) = state.session.restore().await {
        tracing::warn!("Não foi possível restaurar a sessão: {}", e);
    }

    match handlers::dispatch(&state, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{}", e.user_message(state.locale));
            // O cliente derrubou a sessão no meio do comando
            if !is_login && state.navigator.current_route() == SIGN_IN_ROUTE {
                eprintln!("{}", state.locale.message(MessageKey::SessionExpired));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
