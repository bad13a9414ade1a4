pub mod auth;
pub mod plans;
pub mod resources;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{
    cli::{Command, ResourceAction},
    common::error::AppError,
    config::AppState,
};

/// Executa um comando já com a sessão restaurada.
pub async fn dispatch(state: &AppState, command: Command) -> Result<(), AppError> {
    let needs_session = !command.is_public() && !matches!(command, Command::Logout);
    if needs_session && !state.session.is_authenticated() {
        return Err(AppError::Unauthenticated);
    }

    match command {
        Command::Login { email, password } => auth::login(state, email, password).await,
        Command::Logout => auth::logout(state).await,
        Command::Me => auth::me(state).await,
        Command::ForgotPassword { email } => auth::forgot_password(state, email).await,
        Command::ResetPassword { token, password } => auth::reset_password(state, token, password).await,
        Command::Accounts { action } => run_resource(state, &state.accounts, action).await,
        Command::PlatformUsers { action } => run_resource(state, &state.platform_users, action).await,
        Command::Features { action } => run_resource(state, &state.features, action).await,
        Command::Modules { action } => run_resource(state, &state.modules, action).await,
        Command::Qualifications { action } => run_resource(state, &state.qualifications, action).await,
        Command::Plans { action } => plans::run(state, action).await,
    }
}

async fn run_resource<R: crate::services::Resource>(
    state: &AppState,
    service: &crate::services::ResourceService<R>,
    action: ResourceAction,
) -> Result<(), AppError> {
    resources::run(service, action, state.locale).await
}

// Dados vão para stdout em JSON; avisos vão para stderr
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn notice(message: &str) {
    eprintln!("{}", message);
}

/// Pergunta sim/não no terminal. Qualquer coisa diferente de "s"/"y" é não.
pub(crate) async fn confirm(question: &str) -> Result<bool, AppError> {
    let mut stderr = tokio::io::stderr();
    stderr.write_all(format!("{} [s/N] ", question).as_bytes()).await?;
    stderr.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(matches!(
        line.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    ))
}
