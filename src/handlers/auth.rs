// src/handlers/auth.rs

use crate::{
    common::{error::AppError, i18n::MessageKey},
    config::AppState,
    handlers::{notice, print_json},
    models::auth::{ForgotPasswordPayload, LoginPayload, ResetPasswordPayload},
};

pub async fn login(state: &AppState, email: String, password: String) -> Result<(), AppError> {
    let payload = LoginPayload { email, password };
    let user = state.session.login(&payload).await?;

    notice(state.locale.message(MessageKey::LoggedIn));
    print_json(&user)
}

pub async fn logout(state: &AppState) -> Result<(), AppError> {
    state.session.logout().await;
    notice(state.locale.message(MessageKey::LoggedOut));
    Ok(())
}

// Sempre consulta o servidor; a cópia local pode estar desatualizada
pub async fn me(state: &AppState) -> Result<(), AppError> {
    let user = state.session.refresh_user().await?;
    print_json(&user)
}

pub async fn forgot_password(state: &AppState, email: String) -> Result<(), AppError> {
    let response = state
        .session
        .forgot_password(&ForgotPasswordPayload { email })
        .await?;
    notice(&response.message);
    Ok(())
}

pub async fn reset_password(state: &AppState, token: String, password: String) -> Result<(), AppError> {
    let response = state
        .session
        .reset_password(&ResetPasswordPayload { token, password })
        .await?;
    notice(&response.message);
    Ok(())
}
