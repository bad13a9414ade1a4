// src/services/auth.rs

use serde_json::Value;

use crate::{
    api::client::ApiClient,
    common::error::AppError,
    models::auth::{
        ForgotPasswordPayload, LoginPayload, LoginResponse, MessageResponse,
        ResetPasswordPayload, TokenPair, User,
    },
    models::common::ApiResponse,
};

// Chamadas cruas de /auth/*; quem guarda o estado é o SessionManager
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &LoginPayload) -> Result<LoginResponse, AppError> {
        let envelope: ApiResponse<LoginResponse> =
            self.client.post("/auth/login", Some(credentials)).await?;
        envelope.into_result("Login failed")
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        let _: Value = self.client.post::<_, ()>("/auth/logout", None).await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<User, AppError> {
        let envelope: ApiResponse<User> = self.client.get::<_, ()>("/auth/me", None).await?;
        envelope.into_result("Failed to get user")
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        self.client.refresh_tokens(refresh_token).await
    }

    pub async fn forgot_password(&self, payload: &ForgotPasswordPayload) -> Result<MessageResponse, AppError> {
        let envelope: ApiResponse<MessageResponse> =
            self.client.post("/auth/forgot-password", Some(payload)).await?;
        envelope.into_result("Failed to send reset email")
    }

    pub async fn reset_password(&self, payload: &ResetPasswordPayload) -> Result<MessageResponse, AppError> {
        let envelope: ApiResponse<MessageResponse> =
            self.client.post("/auth/reset-password", Some(payload)).await?;
        envelope.into_result("Failed to reset password")
    }
}
