// src/session/manager.rs

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{info, warn};
use validator::Validate;

use crate::{
    common::error::AppError,
    models::auth::{
        AccessTokenClaims, ForgotPasswordPayload, LoginPayload, MessageResponse,
        ResetPasswordPayload, User,
    },
    services::auth::AuthService,
    session::store::{SessionStore, USER_KEY},
};

/// Estado de autenticação do painel: usuário atual + tokens persistidos.
pub struct SessionManager {
    auth: AuthService,
    store: Arc<dyn SessionStore>,
    user: RwLock<Option<User>>,
}

impl SessionManager {
    pub fn new(auth: AuthService, store: Arc<dyn SessionStore>) -> Self {
        Self {
            auth,
            store,
            user: RwLock::new(None),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = user;
    }

    fn persist_user(&self, user: &User) -> Result<(), AppError> {
        self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
        self.set_user(Some(user.clone()));
        Ok(())
    }

    fn clear(&self) {
        if let Err(e) = self.store.clear_auth() {
            tracing::error!("Falha ao limpar a sessão: {}", e);
        }
        self.set_user(None);
    }

    pub async fn login(&self, credentials: &LoginPayload) -> Result<User, AppError> {
        credentials.validate()?;

        let response = self.auth.login(credentials).await?;
        self.store.persist_tokens(&response.tokens())?;
        self.persist_user(&response.user)?;

        info!("Login realizado: {}", response.user.email);
        Ok(response.user)
    }

    /// O servidor é avisado quando possível; o estado local é sempre limpo.
    pub async fn logout(&self) {
        if let Err(e) = self.auth.logout().await {
            warn!("Falha ao encerrar a sessão no servidor: {}", e);
        }
        self.clear();
        info!("Sessão encerrada");
    }

    /// Recarrega `/auth/me`. Se falhar, a sessão inteira é descartada.
    pub async fn refresh_user(&self) -> Result<User, AppError> {
        match self.auth.current_user().await {
            Ok(user) => {
                self.persist_user(&user)?;
                Ok(user)
            }
            Err(e) => {
                warn!("Não foi possível recarregar o usuário: {}", e);
                self.clear();
                Err(e)
            }
        }
    }

    /// Reconstrói a sessão a partir do armazenamento (início da aplicação).
    ///
    /// Um token vencido é renovado com o refresh token; sem ele, ou se a
    /// renovação falhar, tudo é limpo.
    pub async fn restore(&self) -> Result<Option<User>, AppError> {
        let (Some(access_token), Some(raw_user)) = (self.store.access_token(), self.store.get(USER_KEY))
        else {
            return Ok(None);
        };

        let user: User = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(e) => {
                warn!("Usuário salvo ilegível, limpando sessão: {}", e);
                self.clear();
                return Ok(None);
            }
        };

        let expires_at = self
            .store
            .token_expires_at()
            .or_else(|| token_exp(&access_token).map(exp_millis));

        // Sem expiração conhecida o token é mantido; o backend decide
        let expired = expires_at.is_some_and(|at| at <= Utc::now().timestamp_millis());
        if !expired {
            self.set_user(Some(user.clone()));
            return Ok(Some(user));
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            info!("Token expirado e sem refresh token, limpando sessão");
            self.clear();
            return Ok(None);
        };

        match self.auth.refresh(&refresh_token).await {
            Ok(tokens) => {
                self.store.persist_tokens(&tokens)?;
                self.set_user(Some(user.clone()));
                info!("Sessão restaurada com token renovado");
                Ok(Some(user))
            }
            Err(e) => {
                warn!("Falha ao renovar token na restauração: {}", e);
                self.clear();
                Ok(None)
            }
        }
    }

    pub async fn forgot_password(&self, payload: &ForgotPasswordPayload) -> Result<MessageResponse, AppError> {
        payload.validate()?;
        self.auth.forgot_password(payload).await
    }

    pub async fn reset_password(&self, payload: &ResetPasswordPayload) -> Result<MessageResponse, AppError> {
        payload.validate()?;
        self.auth.reset_password(payload).await
    }
}

/// Lê o claim `exp` (segundos) sem verificar a assinatura: só serve para
/// decidir se vale a pena renovar antes de usar o token.
fn token_exp(token: &str) -> Option<i64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    decode::<AccessTokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .and_then(|data| data.claims.exp)
}

/// `exp` em segundos para milissegundos, saturando em claims absurdos.
fn exp_millis(exp: i64) -> i64 {
    exp.saturating_mul(1000)
}
