// src/api/client.rs

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::api::navigation::{Navigator, SIGN_IN_ROUTE};
use crate::common::error::{ApiError, AppError};
use crate::common::i18n::Locale;
use crate::models::auth::{RefreshPayload, TokenPair};
use crate::models::common::ApiResponse;
use crate::session::store::SessionStore;

const REFRESH_PATH: &str = "/auth/refresh";
const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub locale: Locale,
}

/// Cliente HTTP do painel.
///
/// Injeta o bearer token do `SessionStore`, tenta uma única renovação de
/// token ao receber 401 e normaliza os erros em [`ApiError`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    locale: Locale,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

// Uma requisição pronta para ser (re)enviada
struct PreparedRequest {
    method: Method,
    url: Url,
    query: Option<Value>,
    body: Option<Value>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, AppError> {
        // Valida a URL base uma vez; os caminhos são concatenados a ela
        Url::parse(&config.base_url)
            .map_err(|e| AppError::InvalidInput(format!("URL base inválida '{}': {}", config.base_url, e)))?;

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                locale: config.locale,
                store,
                navigator,
            }),
        })
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }

    pub fn locale(&self) -> Locale {
        self.inner.locale
    }

    pub async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query = query.map(serde_json::to_value).transpose()?;
        let request = self.prepare(Method::GET, path, query, None)?;
        self.request(request).await
    }

    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        let request = self.prepare(Method::POST, path, None, body)?;
        self.request(request).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let request = self.prepare(Method::PUT, path, None, Some(body))?;
        self.request(request).await
    }

    /// DELETE devolve o corpo cru (ou `Value::Null` quando vazio).
    pub async fn delete(&self, path: &str) -> Result<Value, AppError> {
        let request = self.prepare(Method::DELETE, path, None, None)?;
        self.request(request).await
    }

    /// `POST /auth/refresh`, fora do fluxo de retry (um 401 aqui não dispara
    /// outra renovação).
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let url = self.url(REFRESH_PATH)?;
        let response = self
            .inner
            .http
            .post(url)
            .header(ACCEPT_LANGUAGE, self.inner.locale.tag())
            .json(&RefreshPayload { refresh_token })
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let envelope: ApiResponse<TokenPair> = read_json(response).await?;
        envelope.into_result("Token refresh failed")
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        let joined = if path.starts_with('/') {
            format!("{}{}", self.inner.base_url, path)
        } else {
            format!("{}/{}", self.inner.base_url, path)
        };
        Url::parse(&joined).map_err(|e| AppError::InvalidInput(format!("URL inválida '{}': {}", joined, e)))
    }

    fn prepare(
        &self,
        method: Method,
        path: &str,
        query: Option<Value>,
        body: Option<Value>,
    ) -> Result<PreparedRequest, AppError> {
        Ok(PreparedRequest {
            method,
            url: self.url(path)?,
            query,
            body,
        })
    }

    async fn request<T: DeserializeOwned>(&self, request: PreparedRequest) -> Result<T, AppError> {
        let response = self.execute(&request).await?;
        read_json(response).await
    }

    async fn send(
        &self,
        request: &PreparedRequest,
        token: Option<&str>,
        request_id: Uuid,
    ) -> Result<reqwest::Response, AppError> {
        let mut builder = self
            .inner
            .http
            .request(request.method.clone(), request.url.clone())
            .header(ACCEPT_LANGUAGE, self.inner.locale.tag())
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(%request_id, method = %request.method, url = %request.url, "Enviando requisição");
        Ok(builder.send().await?)
    }

    /// Envia a requisição. Num 401 tenta uma única renovação e reenvia uma
    /// única vez; se não houver como renovar, encerra a sessão.
    async fn execute(&self, request: &PreparedRequest) -> Result<reqwest::Response, AppError> {
        let request_id = Uuid::new_v4();
        let token = self.inner.store.access_token();
        let response = self.send(request, token.as_deref(), request_id).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return ensure_success(response).await;
        }

        warn!(%request_id, path = request.url.path(), "401 recebido, tentando renovar o token");

        let Some(refresh_token) = self.inner.store.refresh_token() else {
            self.end_session();
            return ensure_success(response).await;
        };

        match self.refresh_tokens(&refresh_token).await {
            Ok(tokens) => {
                self.inner.store.persist_tokens(&tokens)?;
                // Segunda tentativa, já marcada: outro 401 vira erro normal
                let retried = self
                    .send(request, Some(&tokens.access_token), request_id)
                    .await?;
                ensure_success(retried).await
            }
            Err(refresh_error) => {
                warn!(%request_id, "Falha ao renovar o token: {}", refresh_error);
                self.end_session();
                Err(refresh_error)
            }
        }
    }

    /// Limpa as quatro chaves e manda para o login (se já não estiver lá).
    fn end_session(&self) {
        if let Err(e) = self.inner.store.clear_auth() {
            tracing::error!("Falha ao limpar a sessão: {}", e);
        }
        if self.inner.navigator.current_route() != SIGN_IN_ROUTE {
            self.inner.navigator.navigate(SIGN_IN_ROUTE);
        }
    }
}

/// Converte respostas não-2xx em `ApiError`, preferindo a mensagem do servidor.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let data = if body.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body)))
    };

    let server_message = data.as_ref().and_then(|d| {
        d.pointer("/error/message")
            .and_then(Value::as_str)
            .or_else(|| d.get("message").and_then(Value::as_str))
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    });

    let message = server_message
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "An error occurred".to_string());

    Err(ApiError {
        message,
        status: Some(status.as_u16()),
        data,
    }
    .into())
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
