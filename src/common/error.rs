// src/common/error.rs

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::common::i18n::{Locale, MessageKey};

/// Formato único dos erros devolvidos pelo backend: `{message, status, data}`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub data: Option<Value>,
}

impl ApiError {
    /// Erro de negócio (envelope com `success: false`), sem status HTTP associado.
    pub fn business(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            data: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Sessão não autenticada")]
    Unauthenticated,

    #[error("Erro de sessão: {0}")]
    Session(String),

    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("Erro HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Status HTTP, quando o erro veio de uma resposta do backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api(api) => api.status,
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Texto mostrado ao operador (o equivalente ao "toast" do painel).
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let details = validation_details(errors);
                let mut lines = vec![locale.message(MessageKey::ValidationFailed).to_string()];
                for (field, messages) in details {
                    lines.push(format!("  {}: {}", field, messages.join(", ")));
                }
                lines.join("\n")
            }
            AppError::Api(api) if !api.message.is_empty() => api.message.clone(),
            AppError::Unauthenticated => locale.message(MessageKey::SessionExpired).to_string(),
            AppError::InvalidInput(detail) => detail.clone(),
            e => {
                tracing::error!("Erro inesperado: {}", e);
                locale.message(MessageKey::GenericError).to_string()
            }
        }
    }
}

/// Achata os erros do `validator` em `campo -> mensagens`.
pub fn validation_details(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut details = BTreeMap::new();
    collect_details(String::new(), errors, &mut details);
    details
}

fn collect_details(
    prefix: String,
    errors: &validator::ValidationErrors,
    details: &mut BTreeMap<String, Vec<String>>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                details.entry(path).or_default().extend(messages);
            }
            ValidationErrorsKind::Struct(nested) => collect_details(path, nested, details),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_details(format!("{}[{}]", path, index), nested, details);
                }
            }
        }
    }
}
