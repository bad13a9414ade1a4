// src/models/common.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::ValidationError;

use crate::common::error::{ApiError, AppError};

// ---
// Envelope padrão de todas as respostas: {success, data, error?}
// ---
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Desembrulha o envelope. `success: false` vira erro com a mensagem do servidor,
    /// ou com `fallback` quando o servidor não mandou nenhuma.
    pub fn into_result(self, fallback: &str) -> Result<T, AppError> {
        if !self.success {
            let message = self
                .error
                .and_then(|e| e.message)
                .or(self.message)
                .unwrap_or_else(|| fallback.to_string());
            return Err(ApiError::business(message).into());
        }
        self.data
            .ok_or_else(|| ApiError::business(fallback).into())
    }
}

/// Resposta das listagens paginadas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Parâmetros comuns das listagens (`page`, `limit`, `q`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

// ---
// Meta com traduções (locale -> texto)
// ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,

    // Qualquer outra chave que o backend guarde em `meta`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Meta {
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty() && self.extra.is_empty()
    }
}

/// Chaves/códigos: apenas letras maiúsculas e underscores.
pub fn validate_key(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
        return Ok(());
    }
    let mut err = ValidationError::new("key_format");
    err.message = Some("Código deve conter apenas letras maiúsculas e underscores".into());
    Err(err)
}

/// Distingue "campo ausente" (`None`) de "campo nulo" (`Some(None)`) nos payloads de update.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

pub fn default_true() -> bool {
    true
}
