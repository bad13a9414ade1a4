// src/models/module.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::translations::validate_translations;
use crate::models::common::{default_true, validate_key, ListQuery, Meta};

// Agrupador de features (ex: "CRM", "Financeiro")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub meta: Meta,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateModulePayload {
    #[validate(custom(function = "validate_key"))]
    pub key: String,

    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    #[validate(custom(function = "validate_translations"))]
    pub meta: Meta,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

// `key` opcional: o formato é checado pelo serviço (ver services/modules.rs)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModulePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    #[validate(custom(function = "validate_translations"))]
    pub meta: Meta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulesListParams {
    #[serde(flatten)]
    pub query: ListQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<ListQuery> for ModulesListParams {
    fn from(query: ListQuery) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }
}
