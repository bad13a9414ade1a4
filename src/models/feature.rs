// src/models/feature.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::translations::validate_translations;
use crate::models::common::{default_true, validate_key, ListQuery, Meta};
use crate::models::pricing::Price;

// ---
// Feature: uma capacidade cobrável da plataforma, opcionalmente ligada a um módulo
// ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub module_id: Option<i64>,
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub prices: Vec<Price>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeaturePayload {
    // Imutável depois de criada
    #[validate(custom(function = "validate_key"))]
    pub key: String,

    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<i64>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    #[validate(custom(function = "validate_translations"))]
    pub meta: Meta,

    #[serde(default)]
    #[validate(nested)]
    pub prices: Vec<Price>,
}

// Sem `key`: a chave não muda depois da criação
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeaturePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,

    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    #[validate(custom(function = "validate_translations"))]
    pub meta: Meta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub prices: Option<Vec<Price>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesListParams {
    #[serde(flatten)]
    pub query: ListQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<ListQuery> for FeaturesListParams {
    fn from(query: ListQuery) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }
}
