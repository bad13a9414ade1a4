// src/models/plan.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::common::{default_true, double_option, ListQuery};
use crate::models::pricing::{BillingPeriod, Currency, Price, ResetPeriod};

// ---
// Configuração de uma feature dentro de um plano
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlanFeatureConfig {
    #[validate(range(min = 1, message = "Feature inválida"))]
    pub feature_id: i64,

    #[serde(default = "default_true")]
    pub is_enabled: bool,

    // None = ilimitado
    #[serde(default)]
    #[validate(range(min = 0, message = "Limite deve ser maior ou igual a 0"))]
    pub operation_limit: Option<i64>,

    #[serde(default)]
    pub reset_period: ResetPeriod,

    #[serde(default)]
    #[validate(nested)]
    pub prices: Vec<Price>,
}

impl PlanFeatureConfig {
    /// Configuração inserida quando a feature é marcada no Plan Builder.
    pub fn with_defaults(feature_id: i64) -> Self {
        Self {
            feature_id,
            is_enabled: true,
            operation_limit: None,
            reset_period: ResetPeriod::Lifetime,
            prices: vec![Price::default_in(Currency::Brl)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub billing_period: BillingPeriod,
    pub is_active: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub sort_order: i32,

    // Tetos de uso; None = ilimitado
    pub max_operations: Option<i64>,
    pub max_clients: Option<i64>,
    pub max_users: Option<i64>,
    pub max_storage: Option<i64>,

    #[serde(default)]
    pub features: Vec<PlanFeatureConfig>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanPayload {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub billing_period: BillingPeriod,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default = "default_true")]
    pub is_public: bool,

    #[serde(default)]
    pub sort_order: i32,

    // Enviados sempre (null = ilimitado)
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_operations: Option<i64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_clients: Option<i64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_users: Option<i64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub max_storage: Option<i64>,

    #[validate(length(min = 1, message = "Plano deve ter pelo menos uma feature"))]
    #[validate(nested)]
    pub features: Vec<PlanFeatureConfig>,
}

impl Default for CreatePlanPayload {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            billing_period: BillingPeriod::Monthly,
            is_active: true,
            is_public: true,
            sort_order: 0,
            max_operations: None,
            max_clients: None,
            max_users: None,
            max_storage: None,
            features: Vec::new(),
        }
    }
}

// Nos tetos, campo ausente = não mexe; `null` = volta a ser ilimitado
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<BillingPeriod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "double_option")]
    #[validate(range(min = 0))]
    pub max_operations: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "double_option")]
    #[validate(range(min = 0))]
    pub max_clients: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "double_option")]
    #[validate(range(min = 0))]
    pub max_users: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "double_option")]
    #[validate(range(min = 0))]
    pub max_storage: Option<Option<i64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Plano deve ter pelo menos uma feature"))]
    #[validate(nested)]
    pub features: Option<Vec<PlanFeatureConfig>>,
}

impl From<CreatePlanPayload> for UpdatePlanPayload {
    fn from(draft: CreatePlanPayload) -> Self {
        Self {
            name: Some(draft.name),
            description: draft.description,
            billing_period: Some(draft.billing_period),
            is_active: Some(draft.is_active),
            is_public: Some(draft.is_public),
            sort_order: Some(draft.sort_order),
            max_operations: Some(draft.max_operations),
            max_clients: Some(draft.max_clients),
            max_users: Some(draft.max_users),
            max_storage: Some(draft.max_storage),
            features: Some(draft.features),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansListParams {
    #[serde(flatten)]
    pub query: ListQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<ListQuery> for PlansListParams {
    fn from(query: ListQuery) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_distinguishes_missing_from_null_ceiling() {
        let payload: UpdatePlanPayload = serde_json::from_value(json!({
            "maxUsers": null,
            "maxClients": 50
        }))
        .unwrap();

        assert_eq!(payload.max_users, Some(None));
        assert_eq!(payload.max_clients, Some(Some(50)));
        assert_eq!(payload.max_storage, None);

        let sent = serde_json::to_value(&payload).unwrap();
        assert_eq!(sent["maxUsers"], json!(null));
        assert!(sent.get("maxStorage").is_none());
    }

    #[test]
    fn update_rejects_negative_ceiling_but_accepts_null() {
        let payload: UpdatePlanPayload = serde_json::from_value(json!({ "maxUsers": -5 })).unwrap();
        assert!(payload.validate().unwrap_err().field_errors().contains_key("max_users"));

        let payload: UpdatePlanPayload =
            serde_json::from_value(json!({ "maxUsers": null, "maxStorage": 0 })).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_requires_a_feature() {
        let draft = CreatePlanPayload {
            name: "Básico".into(),
            ..Default::default()
        };
        assert!(draft.validate().unwrap_err().field_errors().contains_key("features"));
    }

    #[test]
    fn create_sends_unlimited_ceilings_as_null() {
        let draft = CreatePlanPayload {
            name: "Pro".into(),
            features: vec![PlanFeatureConfig::with_defaults(3)],
            ..Default::default()
        };
        let sent = serde_json::to_value(&draft).unwrap();
        assert_eq!(sent["maxOperations"], json!(null));
        assert_eq!(sent["features"][0]["resetPeriod"], "LIFETIME");
        assert_eq!(sent["features"][0]["prices"][0]["currency"], "BRL");
    }
}
