// src/models/account.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::common::ListQuery;
use crate::models::pricing::Currency;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub status: AccountStatus,
    pub currency: Currency,
    pub plan_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountPayload {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,

    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    #[serde(default)]
    pub status: AccountStatus,

    #[serde(default)]
    pub currency: Currency,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Plano inválido"))]
    pub plan_id: Option<i64>,

    // Conta criada para um dono já existente dispensa senha
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Dono inválido"))]
    pub owner_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, message = "Senha deve ter no mínimo 8 caracteres"))]
    pub password: Option<String>,
}

impl CreateAccountPayload {
    /// Regras por campo + a regra cruzada: sem `owner_id`, a senha é obrigatória.
    /// O erro fica preso ao campo `password`.
    pub fn validate_form(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let has_password = self.password.as_deref().is_some_and(|p| !p.is_empty());
        if self.owner_id.is_none() && !has_password {
            let mut err = ValidationError::new("password_or_owner");
            err.message = Some("Senha é obrigatória quando ownerId não é fornecido".into());
            errors.add("password", err);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Plano inválido"))]
    pub plan_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsListParams {
    #[serde(flatten)]
    pub query: ListQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

impl From<ListQuery> for AccountsListParams {
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

    fn base() -> CreateAccountPayload {
        CreateAccountPayload {
            name: "Academia Centro".into(),
            email: "contato@academia.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn password_required_without_owner() {
        let errors = base().validate_form().unwrap_err();
        let fields = errors.field_errors();
        let password_errors = fields.get("password").expect("erro em password");
        assert_eq!(password_errors[0].code, "password_or_owner");
    }

    #[test]
    fn owner_dispenses_password() {
        let payload = CreateAccountPayload {
            owner_id: Some(12),
            ..base()
        };
        assert!(payload.validate_form().is_ok());
    }

    #[test]
    fn short_password_still_fails() {
        let payload = CreateAccountPayload {
            password: Some("1234".into()),
            ..base()
        };
        let errors = payload.validate_form().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn defaults_are_active_and_brl() {
        let payload: CreateAccountPayload = serde_json::from_value(serde_json::json!({
            "name": "Loja",
            "email": "loja@exemplo.com",
            "password": "segredo123"
        }))
        .unwrap();
        assert_eq!(payload.status, AccountStatus::Active);
        assert_eq!(payload.currency, Currency::Brl);
        assert!(payload.validate_form().is_ok());
    }
}
