// src/services/resource.rs

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::api::client::ApiClient;
use crate::common::error::{ApiError, AppError};
use crate::common::i18n::Locale;
use crate::models::common::{ApiResponse, ListQuery, Paginated};

/// Descreve um recurso REST administrável (contas, planos, ...).
///
/// Cada recurso é um tipo marcador; o `ResourceService` faz o resto.
pub trait Resource: Send + Sync + 'static {
    type Id: Display + FromStr + Clone + Send + Sync;
    type Entity: DeserializeOwned + Serialize + Send;
    type Create: DeserializeOwned + Serialize + Validate + Send + Sync;
    type Update: DeserializeOwned + Serialize + Validate + Send + Sync;
    type ListParams: Serialize + From<ListQuery> + Send + Sync;

    /// Caminho da coleção, ex: "/api/accounts".
    fn path() -> &'static str;

    /// Nome no singular e plural, usados nas mensagens de fallback
    /// ("Failed to fetch accounts").
    fn singular() -> &'static str;
    fn plural() -> &'static str;

    fn id_of(entity: &Self::Entity) -> Self::Id;

    /// Nome mostrado na confirmação de exclusão.
    fn display_name(entity: &Self::Entity) -> String;

    /// Recursos com `meta.translations` editável.
    fn has_translations() -> bool {
        false
    }

    fn validate_create(payload: &Self::Create) -> Result<(), ValidationErrors> {
        payload.validate()
    }

    fn validate_update(payload: &Self::Update) -> Result<(), ValidationErrors> {
        payload.validate()
    }
}

/// CRUD uniforme sobre o envelope `{success, data, error?}`.
pub struct ResourceService<R: Resource> {
    client: ApiClient,
    _resource: PhantomData<R>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn locale(&self) -> Locale {
        self.client.locale()
    }

    fn item_path(id: &R::Id) -> String {
        format!("{}/{}", R::path(), id)
    }

    pub async fn get_all(&self, params: &R::ListParams) -> Result<Paginated<R::Entity>, AppError> {
        let envelope: ApiResponse<Paginated<R::Entity>> =
            self.client.get(R::path(), Some(params)).await?;
        envelope.into_result(&format!("Failed to fetch {}", R::plural()))
    }

    pub async fn get_by_id(&self, id: &R::Id) -> Result<R::Entity, AppError> {
        let envelope: ApiResponse<R::Entity> =
            self.client.get::<_, ()>(&Self::item_path(id), None).await?;
        envelope.into_result(&format!("Failed to fetch {}", R::singular()))
    }

    /// Valida localmente antes de qualquer chamada de rede.
    pub async fn create(&self, data: &R::Create) -> Result<R::Entity, AppError> {
        R::validate_create(data)?;
        let envelope: ApiResponse<R::Entity> = self.client.post(R::path(), Some(data)).await?;
        envelope.into_result(&format!("Failed to create {}", R::singular()))
    }

    pub async fn update(&self, id: &R::Id, data: &R::Update) -> Result<R::Entity, AppError> {
        R::validate_update(data)?;
        let envelope: ApiResponse<R::Entity> =
            self.client.put(&Self::item_path(id), data).await?;
        envelope.into_result(&format!("Failed to update {}", R::singular()))
    }

    /// O corpo do DELETE é opcional; só um envelope com `success: false` é erro.
    pub async fn delete(&self, id: &R::Id) -> Result<(), AppError> {
        let body = self.client.delete(&Self::item_path(id)).await?;
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Failed to delete {}", R::singular()));
            return Err(ApiError::business(message).into());
        }
        Ok(())
    }

    /// Converte o id vindo da linha de comando.
    pub fn parse_id(raw: &str) -> Result<R::Id, AppError> {
        raw.trim()
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("id inválido para {}: '{}'", R::singular(), raw)))
    }
}

/// Validação derivada + formato de um código opcional (`key`/`code` nos updates).
pub(crate) fn validate_with_optional_key<T: Validate>(
    payload: &T,
    field: &'static str,
    key: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut errors = payload.validate().err().unwrap_or_else(ValidationErrors::new);
    if let Some(Err(err)) = key.map(crate::models::common::validate_key) {
        errors.add(field, err);
    }
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
