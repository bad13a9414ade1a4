// src/pages/form.rs

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::info;

use crate::common::error::{validation_details, AppError};
use crate::services::resource::{Resource, ResourceService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

/// Estado de um formulário de criação/edição.
///
/// Em modo edição a entidade é carregada antes; os erros de validação ficam
/// guardados por campo para serem exibidos junto dos inputs.
pub struct FormPage<R: Resource> {
    service: ResourceService<R>,
    mode: FormMode<R::Id>,
    loaded: Option<R::Entity>,
    field_errors: BTreeMap<String, Vec<String>>,
}

impl<R: Resource> FormPage<R> {
    pub fn create(service: ResourceService<R>) -> Self {
        Self::with_mode(service, FormMode::Create)
    }

    pub fn edit(service: ResourceService<R>, id: R::Id) -> Self {
        Self::with_mode(service, FormMode::Edit(id))
    }

    fn with_mode(service: ResourceService<R>, mode: FormMode<R::Id>) -> Self {
        Self {
            service,
            mode,
            loaded: None,
            field_errors: BTreeMap::new(),
        }
    }

    pub fn mode(&self) -> &FormMode<R::Id> {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn loaded(&self) -> Option<&R::Entity> {
        self.loaded.as_ref()
    }

    pub fn field_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.field_errors
    }

    /// Busca a entidade em edição. Em modo criação não faz nada.
    pub async fn load(&mut self) -> Result<Option<&R::Entity>, AppError> {
        if let FormMode::Edit(id) = &self.mode {
            let entity = self.service.get_by_id(id).await?;
            self.loaded = Some(entity);
        }
        Ok(self.loaded.as_ref())
    }

    /// Submete valores crus (JSON), interpretados como payload de criação
    /// ou de atualização conforme o modo.
    pub async fn submit(&mut self, values: Value) -> Result<R::Entity, AppError> {
        if self.is_edit() {
            let payload: R::Update = serde_json::from_value(values)?;
            self.submit_update(&payload).await
        } else {
            let payload: R::Create = serde_json::from_value(values)?;
            self.submit_create(&payload).await
        }
    }

    pub async fn submit_create(&mut self, payload: &R::Create) -> Result<R::Entity, AppError> {
        let result = self.service.create(payload).await;
        self.finish(result, "criado")
    }

    pub async fn submit_update(&mut self, payload: &R::Update) -> Result<R::Entity, AppError> {
        let FormMode::Edit(id) = &self.mode else {
            return Err(AppError::InvalidInput("Formulário não está em modo edição".into()));
        };
        let id = id.clone();
        let result = self.service.update(&id, payload).await;
        self.finish(result, "atualizado")
    }

    fn finish(&mut self, result: Result<R::Entity, AppError>, verb: &str) -> Result<R::Entity, AppError> {
        match result {
            Ok(entity) => {
                self.field_errors.clear();
                info!("{} {} {}", R::singular(), R::id_of(&entity), verb);
                Ok(entity)
            }
            Err(AppError::ValidationError(errors)) => {
                self.field_errors = validation_details(&errors);
                Err(AppError::ValidationError(errors))
            }
            Err(e) => Err(e),
        }
    }
}
