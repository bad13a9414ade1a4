// src/pages/list.rs

use tracing::{info, warn};

use crate::common::error::AppError;
use crate::models::common::ListQuery;
use crate::services::resource::{Resource, ResourceService};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Estado de uma tela de listagem: página, busca, resultados e o diálogo
/// de confirmação de exclusão.
pub struct ListPage<R: Resource> {
    service: ResourceService<R>,
    page: u32,
    limit: u32,
    search: Option<String>,
    items: Vec<R::Entity>,
    total: u64,
    total_pages: u32,
    error: Option<String>,
    pending_delete: Option<R::Id>,
}

impl<R: Resource> ListPage<R> {
    pub fn new(service: ResourceService<R>) -> Self {
        Self {
            service,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            items: Vec::new(),
            total: 0,
            total_pages: 0,
            error: None,
            pending_delete: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: Some(self.page),
            limit: Some(self.limit),
            q: self.search.clone(),
        }
    }

    pub async fn fetch(&mut self) -> Result<(), AppError> {
        let params = R::ListParams::from(self.query());
        match self.service.get_all(&params).await {
            Ok(result) => {
                self.items = result.results;
                self.total = result.total;
                self.total_pages = result.total_pages;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Falha ao listar {}: {}", R::plural(), e);
                self.error = Some(e.user_message(self.service.locale()));
                Err(e)
            }
        }
    }

    /// Nova busca volta para a primeira página.
    pub fn set_search(&mut self, text: &str) {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self.page = 1;
    }

    /// Antes do primeiro fetch o total de páginas é desconhecido e só o
    /// limite inferior vale.
    pub fn go_to_page(&mut self, page: u32) {
        self.page = if self.total_pages > 0 {
            page.clamp(1, self.total_pages)
        } else {
            page.max(1)
        };
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    // --- diálogo de exclusão ---

    pub fn request_delete(&mut self, id: R::Id) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<&R::Id> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Exclui o item pendente e recarrega a página. Em caso de erro o diálogo
    /// continua aberto. Se só a recarga falhar, a exclusão vale e o erro fica
    /// em `error()`.
    pub async fn confirm_delete(&mut self) -> Result<(), AppError> {
        let Some(id) = self.pending_delete.take() else {
            return Err(AppError::InvalidInput("Nenhum item selecionado para exclusão".into()));
        };

        if let Err(e) = self.service.delete(&id).await {
            self.error = Some(e.user_message(self.service.locale()));
            self.pending_delete = Some(id);
            return Err(e);
        }
        info!("{} {} excluído", R::singular(), id);

        if let Err(e) = self.reload_after_delete().await {
            warn!("{} excluído, mas a lista não recarregou: {}", R::singular(), e);
        }
        Ok(())
    }

    async fn reload_after_delete(&mut self) -> Result<(), AppError> {
        self.fetch().await?;
        // A última página pode ter ficado vazia
        if self.items.is_empty() && self.page > 1 {
            self.page -= 1;
            self.fetch().await?;
        }
        Ok(())
    }
}
