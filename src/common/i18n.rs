// src/common/i18n.rs

/// Idioma das mensagens genéricas do cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Pt,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    GenericError,
    SessionExpired,
    ValidationFailed,
    ConfirmDelete,
    Created,
    Updated,
    Deleted,
    LoggedIn,
    LoggedOut,
}

impl Locale {
    /// Escolhe o idioma a partir de um valor no formato `Accept-Language`
    /// (ex: "pt-BR,en;q=0.8"). Idiomas desconhecidos caem no português.
    pub fn from_accept_language(header: &str) -> Self {
        accept_language::parse(header)
            .first()
            .map(|tag| tag.split('-').next().unwrap_or(tag).to_lowercase())
            .map(|lang| match lang.as_str() {
                "en" => Locale::En,
                _ => Locale::Pt,
            })
            .unwrap_or_default()
    }

    /// Tag enviada no header `Accept-Language`.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Pt => "pt-BR",
            Locale::En => "en-US",
        }
    }

    pub fn message(&self, key: MessageKey) -> &'static str {
        match (self, key) {
            (Locale::Pt, MessageKey::GenericError) => "Ocorreu um erro inesperado. Tente novamente.",
            (Locale::En, MessageKey::GenericError) => "An unexpected error occurred. Please try again.",
            (Locale::Pt, MessageKey::SessionExpired) => "Sessão expirada. Faça login novamente.",
            (Locale::En, MessageKey::SessionExpired) => "Session expired. Please sign in again.",
            (Locale::Pt, MessageKey::ValidationFailed) => "Um ou mais campos são inválidos.",
            (Locale::En, MessageKey::ValidationFailed) => "One or more fields are invalid.",
            (Locale::Pt, MessageKey::ConfirmDelete) => "Tem certeza que deseja excluir",
            (Locale::En, MessageKey::ConfirmDelete) => "Are you sure you want to delete",
            (Locale::Pt, MessageKey::Created) => "Registro criado com sucesso!",
            (Locale::En, MessageKey::Created) => "Record created successfully!",
            (Locale::Pt, MessageKey::Updated) => "Registro atualizado com sucesso!",
            (Locale::En, MessageKey::Updated) => "Record updated successfully!",
            (Locale::Pt, MessageKey::Deleted) => "Registro excluído com sucesso!",
            (Locale::En, MessageKey::Deleted) => "Record deleted successfully!",
            (Locale::Pt, MessageKey::LoggedIn) => "Login realizado com sucesso!",
            (Locale::En, MessageKey::LoggedIn) => "Signed in successfully!",
            (Locale::Pt, MessageKey::LoggedOut) => "Sessão encerrada.",
            (Locale::En, MessageKey::LoggedOut) => "Signed out.",
        }
    }
}
