// src/session/store.rs

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::Utc;

use crate::common::error::AppError;
use crate::models::auth::TokenPair;

// As quatro chaves persistidas da sessão
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";
pub const TOKEN_EXPIRES_AT_KEY: &str = "tokenExpiresAt";

pub const AUTH_KEYS: [&str; 4] = [
    ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
    USER_KEY,
    TOKEN_EXPIRES_AT_KEY,
];

/// Armazenamento durável chave/valor da sessão.
///
/// Compartilhado entre o `SessionManager` e o `ApiClient`; as implementações
/// precisam ser seguras entre threads.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;

    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Expiração do access token em milissegundos desde a época.
    fn token_expires_at(&self) -> Option<i64> {
        self.get(TOKEN_EXPIRES_AT_KEY)?.trim().parse().ok()
    }

    /// Grava os tokens novos e a expiração (`agora + expires_in`).
    fn persist_tokens(&self, tokens: &TokenPair) -> Result<(), AppError> {
        // Valores absurdos do backend saturam em vez de estourar
        let expires_at = Utc::now()
            .timestamp_millis()
            .saturating_add(tokens.expires_in.saturating_mul(1000));
        self.set(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        self.set(REFRESH_TOKEN_KEY, &tokens.refresh_token)?;
        self.set(TOKEN_EXPIRES_AT_KEY, &expires_at.to_string())
    }

    /// Remove as quatro chaves de autenticação.
    fn clear_auth(&self) -> Result<(), AppError> {
        for key in AUTH_KEYS {
            self.remove(key)?;
        }
        Ok(())
    }
}

// ---
// Em memória: testes e hosts embutidos
// ---
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}

// ---
// Em arquivo JSON: o "localStorage" da CLI
// ---
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Abre (ou cria vazio) o arquivo de sessão. Um arquivo corrompido é
    /// descartado com um aviso; a sessão recomeça vazia.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "Arquivo de sessão inválido, ignorando: {}", e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Escreve num temporário e renomeia, para não deixar o arquivo pela metade
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(values)?)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| AppError::Session(format!("falha ao gravar {}: {}", self.path.display(), e)))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        // A memória só muda depois que o disco aceitou a escrita
        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.flush(&next)?;
        *values = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> TokenPair {
        TokenPair {
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
            expires_in: 3600,
        }
    }

    #[test]
    fn persist_tokens_sets_expiry_in_millis() {
        let store = MemorySessionStore::new();
        let before = Utc::now().timestamp_millis();
        store.persist_tokens(&tokens()).unwrap();

        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        let expires_at = store.token_expires_at().unwrap();
        assert!(expires_at >= before + 3_600_000);
    }

    #[test]
    fn huge_expires_in_saturates() {
        let store = MemorySessionStore::new();
        let tokens = TokenPair {
            expires_in: i64::MAX / 10,
            ..tokens()
        };
        store.persist_tokens(&tokens).unwrap();

        assert_eq!(store.token_expires_at(), Some(i64::MAX));
    }

    #[test]
    fn clear_auth_removes_all_four_keys() {
        let store = MemorySessionStore::new();
        store.persist_tokens(&tokens()).unwrap();
        store.set(USER_KEY, "{}").unwrap();
        store.set("theme", "dark").unwrap();

        store.clear_auth().unwrap();

        for key in AUTH_KEYS {
            assert!(store.get(key).is_none(), "{key} deveria ter sido removida");
        }
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        store.persist_tokens(&tokens()).unwrap();
        drop(store);

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.access_token().as_deref(), Some("access-1"));
    }

    #[test]
    fn failed_write_keeps_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::open(&path).unwrap();
        store.set(ACCESS_TOKEN_KEY, "access-1").unwrap();

        // Um diretório no lugar do temporário faz a escrita falhar
        fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(matches!(store.set(ACCESS_TOKEN_KEY, "access-2"), Err(AppError::Session(_))));
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert!(store.remove(ACCESS_TOKEN_KEY).is_err());
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
    }

    #[test]
    fn corrupted_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ não é json").unwrap();

        let store = FileSessionStore::open(&path).unwrap();
        assert!(store.access_token().is_none());
    }
}
