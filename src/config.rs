// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    api::{ApiClient, ClientConfig, RouteTracker},
    common::{error::AppError, i18n::Locale},
    services::{
        accounts::AccountService, features::FeatureService, modules::ModuleService,
        plans::PlanService, platform_users::PlatformUserService,
        qualifications::QualificationService, AuthService,
    },
    session::{FileSessionStore, SessionManager, SessionStore},
};

const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
const DEFAULT_SESSION_FILE: &str = ".ativiza/session.json";
const DEFAULT_LANGUAGE: &str = "pt-BR";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub locale: Locale,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("ATIVIZA_API_BASE_URL").unwrap_or_else(|_| {
            tracing::warn!("ATIVIZA_API_BASE_URL não definida, usando {}", DEFAULT_API_BASE_URL);
            DEFAULT_API_BASE_URL.to_string()
        });

        let session_file = env::var("ATIVIZA_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        let language = env::var("ATIVIZA_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());

        let http_timeout = env::var("ATIVIZA_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            api_base_url,
            session_file,
            locale: Locale::from_accept_language(&language),
            http_timeout,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            timeout: self.http_timeout,
            locale: self.locale,
        }
    }
}

/// Todas as dependências montadas: store, cliente, sessão e serviços.
#[derive(Clone)]
pub struct AppState {
    pub locale: Locale,
    pub store: Arc<dyn SessionStore>,
    pub navigator: Arc<RouteTracker>,
    pub client: ApiClient,
    pub session: Arc<SessionManager>,
    pub accounts: AccountService,
    pub platform_users: PlatformUserService,
    pub features: FeatureService,
    pub modules: ModuleService,
    pub plans: PlanService,
    pub qualifications: QualificationService,
}

impl AppState {
    pub fn new(config: &AppConfig, initial_route: &str) -> Result<Self, AppError> {
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&config.session_file)?);
        Self::with_store(config, store, initial_route)
    }

    /// Monta o grafo de dependências sobre um store já aberto.
    pub fn with_store(
        config: &AppConfig,
        store: Arc<dyn SessionStore>,
        initial_route: &str,
    ) -> Result<Self, AppError> {
        let navigator = Arc::new(RouteTracker::new(initial_route));
        let client = ApiClient::new(&config.client_config(), store.clone(), navigator.clone())?;
        let session = Arc::new(SessionManager::new(AuthService::new(client.clone()), store.clone()));

        tracing::debug!("Estado montado para {}", config.api_base_url);

        Ok(Self {
            locale: config.locale,
            store,
            navigator,
            accounts: AccountService::new(client.clone()),
            platform_users: PlatformUserService::new(client.clone()),
            features: FeatureService::new(client.clone()),
            modules: ModuleService::new(client.clone()),
            plans: PlanService::new(client.clone()),
            qualifications: QualificationService::new(client.clone()),
            session,
            client,
        })
    }
}
