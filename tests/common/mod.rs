// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use ativiza_admin::{
    common::i18n::Locale,
    session::{MemorySessionStore, SessionStore},
    AppConfig, AppState,
};

pub const PASSWORD: &str = "secret123";
pub const REFRESH_TOKEN: &str = "refresh-1";

/// Estado do backend falso, com contadores para as asserções.
pub struct MockState {
    pub valid_token: Mutex<String>,
    pub seen_tokens: Mutex<Vec<String>>,
    pub seen_queries: Mutex<Vec<Value>>,
    pub refresh_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub plan_list_calls: AtomicUsize,
    pub account_creates: AtomicUsize,
    pub logout_fails: AtomicBool,
    pub plan_list_fails: AtomicBool,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            valid_token: Mutex::new("access-1".into()),
            seen_tokens: Mutex::new(Vec::new()),
            seen_queries: Mutex::new(Vec::new()),
            refresh_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            plan_list_calls: AtomicUsize::new(0),
            account_creates: AtomicUsize::new(0),
            logout_fails: AtomicBool::new(false),
            plan_list_fails: AtomicBool::new(false),
        }
    }
}

impl MockState {
    pub fn tokens(&self) -> Vec<String> {
        self.seen_tokens.lock().unwrap().clone()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

type Shared = Arc<MockState>;
type Reply = (StatusCode, Json<Value>);

fn user() -> Value {
    json!({ "id": 1, "email": "admin@ativiza.com", "name": "Admin", "role": "owner", "theme": "dark" })
}

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "error": { "message": "Token inválido" } })),
    )
}

// Registra o token recebido e diz se é o válido
fn authorized(state: &MockState, headers: &HeaderMap) -> bool {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("")
        .to_string();
    let valid = *state.valid_token.lock().unwrap() == token;
    state.seen_tokens.lock().unwrap().push(token);
    valid
}

fn plan(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Plano {}", id),
        "billingPeriod": "MONTHLY",
        "isActive": true,
        "isPublic": true,
        "sortOrder": 0,
        "maxOperations": null,
        "maxClients": 10,
        "maxUsers": null,
        "maxStorage": null,
        "features": [{
            "featureId": 1,
            "isEnabled": true,
            "operationLimit": null,
            "resetPeriod": "LIFETIME",
            "prices": [{ "currency": "BRL", "price": 49.9, "isDefault": true }]
        }]
    })
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": { "message": "Credenciais inválidas" } })),
        );
    }
    *state.valid_token.lock().unwrap() = "access-1".into();
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "user": user(),
                "accessToken": "access-1",
                "refreshToken": REFRESH_TOKEN,
                "expiresIn": 3600
            }
        })),
    )
}

async fn refresh(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if body["refreshToken"] != REFRESH_TOKEN {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": { "message": "Refresh token inválido" } })),
        );
    }
    *state.valid_token.lock().unwrap() = "access-2".into();
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": { "accessToken": "access-2", "refreshToken": "refresh-2", "expiresIn": 3600 }
        })),
    )
}

async fn logout(State(state): State<Shared>) -> Reply {
    state.logout_calls.fetch_add(1, Ordering::SeqCst);
    if state.logout_fails.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": { "message": "Falha" } })),
        );
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "success": true, "data": user() })))
}

async fn list_plans(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<Value>,
) -> Reply {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    state.plan_list_calls.fetch_add(1, Ordering::SeqCst);
    state.seen_queries.lock().unwrap().push(query);
    if state.plan_list_fails.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": { "message": "Banco indisponível" } })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": { "results": [plan(1), plan(2)], "total": 2, "page": 1, "limit": 20, "totalPages": 1 }
        })),
    )
}

async fn get_plan(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": { "message": "Plano não encontrado" } })),
        );
    }
    (StatusCode::OK, Json(json!({ "success": true, "data": plan(id) })))
}

async fn update_plan(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut updated = plan(id);
    if let Some(features) = body.get("features") {
        updated["features"] = features.clone();
    }
    (StatusCode::OK, Json(json!({ "success": true, "data": updated })))
}

async fn delete_plan(State(state): State<Shared>, headers: HeaderMap) -> StatusCode {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED;
    }
    StatusCode::NO_CONTENT
}

// Falha de negócio com mensagem do servidor
async fn list_features(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({ "success": false, "data": null, "error": { "message": "Banco indisponível" } })),
    )
}

// Falha de negócio sem mensagem
async fn list_modules(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "success": false, "data": null })))
}

async fn create_account(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    state.account_creates.fetch_add(1, Ordering::SeqCst);
    let mut account = body.clone();
    account["id"] = json!("acc-1");
    (StatusCode::CREATED, Json(json!({ "success": true, "data": account })))
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(MockState::default());
        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/refresh", post(refresh))
            .route("/auth/logout", post(logout))
            .route("/auth/me", get(me))
            .route("/api/admin/plans", get(list_plans))
            .route("/api/admin/plans/{id}", get(get_plan).put(update_plan).delete(delete_plan))
            .route("/api/admin/features", get(list_features))
            .route("/api/admin/modules", get(list_modules))
            .route("/api/accounts", post(create_account))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.base_url.clone(),
            session_file: ".ativiza/unused.json".into(),
            locale: Locale::Pt,
            http_timeout: Duration::from_secs(5),
        }
    }

    /// Estado da aplicação sobre um store em memória.
    pub fn app(&self, initial_route: &str) -> (AppState, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let state = AppState::with_store(&self.config(), store.clone(), initial_route).unwrap();
        (state, store)
    }
}

/// Grava uma sessão completa diretamente no store.
pub fn seed_session(store: &dyn SessionStore, access: &str, refresh: Option<&str>, expires_at: Option<i64>) {
    store.set("accessToken", access).unwrap();
    if let Some(refresh) = refresh {
        store.set("refreshToken", refresh).unwrap();
    }
    store.set("user", &user().to_string()).unwrap();
    if let Some(at) = expires_at {
        store.set("tokenExpiresAt", &at.to_string()).unwrap();
    }
}
