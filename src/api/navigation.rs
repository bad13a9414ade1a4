// src/api/navigation.rs

use std::sync::RwLock;

pub const SIGN_IN_ROUTE: &str = "/signin";

/// Para onde o cliente manda o operador quando a sessão acaba.
pub trait Navigator: Send + Sync {
    fn current_route(&self) -> String;
    fn navigate(&self, route: &str);
}

/// Navegador sem tela: guarda a rota atual e o histórico de redirecionamentos.
#[derive(Debug)]
pub struct RouteTracker {
    current: RwLock<String>,
    history: RwLock<Vec<String>>,
}

impl RouteTracker {
    pub fn new(initial_route: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(initial_route.into()),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Rotas para as quais houve redirecionamento, em ordem.
    pub fn history(&self) -> Vec<String> {
        self.history.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for RouteTracker {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for RouteTracker {
    fn current_route(&self) -> String {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn navigate(&self, route: &str) {
        tracing::info!(route, "Redirecionando");
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = route.to_string();
        self.history
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.to_string());
    }
}
