pub mod api;
pub mod cli;
pub mod common;
pub mod config;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod services;
pub mod session;

pub use common::error::AppError;
pub use config::{AppConfig, AppState};
