pub mod account;
pub mod auth;
pub mod common;
pub mod feature;
pub mod module;
pub mod plan;
pub mod platform_user;
pub mod pricing;
pub mod qualification;
