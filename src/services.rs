pub mod accounts;
pub mod auth;
pub mod features;
pub mod modules;
pub mod plans;
pub mod platform_users;
pub mod qualifications;
pub mod resource;

pub use auth::AuthService;
pub use resource::{Resource, ResourceService};
