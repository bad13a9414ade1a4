pub mod client;
pub mod navigation;

pub use client::{ApiClient, ClientConfig};
pub use navigation::{Navigator, RouteTracker, SIGN_IN_ROUTE};
