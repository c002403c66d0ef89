//! HTTP surface of the notifier
//!
//! The build system posts finished builds here; admins use the `/admin`
//! routes to list sites and test the ZeroBug connection.

pub mod admin;
pub mod builds;
pub mod checks;
pub mod stats;

use axum::{Router, routing};

use crate::SharedState;

// Re-export handlers
pub use admin::{ADMIN_KEY_HEADER, get_sites, validate};
pub use builds::{complete_build, get_build};
pub use checks::{check_token_field, check_website_field};
pub use stats::{root, status};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", routing::get(root))
        .route("/status", routing::get(status))
        .route("/builds", routing::post(complete_build))
        .route("/builds/{id}", routing::get(get_build))
        .route("/check/token", routing::get(check_token_field))
        .route("/check/website", routing::get(check_website_field))
        .route("/admin/sites", routing::get(get_sites))
        .route("/admin/validate", routing::get(validate))
        .with_state(state)
}
