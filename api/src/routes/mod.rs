//! HTTP route entry point.
//!
//! Route groups:
//! - `/health` → Health check endpoint
//! - `/tickets` → Transcript downloads

use crate::routes::{health::health_routes, tickets::tickets_routes};
use crate::state::AppState;
use axum::Router;

pub mod health;
pub mod tickets;

/// Builds the application router with all route groups mounted and the
/// state applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/tickets", tickets_routes().with_state(app_state))
}
