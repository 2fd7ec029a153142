use crate::state::AppState;
use axum::{Router, routing::get};

pub mod get;

/// Builds the `/tickets` route group.
///
/// - `GET /tickets/transcript-{ticket_id}.{ext}` → `get::download_transcript`
pub fn tickets_routes() -> Router<AppState> {
    Router::new().route("/{file}", get(get::download_transcript))
}
