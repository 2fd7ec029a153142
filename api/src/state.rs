//! Application state shared across Axum route handlers.

use sea_orm::DatabaseConnection;
use services::transcript::TranscriptService;
use std::sync::Arc;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The transcript service, whose compiled template is shared by every request.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    transcripts: Arc<TranscriptService>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, transcripts: TranscriptService) -> Self {
        Self {
            db,
            transcripts: Arc::new(transcripts),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn transcripts(&self) -> &TranscriptService {
        &self.transcripts
    }
}
