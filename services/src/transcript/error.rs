use crate::crypto::DecryptionError;
use sea_orm::DbErr;
use thiserror::Error;

/// Everything that can stop a transcript from being generated.
///
/// None of these are retried. Callers facing end users should only reveal
/// whether the ticket was found; the rest belongs in the logs.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Ticket {0} does not exist")]
    NotFound(String),

    #[error("Failed to decrypt ticket field: {0}")]
    Decryption(#[from] DecryptionError),

    #[error("Message {message_id} has malformed content: {source}")]
    MalformedContent {
        message_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load ticket: {0}")]
    Database(#[from] DbErr),

    #[error("Failed to render transcript: {0}")]
    Render(#[from] handlebars::RenderError),
}
