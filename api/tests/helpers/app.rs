use api::{routes::routes, state::AppState};
use axum::Router;
use db::test_utils::setup_test_db;
use services::crypto::AesGcmCipher;
use services::transcript::{TranscriptService, render::TranscriptRenderer};
use std::sync::Arc;

pub const TEMPLATE_ID: &str = "transcript.md";

pub const TEMPLATE: &str = "{{channelName}}\n\
    {{#each ticket.archivedMessages}}[{{label}}] {{author.username}}: {{text}}\n{{/each}}\
    Pinned: {{pinned}}";

pub fn test_cipher() -> AesGcmCipher {
    AesGcmCipher::new("test-key").with_iterations(1)
}

/// Router over a fresh in-memory database, rendering [`TEMPLATE`].
pub async fn make_test_app() -> (Router, AppState) {
    let db = setup_test_db().await;
    let renderer = TranscriptRenderer::new(TEMPLATE).expect("test template compiles");
    let transcripts = TranscriptService::new(
        Arc::new(db.clone()),
        Arc::new(test_cipher()),
        Arc::new(renderer),
        TEMPLATE_ID,
    );

    let app_state = AppState::new(db, transcripts);
    (routes(app_state.clone()), app_state)
}
