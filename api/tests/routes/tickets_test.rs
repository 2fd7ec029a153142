#[cfg(test)]
mod tests {
    use crate::helpers::{
        make_test_app, seed_bare_ticket, seed_ticket, seed_ticket_created_by, test_cipher,
    };
    use api::{routes::routes, state::AppState};
    use axum::{
        Router,
        body::Body as AxumBody,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use db::{models::archived_message, test_utils::setup_test_db};
    use sea_orm::{ActiveModelTrait, Set};
    use serde_json::Value;
    use serial_test::serial;
    use services::transcript::TranscriptService;
    use std::sync::Arc;
    use tower::ServiceExt;
    use util::config::AppConfig;
    use util::test_helpers::{setup_test_env, setup_test_templates};

    async fn get(app: Router, uri: &str) -> Response {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(AxumBody::empty())
            .unwrap();
        app.oneshot(req).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn download_returns_rendered_transcript() {
        let (app, app_state) = make_test_app().await;
        seed_ticket(app_state.db(), &test_cipher()).await;

        let response = get(app, "/tickets/transcript-200.md").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"ticket-alice-42.md\"; filename*=UTF-8''ticket-alice-42.md"
        );
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/"), "{content_type}");

        assert_eq!(
            body_text(response).await,
            "ticket-alice-42\n\
             [M1] alice: I was charged twice\n\
             [M2] bob: Refund issued\n\thttps://cdn.example/receipt.pdf\n\
             [M3] alice: thanks\n\
             Pinned: M2, "
        );
    }

    #[tokio::test]
    async fn non_ascii_and_quoted_names_keep_the_header_intact() {
        let (app, app_state) = make_test_app().await;
        seed_ticket_created_by(app_state.db(), &test_cipher(), "zo\"ë").await;

        let response = get(app, "/tickets/transcript-200.md").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"ticket-zo__-42.md\"; filename*=UTF-8''ticket-zo%22%C3%AB-42.md"
        );
    }

    #[tokio::test]
    async fn unknown_ticket_is_404() {
        let (app, _) = make_test_app().await;

        let response = get(app, "/tickets/transcript-999.md").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Transcript not found");
    }

    #[tokio::test]
    async fn other_extensions_are_404() {
        let (app, app_state) = make_test_app().await;
        seed_ticket(app_state.db(), &test_cipher()).await;

        for uri in ["/tickets/transcript-200.html", "/tickets/200.md", "/tickets/transcript-200"] {
            let response = get(app.clone(), uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn undecryptable_ticket_is_500_without_detail() {
        let (app, app_state) = make_test_app().await;
        seed_ticket(app_state.db(), &test_cipher()).await;
        archived_message::ActiveModel {
            id: Set("m4".into()),
            ticket_id: Set("200".into()),
            author_id: Set("1".into()),
            content: Set("not-a-ciphertext".into()),
            edited: Set(false),
            deleted: Set(false),
            external: Set(false),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(app_state.db())
        .await
        .unwrap();

        let response = get(app, "/tickets/transcript-200.md").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Failed to generate transcript");
    }

    #[tokio::test]
    #[serial]
    async fn configured_service_serves_its_own_extension() {
        setup_test_env();
        let templates = setup_test_templates(
            "transcript.txt",
            "{{channelName}} {{#with ticket}}{{createdAtFull}}{{/with}}",
        );
        AppConfig::reset();
        AppConfig::set_templates_dir(templates.path().to_string_lossy());
        AppConfig::set_transcript_template("transcript.txt");

        let db = setup_test_db().await;
        seed_bare_ticket(&db).await;
        let transcripts = TranscriptService::from_config(Arc::new(db.clone())).unwrap();
        let app = routes(AppState::new(db, transcripts));

        let response = get(app.clone(), "/tickets/transcript-300.txt").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"ticket-7.txt\"; filename*=UTF-8''ticket-7.txt"
        );
        assert_eq!(
            body_text(response).await,
            "ticket-7 Samstag, 1. März 2025 um 09:00:00 UTC"
        );

        let response = get(app, "/tickets/transcript-300.md").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        AppConfig::reset();
    }
}
