use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use services::transcript::TranscriptError;

const FILE_PREFIX: &str = "transcript-";

/// Bytes outside RFC 5987 `attr-char` are percent-encoded.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Splits `transcript-{ticket_id}.{ext}` into its ticket ID and extension.
fn parse_file_name(file: &str) -> Option<(&str, &str)> {
    let (ticket_id, extension) = file.strip_prefix(FILE_PREFIX)?.rsplit_once('.')?;
    (!ticket_id.is_empty() && !extension.is_empty()).then_some((ticket_id, extension))
}

/// `attachment` disposition with a quoted ASCII `filename` fallback and the
/// exact UTF-8 name in `filename*` (RFC 6266).
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    let encoded = utf8_percent_encode(file_name, FILENAME_ENCODE_SET);

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Transcript not found")),
    )
        .into_response()
}

/// GET /tickets/transcript-{ticket_id}.{ext}
///
/// Renders and downloads the transcript of a ticket. `ext` must be the
/// extension of the configured transcript template.
///
/// ### Responses
///
/// - `200 OK`: the transcript as an attachment named after the ticket
///   channel, e.g. `ticket-alice-42.md`
/// - `404 Not Found`
/// ```json
/// {
///   "success": false,
///   "message": "Transcript not found"
/// }
/// ```
///
/// - `500 Internal Server Error`
/// ```json
/// {
///   "success": false,
///   "message": "Failed to generate transcript"
/// }
/// ```
pub async fn download_transcript(
    State(app_state): State<AppState>,
    Path(file): Path<String>,
) -> Response {
    let transcripts = app_state.transcripts();

    let Some((ticket_id, extension)) = parse_file_name(&file) else {
        return not_found();
    };
    if extension != transcripts.extension() {
        return not_found();
    }

    let transcript = match transcripts.generate_transcript(ticket_id).await {
        Ok(transcript) => transcript,
        Err(TranscriptError::NotFound(_)) => {
            tracing::warn!(ticket_id, "Transcript requested for unknown ticket");
            return not_found();
        }
        Err(err) => {
            tracing::error!(ticket_id, error = %err, "Failed to generate transcript");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to generate transcript")),
            )
                .into_response();
        }
    };

    let mime = mime_guess::from_ext(extension).first_or_text_plain();

    let mut headers = HeaderMap::new();
    let disposition = content_disposition(&transcript.file_name);
    let disposition = HeaderValue::from_str(&disposition).unwrap_or_else(|err| {
        tracing::warn!(ticket_id, error = %err, "Dropping transcript file name from header");
        HeaderValue::from_static("attachment")
    });
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&format!("{mime}; charset=utf-8"))
            .unwrap_or_else(|_| HeaderValue::from_static("text/plain; charset=utf-8")),
    );

    (StatusCode::OK, headers, transcript.content).into_response()
}
