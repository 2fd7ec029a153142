//! Rebuilds the numbered message thread of a ticket.

use super::indent;
use super::TranscriptError;
use chrono::{DateTime, Utc};
use db::models::{archived_message, archived_user};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Line appended for every embed; embeds themselves are never rendered.
pub const EMBED_PLACEHOLDER: &str = "[embedded content]";

/// Decrypted body of an archived message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageContent {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub embeds: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of the reconstructed thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessage {
    pub id: String,
    pub author_id: String,
    /// `None` when the author was not archived with the ticket.
    pub author: Option<archived_user::Model>,
    pub created_at: DateTime<Utc>,
    pub edited: bool,
    pub deleted: bool,
    pub content: MessageContent,
    /// Text as shown in the transcript, continuation lines tab-indented.
    pub text: String,
    /// `M1`, `M2`, ... zero-padded to the width of the message count.
    pub label: String,
}

/// Builds the thread from decrypted messages and users.
///
/// External messages are dropped and the rest are stably ordered by
/// `created_at`. That order is final: labels are assigned from it and nothing
/// downstream re-sorts.
pub fn reconstruct_thread(
    messages: &[archived_message::Model],
    users: &[archived_user::Model],
) -> Result<Vec<ThreadMessage>, TranscriptError> {
    let mut thread: Vec<&archived_message::Model> =
        messages.iter().filter(|m| !m.external).collect();
    thread.sort_by_key(|m| m.created_at);

    let total = thread.len();
    thread
        .into_iter()
        .enumerate()
        .map(|(index, message)| {
            let content: MessageContent = serde_json::from_str(&message.content).map_err(|source| {
                TranscriptError::MalformedContent {
                    message_id: message.id.clone(),
                    source,
                }
            })?;

            Ok(ThreadMessage {
                id: message.id.clone(),
                author_id: message.author_id.clone(),
                author: users.iter().find(|u| u.user_id == message.author_id).cloned(),
                created_at: message.created_at,
                edited: message.edited,
                deleted: message.deleted,
                text: display_text(&content),
                content,
                label: message_label(index, total),
            })
        })
        .collect()
}

/// Label of the message at `index` in a thread of `total` messages.
pub fn message_label(index: usize, total: usize) -> String {
    let width = total.to_string().len();
    format!("M{:0width$}", index + 1)
}

fn display_text(content: &MessageContent) -> String {
    let mut text = content.content.as_deref().map(indent).unwrap_or_default();
    for attachment in &content.attachments {
        text.push_str("\n\t");
        text.push_str(&attachment.url);
    }
    for _ in &content.embeds {
        text.push_str("\n\t");
        text.push_str(EMBED_PLACEHOLDER);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn plain_message(id: &str, author: &str, minute: u32, body: &str) -> archived_message::Model {
        archived_message::Model {
            id: id.into(),
            ticket_id: "200".into(),
            author_id: author.into(),
            content: body.into(),
            edited: false,
            deleted: false,
            external: false,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, minute, 0).unwrap(),
        }
    }

    fn plain_user(id: &str, name: &str) -> archived_user::Model {
        archived_user::Model {
            ticket_id: "200".into(),
            user_id: id.into(),
            username: name.into(),
            display_name: None,
            discriminator: None,
            avatar: None,
            bot: false,
            role_id: None,
        }
    }

    fn thread_of(count: u32) -> Vec<archived_message::Model> {
        (0..count)
            .map(|i| plain_message(&format!("m{i}"), "1", i, r#"{"content":"x"}"#))
            .collect()
    }

    fn labels(thread: &[ThreadMessage]) -> Vec<String> {
        thread.iter().map(|m| m.label.clone()).collect()
    }

    #[test]
    fn nine_messages_use_single_digit_labels() {
        let thread = reconstruct_thread(&thread_of(9), &[]).unwrap();
        let expected: Vec<String> = (1..=9).map(|i| format!("M{i}")).collect();
        assert_eq!(labels(&thread), expected);
    }

    #[test]
    fn ten_messages_pad_to_two_digits() {
        let thread = reconstruct_thread(&thread_of(10), &[]).unwrap();
        assert_eq!(thread.first().unwrap().label, "M01");
        assert_eq!(thread.last().unwrap().label, "M10");
    }

    #[test]
    fn twelve_messages_are_labelled_m01_to_m12() {
        let thread = reconstruct_thread(&thread_of(12), &[]).unwrap();
        let expected: Vec<String> = (1..=12).map(|i| format!("M{i:02}")).collect();
        assert_eq!(labels(&thread), expected);
    }

    #[test]
    fn label_width_follows_total_count() {
        assert_eq!(message_label(0, 1), "M1");
        assert_eq!(message_label(4, 100), "M005");
        assert_eq!(message_label(99, 100), "M100");
    }

    #[test]
    fn external_messages_are_skipped_and_not_counted() {
        let mut messages = thread_of(10);
        messages[3].external = true;

        let thread = reconstruct_thread(&messages, &[]).unwrap();

        assert_eq!(thread.len(), 9);
        assert!(thread.iter().all(|m| m.id != "m3"));
        assert_eq!(thread[3].id, "m4");
        assert_eq!(thread[3].label, "M4");
    }

    #[test]
    fn thread_is_ordered_by_creation_time() {
        let messages = vec![
            plain_message("late", "1", 30, "{}"),
            plain_message("early", "1", 5, "{}"),
            plain_message("middle", "1", 10, "{}"),
        ];

        let thread = reconstruct_thread(&messages, &[]).unwrap();

        let ids: Vec<&str> = thread.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "middle", "late"]);
        assert_eq!(labels(&thread), vec!["M1", "M2", "M3"]);
    }

    #[test]
    fn attachments_then_embeds_are_appended_to_text() {
        let body = r#"{
            "content": "see files",
            "attachments": [{"url": "https://cdn.example/a.png"}, {"url": "https://cdn.example/b.txt", "name": "b.txt"}],
            "embeds": [{"title": "ignored"}]
        }"#;
        let thread = reconstruct_thread(&[plain_message("m1", "1", 0, body)], &[]).unwrap();

        assert_eq!(
            thread[0].text,
            "see files\n\thttps://cdn.example/a.png\n\thttps://cdn.example/b.txt\n\t[embedded content]"
        );
        assert_eq!(thread[0].content.attachments[1].extra["name"], "b.txt");
    }

    #[test]
    fn multiline_text_is_tab_indented() {
        let body = r#"{"content": "first\nsecond\nthird"}"#;
        let thread = reconstruct_thread(&[plain_message("m1", "1", 0, body)], &[]).unwrap();
        assert_eq!(thread[0].text, "first\n\tsecond\n\tthird");
    }

    #[test]
    fn missing_or_null_fields_are_tolerated() {
        let body = r#"{"content": null, "attachments": null}"#;
        let thread = reconstruct_thread(&[plain_message("m1", "1", 0, body)], &[]).unwrap();
        assert_eq!(thread[0].text, "");
        assert!(thread[0].content.embeds.is_empty());
    }

    #[test]
    fn authors_are_resolved_by_id() {
        let users = vec![plain_user("1", "alice"), plain_user("2", "bob")];
        let messages = vec![
            plain_message("m1", "2", 0, "{}"),
            plain_message("m2", "9", 1, "{}"),
        ];

        let thread = reconstruct_thread(&messages, &users).unwrap();

        assert_eq!(thread[0].author.as_ref().unwrap().username, "bob");
        assert!(thread[1].author.is_none());
    }

    #[test]
    fn malformed_content_names_the_message() {
        let messages = vec![
            plain_message("ok", "1", 0, "{}"),
            plain_message("broken", "1", 1, "not json"),
        ];

        match reconstruct_thread(&messages, &[]) {
            Err(TranscriptError::MalformedContent { message_id, .. }) => {
                assert_eq!(message_id, "broken")
            }
            other => panic!("expected MalformedContent, got {other:?}"),
        }
    }
}
