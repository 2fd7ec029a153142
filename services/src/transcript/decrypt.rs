use super::indent;
use crate::crypto::{DecryptionError, FieldCipher};
use db::TicketAggregate;

/// Returns a copy of the aggregate with every encrypted field in plaintext.
///
/// Message bodies come back as their JSON text; parsing happens when the
/// thread is rebuilt. The first failure aborts the whole aggregate.
pub fn decrypt_aggregate(
    mut aggregate: TicketAggregate,
    cipher: &dyn FieldCipher,
) -> Result<TicketAggregate, DecryptionError> {
    let ticket = &mut aggregate.ticket;
    ticket.closed_reason = decrypt_optional(cipher, ticket.closed_reason.take())?;
    ticket.topic = decrypt_optional(cipher, ticket.topic.take())?.map(|topic| indent(&topic));

    if let Some(feedback) = aggregate.feedback.as_mut() {
        feedback.comment = decrypt_optional(cipher, feedback.comment.take())?;
    }

    for user in &mut aggregate.archived_users {
        user.display_name = decrypt_optional(cipher, user.display_name.take())?;
        user.username = cipher.decrypt(&user.username)?;
    }

    for message in &mut aggregate.archived_messages {
        message.content = cipher.decrypt(&message.content)?;
    }

    Ok(aggregate)
}

/// Empty values were never encrypted, so they pass through untouched.
fn decrypt_optional(
    cipher: &dyn FieldCipher,
    value: Option<String>,
) -> Result<Option<String>, DecryptionError> {
    match value {
        Some(v) if !v.is_empty() => cipher.decrypt(&v).map(Some),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::test_support::{aggregate, cipher, message, user};

    #[test]
    fn decrypts_every_sensitive_field() {
        let c = cipher();
        let mut agg = aggregate(&c);
        agg.ticket.topic = Some(c.encrypt("line one\nline two"));
        agg.ticket.closed_reason = Some(c.encrypt("resolved"));
        agg.archived_users = vec![user(&c, "1", "alice", Some("Alice A."))];
        agg.archived_messages = vec![message(&c, "m1", "1", 0, r#"{"content":"hi"}"#)];

        let plain = decrypt_aggregate(agg, &c).unwrap();

        assert_eq!(plain.ticket.topic.as_deref(), Some("line one\n\tline two"));
        assert_eq!(plain.ticket.closed_reason.as_deref(), Some("resolved"));
        assert_eq!(plain.archived_users[0].username, "alice");
        assert_eq!(plain.archived_users[0].display_name.as_deref(), Some("Alice A."));
        assert_eq!(plain.archived_messages[0].content, r#"{"content":"hi"}"#);
        assert_eq!(plain.feedback.unwrap().comment.as_deref(), Some("great help"));
    }

    #[test]
    fn absent_and_empty_fields_stay_as_they_are() {
        let c = cipher();
        let mut agg = aggregate(&c);
        agg.ticket.topic = None;
        agg.ticket.closed_reason = Some(String::new());

        let plain = decrypt_aggregate(agg, &c).unwrap();

        assert_eq!(plain.ticket.topic, None);
        assert_eq!(plain.ticket.closed_reason.as_deref(), Some(""));
    }

    #[test]
    fn one_bad_field_fails_the_whole_aggregate() {
        let c = cipher();
        let mut agg = aggregate(&c);
        agg.archived_users = vec![user(&c, "1", "alice", None)];
        agg.archived_users[0].username = "deadbeef".into();

        assert!(decrypt_aggregate(agg, &c).is_err());
    }
}
