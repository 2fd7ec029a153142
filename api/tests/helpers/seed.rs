use chrono::{TimeZone, Utc};
use db::models::{
    archived_message, archived_user, category, guild,
    ticket::{self, PinnedMessageIds},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use services::crypto::AesGcmCipher;

/// Seeds ticket `200` (#42, created by `alice`) with three messages, one
/// external message and the second message pinned.
pub async fn seed_ticket(db: &DatabaseConnection, cipher: &AesGcmCipher) {
    seed_ticket_created_by(db, cipher, "alice").await;
}

/// Same as [`seed_ticket`] with user `1` named `creator`.
pub async fn seed_ticket_created_by(db: &DatabaseConnection, cipher: &AesGcmCipher, creator: &str) {
    guild::ActiveModel {
        id: Set("100".into()),
        name: Set(Some("Support Hub".into())),
        locale: Set("en-GB".into()),
        primary_colour: Set("#009999".into()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();

    let category = category::ActiveModel {
        guild_id: Set("100".into()),
        name: Set("Billing".into()),
        emoji: Set("💳".into()),
        description: Set("Payments and invoices".into()),
        channel_name: Set("ticket-{username}-{number}".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    ticket::ActiveModel {
        id: Set("200".into()),
        number: Set(42),
        guild_id: Set("100".into()),
        category_id: Set(category.id),
        topic: Set(Some(cipher.encrypt("Refund"))),
        open: Set(false),
        created_by_id: Set(Some("1".into())),
        claimed_by_id: Set(Some("2".into())),
        closed_by_id: Set(Some("2".into())),
        closed_reason: Set(None),
        pinned_message_ids: Set(PinnedMessageIds(vec!["m2".into(), "gone".into()])),
        created_at: Set(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()),
        closed_at: Set(Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap())),
    }
    .insert(db)
    .await
    .unwrap();

    for (id, name) in [("1", creator), ("2", "bob")] {
        archived_user::ActiveModel {
            ticket_id: Set("200".into()),
            user_id: Set(id.into()),
            username: Set(cipher.encrypt(name)),
            display_name: Set(None),
            discriminator: Set(None),
            avatar: Set(None),
            bot: Set(false),
            role_id: Set(None),
        }
        .insert(db)
        .await
        .unwrap();
    }

    let messages = [
        ("m3", "1", 3, false, r#"{"content":"thanks"}"#),
        ("m1", "1", 1, false, r#"{"content":"I was charged twice"}"#),
        ("sys", "2", 2, true, r#"{"content":"bot notice"}"#),
        ("m2", "2", 2, false, r#"{"content":"Refund issued","attachments":[{"url":"https://cdn.example/receipt.pdf"}]}"#),
    ];
    for (id, author, minute, external, body) in messages {
        archived_message::ActiveModel {
            id: Set(id.into()),
            ticket_id: Set("200".into()),
            author_id: Set(author.into()),
            content: Set(cipher.encrypt(body)),
            edited: Set(false),
            deleted: Set(false),
            external: Set(external),
            created_at: Set(Utc.with_ymd_and_hms(2025, 3, 1, 9, minute, 0).unwrap()),
        }
        .insert(db)
        .await
        .unwrap();
    }
}

/// Seeds ticket `300` (#7) with no encrypted fields, no users and no
/// messages, so it renders under any key.
pub async fn seed_bare_ticket(db: &DatabaseConnection) {
    guild::ActiveModel {
        id: Set("101".into()),
        name: Set(None),
        locale: Set("de-DE".into()),
        primary_colour: Set("#009999".into()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();

    let category = category::ActiveModel {
        guild_id: Set("101".into()),
        name: Set("General".into()),
        emoji: Set("🎫".into()),
        description: Set("General support".into()),
        channel_name: Set("ticket-{num}".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    ticket::ActiveModel {
        id: Set("300".into()),
        number: Set(7),
        guild_id: Set("101".into()),
        category_id: Set(category.id),
        topic: Set(None),
        open: Set(true),
        created_by_id: Set(None),
        claimed_by_id: Set(None),
        closed_by_id: Set(None),
        closed_reason: Set(None),
        pinned_message_ids: Set(PinnedMessageIds::default()),
        created_at: Set(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()),
        closed_at: Set(None),
    }
    .insert(db)
    .await
    .unwrap();
}
