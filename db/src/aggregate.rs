//! Eager loading of a ticket and everything a transcript needs.
//!
//! The transcript pipeline never issues queries of its own. It receives one
//! fully assembled [`TicketAggregate`] through the [`TicketLoader`] seam,
//! which the SeaORM connection implements below.

use crate::models::{
    archived_channel, archived_message, archived_role, archived_user, category, feedback, guild,
    question_answer, ticket,
};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbConn, DbErr, EntityTrait};

/// A ticket with all related records loaded.
///
/// Encrypted columns are still encrypted. `archived_messages` holds only
/// non-external messages, oldest first.
#[derive(Clone, Debug, PartialEq)]
pub struct TicketAggregate {
    pub ticket: ticket::Model,
    pub category: category::Model,
    pub guild: guild::Model,
    pub feedback: Option<feedback::Model>,
    pub question_answers: Vec<question_answer::Model>,
    pub archived_users: Vec<archived_user::Model>,
    pub archived_channels: Vec<archived_channel::Model>,
    pub archived_roles: Vec<archived_role::Model>,
    pub archived_messages: Vec<archived_message::Model>,
}

/// Source of ticket aggregates.
#[async_trait]
pub trait TicketLoader: Send + Sync {
    /// Returns `Ok(None)` when no ticket has the given ID.
    async fn load_ticket(&self, ticket_id: &str) -> Result<Option<TicketAggregate>, DbErr>;
}

#[async_trait]
impl TicketLoader for DatabaseConnection {
    async fn load_ticket(&self, ticket_id: &str) -> Result<Option<TicketAggregate>, DbErr> {
        load_ticket(self, ticket_id).await
    }
}

/// Loads a ticket and its relations from the database.
pub async fn load_ticket(db: &DbConn, ticket_id: &str) -> Result<Option<TicketAggregate>, DbErr> {
    let Some(ticket) = ticket::Model::get_by_id(db, ticket_id).await? else {
        return Ok(None);
    };

    let category = category::Entity::find_by_id(ticket.category_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "Category {} of ticket {} not found",
                ticket.category_id, ticket.id
            ))
        })?;

    let guild = guild::Entity::find_by_id(ticket.guild_id.clone())
        .one(db)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "Guild {} of ticket {} not found",
                ticket.guild_id, ticket.id
            ))
        })?;

    let feedback = feedback::Entity::find_by_id(ticket.id.clone()).one(db).await?;
    let question_answers = question_answer::Model::find_all_for_ticket(db, &ticket.id).await?;
    let archived_users = archived_user::Model::find_all_for_ticket(db, &ticket.id).await?;
    let archived_channels = archived_channel::Model::find_all_for_ticket(db, &ticket.id).await?;
    let archived_roles = archived_role::Model::find_all_for_ticket(db, &ticket.id).await?;
    let archived_messages = archived_message::Model::find_thread_for_ticket(db, &ticket.id).await?;

    tracing::debug!(
        ticket_id = %ticket.id,
        users = archived_users.len(),
        messages = archived_messages.len(),
        "Loaded ticket aggregate"
    );

    Ok(Some(TicketAggregate {
        ticket,
        category,
        guild,
        feedback,
        question_answers,
        archived_users,
        archived_channels,
        archived_roles,
        archived_messages,
    }))
}
