//! Transcript generation.
//!
//! A request runs one sequential pipeline over an immutable snapshot of the
//! ticket:
//!
//! 1. load the [`TicketAggregate`] through a [`TicketLoader`],
//! 2. decrypt every sensitive field ([`decrypt`]),
//! 3. rebuild the numbered thread ([`messages`]) and map pins to labels
//!    ([`pinned`]),
//! 4. resolve the channel and file name ([`naming`]),
//! 5. render the template ([`render`]).
//!
//! Only the compiled template and the cipher are shared between requests.

pub mod dates;
pub mod decrypt;
mod error;
pub mod messages;
pub mod naming;
pub mod pinned;
pub mod render;

pub use error::TranscriptError;

use crate::crypto::{AesGcmCipher, FieldCipher};
use db::models::{
    archived_channel, archived_role, archived_user, category, feedback, guild, question_answer,
    ticket,
};
use db::{TicketAggregate, TicketLoader};
use messages::{reconstruct_thread, ThreadMessage};
use naming::{file_extension, file_name, resolve_channel_name, NameContext};
use render::{TemplateLoadError, TranscriptContext, TranscriptRenderer};
use serde::Serialize;
use std::sync::Arc;
use util::{config, paths};

/// Continuation lines of multi-line text are indented by one tab.
pub(crate) fn indent(text: &str) -> String {
    text.replace('\n', "\n\t")
}

/// The decrypted ticket as templates see it under `ticket`.
///
/// Ticket columns are flattened to the top level next to the related
/// records, so templates write `ticket.number` and `ticket.archivedMessages`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptTicket {
    #[serde(flatten)]
    pub record: ticket::Model,
    pub category: category::Model,
    pub guild: guild::Model,
    pub feedback: Option<feedback::Model>,
    pub question_answers: Vec<question_answer::Model>,
    pub archived_users: Vec<archived_user::Model>,
    pub archived_channels: Vec<archived_channel::Model>,
    pub archived_roles: Vec<archived_role::Model>,
    pub archived_messages: Vec<ThreadMessage>,
    pub created_by: Option<archived_user::Model>,
    pub claimed_by: Option<archived_user::Model>,
    pub closed_by: Option<archived_user::Model>,
    /// One label per pinned ID, `""` where the message is not in the thread.
    pub pinned_messages: Vec<String>,
}

impl TranscriptTicket {
    /// Builds the template view of an already decrypted aggregate.
    pub fn assemble(aggregate: TicketAggregate) -> Result<Self, TranscriptError> {
        let archived_messages =
            reconstruct_thread(&aggregate.archived_messages, &aggregate.archived_users)?;
        let pinned_messages =
            pinned::resolve_pinned(&aggregate.ticket.pinned_message_ids.0, &archived_messages);

        let find_user = |id: &Option<String>| {
            id.as_deref().and_then(|id| {
                aggregate
                    .archived_users
                    .iter()
                    .find(|u| u.user_id == id)
                    .cloned()
            })
        };
        let created_by = find_user(&aggregate.ticket.created_by_id);
        let claimed_by = find_user(&aggregate.ticket.claimed_by_id);
        let closed_by = find_user(&aggregate.ticket.closed_by_id);

        Ok(Self {
            record: aggregate.ticket,
            category: aggregate.category,
            guild: aggregate.guild,
            feedback: aggregate.feedback,
            question_answers: aggregate.question_answers,
            archived_users: aggregate.archived_users,
            archived_channels: aggregate.archived_channels,
            archived_roles: aggregate.archived_roles,
            archived_messages,
            created_by,
            claimed_by,
            closed_by,
            pinned_messages,
        })
    }
}

/// A rendered transcript, ready to be served or stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub file_name: String,
    pub content: String,
}

#[derive(Clone)]
pub struct TranscriptService {
    loader: Arc<dyn TicketLoader>,
    cipher: Arc<dyn FieldCipher>,
    renderer: Arc<TranscriptRenderer>,
    template_id: String,
}

impl TranscriptService {
    pub fn new(
        loader: Arc<dyn TicketLoader>,
        cipher: Arc<dyn FieldCipher>,
        renderer: Arc<TranscriptRenderer>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            loader,
            cipher,
            renderer,
            template_id: template_id.into(),
        }
    }

    /// Builds the service from `ENCRYPTION_KEY`, `TEMPLATES_DIR` and
    /// `TRANSCRIPT_TEMPLATE`. Fails if the template cannot be compiled.
    pub fn from_config(loader: Arc<dyn TicketLoader>) -> Result<Self, TemplateLoadError> {
        let renderer = TranscriptRenderer::from_file(paths::transcript_template_path())?;
        let cipher = AesGcmCipher::new(config::encryption_key());
        Ok(Self::new(
            loader,
            Arc::new(cipher),
            Arc::new(renderer),
            config::transcript_template(),
        ))
    }

    /// Extension of every file this service produces.
    pub fn extension(&self) -> &str {
        file_extension(&self.template_id)
    }

    pub async fn generate_transcript(&self, ticket_id: &str) -> Result<Transcript, TranscriptError> {
        let aggregate = self
            .loader
            .load_ticket(ticket_id)
            .await?
            .ok_or_else(|| TranscriptError::NotFound(ticket_id.to_owned()))?;

        let aggregate = decrypt::decrypt_aggregate(aggregate, self.cipher.as_ref())?;
        let ticket = TranscriptTicket::assemble(aggregate)?;
        tracing::debug!(ticket_id, messages = ticket.archived_messages.len(), "Rebuilt thread");

        let name_context = NameContext::new(ticket.created_by.as_ref(), ticket.record.number);
        let channel_name = resolve_channel_name(&ticket.category.channel_name, &name_context);
        let pinned = pinned::join_labels(&ticket.pinned_messages);

        let content = self.renderer.render(&TranscriptContext {
            ticket: &ticket,
            channel_name: &channel_name,
            pinned: &pinned,
            guild_name: ticket.guild.name.as_deref(),
            locale: &ticket.guild.locale,
        })?;

        let file_name = file_name(&channel_name, &self.template_id);
        tracing::info!(
            ticket_id,
            messages = ticket.archived_messages.len(),
            file_name = %file_name,
            "Generated transcript"
        );

        Ok(Transcript { file_name, content })
    }
}

impl std::fmt::Debug for TranscriptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptService")
            .field("template_id", &self.template_id)
            .finish_non_exhaustive()
    }
}

/// Public link to a ticket's transcript.
pub fn transcript_url(base_url: &str, ticket_id: &str, extension: &str) -> String {
    format!(
        "{}/tickets/transcript-{ticket_id}.{extension}",
        base_url.trim_end_matches('/')
    )
}
