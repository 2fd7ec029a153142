use chrono::{DateTime, Utc};
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordered list of pinned message IDs, stored as a JSON array.
///
/// Order and duplicates are preserved exactly as archived.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PinnedMessageIds(pub Vec<String>);

/// A closed (or still open) support ticket.
///
/// `topic` and `closed_reason` are stored encrypted. `created_by_id`,
/// `claimed_by_id` and `closed_by_id` point into the ticket's own
/// `archived_users` rows, not into a global user table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    /// Snowflake ID of the ticket channel.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Per-guild sequential ticket number.
    pub number: i32,
    pub guild_id: String,
    pub category_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub topic: Option<String>,
    pub open: bool,
    pub created_by_id: Option<String>,
    pub claimed_by_id: Option<String>,
    pub closed_by_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub closed_reason: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub pinned_message_ids: PinnedMessageIds,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guild::Entity",
        from = "Column::GuildId",
        to = "super::guild::Column::Id"
    )]
    Guild,

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::guild::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guild.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn get_by_id(db: &DbConn, ticket_id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(ticket_id.to_owned()).one(db).await
    }
}
