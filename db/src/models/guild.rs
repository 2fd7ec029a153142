use chrono::{DateTime, Utc};
use serde::Serialize;
use sea_orm::entity::prelude::*;

/// A community server tickets belong to.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "guilds")]
pub struct Model {
    /// Snowflake ID of the guild.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name, if it was known when the guild was registered.
    pub name: Option<String>,
    /// Locale used to format dates in transcripts (e.g. `en-GB`).
    pub locale: String,
    pub primary_colour: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
