use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202601050001_create_guilds::Migration),
            Box::new(migrations::m202601050002_create_categories::Migration),
            Box::new(migrations::m202601050003_create_tickets::Migration),
            Box::new(migrations::m202601050004_create_archived_users::Migration),
            Box::new(migrations::m202601050005_create_archived_channels::Migration),
            Box::new(migrations::m202601050006_create_archived_roles::Migration),
            Box::new(migrations::m202601050007_create_archived_messages::Migration),
            Box::new(migrations::m202601050008_create_feedback::Migration),
            Box::new(migrations::m202601050009_create_question_answers::Migration),
        ]
    }
}
