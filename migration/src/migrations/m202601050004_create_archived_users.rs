use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050004_create_archived_users"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("archived_users"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("ticket_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("user_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("username")).text().not_null())
                    .col(ColumnDef::new(Alias::new("display_name")).text().null())
                    .col(ColumnDef::new(Alias::new("discriminator")).string().null())
                    .col(ColumnDef::new(Alias::new("avatar")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("bot"))
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Alias::new("role_id")).string().null())
                    .primary_key(
                        Index::create()
                            .col(Alias::new("ticket_id"))
                            .col(Alias::new("user_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("archived_users"), Alias::new("ticket_id"))
                            .to(Alias::new("tickets"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("archived_users")).to_owned())
            .await
    }
}
