use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050005_create_archived_channels"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("archived_channels"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("ticket_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("channel_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(Alias::new("ticket_id"))
                            .col(Alias::new("channel_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("archived_channels"), Alias::new("ticket_id"))
                            .to(Alias::new("tickets"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("archived_channels")).to_owned())
            .await
    }
}
