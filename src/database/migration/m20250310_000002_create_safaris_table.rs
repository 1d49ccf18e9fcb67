use super::{Safaris, Users};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Safaris::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Safaris::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Safaris::GuideId).integer().not_null())
                    .col(ColumnDef::new(Safaris::Title).string().not_null())
                    .col(ColumnDef::new(Safaris::Description).text().not_null())
                    .col(ColumnDef::new(Safaris::Location).string().not_null())
                    .col(
                        ColumnDef::new(Safaris::Price)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Safaris::DurationDays).integer().not_null())
                    .col(ColumnDef::new(Safaris::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Safaris::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Safaris::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Safaris::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // SQLite cannot add foreign keys after table creation
        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .create_foreign_key(
                    ForeignKey::create()
                        .name("fk_safaris_guide_id")
                        .from(Safaris::Table, Safaris::GuideId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_safaris_guide_id")
                    .table(Safaris::Table)
                    .col(Safaris::GuideId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_safaris_status")
                    .table(Safaris::Table)
                    .col(Safaris::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Safaris::Table).to_owned())
            .await
    }
}
