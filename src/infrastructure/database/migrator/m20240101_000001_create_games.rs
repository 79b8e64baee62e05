//! Create games table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::Title).string().not_null())
                    .col(ColumnDef::new(Games::Description).text())
                    .col(ColumnDef::new(Games::Image).string())
                    .col(ColumnDef::new(Games::Publisher).string().not_null())
                    .col(ColumnDef::new(Games::Developer).string().not_null())
                    .col(
                        ColumnDef::new(Games::Price)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Games::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Games::ReleaseDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::AgeRating)
                            .string_len(10)
                            .not_null()
                            .default("E"),
                    )
                    .col(ColumnDef::new(Games::Genres).json().not_null())
                    .col(ColumnDef::new(Games::Platforms).json().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Sort keys and range filters
        for (name, column) in [
            ("idx_games_price", Games::Price),
            ("idx_games_rating", Games::Rating),
            ("idx_games_release_date", Games::ReleaseDate),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Games::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Games {
    Table,
    Id,
    Title,
    Description,
    Image,
    Publisher,
    Developer,
    Price,
    Rating,
    ReleaseDate,
    AgeRating,
    Genres,
    Platforms,
    CreatedAt,
    UpdatedAt,
}
