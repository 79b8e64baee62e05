//! Add case-folded search columns to games
//!
//! SQLite's `LOWER` and `LIKE` only fold ASCII, so text search compares
//! against copies folded in Rust. Existing rows are backfilled here.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Statement};

use super::m20240101_000001_create_games::Games;
use crate::domain::fold_case;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum FoldedColumns {
    TitleFolded,
    PublisherFolded,
    DeveloperFolded,
}

const FOLDED: [FoldedColumns; 3] = [
    FoldedColumns::TitleFolded,
    FoldedColumns::PublisherFolded,
    FoldedColumns::DeveloperFolded,
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite accepts one column per ALTER TABLE
        for column in FOLDED {
            manager
                .alter_table(
                    Table::alter()
                        .table(Games::Table)
                        .add_column(ColumnDef::new(column).string().not_null().default(""))
                        .to_owned(),
                )
                .await?;
        }

        let db = manager.get_connection();
        let backend = manager.get_database_backend();
        let rows = db
            .query_all(Statement::from_string(
                backend,
                "SELECT id, title, publisher, developer FROM games".to_string(),
            ))
            .await?;

        for row in rows {
            let id: i32 = row.try_get("", "id")?;
            let title: String = row.try_get("", "title")?;
            let publisher: String = row.try_get("", "publisher")?;
            let developer: String = row.try_get("", "developer")?;

            let update = Query::update()
                .table(Games::Table)
                .values([
                    (FoldedColumns::TitleFolded, Expr::value(fold_case(&title))),
                    (FoldedColumns::PublisherFolded, Expr::value(fold_case(&publisher))),
                    (FoldedColumns::DeveloperFolded, Expr::value(fold_case(&developer))),
                ])
                .and_where(Expr::col(Games::Id).eq(id))
                .to_owned();
            db.execute(backend.build(&update)).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for column in FOLDED {
            manager
                .alter_table(
                    Table::alter()
                        .table(Games::Table)
                        .drop_column(column)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}
