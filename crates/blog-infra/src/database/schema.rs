//! Table bootstrap for the posts store.

use sea_orm::sea_query::{ColumnDef, Expr, Table};
use sea_orm::{ColumnType, ConnectionTrait, DbConn, DbErr};

use super::entity::post;

/// Create the `posts` table if it does not exist yet.
pub async fn ensure_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    let table = Table::create()
        .table(post::Entity)
        .if_not_exists()
        .col(ColumnDef::new(post::Column::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(post::Column::Title).text().not_null())
        .col(ColumnDef::new(post::Column::Author).text().null())
        .col(ColumnDef::new(post::Column::Contents).text().null())
        .col(
            ColumnDef::new(post::Column::Tags)
                .array(ColumnType::Text)
                .not_null()
                .default(Expr::cust("'{}'")),
        )
        .col(
            ColumnDef::new(post::Column::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(post::Column::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned();

    db.execute(backend.build(&table)).await?;
    tracing::info!("Posts table ready");

    Ok(())
}
