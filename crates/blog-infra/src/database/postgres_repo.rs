//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, NullOrdering};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use blog_core::domain::{
    ListOptions, NewPost, Post, PostFilter, PostId, PostPatch, SortField, SortOrder,
    validate_new_post, validate_patch,
};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn sort_column(field: SortField) -> post::Column {
    match field {
        SortField::CreatedAt => post::Column::CreatedAt,
        SortField::UpdatedAt => post::Column::UpdatedAt,
        SortField::Title => post::Column::Title,
        SortField::Author => post::Column::Author,
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let post = validate_new_post(post)?;
        let now = self.clock.now();

        let model = post::ActiveModel {
            id: Set(PostId::generate().into()),
            title: Set(post.title),
            author: Set(post.author),
            contents: Set(post.contents),
            tags: Set(post.tags),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = model.insert(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(post_id = %created.id, "Inserted post");

        Ok(created.into())
    }

    async fn update_by_id(&self, id: PostId, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        // A post that does not exist reports no result for any patch.
        if let Err(err) = validate_patch(&patch) {
            return match BaseRepository::<Post, PostId>::find_by_id(self, id).await? {
                Some(_) => Err(err.into()),
                None => Ok(None),
            };
        }

        // Single UPDATE .. RETURNING. `updated_at` lands at least 1us past its
        // previous value.
        let now: sea_orm::prelude::DateTimeWithTimeZone = self.clock.now().into();
        let mut update = PostEntity::update_many()
            .col_expr(
                post::Column::UpdatedAt,
                Expr::cust_with_values(
                    r#"GREATEST(?, "updated_at" + INTERVAL '1 microsecond')"#,
                    [now],
                ),
            )
            .filter(post::Column::Id.eq(Uuid::from(id)));

        if let Some(title) = patch.title {
            update = update.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(author) = patch.author {
            update = update.col_expr(post::Column::Author, Expr::value(author));
        }
        if let Some(contents) = patch.contents {
            update = update.col_expr(post::Column::Contents, Expr::value(contents));
        }
        if let Some(tags) = patch.tags {
            update = update.col_expr(post::Column::Tags, Expr::value(tags));
        }

        let updated = update
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(updated.into_iter().next().map(Into::into))
    }

    async fn find_many(
        &self,
        filter: PostFilter,
        options: ListOptions,
    ) -> Result<Vec<Post>, RepoError> {
        let query = match filter {
            PostFilter::All => PostEntity::find(),
            PostFilter::Author(author) => PostEntity::find().filter(post::Column::Author.eq(author)),
            PostFilter::Tag(tag) => {
                PostEntity::find().filter(Expr::cust_with_values(r#"? = ANY("tags")"#, [tag]))
            }
        };

        let order = match options.sort_order {
            SortOrder::Ascending => Order::Asc,
            SortOrder::Descending => Order::Desc,
        };

        let result = query
            .order_by_with_nulls(sort_column(options.sort_by), order, NullOrdering::Last)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
