use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnAcquireErr, DbConn, DbErr, EntityTrait, PrimaryKeyTrait};

use blog_core::domain::DeleteResult;
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, Clock, SystemClock};

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    pub(crate) clock: Arc<dyn Clock>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self::with_clock(db, Arc::new(SystemClock))
    }

    pub fn with_clock(db: DbConn, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            clock,
            _entity: PhantomData,
        }
    }
}

/// Translate a SeaORM error into the repository taxonomy.
pub fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
            RepoError::Timeout("timed out acquiring a connection".to_string())
        }
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    ID: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send + Sync + 'static,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete_by_id(&self, id: ID) -> Result<DeleteResult, RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(DeleteResult::new(result.rows_affected))
    }
}
