//! Storage abstraction used by the auth operations and page handlers.
//!
//! [`Store`] is the only way handlers reach persisted users and jokes. The
//! Postgres implementation ([`PgStore`]) delegates to the query functions in
//! [`crate::db`]; [`crate::memory::MemoryStore`] keeps everything in process.

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use shared_types::{Joke, JokeListItem, NewJoke, User};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, DbConnection, DbPool};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection pool error
    #[error("Database connection error")]
    ConnectionPool(#[source] diesel_async::pooled_connection::deadpool::PoolError),

    /// Database query error
    #[error("Database error: {0}")]
    Database(#[source] DieselError),

    /// The username is claimed by another row
    #[error("User {0} already exists")]
    UsernameTaken(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl From<diesel_async::pooled_connection::deadpool::PoolError> for StoreError {
    fn from(err: diesel_async::pooled_connection::deadpool::PoolError) -> Self {
        StoreError::ConnectionPool(err)
    }
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Why a joke could not be deleted.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// No row matched; it may have been removed concurrently
    #[error("Joke {0} does not exist")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Exact-match lookup.
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Insert a user, failing with [`StoreError::UsernameTaken`] when the
    /// username already exists. The check and the insert are atomic.
    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User>;

    /// The `take` most recently created jokes, newest first.
    async fn list_recent_jokes(&self, take: i64) -> StoreResult<Vec<JokeListItem>>;

    async fn count_jokes(&self) -> StoreResult<i64>;

    /// The joke at position `skip` in creation order, if any.
    async fn joke_at_offset(&self, skip: i64) -> StoreResult<Option<Joke>>;

    async fn find_joke(&self, id: Uuid) -> StoreResult<Option<Joke>>;

    async fn create_joke(&self, new_joke: NewJoke) -> StoreResult<Joke>;

    async fn delete_joke(&self, id: Uuid) -> Result<(), DeleteError>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> StoreResult<DbConnection> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let mut conn = self.conn().await?;
        Ok(db::users::get_by_id(&mut conn, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let mut conn = self.conn().await?;
        Ok(db::users::get_by_username(&mut conn, username).await?)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let mut conn = self.conn().await?;
        match db::users::create(&mut conn, username, password_hash).await {
            Ok(user) => Ok(user),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(StoreError::UsernameTaken(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_recent_jokes(&self, take: i64) -> StoreResult<Vec<JokeListItem>> {
        let mut conn = self.conn().await?;
        Ok(db::jokes::list_recent(&mut conn, take).await?)
    }

    async fn count_jokes(&self) -> StoreResult<i64> {
        let mut conn = self.conn().await?;
        Ok(db::jokes::count(&mut conn).await?)
    }

    async fn joke_at_offset(&self, skip: i64) -> StoreResult<Option<Joke>> {
        let mut conn = self.conn().await?;
        Ok(db::jokes::at_offset(&mut conn, skip).await?)
    }

    async fn find_joke(&self, id: Uuid) -> StoreResult<Option<Joke>> {
        let mut conn = self.conn().await?;
        Ok(db::jokes::get_by_id(&mut conn, id).await?)
    }

    async fn create_joke(&self, new_joke: NewJoke) -> StoreResult<Joke> {
        let mut conn = self.conn().await?;
        Ok(db::jokes::create(&mut conn, &new_joke).await?)
    }

    async fn delete_joke(&self, id: Uuid) -> Result<(), DeleteError> {
        let mut conn = self.conn().await?;
        let removed = db::jokes::delete(&mut conn, id)
            .await
            .map_err(StoreError::from)?;
        if removed == 0 {
            return Err(DeleteError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both implementations must be usable behind `Arc<dyn Store>`
    fn _assert_object_safe() {
        fn _check(_: &dyn Store) {}
        fn _check_pg(store: &PgStore) {
            _check(store);
        }
        fn _check_memory(store: &crate::memory::MemoryStore) {
            _check(store);
        }
    }

    #[test]
    fn test_delete_error_wraps_store_error() {
        let err: DeleteError = StoreError::UsernameTaken("alice".to_string()).into();
        assert!(matches!(err, DeleteError::Store(StoreError::UsernameTaken(_))));
        assert_eq!(err.to_string(), "User alice already exists");
    }
}
