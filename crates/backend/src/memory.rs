use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use shared_types::{Joke, JokeListItem, NewJoke, User};
use uuid::Uuid;

use crate::repository::{DeleteError, Store, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    jokes: Vec<Joke>,
}

/// In-process store for tests and for running without Postgres.
///
/// Rows are kept in insertion order. Deleting a user is not supported, so
/// the cascade from users to jokes never comes up here.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Internal(anyhow::anyhow!("memory store lock poisoned")))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let mut tables = self.lock()?;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(StoreError::UsernameTaken(username.to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list_recent_jokes(&self, take: i64) -> StoreResult<Vec<JokeListItem>> {
        let tables = self.lock()?;
        // newest insert wins ties on created_at
        let mut jokes: Vec<&Joke> = tables.jokes.iter().rev().collect();
        jokes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let take = usize::try_from(take).unwrap_or(0);
        Ok(jokes
            .into_iter()
            .take(take)
            .cloned()
            .map(JokeListItem::from)
            .collect())
    }

    async fn count_jokes(&self) -> StoreResult<i64> {
        Ok(self.lock()?.jokes.len() as i64)
    }

    async fn joke_at_offset(&self, skip: i64) -> StoreResult<Option<Joke>> {
        let Ok(skip) = usize::try_from(skip) else {
            return Ok(None);
        };
        Ok(self.lock()?.jokes.get(skip).cloned())
    }

    async fn find_joke(&self, id: Uuid) -> StoreResult<Option<Joke>> {
        Ok(self.lock()?.jokes.iter().find(|j| j.id == id).cloned())
    }

    async fn create_joke(&self, new_joke: NewJoke) -> StoreResult<Joke> {
        let mut tables = self.lock()?;
        if !tables.users.iter().any(|u| u.id == new_joke.jokester_id) {
            return Err(StoreError::Internal(anyhow::anyhow!(
                "jokester {} does not exist",
                new_joke.jokester_id
            )));
        }

        let joke = Joke {
            id: Uuid::new_v4(),
            jokester_id: new_joke.jokester_id,
            name: new_joke.name,
            content: new_joke.content,
            created_at: Utc::now(),
        };
        tables.jokes.push(joke.clone());
        Ok(joke)
    }

    async fn delete_joke(&self, id: Uuid) -> Result<(), DeleteError> {
        let mut tables = self.lock()?;
        let before = tables.jokes.len();
        tables.jokes.retain(|j| j.id != id);
        if tables.jokes.len() == before {
            return Err(DeleteError::NotFound(id));
        }
        Ok(())
    }
}
