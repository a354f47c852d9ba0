// Database models for Diesel
use diesel::prelude::*;
use uuid::Uuid;

/// Insertable struct for new users
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Insertable struct for new jokes
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::jokes)]
pub struct NewJokeRow<'a> {
    pub jokester_id: Uuid,
    pub name: &'a str,
    pub content: &'a str,
}

impl<'a> From<&'a shared_types::NewJoke> for NewJokeRow<'a> {
    fn from(joke: &'a shared_types::NewJoke) -> Self {
        NewJokeRow {
            jokester_id: joke.jokester_id,
            name: &joke.name,
            content: &joke.content,
        }
    }
}
