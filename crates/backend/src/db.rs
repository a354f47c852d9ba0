use diesel::prelude::*;
use diesel::result::QueryResult;
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager, ManagerConfig},
    AsyncPgConnection, RunQueryDsl,
};
use shared_types::{Joke, JokeListItem, NewJoke, User};
use uuid::Uuid;

use crate::models::{NewJokeRow, NewUserRow};

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection = diesel_async::pooled_connection::deadpool::Object<AsyncPgConnection>;

async fn establish_tls_connection(config: String) -> diesel::ConnectionResult<AsyncPgConnection> {
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

    let (client, connection) = tokio_postgres::connect(&config, tls)
        .await
        .map_err(|e| diesel::ConnectionError::BadConnection(e.to_string()))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Connection error: {}", e);
        }
    });

    AsyncPgConnection::try_from(client).await
}

/// Build the connection pool. With `tls` set, connections go through rustls
/// using the webpki root store; otherwise plain TCP.
pub fn establish_connection_pool(database_url: &str, tls: bool) -> anyhow::Result<DbPool> {
    let config = if tls {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup =
            Box::new(|url| Box::pin(establish_tls_connection(url.to_string())));
        AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(
            database_url,
            manager_config,
        )
    } else {
        AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url)
    };

    let pool = Pool::builder(config).max_size(10).build()?;

    Ok(pool)
}

// User database operations
pub mod users {
    use super::*;

    pub async fn get_by_id(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> QueryResult<Option<User>> {
        use crate::schema::users::dsl::*;

        users
            .filter(id.eq(user_id))
            .first::<User>(conn)
            .await
            .optional()
    }

    pub async fn get_by_username(
        conn: &mut AsyncPgConnection,
        name: &str,
    ) -> QueryResult<Option<User>> {
        use crate::schema::users::dsl::*;

        users
            .filter(username.eq(name))
            .first::<User>(conn)
            .await
            .optional()
    }

    /// Insert a user. A duplicate username fails with a unique violation
    /// from the `users_username_key` constraint.
    pub async fn create(
        conn: &mut AsyncPgConnection,
        name: &str,
        hash: &str,
    ) -> QueryResult<User> {
        use crate::schema::users::dsl::*;

        diesel::insert_into(users)
            .values(NewUserRow {
                username: name,
                password_hash: hash,
            })
            .get_result::<User>(conn)
            .await
    }
}

// Joke database operations
pub mod jokes {
    use super::*;

    pub async fn list_recent(
        conn: &mut AsyncPgConnection,
        take: i64,
    ) -> QueryResult<Vec<JokeListItem>> {
        use crate::schema::jokes::dsl::*;

        jokes
            .select((id, name))
            .order_by(created_at.desc())
            .limit(take)
            .load::<JokeListItem>(conn)
            .await
    }

    pub async fn count(conn: &mut AsyncPgConnection) -> QueryResult<i64> {
        use crate::schema::jokes::dsl::*;

        jokes.count().get_result::<i64>(conn).await
    }

    pub async fn at_offset(
        conn: &mut AsyncPgConnection,
        skip: i64,
    ) -> QueryResult<Option<Joke>> {
        use crate::schema::jokes::dsl::*;

        jokes
            .order_by((created_at.asc(), id.asc()))
            .offset(skip)
            .first::<Joke>(conn)
            .await
            .optional()
    }

    pub async fn get_by_id(
        conn: &mut AsyncPgConnection,
        joke_id: Uuid,
    ) -> QueryResult<Option<Joke>> {
        use crate::schema::jokes::dsl::*;

        jokes
            .filter(id.eq(joke_id))
            .first::<Joke>(conn)
            .await
            .optional()
    }

    pub async fn create(conn: &mut AsyncPgConnection, new_joke: &NewJoke) -> QueryResult<Joke> {
        use crate::schema::jokes::dsl::*;

        diesel::insert_into(jokes)
            .values(NewJokeRow::from(new_joke))
            .get_result::<Joke>(conn)
            .await
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete(conn: &mut AsyncPgConnection, joke_id: Uuid) -> QueryResult<usize> {
        use crate::schema::jokes::dsl::*;

        diesel::delete(jokes.filter(id.eq(joke_id)))
            .execute(conn)
            .await
    }
}
