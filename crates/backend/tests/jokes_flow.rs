mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_text, location, TestApp};
use jokes_backend::{
    memory::MemoryStore,
    repository::{DeleteError, Store, StoreError, StoreResult},
};
use shared_types::{Joke, JokeListItem, NewJoke, User};
use uuid::Uuid;

#[tokio::test]
async fn test_create_joke_as_logged_in_user() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password1").await;

    let joke_id = app.create_joke(&cookie, "Pun", "Why did...").await;

    let alice = app
        .store
        .find_user_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    let joke = app
        .store
        .find_joke(joke_id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(joke.jokester_id, alice.id);
    assert_eq!(joke.name, "Pun");
    assert_eq!(joke.content, "Why did...");

    let response = app.get(&format!("/jokes/{}", joke_id), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<h2>Pun</h2>"));
    assert!(body.contains(r#"name="_method" value="delete""#));
    assert!(body.contains("Hi alice"));
}

#[tokio::test]
async fn test_anonymous_joke_detail_redirects_to_login() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password1").await;
    let joke_id = app.create_joke(&cookie, "Pun", "Why did...").await;

    let response = app.get(&format!("/jokes/{}", joke_id), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/login?redirectTo=%2Fjokes%2F{}", joke_id)
    );
}

#[tokio::test]
async fn test_other_users_see_joke_without_delete_button() {
    let app = TestApp::new();
    let alice = app.register("alice", "password1").await;
    let joke_id = app.create_joke(&alice, "Pun", "Why did...").await;
    let bob = app.register("bob", "password1").await;

    let response = app.get(&format!("/jokes/{}", joke_id), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<h2>Pun</h2>"));
    assert!(!body.contains("_method"));
}

#[tokio::test]
async fn test_unknown_joke_is_not_found() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password1").await;

    // not found wins over the login check
    let response = app.get("/jokes/not-a-joke", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("Huh? What the heck is not-a-joke?"));
    assert!(body.contains(r#"class="jokes-layout""#));

    let missing = Uuid::new_v4();
    let response = app.get(&format!("/jokes/{}", missing), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains(&format!("Huh? What the heck is {}?", missing)));
    assert!(body.contains("Hi alice"));
    assert!(body.contains(r#"href="/jokes/new""#));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/nowhere", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("No page at /nowhere"));
}

#[tokio::test]
async fn test_new_joke_page_requires_login() {
    let app = TestApp::new();

    let response = app.get("/jokes/new", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response)
        .await
        .contains("You must be logged in to create a new joke."));
}

#[tokio::test]
async fn test_anonymous_create_redirects_to_login() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/jokes/new",
            &[("name", "Pun"), ("content", "Why did...")],
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirectTo=%2Fjokes%2Fnew");
    assert_eq!(app.store.count_jokes().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_joke_validation() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password1").await;

    let response = app
        .post_form(
            "/jokes/new",
            &[("name", "P"), ("content", "Too short")],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("That joke&#39;s name is too short"));
    assert!(body.contains("That joke is too short"));
    assert!(body.contains(">Too short</textarea>"));
    assert_eq!(app.store.count_jokes().await.unwrap(), 0);

    let response = app
        .post_form("/jokes/new", &[("name", "Pun")], Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Form not submitted correctly"));
}

#[tokio::test]
async fn test_jokes_index() {
    let app = TestApp::new();

    let response = app.get("/jokes", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("There are no jokes here..."));
    // the empty site still links to the new joke form
    assert!(body.contains(r#"class="jokes-layout""#));
    assert!(body.contains(r#"href="/jokes/new""#));
    assert!(body.contains(r#"<a href="/login">Login</a>"#));

    let cookie = app.register("alice", "password1").await;
    app.create_joke(&cookie, "Pun", "Why did the chicken cross the road?")
        .await;

    let response = app.get("/jokes", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Here's a random joke:"));
    assert!(body.contains("Why did the chicken cross the road?"));
    assert!(body.contains(">Pun</a>"));
}

#[tokio::test]
async fn test_owner_deletes_joke() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password1").await;
    let joke_id = app.create_joke(&cookie, "Pun", "Why did...").await;

    let response = app
        .post_form(
            &format!("/jokes/{}", joke_id),
            &[("_method", "delete")],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/jokes");
    assert_eq!(app.store.count_jokes().await.unwrap(), 0);
}

#[tokio::test]
async fn test_non_owner_cannot_delete() {
    let app = TestApp::new();
    let alice = app.register("alice", "password1").await;
    let joke_id = app.create_joke(&alice, "Pun", "Why did...").await;
    let bob = app.register("bob", "password1").await;

    let response = app
        .post_form(
            &format!("/jokes/{}", joke_id),
            &[("_method", "delete")],
            Some(&bob),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_text(response).await;
    assert!(body.contains("yours to delete!"));
    assert!(body.contains("Hi bob"));

    let joke = app
        .store
        .find_joke(joke_id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(joke.name, "Pun");
}

#[tokio::test]
async fn test_delete_missing_joke_is_not_found() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password1").await;

    let response = app
        .post_form(
            &format!("/jokes/{}", Uuid::new_v4()),
            &[("_method", "delete")],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("Cant find that joke"));
    assert!(body.contains(r#"class="jokes-layout""#));
}

#[tokio::test]
async fn test_anonymous_delete_redirects_to_login() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password1").await;
    let joke_id = app.create_joke(&cookie, "Pun", "Why did...").await;

    let response = app
        .post_form(&format!("/jokes/{}", joke_id), &[("_method", "delete")], None)
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/login?redirectTo=%2Fjokes%2F{}", joke_id)
    );
    assert_eq!(app.store.count_jokes().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unsupported_action_is_bad_request() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password1").await;
    let joke_id = app.create_joke(&cookie, "Pun", "Why did...").await;

    let response = app
        .post_form(&format!("/jokes/{}", joke_id), &[("_method", "put")], Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.count_jokes().await.unwrap(), 1);
}

#[tokio::test]
async fn test_bodyless_posts_reach_form_errors() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password1").await;
    let joke_id = app.create_joke(&cookie, "Pun", "Why did...").await;

    let response = app.post_empty("/jokes/new", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Form not submitted correctly"));

    let response = app
        .post_empty(&format!("/jokes/{}", joke_id), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Unsupported form action"));
    assert_eq!(app.store.count_jokes().await.unwrap(), 1);
}

/// Delegates to a `MemoryStore` but fails every delete.
struct BrokenDeletes(MemoryStore);

#[async_trait]
impl Store for BrokenDeletes {
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        self.0.find_user_by_id(id).await
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.0.find_user_by_username(username).await
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        self.0.create_user(username, password_hash).await
    }

    async fn list_recent_jokes(&self, limit: i64) -> StoreResult<Vec<JokeListItem>> {
        self.0.list_recent_jokes(limit).await
    }

    async fn count_jokes(&self) -> StoreResult<i64> {
        self.0.count_jokes().await
    }

    async fn joke_at_offset(&self, offset: i64) -> StoreResult<Option<Joke>> {
        self.0.joke_at_offset(offset).await
    }

    async fn find_joke(&self, id: Uuid) -> StoreResult<Option<Joke>> {
        self.0.find_joke(id).await
    }

    async fn create_joke(&self, joke: NewJoke) -> StoreResult<Joke> {
        self.0.create_joke(joke).await
    }

    async fn delete_joke(&self, _id: Uuid) -> Result<(), DeleteError> {
        Err(DeleteError::Store(StoreError::Internal(anyhow::anyhow!(
            "disk on fire"
        ))))
    }
}

#[tokio::test]
async fn test_store_failure_during_delete_is_server_error() {
    let store = MemoryStore::new();
    let app = TestApp::with_store(store.clone(), Arc::new(BrokenDeletes(store)));
    let cookie = app.register("alice", "password1").await;
    let joke_id = app.create_joke(&cookie, "Pun", "Why did...").await;

    let response = app
        .post_form(
            &format!("/jokes/{}", joke_id),
            &[("_method", "delete")],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body_text(response).await.contains("disk on fire"));
    assert_eq!(app.store.count_jokes().await.unwrap(), 1);
}
