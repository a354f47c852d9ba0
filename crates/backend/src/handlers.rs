use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use rand::Rng;
use shared_types::{
    JokeActionData, JokeActionForm, JokeFieldErrors, JokeFields, JokeListItem, NewJoke,
    NewJokeForm, User,
};
use uuid::Uuid;

use crate::auth::{self, RequireUser};
use crate::error::{ApiError, ApiResult};
use crate::ownership::{self, OwnershipError};
use crate::pages;
use crate::repository::DeleteError;
use crate::AppState;

/// How many jokes the sidebar lists
const RECENT_JOKES: i64 = 5;

pub async fn home() -> Html<String> {
    Html(pages::home_page())
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Fallback for paths no route matches
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No page at {}", uri.path()))
}

/// The current user and the sidebar jokes shown on every `/jokes` page
async fn layout_data(
    state: &AppState,
    headers: &HeaderMap,
) -> ApiResult<(Option<User>, Vec<JokeListItem>)> {
    let jokes = state.store.list_recent_jokes(RECENT_JOKES).await?;
    let user = auth::get_user(headers, state).await?;
    Ok((user, jokes))
}

fn render_jokes(
    status: StatusCode,
    user: Option<&User>,
    jokes: &[JokeListItem],
    outlet: &str,
) -> Response {
    (status, Html(pages::jokes_layout(user, jokes, outlet))).into_response()
}

/// An error message shown inside the jokes layout, so the header and the
/// "Add your own" link stay available.
async fn jokes_error(
    state: &AppState,
    headers: &HeaderMap,
    status: StatusCode,
    message: &str,
) -> ApiResult<Response> {
    let (user, jokes) = layout_data(state, headers).await?;
    Ok(render_jokes(
        status,
        user.as_ref(),
        &jokes,
        &pages::jokes_error(message),
    ))
}

/// A form body that axum couldn't extract is treated like an empty one.
fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Unreadable form body: {}", rejection);
            T::default()
        }
    }
}

// Joke handlers
pub async fn jokes_index(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let (user, jokes) = layout_data(&state, &headers).await?;

    let count = state.store.count_jokes().await?;
    let joke = if count > 0 {
        let skip = rand::thread_rng().gen_range(0..count);
        state.store.joke_at_offset(skip).await?
    } else {
        None
    };

    let Some(joke) = joke else {
        return Ok(render_jokes(
            StatusCode::NOT_FOUND,
            user.as_ref(),
            &jokes,
            &pages::jokes_error("There are no jokes here..."),
        ));
    };

    Ok(render_jokes(
        StatusCode::OK,
        user.as_ref(),
        &jokes,
        &pages::random_joke(&joke),
    ))
}

pub async fn new_joke_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let (user, jokes) = layout_data(&state, &headers).await?;

    if auth::get_user_id(&headers, &state.sessions).is_none() {
        return Ok(render_jokes(
            StatusCode::UNAUTHORIZED,
            None,
            &jokes,
            &pages::login_required(),
        ));
    }

    Ok(render_jokes(
        StatusCode::OK,
        user.as_ref(),
        &jokes,
        &pages::new_joke_form(&JokeActionData::default()),
    ))
}

pub async fn create_joke(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    form: Result<Form<NewJokeForm>, FormRejection>,
) -> ApiResult<Response> {
    let form = form_or_default(form);
    let user_id = match auth::require_user_id(&headers, &state, uri.path()).await? {
        RequireUser::Authorized(user_id) => user_id,
        RequireUser::Unauthenticated { redirect_to } => {
            return Ok(auth::login_redirect(&redirect_to))
        }
    };

    let (Some(name), Some(content)) = (form.name, form.content) else {
        return bad_joke_request(
            &state,
            &headers,
            JokeActionData {
                form_error: Some("Form not submitted correctly".to_string()),
                ..Default::default()
            },
        )
        .await;
    };

    let field_errors = JokeFieldErrors::check(&name, &content);
    if field_errors.has_errors() {
        return bad_joke_request(
            &state,
            &headers,
            JokeActionData {
                form_error: None,
                field_errors: Some(field_errors),
                fields: Some(JokeFields { name, content }),
            },
        )
        .await;
    }

    let joke = state
        .store
        .create_joke(NewJoke {
            jokester_id: user_id,
            name,
            content,
        })
        .await?;

    tracing::info!("User {} created joke {}", user_id, joke.id);

    Ok(Redirect::to(&format!("/jokes/{}", joke.id)).into_response())
}

async fn bad_joke_request(
    state: &AppState,
    headers: &HeaderMap,
    data: JokeActionData,
) -> ApiResult<Response> {
    let (user, jokes) = layout_data(state, headers).await?;
    Ok(render_jokes(
        StatusCode::BAD_REQUEST,
        user.as_ref(),
        &jokes,
        &pages::new_joke_form(&data),
    ))
}

pub async fn joke_detail(
    State(state): State<AppState>,
    Path(joke_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let (user, jokes) = layout_data(&state, &headers).await?;

    let joke = match Uuid::parse_str(&joke_id) {
        Ok(id) => state.store.find_joke(id).await?,
        Err(_) => None,
    };
    let Some(joke) = joke else {
        return Ok(render_jokes(
            StatusCode::NOT_FOUND,
            user.as_ref(),
            &jokes,
            &pages::jokes_error(&format!("Huh? What the heck is {}?", joke_id)),
        ));
    };

    let user_id = match auth::require_user_id(&headers, &state, uri.path()).await? {
        RequireUser::Authorized(user_id) => user_id,
        RequireUser::Unauthenticated { redirect_to } => {
            return Ok(auth::login_redirect(&redirect_to))
        }
    };

    let is_owner = joke.jokester_id == user_id;
    Ok(render_jokes(
        StatusCode::OK,
        user.as_ref(),
        &jokes,
        &pages::joke_detail(&joke, is_owner),
    ))
}

/// POST to a joke page. The only supported action is `_method=delete`.
pub async fn joke_action(
    State(state): State<AppState>,
    Path(joke_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    form: Result<Form<JokeActionForm>, FormRejection>,
) -> ApiResult<Response> {
    let form = form_or_default(form);
    if form.method.as_deref() != Some("delete") {
        return Err(ApiError::bad_request("Unsupported form action"));
    }

    let user_id = match auth::require_user_id(&headers, &state, uri.path()).await? {
        RequireUser::Authorized(user_id) => user_id,
        RequireUser::Unauthenticated { redirect_to } => {
            return Ok(auth::login_redirect(&redirect_to))
        }
    };

    match ownership::delete_owned_joke(state.store.as_ref(), &joke_id, user_id).await {
        Ok(deleted) => {
            tracing::info!("User {} deleted joke {}", user_id, deleted);
        }
        Err(OwnershipError::NotFound) => {
            return jokes_error(&state, &headers, StatusCode::NOT_FOUND, "Cant find that joke")
                .await;
        }
        Err(err @ OwnershipError::NotOwner { .. }) => {
            tracing::warn!("Rejected delete: {}", err);
            return jokes_error(
                &state,
                &headers,
                StatusCode::UNAUTHORIZED,
                "This joke isn't yours to delete!",
            )
            .await;
        }
        Err(OwnershipError::Delete(DeleteError::NotFound(id))) => {
            tracing::warn!("Joke {} was already gone when {} deleted it", id, user_id);
        }
        Err(OwnershipError::Delete(DeleteError::Store(e))) => {
            tracing::error!("Failed to delete joke {}: {}", joke_id, e);
            return Err(e.into());
        }
    }

    Ok(Redirect::to("/jokes").into_response())
}
