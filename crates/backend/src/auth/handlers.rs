//! Login, registration and logout pages.

use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use shared_types::{LoginActionData, LoginFieldErrors, LoginFields, LoginForm, LoginType};

use crate::error::ApiResult;
use crate::pages;
use crate::repository::StoreError;
use crate::AppState;

use super::service::{self, DEFAULT_REDIRECT};
use super::types::AuthError;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    Html(pages::login_page(
        query.redirect_to.as_deref(),
        &LoginActionData::default(),
    ))
}

fn bad_request(data: LoginActionData) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(pages::login_page(None, &data)),
    )
        .into_response()
}

fn user_exists(fields: LoginFields) -> Response {
    let message = format!("User {} already exists", fields.username);
    bad_request(LoginActionData {
        form_error: Some(message),
        field_errors: None,
        fields: Some(fields),
    })
}

/// Handle the combined login/register form.
pub async fn login_action(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Response> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Unreadable login form: {}", rejection);
            LoginForm::default()
        }
    };
    let (Some(login_type), Some(username), Some(password)) =
        (form.login_type, form.username, form.password)
    else {
        return Ok(bad_request(LoginActionData::form_error(
            "Form submitted incorrectly",
        )));
    };

    let redirect_to = service::safe_redirect_target(form.redirect_to.as_deref());
    let field_errors = LoginFieldErrors::check(&username, &password);
    let fields = LoginFields {
        login_type,
        username,
        password,
        redirect_to,
    };

    if field_errors.has_errors() {
        return Ok(bad_request(LoginActionData {
            form_error: None,
            field_errors: Some(field_errors),
            fields: Some(fields),
        }));
    }

    match LoginType::from_str(&fields.login_type) {
        Some(LoginType::Login) => {
            match service::login(state.store.as_ref(), &fields.username, &fields.password).await? {
                Some(user) => {
                    tracing::info!("User {} logged in", user.username);
                    Ok(service::create_user_session(
                        &state.sessions,
                        user.id,
                        &fields.redirect_to,
                    ))
                }
                None => {
                    tracing::info!("Failed login attempt for {}", fields.username);
                    Ok(bad_request(LoginActionData {
                        form_error: Some("Combination incorrect!".to_string()),
                        field_errors: None,
                        fields: Some(fields),
                    }))
                }
            }
        }
        Some(LoginType::Register) => {
            if service::check_for_user(state.store.as_ref(), &fields.username)
                .await?
                .is_some()
            {
                return Ok(user_exists(fields));
            }

            match service::register(&state, &fields.username, &fields.password, DEFAULT_REDIRECT)
                .await
            {
                Ok(response) => Ok(response),
                // lost a race with another registration for the same name
                Err(AuthError::Store(StoreError::UsernameTaken(_))) => Ok(user_exists(fields)),
                Err(e) => Err(e.into()),
            }
        }
        None => Ok(bad_request(LoginActionData {
            form_error: Some("Invalid login type".to_string()),
            field_errors: None,
            fields: Some(fields),
        })),
    }
}

/// Plain navigation to `/logout` doesn't log anyone out.
pub async fn logout_page() -> Redirect {
    Redirect::to("/")
}

pub async fn logout_action(State(state): State<AppState>, headers: HeaderMap) -> Response {
    tracing::info!("Logging out");
    service::logout(&headers, &state.sessions)
}
