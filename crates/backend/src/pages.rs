//! Server-rendered HTML.
//!
//! Every page is a plain `String`. Anything that came from a user (names,
//! joke text, echoed form values) goes through [`escape_html`].

use axum::http::StatusCode;
use shared_types::{Joke, JokeActionData, JokeListItem, LoginActionData, LoginType, User};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}

pub fn home_page() -> String {
    document(
        "Some lame jokes",
        r#"<div class="container">
<div class="content">
<h1>Remix <span>Jokes!</span></h1>
<nav>
<ul>
<li><a href="/jokes">Read Jokes</a></li>
<li><a href="/login">Login</a></li>
</ul>
</nav>
</div>
</div>"#,
    )
}

fn field_error(id: &str, message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<p class="form-validation-error" role="alert" id="{}">{}</p>"#,
            id,
            escape_html(message)
        ),
        None => String::new(),
    }
}

fn form_error(message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<div id="form-error-message"><p class="form-validation-error" role="alert">{}</p></div>"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

/// The combined login/register form. After a failed submission, `data`
/// carries the errors and the submitted values; the password is never
/// echoed back.
pub fn login_page(redirect_to: Option<&str>, data: &LoginActionData) -> String {
    let fields = data.fields.as_ref();
    let field_errors = data.field_errors.clone().unwrap_or_default();

    let redirect_to = fields
        .map(|f| f.redirect_to.as_str())
        .or(redirect_to)
        .unwrap_or_default();
    let register_checked = fields.is_some_and(|f| f.login_type == LoginType::Register.as_str());
    let username = fields.map(|f| f.username.as_str()).unwrap_or_default();

    let body = format!(
        r#"<div class="container">
<div class="content" data-light="">
<h1>Login</h1>
<form method="post" action="/login">
<input type="hidden" name="redirectTo" value="{redirect_to}" />
<fieldset>
<legend class="sr-only">Login or Register?</legend>
<label><input type="radio" name="loginType" value="login"{login_checked} /> Login</label>
<label><input type="radio" name="loginType" value="register"{register_checked} /> Register</label>
</fieldset>
<div>
<label for="username-input">Username</label>
<input type="text" id="username-input" name="username" autocomplete="off" value="{username}" />
{username_error}
</div>
<div>
<label for="password-input">Password</label>
<input id="password-input" name="password" type="password" />
{password_error}
</div>
{form_error}
<button type="submit" class="button">Submit</button>
</form>
</div>
<div class="links">
<ul>
<li><a href="/">Home</a></li>
<li><a href="/jokes">Jokes</a></li>
</ul>
</div>
</div>"#,
        redirect_to = escape_html(redirect_to),
        login_checked = if register_checked { "" } else { " checked" },
        register_checked = if register_checked { " checked" } else { "" },
        username = escape_html(username),
        username_error = field_error("username-error", field_errors.username.as_deref()),
        password_error = field_error("password-error", field_errors.password.as_deref()),
        form_error = form_error(data.form_error.as_deref()),
    );

    document("Login", &body)
}

/// Header, sidebar of recent jokes, and `outlet` in the main column.
pub fn jokes_layout(user: Option<&User>, jokes: &[JokeListItem], outlet: &str) -> String {
    let user_info = match user {
        Some(user) => format!(
            r#"<div class="user-info">
<span>Hi {}</span>
<form action="/logout" method="post"><button type="submit" class="button">Logout</button></form>
</div>"#,
            escape_html(&user.username)
        ),
        None => r#"<a href="/login">Login</a>"#.to_string(),
    };

    let list: String = jokes
        .iter()
        .map(|joke| {
            format!(
                r#"<li><a href="/jokes/{}">{}</a></li>"#,
                joke.id,
                escape_html(&joke.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<div class="jokes-layout">
<header class="jokes-header">
<div class="container">
<h1 class="home-link"><a href="/" title="Remix Jokes" aria-label="Remix Jokes">J🤪KES</a></h1>
{user_info}
</div>
</header>
<main class="jokes-main">
<div class="container">
<div class="jokes-list">
<a href="/jokes">Get a random joke</a>
<p>Here are a few more jokes to check out:</p>
<ul>
{list}
</ul>
<a href="/jokes/new" class="button">Add your own</a>
</div>
<div class="jokes-outlet">
{outlet}
</div>
</div>
</main>
</div>"#
    );

    document("Jokes", &body)
}

pub fn random_joke(joke: &Joke) -> String {
    format!(
        r#"<div>
<h2>Here's a random joke:</h2>
<p>{}</p>
<a href="/jokes/{}">"{}" Permalink</a>
</div>"#,
        escape_html(&joke.content),
        joke.id,
        escape_html(&joke.name)
    )
}

pub fn joke_detail(joke: &Joke, is_owner: bool) -> String {
    let delete_form = if is_owner {
        format!(
            r#"<form method="post" action="/jokes/{}">
<input type="hidden" name="_method" value="delete" />
<button type="submit" class="button">Delete this joke</button>
</form>"#,
            joke.id
        )
    } else {
        String::new()
    };

    format!(
        r#"<div>
<h2>{}</h2>
<div>{}</div>
{}
</div>"#,
        escape_html(&joke.name),
        escape_html(&joke.content),
        delete_form
    )
}

pub fn new_joke_form(data: &JokeActionData) -> String {
    let fields = data.fields.as_ref();
    let field_errors = data.field_errors.clone().unwrap_or_default();
    let name = fields.map(|f| f.name.as_str()).unwrap_or_default();
    let content = fields.map(|f| f.content.as_str()).unwrap_or_default();

    let invalid = |error: &Option<String>, id: &str| match error {
        Some(_) => format!(r#" aria-invalid="true" aria-describedby="{}""#, id),
        None => String::new(),
    };

    format!(
        r#"<div>
<p>Add your own hilarious joke</p>
<form method="post" action="/jokes/new">
<div>
<label>Name: <input type="text" name="name" value="{name}"{name_invalid} /></label>
{name_error}
</div>
<div>
<label>Content: <textarea name="content"{content_invalid}>{content}</textarea></label>
{content_error}
</div>
{form_error}
<div><button type="submit" class="button">Add</button></div>
</form>
</div>"#,
        name = escape_html(name),
        name_invalid = invalid(&field_errors.name, "name-error"),
        name_error = field_error("name-error", field_errors.name.as_deref()),
        content = escape_html(content),
        content_invalid = invalid(&field_errors.content, "content-error"),
        content_error = field_error("content-error", field_errors.content.as_deref()),
        form_error = form_error(data.form_error.as_deref()),
    )
}

/// Outlet for a 4xx inside the jokes layout
pub fn jokes_error(message: &str) -> String {
    format!(
        r#"<div class="error-container">{}</div>"#,
        escape_html(message)
    )
}

/// Outlet for `/jokes/new` when nobody is logged in
pub fn login_required() -> String {
    r#"<div class="error-container">
<p>You must be logged in to create a new joke.</p>
<a href="/login?redirectTo=%2Fjokes%2Fnew">Login</a>
</div>"#
        .to_string()
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        r#"<div class="error-container">
<h1>{}</h1>
<pre>{}</pre>
</div>"#,
        escape_html(&title),
        escape_html(message)
    );
    document(&title, &body)
}
