use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::warn;

use crate::auth::{clear_session_cookie, session_cookie, session_token, MaybeUser};
use crate::blog::Registration;
use crate::db::User;
use crate::error::BlogError;
use crate::web::flash::Flash;
use crate::web::{pages, AppState};

/// Registration form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    name: String,
    email: String,
    password: String,
}

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    email: String,
    password: String,
}

/// GET /register - Show registration form.
pub async fn register_page(MaybeUser(user): MaybeUser, flash: Flash) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    flash.page(pages::render_register_page(
        pages::RegisterFormValues::default(),
        None,
        flash.message(),
    ))
}

/// POST /register - Create the account and log it in.
pub async fn register_post(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let registration = Registration {
        email: form.email,
        password: form.password,
        name: form.name,
    };

    match state.blog.register(&registration).await {
        Ok(user) => establish_session(&state, &user).await,
        Err(BlogError::InvalidInput(message)) => {
            let values = pages::RegisterFormValues {
                name: &registration.name,
                email: &registration.email,
            };
            Html(pages::render_register_page(values, Some(&message), None).into_string())
                .into_response()
        }
        Err(e) => pages::error_response(&e, None),
    }
}

/// GET /login - Show login form.
pub async fn login_page(MaybeUser(user): MaybeUser, flash: Flash) -> Response {
    // Already logged in
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    flash.page(pages::render_login_page(flash.message()))
}

/// POST /login - Check credentials and open a session.
pub async fn login_post(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.blog.login(&form.email, &form.password).await {
        Ok(user) => establish_session(&state, &user).await,
        Err(e) => pages::error_response(&e, None),
    }
}

/// GET|POST /logout - End the presented session and clear the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers, &state.signer) {
        if let Err(e) = state.blog.end_session(token).await {
            warn!("Failed to delete session on logout: {e}");
        }
    }

    let cookie = clear_session_cookie(state.config.cookie_secure);
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

/// Store a session for `user`, set the signed cookie, and go home.
async fn establish_session(state: &AppState, user: &User) -> Response {
    let token = match state.blog.start_session(user, state.config.session_ttl).await {
        Ok(t) => t,
        Err(e) => return pages::error_response(&e, None),
    };

    let cookie = session_cookie(
        &state.signer,
        &token,
        state.config.session_ttl,
        state.config.cookie_secure,
    );

    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}
