use axum::async_trait;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::info;

use super::auth;
use super::flash::Flash;
use super::pages::{self, ContactFormValues, ContactPageParams, EditorPageParams, PostPageParams};
use super::AppState;
use crate::auth::{MaybeUser, RequireAdmin};
use crate::db::{NewPost, User};
use crate::error::BlogError;
use crate::mail::ContactMessage;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/register", get(auth::register_page).post(auth::register_post))
        .route("/login", get(auth::login_page).post(auth::login_post))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/post/:id", get(show_post).post(add_comment))
        .route("/new-post", get(new_post_form).post(new_post_submit))
        .route("/edit-post/:id", get(edit_post_form).post(edit_post_submit))
        .route("/delete/:id", post(delete_post))
        .route("/about", get(about))
        .route("/contact", get(contact_form).post(contact_submit))
        .route("/healthz", get(health))
}

// ========== Posts ==========

/// Numeric post id from the path. Anything else gets the 404 page.
struct PostId(i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PostId {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| Self(id))
            .map_err(|_| pages::error_response(&BlogError::NotFound, None))
    }
}

async fn home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    flash: Flash,
) -> Response {
    let posts = state.blog.list_posts().await;
    flash.page(pages::render_home_page(&posts, user.as_ref(), flash.message()))
}

async fn show_post(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    flash: Flash,
    PostId(id): PostId,
) -> Response {
    render_post(&state, user.as_ref(), &flash, id, None, None).await
}

/// Render the post page, optionally with a rejected comment's error and text.
async fn render_post(
    state: &AppState,
    user: Option<&User>,
    flash: &Flash,
    id: i64,
    comment_error: Option<&str>,
    comment_draft: Option<&str>,
) -> Response {
    let post = match state.blog.get_post(id).await {
        Ok(p) => p,
        Err(e) => return pages::error_response(&e, user),
    };
    let comments = match state.blog.comments_for_post(id).await {
        Ok(c) => c,
        Err(e) => return pages::error_response(&e, user),
    };

    let markup = pages::render_post_page(&PostPageParams {
        post: &post,
        comments: &comments,
        user,
        flash: flash.message(),
        comment_error,
        comment_draft,
    });
    flash.page(markup)
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    comment_text: String,
}

async fn add_comment(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    PostId(id): PostId,
    Form(form): Form<CommentForm>,
) -> Response {
    match state.blog.add_comment(user.as_ref(), id, &form.comment_text).await {
        Ok(_) => Redirect::to(&format!("/post/{id}")).into_response(),
        Err(BlogError::InvalidInput(message)) => {
            render_post(
                &state,
                user.as_ref(),
                &Flash::default(),
                id,
                Some(&message),
                Some(&form.comment_text),
            )
            .await
        }
        Err(e) => pages::error_response(&e, user.as_ref()),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
    title: String,
    subtitle: String,
    img_url: String,
    body: String,
}

impl From<PostForm> for NewPost {
    fn from(form: PostForm) -> Self {
        Self {
            title: form.title,
            subtitle: form.subtitle,
            body: form.body,
            img_url: form.img_url,
        }
    }
}

fn editor_response(
    user: &User,
    fields: &NewPost,
    action: &str,
    is_edit: bool,
    error: Option<&str>,
) -> Response {
    let markup = pages::render_editor_page(&EditorPageParams {
        user,
        fields,
        action,
        is_edit,
        error,
    });
    Html(markup.into_string()).into_response()
}

async fn new_post_form(RequireAdmin(user): RequireAdmin) -> Response {
    editor_response(&user, &NewPost::default(), "/new-post", false, None)
}

async fn new_post_submit(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Form(form): Form<PostForm>,
) -> Response {
    let fields = NewPost::from(form);
    match state.blog.create_post(&user, &fields).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e @ (BlogError::DuplicateTitle | BlogError::InvalidInput(_))) => {
            editor_response(&user, &fields, "/new-post", false, Some(&e.to_string()))
        }
        Err(e) => pages::error_response(&e, Some(&user)),
    }
}

async fn edit_post_form(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    PostId(id): PostId,
) -> Response {
    match state.blog.get_post(id).await {
        Ok(post) => {
            let action = format!("/edit-post/{id}");
            editor_response(&user, &NewPost::from(&post), &action, true, None)
        }
        Err(e) => pages::error_response(&e, Some(&user)),
    }
}

async fn edit_post_submit(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    PostId(id): PostId,
    Form(form): Form<PostForm>,
) -> Response {
    let fields = NewPost::from(form);
    match state.blog.edit_post(&user, id, &fields).await {
        Ok(()) => Redirect::to(&format!("/post/{id}")).into_response(),
        Err(e @ (BlogError::DuplicateTitle | BlogError::InvalidInput(_))) => {
            let action = format!("/edit-post/{id}");
            editor_response(&user, &fields, &action, true, Some(&e.to_string()))
        }
        Err(e) => pages::error_response(&e, Some(&user)),
    }
}

async fn delete_post(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    PostId(id): PostId,
) -> Response {
    match state.blog.delete_post(&user, id).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => pages::error_response(&e, Some(&user)),
    }
}

// ========== Static pages ==========

async fn about(MaybeUser(user): MaybeUser, flash: Flash) -> Response {
    flash.page(pages::render_about_page(user.as_ref(), flash.message()))
}

async fn contact_form(MaybeUser(user): MaybeUser, flash: Flash) -> Response {
    flash.page(pages::render_contact_page(ContactPageParams {
        user: user.as_ref(),
        flash: flash.message(),
        ..ContactPageParams::default()
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    message: String,
}

async fn contact_submit(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Form(form): Form<ContactForm>,
) -> Response {
    if [&form.name, &form.email, &form.message]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        let markup = pages::render_contact_page(ContactPageParams {
            user: user.as_ref(),
            error: Some("Name, email and message are required."),
            values: ContactFormValues {
                name: &form.name,
                email: &form.email,
                phone: &form.phone,
                message: &form.message,
            },
            ..ContactPageParams::default()
        });
        return Html(markup.into_string()).into_response();
    }

    let message = ContactMessage {
        name: form.name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        message: form.message.clone(),
    };

    match state.contact.enqueue(message) {
        Ok(()) => {
            info!(user_id = user.as_ref().map(|u| u.id), "Contact message accepted");
            let markup = pages::render_contact_page(ContactPageParams {
                user: user.as_ref(),
                sent: true,
                ..ContactPageParams::default()
            });
            Html(markup.into_string()).into_response()
        }
        Err(e) => {
            let markup = pages::render_contact_page(ContactPageParams {
                user: user.as_ref(),
                error: Some(&e.to_string()),
                values: ContactFormValues {
                    name: &form.name,
                    email: &form.email,
                    phone: &form.phone,
                    message: &form.message,
                },
                ..ContactPageParams::default()
            });
            (StatusCode::SERVICE_UNAVAILABLE, Html(markup.into_string())).into_response()
        }
    }
}

// ========== Health ==========

async fn health() -> &'static str {
    "OK"
}
