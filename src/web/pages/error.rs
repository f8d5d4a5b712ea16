//! Status pages and the mapping from domain errors to responses.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use maud::{html, Markup};
use tracing::error;

use crate::components::{BaseLayout, Button, Masthead};
use crate::db::User;
use crate::error::BlogError;
use crate::web::flash::{redirect_with_flash, FlashLevel};

/// Render a full page describing an HTTP status.
#[must_use]
pub fn render_status_page(status: StatusCode, message: &str, user: Option<&User>) -> Markup {
    let heading = status.as_u16().to_string();
    let title = status.canonical_reason().unwrap_or("Error");

    let content = html! {
        div class="status-page" {
            h2 { (title) }
            p { (message) }
            (Button::primary("Back to Home").href("/"))
        }
    };

    BaseLayout::new(title, user)
        .with_masthead(Masthead::new(&heading).subheading(title))
        .render(content)
}

/// Turn a domain error into the response the visitor should see.
///
/// Account problems go back to the login page with a flash. Everything else
/// is a status page; internal failures are logged and never shown in detail.
pub fn error_response(err: &BlogError, user: Option<&User>) -> Response {
    let (status, message) = match err {
        BlogError::DuplicateEmail => {
            return redirect_with_flash("/login", FlashLevel::Warning, err.to_string());
        }
        BlogError::InvalidCredentials => {
            return redirect_with_flash("/login", FlashLevel::Error, err.to_string());
        }
        BlogError::AuthRequired => {
            return redirect_with_flash("/login", FlashLevel::Info, err.to_string());
        }
        BlogError::Forbidden => (
            StatusCode::FORBIDDEN,
            "Only the blog's author can do that.".to_string(),
        ),
        BlogError::NotFound => (
            StatusCode::NOT_FOUND,
            "That page doesn't exist.".to_string(),
        ),
        BlogError::DuplicateTitle => (StatusCode::CONFLICT, err.to_string()),
        BlogError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message.clone()),
        BlogError::NotificationUnavailable => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
        BlogError::Internal(e) => {
            error!("Request failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong on our end.".to_string(),
            )
        }
    };

    (status, Html(render_status_page(status, &message, user).into_string())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_forbidden_is_403_page() {
        let response = error_response(&BlogError::Forbidden, None);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_not_found_is_404_page() {
        let response = error_response(&BlogError::NotFound, None);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_hides_details() {
        let response = error_response(&BlogError::Internal(anyhow::anyhow!("disk on fire")), None);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_account_errors_redirect_to_login() {
        for err in [
            BlogError::DuplicateEmail,
            BlogError::InvalidCredentials,
            BlogError::AuthRequired,
        ] {
            let response = error_response(&err, None);
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[header::LOCATION], "/login");
            assert!(response.headers().contains_key(header::SET_COOKIE));
        }
    }

    #[test]
    fn test_status_page_shows_message() {
        let html = render_status_page(StatusCode::NOT_FOUND, "Gone fishing", None).into_string();
        assert!(html.contains("<h1>404</h1>"));
        assert!(html.contains("Not Found"));
        assert!(html.contains("Gone fishing"));
    }
}
