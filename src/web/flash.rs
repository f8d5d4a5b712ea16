//! One-time notices carried across a redirect in a `flash` cookie.
//!
//! The cookie holds `level:message`, URL-encoded. It is set on the redirect
//! response and removed by whichever page renders it next.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use maud::Markup;

use crate::auth::read_cookie;
use crate::components::AlertVariant;

pub const FLASH_COOKIE: &str = "flash";

/// Seconds a flash survives if no page ever consumes it.
const FLASH_MAX_AGE: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Warning,
    Error,
}

impl FlashLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub fn alert_variant(self) -> AlertVariant {
        match self {
            Self::Info => AlertVariant::Info,
            Self::Warning => AlertVariant::Warning,
            Self::Error => AlertVariant::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    #[must_use]
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Cookie-safe encoding.
    #[must_use]
    pub fn encode(&self) -> String {
        urlencoding::encode(&format!("{}:{}", self.level.as_str(), self.message)).into_owned()
    }

    /// Inverse of [`FlashMessage::encode`]. Garbage yields `None`.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        let decoded = urlencoding::decode(raw).ok()?;
        let (level, message) = decoded.split_once(':')?;
        let level = FlashLevel::parse(level)?;
        (!message.is_empty()).then(|| Self::new(level, message))
    }

    fn set_cookie(&self) -> String {
        format!(
            "{FLASH_COOKIE}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={FLASH_MAX_AGE}",
            self.encode()
        )
    }
}

fn clear_flash_cookie() -> String {
    format!("{FLASH_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Redirect (303) to `to`, carrying a flash for the next page.
pub fn redirect_with_flash(to: &str, level: FlashLevel, message: impl Into<String>) -> Response {
    let flash = FlashMessage::new(level, message);
    ([(header::SET_COOKIE, flash.set_cookie())], Redirect::to(to)).into_response()
}

/// The flash presented by the current request, if any.
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Option<FlashMessage>);

impl Flash {
    #[must_use]
    pub fn message(&self) -> Option<&FlashMessage> {
        self.0.as_ref()
    }

    /// Respond with a rendered page, removing the flash cookie if this
    /// request carried one.
    pub fn page(&self, markup: Markup) -> Response {
        let html = Html(markup.into_string());
        if self.0.is_some() {
            ([(header::SET_COOKIE, clear_flash_cookie())], html).into_response()
        } else {
            html.into_response()
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Flash(
            read_cookie(&parts.headers, FLASH_COOKIE).and_then(FlashMessage::decode),
        ))
    }
}
