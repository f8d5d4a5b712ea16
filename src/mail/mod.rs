//! Contact-form email notifications.
//!
//! Handlers push a [`ContactMessage`] onto the [`ContactQueue`]; a single
//! background worker delivers queued messages through the [`Mailer`].

mod mailer;
mod worker;

pub use mailer::Mailer;
pub use worker::{spawn_worker, ContactQueue};

/// Subject line of every contact notification.
pub const CONTACT_SUBJECT: &str = "New Message";

/// What a visitor submitted through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactMessage {
    /// Plain-text body sent to the operator.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nPhone: {}\nMessage:{}",
            self.name, self.email, self.phone, self.message
        )
    }
}
