//! Maud-based page templates for the blog.
//!
//! Each page module exports a render function that produces the complete HTML.

pub mod about;
pub mod auth;
pub mod contact;
pub mod editor;
pub mod error;
pub mod home;
pub mod post;

pub use about::render_about_page;
pub use auth::{render_login_page, render_register_page, RegisterFormValues};
pub use contact::{render_contact_page, ContactFormValues, ContactPageParams};
pub use editor::{render_editor_page, EditorPageParams};
pub use error::{error_response, render_status_page};
pub use home::render_home_page;
pub use post::{render_post_page, PostPageParams};
