//! Maud HTML template components for the blog UI.
//!
//! - `layout`: base page, navigation bar and masthead
//! - `alert`: flash and validation message boxes
//! - `form`: form, input and textarea builders
//! - `button`: button and link-button components

pub mod alert;
pub mod button;
pub mod form;
pub mod layout;

pub use alert::{Alert, AlertVariant};
pub use button::{Button, ButtonVariant};
pub use form::{Form, FormGroup, Input, TextArea};
pub use layout::{BaseLayout, Masthead, SITE_NAME};
