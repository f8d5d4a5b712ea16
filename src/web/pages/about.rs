use maud::{html, Markup};

use crate::components::{BaseLayout, Masthead};
use crate::db::User;
use crate::web::flash::FlashMessage;

#[must_use]
pub fn render_about_page(user: Option<&User>, flash: Option<&FlashMessage>) -> Markup {
    let content = html! {
        div class="about" {
            p {
                "This is a small personal blog. Posts are written by its author; "
                "anyone with an account can join the conversation in the comments."
            }
            p {
                "Want to get in touch? Use the " a href="/contact" { "contact form" } "."
            }
        }
    };

    BaseLayout::new("About", user)
        .with_flash(flash)
        .with_masthead(Masthead::new("About Me").subheading("This is what I do."))
        .render(content)
}
