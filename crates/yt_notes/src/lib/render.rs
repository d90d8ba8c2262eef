//! HTML rendering of [`NotesPage`]s.
//!
//! Templates are compiled once and rendered with auto-escaping, so the URL,
//! notices and notes are always shown as text.

use std::sync::LazyLock;

use minijinja::{context, Environment};

use crate::{Error, NotesPage};

pub const TITLE: &str = "YouTube Transcript to Detailed Notes Converter";
pub const NOTES_HEADING: &str = "Detailed Notes:";

static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.add_template("index.html", include_str!("templates/index.html"))
        .unwrap();
    env.add_template("error.html", include_str!("templates/error.html"))
        .unwrap();
    env
});

pub fn render_page(page: &NotesPage) -> Result<String, Error> {
    let template = TEMPLATES.get_template("index.html")?;

    Ok(template.render(context! {
        title => TITLE,
        heading => NOTES_HEADING,
        page => page,
    })?)
}

pub fn render_error(message: &str) -> Result<String, Error> {
    let template = TEMPLATES.get_template("error.html")?;

    Ok(template.render(context! {
        title => TITLE,
        message => message,
    })?)
}
