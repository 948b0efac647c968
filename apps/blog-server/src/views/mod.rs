//! Server-side templates, compiled into the binary.

use minijinja::{Environment, Value};
use quill_infra::strip_tags;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("templates/layout.html")),
    ("index.html", include_str!("templates/index.html")),
    ("new.html", include_str!("templates/new.html")),
    ("show.html", include_str!("templates/show.html")),
    ("edit.html", include_str!("templates/edit.html")),
];

/// Length of the body preview on the index page, in characters.
const EXCERPT_LEN: usize = 100;

/// Registry of the compiled page templates.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_filter("excerpt", excerpt);
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

/// Plain-text preview of a stored (already sanitized) HTML body.
///
/// Entities stay encoded and count as one character, so a cut never lands
/// inside one.
fn excerpt(body: String, len: Option<usize>) -> Value {
    let len = len.unwrap_or(EXCERPT_LEN);
    let text = strip_tags(&body);
    let text = text.trim();

    let mut cut = String::with_capacity(text.len());
    let mut chars = text.chars();
    let mut shown = 0;
    while let Some(c) = chars.next() {
        if shown == len {
            cut.push_str("...");
            return Value::from_safe_string(cut);
        }
        cut.push(c);
        if c == '&' {
            for c in chars.by_ref() {
                cut.push(c);
                if c == ';' {
                    break;
                }
            }
        }
        shown += 1;
    }
    Value::from_safe_string(cut)
}
