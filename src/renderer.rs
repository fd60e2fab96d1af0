use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use handlebars::{handlebars_helper, Handlebars};

pub const TEMPLATES: [&str; 6] = ["index", "about", "list", "item", "add", "update"];

// Only the family listing and the item itself have pages, so segments in
// between are plain text.
handlebars_helper!(breadcrumbs: |path: str| {
    let mut current_path = String::new();
    let mut res = String::new();
    res.push_str("<a href=\"/\">/</a> ");
    let crumbs: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
    let last = crumbs.len().saturating_sub(1);
    for (i, c) in crumbs.iter().enumerate() {
        current_path.push('/');
        current_path.push_str(c);
        if i > 0 {
            res.push_str(" / ");
        }
        if i == 0 || i == last {
            let _ = write!(
                res,
                "<a href=\"{}\">{}</a>",
                handlebars::html_escape(&current_path),
                handlebars::html_escape(c)
            );
        } else {
            res.push_str(&handlebars::html_escape(c));
        }
    }

    res
});

handlebars_helper!(join: |lst: array, sep: str| {
    lst.iter()
        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
        .collect::<Vec<_>>()
        .join(sep)
});

/// Loads every page template plus the `layout` partial from `template_dir`.
pub fn generate_renderer(template_dir: &Path) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("breadcrumbs", Box::new(breadcrumbs));
    handlebars.register_helper("join", Box::new(join));
    for name in TEMPLATES {
        let file = format!("{name}.hbs");
        handlebars
            .register_template_file(name, template_dir.join(&file))
            .with_context(|| file.clone())?;
    }
    handlebars.register_partial(
        "layout",
        std::fs::read_to_string(template_dir.join("layout.hbs")).context("layout.hbs")?,
    )?;

    Ok(handlebars)
}
