use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options
}

/// Renders a markdown body to HTML. Fenced code blocks and tables are enabled.
pub fn render(body: &str) -> String {
    let parser = Parser::new_ext(body, options()).map(|event| match event {
        // unlabelled fences still get a class so the stylesheet can target them
        Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang))) if lang.is_empty() => {
            Event::Html("<pre class=\"code\"><code>".into())
        }
        _ => event,
    });

    let mut body_html = String::new();
    html::push_html(&mut body_html, parser);
    body_html
}
