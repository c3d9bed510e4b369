//! Markdown-to-HTML rendering.
//!
//! The pipeline talks to a [`Render`] capability rather than to
//! pulldown-cmark directly, so the concrete renderer is swappable
//! without touching parse or page logic. [`CmarkRenderer`] is the one
//! real implementation.
//!
//! Two things happen beyond stock pulldown-cmark output:
//!
//! - **Heading anchors**: headings without an explicit id get a
//!   slugified `id` attribute so in-page links work.
//! - **Mermaid blocks**: a fenced code block tagged `mermaid` becomes a
//!   bare `<div class="mermaid">` holding the raw diagram source. The
//!   client-side mermaid script renders these; a syntax-highlighted
//!   `<pre><code>` would hide them from it. This is done at the event
//!   level, not with a post-render regex over the HTML.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

/// Capability interface: markdown body in, HTML fragment out.
pub trait Render {
    fn render(&self, markdown: &str) -> String;
}

/// pulldown-cmark renderer with the extended syntax set: tables,
/// definition lists, fenced code with language hints, footnotes,
/// strikethrough, task lists, and smart punctuation.
#[derive(Debug, Default, Clone, Copy)]
pub struct CmarkRenderer;

impl Render for CmarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_DEFINITION_LIST);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        let events: Vec<Event> = Parser::new_ext(markdown, options).collect();
        let events = rewrite_mermaid_blocks(events);
        let events = add_heading_anchors(events);

        let mut out = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Replace `\`\`\`mermaid` fenced blocks with plain container divs.
fn rewrite_mermaid_blocks<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut iter = events.into_iter();

    while let Some(event) = iter.next() {
        let is_mermaid = matches!(
            &event,
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if info_language(info) == Some("mermaid")
        );
        if !is_mermaid {
            out.push(event);
            continue;
        }

        let mut source = String::new();
        for inner in iter.by_ref() {
            match inner {
                Event::Text(text) => source.push_str(&text),
                Event::End(TagEnd::CodeBlock) => break,
                _ => {}
            }
        }
        out.push(Event::Html(
            format!("<div class=\"mermaid\">{}</div>", escape_html(&source)).into(),
        ));
    }
    out
}

/// First whitespace-separated token of a fence info string.
fn info_language(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

/// Give every heading without an explicit id a slugified one.
fn add_heading_anchors<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    let mut out = events;
    let mut i = 0;
    while i < out.len() {
        if let Event::Start(Tag::Heading { id, .. }) = &out[i] {
            if id.is_none() {
                let text = heading_text(&out[i + 1..]);
                let anchor = slug::slugify(&text);
                if !anchor.is_empty() {
                    if let Event::Start(Tag::Heading { id, .. }) = &mut out[i] {
                        *id = Some(anchor.into());
                    }
                }
            }
        }
        i += 1;
    }
    out
}

/// Concatenated text of a heading, stopping at its end tag.
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::End(TagEnd::Heading(_)) => break,
            _ => {}
        }
    }
    text
}

/// Minimal HTML escaping for text dropped into a container element.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
