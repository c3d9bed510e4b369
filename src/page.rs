//! HTML page rendering.
//!
//! Uses [maud](https://maud.lambda.xyz/) template functions with typed
//! contexts — template variables are Rust expressions, interpolation is
//! auto-escaped, and malformed markup is a compile error instead of a
//! runtime brace-collision surprise.
//!
//! Two page shapes share one shell:
//!
//! - **Post page**: the post as the primary article, a sidebar listing
//!   every post with the current one marked.
//! - **Index page**: same sidebar, primary area shows the latest post.
//!
//! The head carries the published site's client-side contract:
//! `/style.css`, highlight.js, the web font, mermaid with its init
//! snippet, MathJax, and `/scripts.js`.

use crate::post::{Post, PostCollection};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const HLJS_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.7.0/styles/atom-one-dark.min.css";
const HLJS_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.7.0/highlight.min.js";
const FONT_CSS: &str = "https://fonts.googleapis.com/css2?family=Anonymous+Pro:ital,wght@0,400;0,700;1,400;1,700&display=swap";
const MERMAID_JS: &str = "https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js";
const MATHJAX_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/mathjax/2.7.7/MathJax.js?config=TeX-MML-AM_CHTML";

const MERMAID_INIT: &str = "\
        mermaid.initialize({
            theme: 'dark',
            securityLevel: 'loose',
            startOnLoad: true
        });";

/// Full HTML document shell shared by the post and index pages.
fn base_document(page_title: &str, site_name: &str, primary: Markup, sidebar: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title) }
                link rel="stylesheet" href="/style.css";
                link rel="stylesheet" href=(HLJS_CSS);
                link rel="stylesheet" href=(FONT_CSS);
                link rel="alternate" type="application/rss+xml" href="/feed.xml" title=(site_name);
                script src=(HLJS_JS) {}
                script src=(MERMAID_JS) {}
                script { (PreEscaped(MERMAID_INIT)) }
                script src=(MATHJAX_JS) {}
                script src="/scripts.js" {}
            }
            body.blog-layout {
                div.nav-sidebar {
                    div.nav-header {
                        h2 { a href="/" { (site_name) } }
                    }
                    div.post-list {
                        (sidebar)
                    }
                }
                div.content-area {
                    (primary)
                }
            }
        }
    }
}

/// Sidebar entries, collection order (date descending). `current` marks
/// the post whose page is being rendered.
fn render_sidebar(posts: &PostCollection, current: Option<&Post>) -> Markup {
    html! {
        @for post in posts.posts() {
            @let is_current = current.is_some_and(|c| c.source_path == post.source_path);
            div.post-link.current[is_current] {
                a href=(post.permalink()) {
                    span.date { (post.date.display()) }
                    span.title { (post.title) }
                }
            }
        }
    }
}

/// One badge per tag in frontmatter order. The container is always
/// present, even with zero tags.
fn render_tags(tags: &[String]) -> Markup {
    html! {
        div.tags {
            @for tag in tags {
                span.tag { "#" (tag) }
            }
        }
    }
}

/// The primary article block: title, machine-readable date, rendered
/// content, tag badges.
fn render_article(post: &Post) -> Markup {
    html! {
        article {
            h1 { (post.title) }
            time datetime=(post.date.iso()) { (post.date.display()) }
            div.content {
                (PreEscaped(&post.content))
            }
            (render_tags(&post.tags))
        }
    }
}

/// Full page for a single post.
pub fn render_post_page(post: &Post, posts: &PostCollection, site_name: &str) -> Markup {
    let page_title = format!("{} | {}", post.title, site_name);
    base_document(
        &page_title,
        site_name,
        render_article(post),
        render_sidebar(posts, Some(post)),
    )
}

/// Index page: latest post as the primary content, or a welcome note
/// for a site with no posts yet.
pub fn render_index(posts: &PostCollection, site_name: &str) -> Markup {
    let primary = match posts.latest() {
        Some(latest) => render_article(latest),
        None => html! {
            h1 { "Welcome to " (site_name) }
            p { "No posts yet!" }
        },
    };
    base_document(site_name, site_name, primary, render_sidebar(posts, posts.latest()))
}
