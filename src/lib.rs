//! # Daybook
//!
//! A minimal static blog generator for date-organized markdown journals.
//! Your filesystem is the data source: every `*.md` file under the
//! content directory becomes a post, its optional YAML frontmatter
//! supplies title, date, and tags, and its publish date becomes its
//! permanent address.
//!
//! # Architecture: One Pipeline
//!
//! ```text
//! content/*.md  →  parse (frontmatter + date + markdown)  →  sorted collection
//!               →  render (post pages, index, RSS)         →  output tree
//!               →  deploy (optional rsync mirror)
//! ```
//!
//! All the real logic lives in the parse half: tolerant frontmatter
//! splitting, flexible date normalization, title deduplication, and
//! deterministic ordering. The render half is direct templating over
//! fully resolved data.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Splits raw file text into a metadata mapping and a markdown body |
//! | [`date`] | Resolves any date representation into one canonical timestamp |
//! | [`post`] | The `Post` entity, title dedup, directory walk, date-descending collection |
//! | [`markdown`] | Markdown-to-HTML capability with mermaid containers and heading anchors |
//! | [`page`] | Maud template functions — post page, index page, shared sidebar |
//! | [`feed`] | RSS 2.0 document generation |
//! | [`site`] | Output tree writer: pages, feed, assets, flat `img/` media |
//! | [`deploy`] | rsync mirror to a remote host |
//!
//! # Design Decisions
//!
//! ## Maud Over String Templates
//!
//! Pages are built with [Maud](https://maud.lambda.xyz/) template
//! functions taking typed contexts. Template variables are Rust
//! expressions, interpolation is auto-escaped, and there is no
//! placeholder syntax to collide with the JavaScript braces in the page
//! head.
//!
//! ## One Canonical Timestamp
//!
//! A frontmatter date is normalized into a single `NaiveDateTime`
//! immediately after parsing. The human display form, the ISO form in
//! `<time datetime>`, the RFC-822 form in the feed, and the permalink
//! path are all formatted from that one instant — they cannot drift.
//!
//! ## Errors Are Tiered
//!
//! Content problems (bad date, malformed frontmatter) resolve to
//! documented defaults with a warning naming the file; the build always
//! completes. Filesystem problems halt immediately. A failed deployment
//! is reported as a failure, not assumed away.

pub mod date;
pub mod deploy;
pub mod feed;
pub mod frontmatter;
pub mod markdown;
pub mod page;
pub mod post;
pub mod site;
