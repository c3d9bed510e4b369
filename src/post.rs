//! Post parsing and collection.
//!
//! A post is built once per source file and never mutated afterwards:
//! frontmatter split, date resolved to the canonical timestamp, the
//! redundant leading title heading stripped, and the body rendered to
//! HTML. [`PostCollection::collect`] walks the content directory for
//! `*.md` files, parses each one (in parallel — per-file parsing is
//! independent), and sorts newest-first with discovery order breaking
//! ties.
//!
//! Content-level problems (bad date, malformed frontmatter) degrade to
//! documented defaults with a warning naming the file. Filesystem
//! problems are fatal and halt the build.

use crate::date::PostDate;
use crate::frontmatter;
use crate::markdown::Render;
use chrono::NaiveDateTime;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One blog post, fully resolved. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Post {
    pub title: String,
    pub date: PostDate,
    /// Tags in frontmatter insertion order; may be empty.
    pub tags: Vec<String>,
    /// Rendered HTML body, no surrounding page shell.
    pub content: String,
    /// Originating file, kept for diagnostics only.
    pub source_path: PathBuf,
}

impl Post {
    /// Site-absolute permalink, derived from the date.
    pub fn permalink(&self) -> String {
        self.date.permalink()
    }
}

/// Remove a leading line that restates the post title.
///
/// The rule: look at the first non-blank line of the body. If, after
/// trimming whitespace, it is `# {title}` or exactly `{title}`, drop it
/// along with at most one immediately following blank line. Anything
/// else leaves the body untouched. Applying the rule twice changes
/// nothing, since the removed heading does not reappear.
pub fn strip_title_heading(title: &str, body: &str) -> String {
    let mut lines = body.lines();
    let mut leading_blanks = 0;
    let first = loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => leading_blanks += 1,
            other => break other,
        }
    };

    let Some(first) = first else {
        return body.to_string();
    };

    let trimmed = first.trim();
    let restates_title = trimmed
        .strip_prefix("# ")
        .map(|rest| rest.trim() == title)
        .unwrap_or(trimmed == title);
    if !restates_title {
        return body.to_string();
    }

    // Skip the blank prologue, the title line, and one trailing blank.
    let mut rest: Vec<&str> = body.lines().skip(leading_blanks + 1).collect();
    if rest.first().is_some_and(|line| line.trim().is_empty()) {
        rest.remove(0);
    }
    rest.join("\n")
}

/// Parse one post from raw file text. Infallible: every recoverable
/// problem resolves to a default and a warning.
pub fn parse_post(
    raw: &str,
    source_path: &Path,
    now: NaiveDateTime,
    renderer: &(dyn Render + Sync),
) -> Post {
    let (fm, body) = frontmatter::split(raw);

    let title = fm
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| file_stem(source_path));

    let (date, parsed) = PostDate::resolve(fm.date.as_deref(), now);
    if !parsed {
        log::warn!(
            "could not parse date {:?} in {}; using current time",
            fm.date.as_deref().unwrap_or_default(),
            source_path.display()
        );
    }

    let body = strip_title_heading(&title, body);
    let content = renderer.render(&body);

    Post {
        title,
        date,
        tags: fm.tags,
        content,
        source_path: source_path.to_path_buf(),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string())
}

/// All posts of the site, sorted by date descending.
#[derive(Debug, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    /// Walk `content_dir` recursively, parse every `*.md` file, and sort
    /// newest-first. Files are discovered in a deterministic walk order
    /// (lexicographic within each directory) which doubles as the
    /// tie-break for posts sharing a date.
    pub fn collect(
        content_dir: &Path,
        now: NaiveDateTime,
        renderer: &(dyn Render + Sync),
    ) -> Result<PostCollection, ScanError> {
        let mut sources = Vec::new();
        for entry in WalkDir::new(content_dir).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && has_extension(entry.path(), "md") {
                sources.push(entry.into_path());
            }
        }

        // Per-file parsing is independent; rayon's ordered collect keeps
        // the discovery order intact for the sort below.
        let mut posts = sources
            .par_iter()
            .map(|path| {
                let raw = fs::read_to_string(path).map_err(|source| ScanError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(parse_post(&raw, path, now, renderer))
            })
            .collect::<Result<Vec<Post>, ScanError>>()?;

        // Stable sort: equal dates keep their discovery order.
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(PostCollection { posts })
    }

    pub fn from_posts(mut posts: Vec<Post>) -> PostCollection {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        PostCollection { posts }
    }

    /// Posts in date-descending order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Most recent post, if any exist.
    pub fn latest(&self) -> Option<&Post> {
        self.posts.first()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
