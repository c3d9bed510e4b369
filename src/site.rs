//! Output tree materialization.
//!
//! Takes the sorted collection and writes the canonical layout:
//!
//! ```text
//! dist/
//! ├── index.html                 # Index page (latest post)
//! ├── feed.xml                   # RSS document
//! ├── style.css                  # Static assets (embedded at compile time)
//! ├── scripts.js
//! ├── img/                       # Copied media, flat namespace
//! │   └── photo.jpg
//! └── 2024/06/15/index.html      # One directory per post permalink
//! ```
//!
//! Every input is fully resolved before the first write, so write order
//! does not affect correctness. Per-post directories are created as part
//! of each post's write.
//!
//! Permalink collisions (two posts sharing a full date) resolve
//! last-written-wins: pages are written in collection order, so the
//! later-discovered post overwrites the earlier one, with a warning
//! naming both source files.

use crate::date::PostDate;
use crate::feed;
use crate::markdown::Render;
use crate::page;
use crate::post::{PostCollection, ScanError};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Static assets shipped with every site, embedded at compile time.
const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/scripts.js");

/// Media extensions copied into the flat `img/` namespace.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg"];

/// Everything the build needs to know, resolved from the CLI.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site_name: String,
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// What a finished build produced, for the CLI summary.
#[derive(Debug)]
pub struct BuildSummary {
    pub post_count: usize,
    pub image_count: usize,
}

/// Run the full pipeline: discover and parse posts, render every page,
/// write the output tree. Filesystem errors are fatal and halt on first
/// occurrence.
pub fn build(
    config: &SiteConfig,
    now: NaiveDateTime,
    renderer: &(dyn Render + Sync),
) -> Result<BuildSummary, BuildError> {
    let posts = PostCollection::collect(&config.content_dir, now, renderer)?;
    println!("Found {} posts", posts.len());

    create_dir(&config.output_dir)?;

    write_posts(&posts, config)?;

    let index = page::render_index(&posts, &config.site_name);
    write_file(&config.output_dir.join("index.html"), &index.into_string())?;

    let feed = feed::render_feed(&posts, &config.site_name, PostDate::new(now));
    write_file(&config.output_dir.join("feed.xml"), &feed)?;

    write_file(&config.output_dir.join("style.css"), CSS)?;
    write_file(&config.output_dir.join("scripts.js"), JS)?;

    let image_count = copy_images(&config.content_dir, &config.output_dir)?;

    Ok(BuildSummary {
        post_count: posts.len(),
        image_count,
    })
}

/// Write one page per post under its date-derived directory.
fn write_posts(posts: &PostCollection, config: &SiteConfig) -> Result<(), BuildError> {
    let mut written: HashMap<PathBuf, &Path> = HashMap::new();

    for post in posts.posts() {
        let path = post.date.output_path(&config.output_dir);
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }

        if let Some(earlier) = written.insert(path.clone(), &post.source_path) {
            log::warn!(
                "permalink collision at {}: {} overwrites {}",
                post.permalink(),
                post.source_path.display(),
                earlier.display()
            );
        }

        let html = page::render_post_page(post, posts, &config.site_name);
        write_file(&path, &html.into_string())?;
        println!("Generated: {}", path.display());
    }
    Ok(())
}

/// Copy all media files under the content dir into `img/`, flattening
/// the namespace. On a filename collision the last file found wins.
fn copy_images(content_dir: &Path, output_dir: &Path) -> Result<usize, BuildError> {
    let img_dir = output_dir.join("img");
    create_dir(&img_dir)?;

    let mut copied = 0;
    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        let entry = entry.map_err(ScanError::from)?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }
        let Some(name) = entry.path().file_name() else {
            continue;
        };
        let dest = img_dir.join(name);
        fs::copy(entry.path(), &dest).map_err(|source| BuildError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        log::info!("copied image {}", name.to_string_lossy());
        copied += 1;
    }
    Ok(copied)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::CmarkRenderer;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 3)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn config(content: &Path, output: &Path) -> SiteConfig {
        SiteConfig {
            site_name: "blog.example.net".to_string(),
            content_dir: content.to_path_buf(),
            output_dir: output.to_path_buf(),
        }
    }

    fn write_source(dir: &Path, name: &str, date: &str, title: &str) {
        let raw = format!("---\ntitle: {title}\ndate: {date}\n---\nBody of {title}.\n");
        fs::write(dir.join(name), raw).unwrap();
    }

    #[test]
    fn canonical_layout_is_written() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_source(content.path(), "a.md", "2023-11-07", "Hello");

        let summary = build(
            &config(content.path(), output.path()),
            now(),
            &CmarkRenderer,
        )
        .unwrap();

        assert_eq!(summary.post_count, 1);
        assert!(output.path().join("index.html").is_file());
        assert!(output.path().join("feed.xml").is_file());
        assert!(output.path().join("style.css").is_file());
        assert!(output.path().join("scripts.js").is_file());
        assert!(output.path().join("2023/11/07/index.html").is_file());
    }

    #[test]
    fn images_copied_flat() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::create_dir(content.path().join("deep")).unwrap();
        fs::write(content.path().join("deep/photo.JPG"), b"data").unwrap();
        fs::write(content.path().join("chart.svg"), b"<svg/>").unwrap();

        let summary = build(
            &config(content.path(), output.path()),
            now(),
            &CmarkRenderer,
        )
        .unwrap();

        assert_eq!(summary.image_count, 2);
        assert!(output.path().join("img/photo.JPG").is_file());
        assert!(output.path().join("img/chart.svg").is_file());
    }

    #[test]
    fn permalink_collision_last_writer_wins() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_source(content.path(), "a.md", "2024-05-05", "Earlier");
        write_source(content.path(), "b.md", "2024-05-05", "Later");

        build(
            &config(content.path(), output.path()),
            now(),
            &CmarkRenderer,
        )
        .unwrap();

        let html = fs::read_to_string(output.path().join("2024/05/05/index.html")).unwrap();
        assert!(html.contains("<h1>Later</h1>"));
    }

    #[test]
    fn empty_content_dir_still_builds() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let summary = build(
            &config(content.path(), output.path()),
            now(),
            &CmarkRenderer,
        )
        .unwrap();

        assert_eq!(summary.post_count, 0);
        let index = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(index.contains("No posts yet!"));
    }
}
