//! Frontmatter extraction for markdown source files.
//!
//! A post file may begin with a YAML metadata block delimited by `---`
//! lines:
//!
//! ```text
//! ---
//! title: Hello, world
//! date: 2024-06-15
//! tags: [intro, meta]
//! ---
//! Body starts here.
//! ```
//!
//! Everything about this block is optional. A file without an opening
//! fence, without a closing fence, or with YAML that fails to decode is
//! treated the same way: empty metadata, the entire text is the body.
//! Bad metadata is a content-level problem and must never abort a build.

use serde::{Deserialize, Deserializer};

/// Decoded metadata block. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: Option<String>,

    /// Kept as raw text here; [`crate::date::PostDate::resolve`] owns
    /// the conversion into the canonical timestamp.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub date: Option<String>,

    /// Insertion order from the YAML sequence is preserved.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Accept any YAML scalar for `date` and carry it as text.
///
/// `date: 2024-03-05` resolves to a string already, but an author may
/// also write a bare number or quoted timestamp; stringifying here keeps
/// a bad date from poisoning the rest of the block.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

const FENCE: &str = "---";

/// Split raw file text into `(frontmatter, body)`.
///
/// The opening fence must be the very first line. The closing fence is
/// the next line consisting of `---`; the body is everything after it.
/// On any failure to locate or decode the block, the metadata is empty
/// and the whole input is the body.
pub fn split(raw: &str) -> (Frontmatter, &str) {
    let Some(rest) = raw.strip_prefix(FENCE) else {
        return (Frontmatter::default(), raw);
    };
    // The opening fence must be a full line, not e.g. `---title`.
    let rest = match rest.strip_prefix('\n') {
        Some(r) => r,
        None => match rest.strip_prefix("\r\n") {
            Some(r) => r,
            None => return (Frontmatter::default(), raw),
        },
    };

    let Some(end) = find_closing_fence(rest) else {
        return (Frontmatter::default(), raw);
    };
    let (yaml, after) = rest.split_at(end);
    // Skip the fence line itself.
    let body = after
        .splitn(2, '\n')
        .nth(1)
        .unwrap_or("");

    match serde_yaml::from_str::<Frontmatter>(yaml) {
        Ok(fm) => (fm, body),
        Err(err) => {
            log::warn!("malformed frontmatter ({err}); treating whole file as body");
            (Frontmatter::default(), raw)
        }
    }
}

/// Byte offset of the start of the closing `---` line, if any.
fn find_closing_fence(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}
