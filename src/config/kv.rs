//! Parsing, merging, and rendering of `key=value` text config files.
//!
//! Files are a flat sequence of `key=value` lines with no quoting, no
//! escaping, and no section headers. Parsing keeps insertion order with
//! last-write-wins on duplicate keys; lines without `=` (comments, blanks)
//! are dropped and do not survive a rewrite, because patching always
//! rewrites the whole file.

use anyhow::{Context as _, Result};
use std::path::Path;

/// Parse config content into an ordered list of key/value pairs.
///
/// Each line containing `=` splits at the first `=`, with both sides trimmed
/// of surrounding whitespace. Lines without `=` are ignored.
///
/// # Examples
///
/// ```
/// use modpack_patcher::config::kv::parse_str;
///
/// let pairs = parse_str("a = 1\n# comment\nb=2\n");
/// assert_eq!(pairs, [("a".to_string(), "1".to_string()),
///                    ("b".to_string(), "2".to_string())]);
/// ```
///
/// Duplicate keys keep their first position but take the last value:
///
/// ```
/// use modpack_patcher::config::kv::parse_str;
///
/// let pairs = parse_str("a=1\nb=2\na=3\n");
/// assert_eq!(pairs, [("a".to_string(), "3".to_string()),
///                    ("b".to_string(), "2".to_string())]);
/// ```
#[must_use]
pub fn parse_str(content: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for line in content.lines() {
        if let Some((key, value)) = line.split_once('=') {
            upsert(&mut pairs, key.trim(), value.trim());
        }
    }
    pairs
}

/// Overwrite `key` in place if present, otherwise append it.
pub fn upsert(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    if let Some(entry) = pairs.iter_mut().find(|(k, _)| k == key) {
        entry.1 = value.to_string();
    } else {
        pairs.push((key.to_string(), value.to_string()));
    }
}

/// Load and parse the config file at `path`.
///
/// A missing file yields an empty list, so patching a non-existent config
/// creates it from the patch alone.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load(path: &Path) -> Result<Vec<(String, String)>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(parse_str(&content))
}

/// Render pairs back to file content, one `key=value` line per entry.
#[must_use]
pub fn render(pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in pairs {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Stringify a manifest change value for a `key=value` line.
///
/// Booleans become lowercase `true`/`false`, strings are written unquoted,
/// and numbers use their natural form. Anything else renders as compact
/// JSON.
///
/// # Examples
///
/// ```
/// use modpack_patcher::config::kv::render_value;
/// use serde_json::json;
///
/// assert_eq!(render_value(&json!(true)), "true");
/// assert_eq!(render_value(&json!("B:enabled")), "B:enabled");
/// assert_eq!(render_value(&json!(42)), "42");
/// ```
#[must_use]
pub fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
