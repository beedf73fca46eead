//! Structured patching of TOML config files (feature `toml-patches`).
//!
//! Manifest `toml_patches` entries carry a JSON object that is deep-merged
//! into the target document: tables merge recursively, everything else
//! replaces the existing value. Formatting and comments of the original
//! file are not preserved; the document is rewritten on every patch.

use anyhow::{Context as _, Result, bail};
use std::path::Path;

/// Load the TOML document at `path`, or an empty table if the file is missing.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_table(path: &Path) -> Result<toml::Table> {
    if !path.exists() {
        return Ok(toml::Table::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    content
        .parse::<toml::Table>()
        .with_context(|| format!("parsing {} as TOML", path.display()))
}

/// Deep-merge a JSON `changes` object into `table`.
///
/// # Errors
///
/// Returns an error if a change value cannot be represented in TOML
/// (JSON `null`, or an integer outside the `i64` range).
pub fn merge_changes(
    table: &mut toml::Table,
    changes: &serde_json::Map<String, serde_json::Value>,
) -> Result<()> {
    for (key, value) in changes {
        match (table.get_mut(key), value) {
            (Some(toml::Value::Table(existing)), serde_json::Value::Object(nested)) => {
                merge_changes(existing, nested)
                    .with_context(|| format!("merging key '{key}'"))?;
            }
            (_, _) => {
                table.insert(key.clone(), json_to_toml(value)?);
            }
        }
    }
    Ok(())
}

/// Render a TOML table back to file content.
///
/// # Errors
///
/// Returns an error if the table cannot be serialized.
pub fn render(table: &toml::Table) -> Result<String> {
    toml::to_string(table).context("serializing TOML document")
}

fn json_to_toml(value: &serde_json::Value) -> Result<toml::Value> {
    Ok(match value {
        serde_json::Value::Null => bail!("null is not representable in TOML"),
        serde_json::Value::Bool(b) => toml::Value::Boolean(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                toml::Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                toml::Value::Float(f)
            } else {
                bail!("number {n} is not representable in TOML")
            }
        }
        serde_json::Value::String(s) => toml::Value::String(s.clone()),
        serde_json::Value::Array(items) => toml::Value::Array(
            items
                .iter()
                .map(json_to_toml)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_json::Value::Object(entries) => {
            let mut table = toml::Table::new();
            merge_changes(&mut table, entries)?;
            toml::Value::Table(table)
        }
    })
}
