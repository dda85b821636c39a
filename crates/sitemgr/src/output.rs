//! Output formatting: table, JSON, YAML, plain.
//!
//! Items from the API are opaque JSON objects, so tables are built from a
//! per-resource list of columns, each naming one or more dotted key paths
//! to try in order.

use std::io::{self, Write};

use serde_json::Value;
use sitemgr_api::Item;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Columns ──────────────────────────────────────────────────────────

/// A table column: header plus candidate key paths (`meta.name`).
pub struct Column {
    pub header: &'static str,
    pub paths: &'static [&'static str],
}

/// Keys tried, in order, for the one-per-line `plain` output.
const ID_PATHS: &[&str] = &["id", "siteId", "hostId"];

/// Look up a dotted key path inside an item.
fn lookup<'a>(item: &'a Item, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = item.get(segments.next()?)?;
    segments.try_fold(first, |value, segment| value.get(segment))
}

/// First non-null value among `paths`, rendered for a table cell.
fn cell(item: &Item, paths: &[&str]) -> String {
    paths
        .iter()
        .find_map(|p| lookup(item, p).filter(|v| !v.is_null()))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_default()
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render items as a table or one ID per line; structured formats go
/// through [`render_structured`] instead.
pub fn render_items(format: &OutputFormat, items: &[Item], columns: &[Column]) -> String {
    match format {
        OutputFormat::Plain => items
            .iter()
            .map(|item| cell(item, ID_PATHS))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => render_table(items, columns),
    }
}

/// Render any serializable value as JSON or YAML.
pub fn render_structured<T: serde::Serialize + ?Sized>(
    format: &OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        _ => serde_json::to_string_pretty(data)?,
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) -> Result<(), CliError> {
    if quiet || output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table(items: &[Item], columns: &[Column]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.header));
    for item in items {
        builder.push_record(columns.iter().map(|c| cell(item, c.paths)));
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    const COLUMNS: &[Column] = &[
        Column {
            header: "ID",
            paths: &["id"],
        },
        Column {
            header: "Name",
            paths: &["meta.name", "name"],
        },
    ];

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn cell_prefers_first_present_path() {
        let it = item(json!({ "id": "s1", "name": "flat", "meta": { "name": "nested" } }));
        assert_eq!(cell(&it, &["meta.name", "name"]), "nested");
        assert_eq!(cell(&it, &["missing", "name"]), "flat");
        assert_eq!(cell(&it, &["missing"]), "");
    }

    #[test]
    fn cell_skips_nulls_and_stringifies_scalars() {
        let it = item(json!({ "a": null, "b": 42, "c": true }));
        assert_eq!(cell(&it, &["a", "b"]), "42");
        assert_eq!(cell(&it, &["c"]), "true");
    }

    #[test]
    fn plain_prints_one_id_per_line() {
        let items = vec![item(json!({ "id": "a" })), item(json!({ "siteId": "b" }))];
        assert_eq!(render_items(&OutputFormat::Plain, &items, COLUMNS), "a\nb");
    }

    #[test]
    fn table_contains_headers_and_values() {
        let items = vec![item(json!({ "id": "d1", "name": "U6-LR" }))];
        let out = render_items(&OutputFormat::Table, &items, COLUMNS);
        assert!(out.contains("ID"), "{out}");
        assert!(out.contains("U6-LR"), "{out}");
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render_structured(&OutputFormat::JsonCompact, &json!({ "a": [1, 2] })).unwrap();
        assert_eq!(out, r#"{"a":[1,2]}"#);
    }
}
