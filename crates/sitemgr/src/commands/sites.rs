//! Site command handler.
//!
//! The sites endpoint is not paginated; its body is printed as-is for
//! structured formats.

use serde_json::Value;
use sitemgr_api::{Item, SiteManagerClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Column};

const COLUMNS: &[Column] = &[
    Column {
        header: "ID",
        paths: &["siteId", "id"],
    },
    Column {
        header: "Name",
        paths: &["meta.name", "name"],
    },
    Column {
        header: "Description",
        paths: &["meta.desc", "desc"],
    },
    Column {
        header: "Timezone",
        paths: &["meta.timezone"],
    },
    Column {
        header: "Host",
        paths: &["hostId"],
    },
];

/// Site records from either a bare array or a `{ "data": [...] }` envelope.
fn site_items(body: &Value) -> Vec<Item> {
    let records: &[Value] = match body {
        Value::Array(list) => list.as_slice(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(list)) => list.as_slice(),
            _ => return vec![map.clone()],
        },
        _ => &[],
    };
    records
        .iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}

pub fn handle(client: &SiteManagerClient, global: &GlobalOpts) -> Result<(), CliError> {
    let body = client.list_sites()?;

    let out = if global.output.is_structured() {
        output::render_structured(&global.output, &body)?
    } else {
        output::render_items(&global.output, &site_items(&body), COLUMNS)
    };

    output::print_output(&out, global.quiet)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn site_items_accepts_envelope_and_array() {
        let envelope = json!({ "data": [{ "siteId": "a" }, { "siteId": "b" }], "traceId": "t" });
        let array = json!([{ "siteId": "a" }]);

        assert_eq!(site_items(&envelope).len(), 2);
        assert_eq!(site_items(&array).len(), 1);
        assert!(site_items(&json!(null)).is_empty());
    }
}
