//! Shared helpers for the collection command handlers.

use sitemgr_api::{Envelope, ListOptions};
use tracing::info;

use crate::cli::{CollectionArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Column};

/// Translate CLI flags into API list options.
pub fn list_options(args: &CollectionArgs) -> ListOptions {
    ListOptions {
        max_items: args.max_items,
        filter: args.filter.clone(),
        page_size: args.page_size,
    }
}

/// Print an aggregated collection in the selected format.
///
/// JSON/YAML print the envelope, or just its `data` with `--list`.
/// Table and plain output always work from the items.
pub fn print_collection(
    kind: &str,
    envelope: &Envelope,
    args: &CollectionArgs,
    columns: &[Column],
    global: &GlobalOpts,
) -> Result<(), CliError> {
    info!(
        kind,
        site = %args.site_id,
        count = envelope.count(),
        total = envelope.total_count(),
        "fetched collection"
    );

    let out = if global.output.is_structured() {
        if args.list {
            output::render_structured(&global.output, envelope.data())?
        } else {
            output::render_structured(&global.output, envelope)?
        }
    } else {
        output::render_items(&global.output, envelope.data(), columns)
    };

    output::print_output(&out, global.quiet)
}
