//! Client command handler.

use sitemgr_api::SiteManagerClient;

use crate::cli::{CollectionArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::Column;

use super::util;

const COLUMNS: &[Column] = &[
    Column {
        header: "ID",
        paths: &["id"],
    },
    Column {
        header: "Name",
        paths: &["name", "hostname"],
    },
    Column {
        header: "IP",
        paths: &["ipAddress"],
    },
    Column {
        header: "MAC",
        paths: &["macAddress"],
    },
    Column {
        header: "Type",
        paths: &["type"],
    },
    Column {
        header: "Connected",
        paths: &["connectedAt"],
    },
];

pub fn handle(
    client: &SiteManagerClient,
    args: &CollectionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let envelope = client.list_clients(&args.site_id, &util::list_options(args))?;
    util::print_collection("clients", &envelope, args, COLUMNS, global)
}
