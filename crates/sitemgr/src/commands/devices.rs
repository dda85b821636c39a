//! Device command handler.

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
        paths: &["name"],
    },
    Column {
        header: "Model",
        paths: &["model", "shortname"],
    },
    Column {
        header: "IP",
        paths: &["ipAddress", "ip"],
    },
    Column {
        header: "State",
        paths: &["state", "status"],
    },
    Column {
        header: "Firmware",
        paths: &["firmwareVersion", "version"],
    },
];

pub fn handle(
    client: &SiteManagerClient,
    args: &CollectionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let envelope = client.list_devices(&args.site_id, &util::list_options(args))?;
    util::print_collection("devices", &envelope, args, COLUMNS, global)
}
