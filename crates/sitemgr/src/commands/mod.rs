//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod clients;
pub mod config_cmd;
pub mod devices;
pub mod sites;
pub mod util;

use sitemgr_api::SiteManagerClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub fn dispatch(
    cmd: Command,
    client: &SiteManagerClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Sites => sites::handle(client, global),
        Command::Devices(args) => devices::handle(client, &args, global),
        Command::Clients(args) => clients::handle(client, &args, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
