//! Command dispatch: bridges CLI args -> core mappers -> output formatting.

pub mod config_cmd;
pub mod data;
pub mod resource;
pub mod util;

use thetalake_core::Connector;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Dispatch a connection-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    connector: &Connector,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match cmd {
        Command::Resource(args) => resource::handle(connector, args, global, format).await,
        Command::Data(args) => data::handle(connector, args, global, format).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
