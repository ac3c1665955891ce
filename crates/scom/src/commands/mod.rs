//! Command dispatch: bridges CLI args -> core controllers -> output formatting.

pub mod config_cmd;
pub mod l2;
pub mod ptr;
pub mod servers;

use scom_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Servers(args) => servers::handle(session, args, global).await,
        Command::Ptr(args) => ptr::handle(session, args, global).await,
        Command::L2(args) => l2::handle(session, args, global).await,
        // Config and Completions are handled before a session is opened
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
