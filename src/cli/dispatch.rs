//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::{Commands, GlobalArgs};
use super::handlers::{handle_count, handle_decode, handle_encode, handle_status, handle_truncate};
use crate::exit::LazytokExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, global: &GlobalArgs) -> Result<LazytokExit> {
    match command {
        Commands::Encode { text, json } => handle_encode(global, text, json),
        Commands::Decode { ids } => handle_decode(global, &ids),
        Commands::Count { text } => handle_count(global, text),
        Commands::Truncate { text, max } => handle_truncate(global, text, max),
        Commands::Status { json } => handle_status(global, json),
    }
}
