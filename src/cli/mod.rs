//! CLI module for closet.
//!
//! - Argument parsing ([`args`])
//! - Command execution against a [`ClosetClient`](crate::ClosetClient) ([`commands`])
//! - Version display ([`version`])
//! - Stderr logging ([`logging`])
//!
//! # Usage
//!
//! ```ignore
//! use closet::cli::{parse_args, run_cli};
//!
//! let args = parse_args(std::env::args())?;
//! runtime.block_on(run_cli(args.command, ClientConfig::from_env()))?;
//! ```

pub mod args;
pub mod commands;
pub mod logging;
pub mod version;

pub use args::{parse_args, ArgsError, CliArgs, CliCommand, USAGE};
pub use commands::{needs_session, run_command};
pub use logging::init_logging;
pub use version::VERSION;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use crate::client::ClosetClient;
use crate::config::ClientConfig;

/// Build a client from `config`, restore the session when the command needs
/// one, and run the command.
pub async fn run_cli(command: CliCommand, config: ClientConfig) -> Result<()> {
    let client =
        ClosetClient::from_config(config).wrap_err("Failed to locate the credentials file")?;
    if needs_session(&command) {
        client.bootstrap().await;
    }
    run_command(&client, command).await
}
