//! The `check`, `in` and `out` verbs and the dispatch between them.

pub mod check;
pub mod command;
pub mod get;
pub mod put;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

pub use check::check;
pub use command::Command;
pub use get::get;
pub use put::put;

use crate::core::models::VersionOutput;
use crate::errors::SlackError;
use crate::slack::SlackClient;

/// Parses the stdin body for `command`.
///
/// # Errors
///
/// Returns `ParseError` naming the command and the serde failure, which
/// includes any missing key.
pub fn parse_body<T: DeserializeOwned>(command: Command, body: &str) -> Result<T, SlackError> {
    serde_json::from_str(body).map_err(|e| SlackError::ParseError(format!("{command}: {e}")))
}

fn directory_arg(command: Command, args: &[String]) -> Result<&Path, SlackError> {
    args.first().map(Path::new).ok_or_else(|| {
        SlackError::ParseError(format!("{command}: missing directory argument"))
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, SlackError> {
    serde_json::to_value(value).map_err(|e| SlackError::ParseError(e.to_string()))
}

/// Runs `command` against the raw stdin `body`. `args` are the process
/// arguments after the command: the destination directory for `in`, the
/// inputs directory for `out`. Returns what should be printed on stdout.
///
/// # Errors
///
/// Propagates any failure of the selected verb.
pub async fn dispatch(
    client: &SlackClient,
    command: Command,
    body: &str,
    args: &[String],
) -> Result<Value, SlackError> {
    info!("Running {}", command);

    match command {
        Command::Check => {
            let request = parse_body(command, body)?;
            let versions = check(client, &request).await?;
            to_json(&versions)
        }
        Command::In => {
            let destination = directory_arg(command, args)?;
            let request = parse_body(command, body)?;
            let version = get(client, &request, destination).await?;
            to_json(&VersionOutput { version })
        }
        Command::Out => {
            let inputs = directory_arg(command, args)?;
            let request = parse_body(command, body)?;
            let version = put(client, &request, inputs).await?;
            to_json(&VersionOutput { version })
        }
    }
}
