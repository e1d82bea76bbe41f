use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::SlackError;

/// The three resource verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Check,
    In,
    Out,
}

impl Command {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Command::Check => "check",
            Command::In => "in",
            Command::Out => "out",
        }
    }

    /// Picks the command from how the process was started.
    ///
    /// Installed as `/opt/resource/{check,in,out}` the program name decides;
    /// otherwise the first argument does (`slack-resource check`). Returns the
    /// command and the arguments that follow it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCommand` if neither names a command.
    pub fn resolve<'a>(
        invocation: &str,
        args: &'a [String],
    ) -> Result<(Self, &'a [String]), SlackError> {
        let program = Path::new(invocation)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(invocation);

        if let Ok(command) = program.parse() {
            return Ok((command, args));
        }

        match args.split_first() {
            Some((first, rest)) => first.parse().map(|command| (command, rest)),
            None => Err(SlackError::UnknownCommand(program.to_string())),
        }
    }
}

impl FromStr for Command {
    type Err = SlackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(Command::Check),
            "in" => Ok(Command::In),
            "out" => Ok(Command::Out),
            other => Err(SlackError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
