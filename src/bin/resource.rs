// Entry point for /opt/resource/check, /opt/resource/in and /opt/resource/out

use std::io::Read;

use anyhow::{Context, Result};
use slack_resource::core::config::AppConfig;
use slack_resource::logging::Diagnostics;
use slack_resource::resource::{self, Command};
use slack_resource::slack::SlackClient;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut args = std::env::args();
    let invocation = args.next().unwrap_or_default();
    let args: Vec<String> = args.collect();

    let (command, rest) = Command::resolve(&invocation, &args)?;
    let config = AppConfig::from_env()?;
    let diagnostics = Diagnostics::install(command, &config.log_dir)?;

    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("Failed to read request from stdin")?;
    diagnostics.snapshot_body(&body)?;

    let client = SlackClient::from_config(&config);
    let output = resource::dispatch(&client, command, &body, rest)
        .await
        .inspect_err(|e| error!("{} failed: {}", command, e))?;

    println!("{output}");
    Ok(())
}
