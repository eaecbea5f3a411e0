mod cli;
mod config;

use clap::Parser;
use cli::{descriptors_json, Cli};
use config::RelayConfig;
use relay_builtins::CredentialSource;
use relay_core::ToolCall;
use relay_skills::SkillRegistry;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Credentials may come from a local .env file.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = RelayConfig::load(cli.config.as_deref()).await?;
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }
    debug!(
        timeout_secs = config.http.timeout_secs,
        slack_api_base = %config.http.slack_api_base,
        "Loaded settings"
    );

    let mut registry = SkillRegistry::new();
    relay_builtins::register_messaging_tools(&mut registry, CredentialSource::Env(config.http));

    let Some((tool, arguments)) = cli.command.into_tool_call().await? else {
        println!("{}", serde_json::to_string_pretty(&descriptors_json(&registry))?);
        return Ok(ExitCode::SUCCESS);
    };

    let call = ToolCall::new(format!("cli-{}", uuid::Uuid::new_v4()), tool, arguments);
    let result = registry.execute(call).await?;
    println!("{}", result.content);

    Ok(if result.is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
