use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use kilovox_executor::{select_strategy, ShellExecutor};
use kilovox_interfaces::TerminalInterface;
use kilovox_policy::DangerPolicy;
use kilovox_providers::{build_backends, ModelGateway};
use kilovox_runtime::TurnEngine;
use kilovox_session::{InstanceLock, SessionState};

mod adapters;
mod config;
mod console;
mod os_detect;
mod update;

use adapters::{GatewayAdapter, RunnerAdapter};
use config::AppConfig;

fn config_dir() -> PathBuf {
    std::env::var("KILOVOX_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Kilovox desktop assistant");
    println!();

    let config = AppConfig::load(&config_dir())?;
    let os_descriptor = config
        .os_descriptor
        .clone()
        .unwrap_or_else(os_detect::detect_os_descriptor);
    println!("OS: {}", os_descriptor);

    let http = reqwest::Client::new();
    match update::check_for_update(&http, config.update_channel, config.version.as_deref()).await {
        Ok(Some(tag)) => println!("Update available: {}", tag),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "update check failed"),
    }

    // A second launch attaches a console instead of claiming the lock.
    let lock_path = InstanceLock::default_path("kilovox");
    let _lock = InstanceLock::acquire(&lock_path)?;
    if _lock.is_none() {
        println!("Another instance is already running; attaching a console to this one.");
    }

    let backends = build_backends(
        &config.ai_preference,
        config.gemini_api_key.clone(),
        config.chatgpt_api_key.clone(),
        config.claude_api_key.clone(),
    );
    if backends.is_empty() {
        anyhow::bail!("No model backends configured; set at least one API key");
    }
    let gateway = Arc::new(GatewayAdapter::new(ModelGateway::new(backends)));

    let strategy = select_strategy(&os_descriptor);
    let runner = Arc::new(RunnerAdapter::new(ShellExecutor::new(
        DangerPolicy::default(),
        strategy,
    )));

    let session = Arc::new(SessionState::new());
    let display = Arc::new(TerminalInterface::default());
    let engine = TurnEngine::new(
        gateway,
        runner,
        display,
        session,
        os_descriptor,
        config.system_prompt.clone(),
    );

    println!("Type a command ('{}' prefix optional, 'exit' quits).", config.wake_word);
    let mut source = TerminalInterface::default();
    console::command_loop(&engine, &mut source, &config.wake_word).await;

    Ok(())
}
