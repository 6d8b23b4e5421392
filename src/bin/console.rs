//! Line-oriented console front-end for the Jonny engine.
//!
//! Reads commands from stdin and prints the agent's replies. This is one
//! possible rendering collaborator; with `--events-json`, every runtime
//! event is emitted as a JSON line instead, so richer front-ends can drive
//! their own display off the same stream.
//!
//! No platform speech engine is probed here, so voice affordances stay
//! disabled and input is text only.

use anyhow::Context;
use jonny::{
    ActivityStatus, AgentConfig, DialogueCoordinator, Role, RuntimeEvent, config, persona,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Options {
    config_path: Option<std::path::PathBuf>,
    events_json: bool,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut options = Options {
        config_path: None,
        events_json: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--events-json" => options.events_json = true,
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                options.config_path = Some(path.into());
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }
    Ok(options)
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("jonny-console failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let options = parse_args()?;
    let config_path = options
        .config_path
        .unwrap_or_else(config::default_config_path);
    let config = AgentConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    info!("config loaded from {}", config_path.display());

    let (runtime_tx, runtime_rx) = broadcast::channel(64);
    let coordinator = DialogueCoordinator::new(config).with_runtime_events(runtime_tx);
    let handle = coordinator.handle();
    let cancel = coordinator.cancel_token();
    let engine = tokio::spawn(coordinator.run());

    if !options.events_json {
        print_banner();
    }
    let printer = tokio::spawn(print_events(runtime_rx, options.events_json));

    // Stdin loop: each line is a submission. EOF ends the session.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        handle.submit(line);
    }

    cancel.cancel();
    engine.await.context("engine task panicked")??;
    printer.abort();
    Ok(())
}

fn print_banner() {
    println!("{} - {}", persona::AGENT_NAME, ActivityStatus::Idle.label());
    println!("Capabilities: {}", persona::CAPABILITIES.join(", "));
    println!("{}", persona::voice_hint(false));
    println!();
}

async fn print_events(mut rx: broadcast::Receiver<RuntimeEvent>, as_json: bool) {
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                eprintln!("[console] {skipped} events dropped");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        if as_json {
            if let Ok(line) = serde_json::to_string(&event) {
                println!("{line}");
            }
            continue;
        }

        match event {
            RuntimeEvent::Message { message } if message.role == Role::Agent => {
                println!("[{}] {}", persona::AGENT_NAME, message.content);
            }
            RuntimeEvent::Message { .. } => {}
            RuntimeEvent::Status { status } => {
                println!("  ({})", status.label());
            }
            RuntimeEvent::PendingCommand { text } => {
                println!("> {text}");
            }
            RuntimeEvent::CaptureError { code } => {
                eprintln!("[console] voice capture error: {code}");
            }
        }
    }
}
