//! Sholo Guti - command-line entry point.

use anyhow::Result;
use clap::Parser;
use sholo_guti::cli::{Cli, Command};
use sholo_guti::{AppConfig, ClientSession, RoomRegistry, SaveSlot, TurnEngine, play, relay};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(save_path) = cli.save_path {
        config = config.with_save_path(save_path);
    }

    match cli.command {
        Command::Serve { host, port } => run_relay(config.with_address(host, port)).await,
        Command::Play {
            forced_capture,
            fresh,
        } => run_play(&config, forced_capture, fresh),
        Command::Show => show(&config),
    }
}

/// Run the room relay
#[instrument(skip_all, fields(host = %config.host(), port = *config.port()))]
async fn run_relay(config: AppConfig) -> Result<()> {
    info!("Starting Sholo Guti relay");
    relay::serve(config.host(), *config.port(), RoomRegistry::new()).await
}

/// Run a hot-seat game on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: &AppConfig, forced_capture: bool, fresh: bool) -> Result<()> {
    let slot = SaveSlot::new(config.save_path().clone());
    let mut engine = TurnEngine::new();
    if !fresh {
        slot.load_into(&mut engine);
    }
    engine.set_forced_capture(forced_capture || *config.forced_capture());

    let mut session = ClientSession::new(engine).with_slot(slot);
    let stdin = std::io::stdin();
    play::run(&mut session, stdin.lock(), std::io::stdout())?;
    info!("Leaving game");
    Ok(())
}

/// Print the saved board
fn show(config: &AppConfig) -> Result<()> {
    let slot = SaveSlot::new(config.save_path().clone());
    let mut engine = TurnEngine::new();
    if !slot.load_into(&mut engine) {
        println!("No saved game at {}; showing a new one.", slot.path().display());
    }
    println!("{}", play::render_board(&engine));
    Ok(())
}
