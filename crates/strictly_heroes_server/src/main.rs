//! Strictly Heroes - game server binary.

use anyhow::Result;
use clap::Parser;
use strictly_heroes::{Game, Roster};
use strictly_heroes_server::{Cli, Command, ServerConfig, serve};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            enforce_turn_order,
        } => run_server(config, host, port, enforce_turn_order).await,
        Command::Board { player_a, player_b } => print_board(&player_a, &player_b),
    }
}

/// Run the game server
#[instrument]
async fn run_server(
    config_path: Option<std::path::PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    enforce_turn_order: bool,
) -> Result<()> {
    let mut config = ServerConfig::load(config_path.as_deref())?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if enforce_turn_order {
        config = config.with_enforce_turn_order(true);
    }

    info!(
        host = %config.host(),
        port = config.port(),
        policy = ?config.turn_policy(),
        origins = ?config.allowed_origins(),
        "Starting Strictly Heroes server"
    );
    serve(config).await
}

/// Print the starting board for two rosters
#[instrument]
fn print_board(player_a: &[String], player_b: &[String]) -> Result<()> {
    let roster_a = Roster::parse(player_a)?;
    let roster_b = Roster::parse(player_b)?;

    let mut game = Game::new();
    game.initialize(&roster_a, &roster_b);
    println!("{}", game.state().board().display());
    Ok(())
}

const DEFAULT_FILTER: &str = "info,strictly_heroes=debug,strictly_heroes_server=debug";

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
