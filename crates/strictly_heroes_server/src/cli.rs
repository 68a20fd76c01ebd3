//! Command-line interface for strictly_heroes_server.

use clap::{Parser, Subcommand};

/// Strictly Heroes - WebSocket server for the 5x5 heroes grid game
#[derive(Parser, Debug)]
#[command(name = "strictly_heroes_server")]
#[command(about = "Authoritative game server for the heroes grid", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Reject moves made out of turn
        #[arg(long)]
        enforce_turn_order: bool,
    },

    /// Print the starting board for two rosters
    Board {
        /// Player A characters, comma separated (e.g. P,H1,H2)
        #[arg(long, value_delimiter = ',')]
        player_a: Vec<String>,

        /// Player B characters, comma separated
        #[arg(long, value_delimiter = ',')]
        player_b: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from([
            "strictly_heroes_server",
            "serve",
            "--port",
            "7000",
            "--enforce-turn-order",
        ]);
        match cli.command {
            Command::Serve {
                port,
                enforce_turn_order,
                config,
                host,
            } => {
                assert_eq!(port, Some(7000));
                assert!(enforce_turn_order);
                assert!(config.is_none());
                assert!(host.is_none());
            }
            other => panic!("Expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_board_rosters() {
        let cli = Cli::parse_from([
            "strictly_heroes_server",
            "board",
            "--player-a",
            "P,H1",
            "--player-b",
            "H2",
        ]);
        let Command::Board { player_a, player_b } = cli.command else {
            panic!("Expected board");
        };
        assert_eq!(player_a, vec!["P", "H1"]);
        assert_eq!(player_b, vec!["H2"]);
    }
}
