//! Command-line interface for sholo_guti.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sholo Guti - sixteen-piece capture game
#[derive(Parser, Debug)]
#[command(name = "sholo_guti")]
#[command(about = "Play Sholo Guti locally or relay games between two players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "sholo_guti.toml")]
    pub config: PathBuf,

    /// Save slot location (overrides the config file)
    #[arg(long, global = true)]
    pub save_path: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the two-player room relay
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play a hot-seat game in the terminal
    Play {
        /// Make captures mandatory
        #[arg(long)]
        forced_capture: bool,

        /// Ignore the saved game and start over
        #[arg(long)]
        fresh: bool,
    },

    /// Print the saved board
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["sholo_guti", "serve", "--port", "4000"]);
        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(4000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, PathBuf::from("sholo_guti.toml"));
    }

    #[test]
    fn test_parse_play_flags() {
        let cli = Cli::parse_from(["sholo_guti", "play", "--forced-capture", "--fresh"]);
        assert!(matches!(
            cli.command,
            Command::Play {
                forced_capture: true,
                fresh: true
            }
        ));
    }
}
