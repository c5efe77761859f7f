//! Hot-seat play on a terminal.

use crate::client::ClientSession;
use derive_more::{Display, Error};
use sholo_core::{Interaction, Move, NodeId, Player, TurnEngine};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, instrument};

/// One line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Click a node.
    Click(NodeId),
    /// Take back the last move.
    Undo,
    /// Start over.
    Reset,
    /// Turn forced capture on or off.
    Forced(bool),
    /// List the moves on offer.
    Moves,
    /// Redraw the board.
    Board,
    /// Show the command list.
    Help,
    /// Leave.
    Quit,
}

/// A prompt line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown command: {input}")]
pub struct CommandParseError {
    /// The rejected line.
    pub input: String,
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let command = match line.to_ascii_lowercase().as_str() {
            "undo" | "u" => Command::Undo,
            "reset" => Command::Reset,
            "forced on" => Command::Forced(true),
            "forced off" => Command::Forced(false),
            "moves" | "m" => Command::Moves,
            "board" | "b" => Command::Board,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => {
                let node = line.parse::<NodeId>().map_err(|_| CommandParseError {
                    input: line.to_string(),
                })?;
                Command::Click(node)
            }
        };
        Ok(command)
    }
}

const HELP: &str = "\
commands:
  x,y         select a piece or move the selected piece there
  undo        take back the last move
  reset       start a new game
  forced on   captures become mandatory (forced off to relax)
  moves       list moves on offer
  board       redraw the board
  quit        leave (the game is saved)";

fn piece_char(player: Player) -> char {
    match player {
        Player::Red => 'R',
        Player::Blue => 'B',
    }
}

/// Draws the board as text.
///
/// `R`/`B` are pieces, lowercase marks the selected piece, `*` an offered
/// destination and `.` an empty point.
pub fn render_board(engine: &TurnEngine) -> String {
    let graph = engine.graph();
    let selected = engine.selection().map(|s| s.node());
    let targets: Vec<NodeId> = engine.legal_moves().iter().map(|m| m.to).collect();

    let mut out = String::from("     0 1 2 3 4\n");
    for y in -2..=6i8 {
        let mut row = format!("{:>3}  ", y);
        for x in 0..=4i8 {
            let node = NodeId::new(x, y);
            let cell = if !graph.contains(node) {
                ' '
            } else if let Some(player) = engine.occupancy().get(node) {
                let c = piece_char(player);
                if selected == Some(node) {
                    c.to_ascii_lowercase()
                } else {
                    c
                }
            } else if targets.contains(&node) {
                '*'
            } else {
                '.'
            };
            row.push(cell);
            row.push(' ');
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out.push_str(&format!(
        "Red {}  Blue {}  {} to move{}",
        engine.piece_count(Player::Red),
        engine.piece_count(Player::Blue),
        engine.current_player(),
        if engine.forced_capture() {
            "  (forced capture)"
        } else {
            ""
        }
    ));
    out
}

fn describe_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn list_moves(engine: &TurnEngine) -> String {
    if let Some(selection) = engine.selection() {
        return format!("{} can move:\n{}", selection.node(), describe_moves(selection.moves()));
    }
    let player = engine.current_player();
    let generator = engine.generator();
    let capturing = generator.capturing_pieces(player);
    if !capturing.is_empty() {
        let nodes: Vec<String> = capturing.iter().map(NodeId::to_string).collect();
        return format!("{} can capture from: {}", player, nodes.join(" "));
    }
    let movable: Vec<String> = engine
        .occupancy()
        .pieces_of(player)
        .filter(|&node| !generator.legal_moves(node).is_empty())
        .map(|node| node.to_string())
        .collect();
    if movable.is_empty() {
        format!("{} has no moves", player)
    } else {
        format!("{} can move from: {}", player, movable.join(" "))
    }
}

fn describe(outcome: &Interaction, engine: &TurnEngine) -> String {
    match outcome {
        Interaction::Ignored => "Nothing to do there.".to_string(),
        Interaction::Selected { node, moves } if moves.is_empty() => {
            format!("{} is selected but cannot move.", node)
        }
        Interaction::Selected { .. } => render_board(engine),
        Interaction::ChainContinues { .. } => {
            format!("{}\nKeep jumping.", render_board(engine))
        }
        Interaction::Moved { .. } => match engine.winner() {
            Some(winner) => format!("{}\n{} wins!", render_board(engine), winner),
            None => render_board(engine),
        },
    }
}

/// Runs the prompt loop until `quit` or end of input.
///
/// # Errors
///
/// Fails only when writing to `output` fails.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(
    session: &mut ClientSession,
    input: R,
    mut output: W,
) -> std::io::Result<()> {
    writeln!(output, "{}", render_board(session.engine()))?;
    writeln!(output, "Type `help` for commands.")?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };
        debug!(?command, "Prompt command");
        let reply = match command {
            Command::Click(node) => {
                let outcome = session.interact(node);
                describe(&outcome, session.engine())
            }
            Command::Undo => {
                if session.undo() {
                    render_board(session.engine())
                } else {
                    "Nothing to undo.".to_string()
                }
            }
            Command::Reset => {
                session.reset();
                render_board(session.engine())
            }
            Command::Forced(enabled) => {
                session.set_forced_capture(enabled);
                format!("Forced capture {}.", if enabled { "on" } else { "off" })
            }
            Command::Moves => list_moves(session.engine()),
            Command::Board => render_board(session.engine()),
            Command::Help => HELP.to_string(),
            Command::Quit => break,
        };
        writeln!(output, "{}", reply)?;
    }
    Ok(())
}
