//! Line-oriented text protocol for playing from a terminal or a script.
//!
//! The framing follows GTP: each request is an optional numeric id, a command
//! and its arguments; each reply is `=id message` on success or `?id message`
//! on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `new [size] [colors]` - Start a new game (defaults to the current settings)
//! - `pick <row> <col>` - Choose the starting cell
//! - `color <c>` - Flood the captured region with color `c`
//! - `undo`, `redo` - Walk the move history
//! - `topology plane|torus` - Set whether edges wrap
//! - `connectivity orthogonal|all-eight` - Set whether diagonals are adjacent
//! - `show` - Print the board (`*` marks captured cells)
//! - `status` - Print phase, steps, captured count and settings
//! - `hint` - Suggest the greedy best color
//! - `save <path>`, `load <path>` - Write or read the game as JSON
//!
//! ## Example
//!
//! ```ignore
//! use flood_it::console::Console;
//! use flood_it::config::GameConfig;
//! let mut console = Console::new(GameConfig::default())?;
//! console.run()?;
//! ```

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use clap::ValueEnum;
use tracing::warn;

use crate::board::Color;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::flood::{Connectivity, Topology};
use crate::game::{GameState, MoveResult, Phase};
use crate::hint::best_color;
use crate::session::Session;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "color",
    "connectivity",
    "hint",
    "known_command",
    "list_commands",
    "load",
    "name",
    "new",
    "pick",
    "quit",
    "redo",
    "save",
    "show",
    "status",
    "topology",
    "undo",
    "version",
];

/// Console state: the session being played.
pub struct Console {
    session: Session,
}

impl Console {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            session: Session::new(config)?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or end of input.
    pub fn serve(&mut self, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n").context("failed to write reply")?;
            output.flush().context("failed to flush reply")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "new" => {
                let mut config = self.session.config().clone();
                config.advance_seed();
                match (parse_arg::<usize>(args, 0), parse_arg::<usize>(args, 1)) {
                    (Ok(size), Ok(colors)) => {
                        config.size = size.unwrap_or(config.size);
                        config.num_colors = colors.unwrap_or(config.num_colors);
                    }
                    _ => return (false, "invalid number".to_string()),
                }
                reply(self.session.reset(Some(config)).map(|_| String::new()))
            }

            "pick" => {
                let (Ok(Some(row)), Ok(Some(column))) =
                    (parse_arg::<usize>(args, 0), parse_arg::<usize>(args, 1))
                else {
                    return (false, "expected: pick <row> <col>".to_string());
                };
                reply(self.session.pick_initial_cell(row, column).map(|_| self.progress()))
            }

            "color" => {
                let Ok(Some(color)) = parse_arg::<usize>(args, 0) else {
                    return (false, "expected: color <c>".to_string());
                };
                let num_colors = self.session.state().num_colors();
                let Ok(color) = Color::try_from(color) else {
                    return reply(Err(GameError::InvalidColor { color, num_colors }));
                };
                reply(self.session.choose_color(color).map(|result| match result {
                    MoveResult::Unchanged => "unchanged".to_string(),
                    MoveResult::Played { .. } => self.progress(),
                }))
            }

            "undo" => reply(self.session.undo().map(|_| self.progress())),

            "redo" => reply(self.session.redo().map(|_| self.progress())),

            "topology" => match args.first().map(|a| Topology::from_str(a, true)) {
                Some(Ok(topology)) => {
                    self.session.set_topology(topology);
                    (true, String::new())
                }
                _ => (false, "expected: topology plane|torus".to_string()),
            },

            "connectivity" => match args.first().map(|a| Connectivity::from_str(a, true)) {
                Some(Ok(connectivity)) => {
                    self.session.set_connectivity(connectivity);
                    (true, String::new())
                }
                _ => (false, "expected: connectivity orthogonal|all-eight".to_string()),
            },

            "show" => (true, format!("\n{}", self.session.state().board())),

            "status" => (true, status_line(self.session.state())),

            "hint" => match best_color(self.session.state()) {
                Some(color) => (true, color.to_string()),
                None => (false, "no game in progress".to_string()),
            },

            "save" => match args.first() {
                Some(path) => match self.save(path) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, format!("{e:#}")),
                },
                None => (false, "missing argument".to_string()),
            },

            "load" => match args.first() {
                Some(path) => match self.load(path) {
                    Ok(()) => (true, status_line(self.session.state())),
                    Err(e) => (false, format!("{e:#}")),
                },
                None => (false, "missing argument".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn progress(&self) -> String {
        let state = self.session.state();
        format!(
            "{}/{} captured, {} steps",
            state.number_captured(),
            state.size() * state.size(),
            state.steps_played()
        )
    }

    fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = self.session.state().to_json()?;
        fs::write(path, json).with_context(|| format!("failed to write {path}"))?;
        Ok(())
    }

    fn load(&mut self, path: &str) -> anyhow::Result<()> {
        let json = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        if json.trim().is_empty() {
            bail!("{path} is empty");
        }
        let state =
            GameState::from_json(&json).with_context(|| format!("failed to load {path}"))?;
        self.session.restore(state);
        Ok(())
    }
}

/// Parse the optional argument at `index`. A missing argument is `Ok(None)`.
fn parse_arg<T: std::str::FromStr>(
    args: &[&str],
    index: usize,
) -> std::result::Result<Option<T>, ()> {
    match args.get(index) {
        Some(arg) => arg.parse().map(Some).map_err(|_| ()),
        None => Ok(None),
    }
}

fn reply(result: Result<String>) -> (bool, String) {
    match result {
        Ok(message) => (true, message),
        Err(e) => {
            warn!(error = %e, "command rejected");
            (false, e.to_string())
        }
    }
}

fn status_line(state: &GameState) -> String {
    let phase = match state.phase() {
        Phase::AwaitingInitialPick => "awaiting-pick",
        Phase::Playing => "playing",
        Phase::Finished => "finished",
    };
    let color = state
        .current_color()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{phase} size={} colors={} color={color} steps={} captured={} topology={} connectivity={}",
        state.size(),
        state.num_colors(),
        state.steps_played(),
        state.number_captured(),
        state.topology(),
        state.connectivity()
    )
}
