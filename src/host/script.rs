//! Line-oriented stand-in host.
//!
//! Each line is one event:
//!
//! ```text
//! join <player>
//! cmd <player> <label> [args..]
//! console <label> [args..]
//! # comment
//! ```

use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use super::{CommandOutcome, CommandSender, FlyPlugin, Player, Trigger};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptEvent {
    Join { player: String },
    Command {
        player: Option<String>,
        label: String,
        args: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptParseError {
    message: String,
}

impl ScriptParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ScriptParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ScriptParseError {}

/// Parses one script line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptEvent>, ScriptParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let rest = &tokens[1..];
    let owned = |tokens: &[&str]| tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>();

    match tokens[0].to_ascii_lowercase().as_str() {
        "join" => match rest {
            [player] => Ok(Some(ScriptEvent::Join {
                player: player.to_string(),
            })),
            _ => Err(ScriptParseError::new("Usage: join <player>")),
        },
        "cmd" => match rest {
            [player, label, args @ ..] => Ok(Some(ScriptEvent::Command {
                player: Some(player.to_string()),
                label: label.to_string(),
                args: owned(args),
            })),
            _ => Err(ScriptParseError::new("Usage: cmd <player> <label> [args..]")),
        },
        "console" => match rest {
            [label, args @ ..] => Ok(Some(ScriptEvent::Command {
                player: None,
                label: label.to_string(),
                args: owned(args),
            })),
            _ => Err(ScriptParseError::new("Usage: console <label> [args..]")),
        },
        other => Err(ScriptParseError::new(format!("Unknown event: {other}"))),
    }
}

struct ScriptPlayer<'w> {
    name: String,
    out: &'w mut dyn Write,
    allow_flight: &'w mut bool,
}

impl CommandSender for ScriptPlayer<'_> {
    fn send_message(&mut self, message: &str) {
        let _ = writeln!(self.out, "[{}] {}", self.name, message);
    }

    fn as_player(&mut self) -> Option<&mut dyn Player> {
        Some(self)
    }
}

impl Player for ScriptPlayer<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_allow_flight(&mut self, allow: bool) {
        *self.allow_flight = allow;
        let _ = writeln!(self.out, "{} allow_flight={}", self.name, allow);
    }
}

struct ScriptConsole<'w> {
    out: &'w mut dyn Write,
}

impl CommandSender for ScriptConsole<'_> {
    fn send_message(&mut self, message: &str) {
        let _ = writeln!(self.out, "[console] {message}");
    }
}

/// Replays script events against a plugin, tracking each player's capability.
pub struct ScriptHost<'p> {
    plugin: &'p mut FlyPlugin,
    allow_flight: HashMap<String, bool>,
    errors: usize,
}

impl<'p> ScriptHost<'p> {
    pub fn new(plugin: &'p mut FlyPlugin) -> Self {
        Self {
            plugin,
            allow_flight: HashMap::new(),
            errors: 0,
        }
    }

    /// Current capability of a player seen by this host.
    pub fn allows_flight(&self, player: &str) -> Option<bool> {
        self.allow_flight.get(player).copied()
    }

    /// Number of lines that failed to parse or named unknown commands.
    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            match parse_line(&line) {
                Ok(Some(event)) => self.dispatch(event, out)?,
                Ok(None) => {}
                Err(err) => {
                    self.errors += 1;
                    warn!(line = index + 1, error = %err, "Skipping script line");
                    writeln!(out, "line {}: {}", index + 1, err)?;
                }
            }
        }
        Ok(())
    }

    pub fn dispatch<W: Write>(&mut self, event: ScriptEvent, out: &mut W) -> io::Result<()> {
        debug!(?event, "Dispatching script event");
        match event {
            ScriptEvent::Join { player } => {
                let allow = self.allow_flight.entry(player.clone()).or_insert(false);
                let mut sender = ScriptPlayer {
                    name: player,
                    out: &mut *out,
                    allow_flight: allow,
                };
                self.plugin.on_player_join(&mut sender);
            }
            ScriptEvent::Command {
                player,
                label,
                args,
            } => {
                let trigger = match label.parse::<Trigger>() {
                    Ok(trigger) => trigger,
                    Err(err) => {
                        self.errors += 1;
                        writeln!(out, "{err}")?;
                        return Ok(());
                    }
                };
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                let outcome = match player {
                    Some(name) => {
                        let allow = self.allow_flight.entry(name.clone()).or_insert(false);
                        let mut sender = ScriptPlayer {
                            name,
                            out: &mut *out,
                            allow_flight: allow,
                        };
                        self.plugin.on_command(&mut sender, trigger, &args)
                    }
                    None => {
                        let mut sender = ScriptConsole { out: &mut *out };
                        self.plugin.on_command(&mut sender, trigger, &args)
                    }
                };
                if outcome == CommandOutcome::InvalidArguments {
                    writeln!(out, "Usage: /{trigger}")?;
                }
            }
        }
        Ok(())
    }
}
