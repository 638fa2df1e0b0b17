//! Prefix command parsing.
//!
//! Text after the prefix is split on whitespace, with double quotes grouping words into
//! one argument. Commands are matched by their English name or the Spanish alias the bot
//! has always answered to.

use crate::error::{command::ArgumentError, AppError};

/// A parsed bot command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register { name: String, count: i64 },
    RemoveEntries { name: String, count: i64 },
    Draw,
    GrantRoom { room: Option<String> },
    ClearAll,
    MyEntries,
    ListParticipants,
    ActiveMembers,
    ListMembers,
}

impl Command {
    /// Whether only server administrators may run this command.
    pub fn requires_admin(&self) -> bool {
        !matches!(self, Self::MyEntries | Self::ListParticipants)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::RemoveEntries { .. } => "remove-entries",
            Self::Draw => "draw",
            Self::GrantRoom { .. } => "grant-room",
            Self::ClearAll => "clear-all",
            Self::MyEntries => "my-entries",
            Self::ListParticipants => "list-participants",
            Self::ActiveMembers => "active-members",
            Self::ListMembers => "list-members",
        }
    }
}

/// Parses a message into a command.
///
/// # Arguments
/// - `content` - Raw message text
/// - `prefix` - Command prefix, e.g. `!`
///
/// # Returns
/// - `None` - The message is not addressed to the bot
/// - `Some(Ok(Command))` - A known command with valid arguments
/// - `Some(Err(AppError::ArgumentErr))` - Unknown command, or missing/malformed arguments
pub fn parse(content: &str, prefix: &str) -> Option<Result<Command, AppError>> {
    let body = content.trim_start().strip_prefix(prefix)?;
    let mut tokens = tokenize(body).into_iter();
    let name = tokens.next()?;
    let args: Vec<String> = tokens.collect();

    Some(command(&name, args).map_err(AppError::from))
}

fn command(name: &str, args: Vec<String>) -> Result<Command, ArgumentError> {
    let command = match name.to_lowercase().as_str() {
        "register" | "registrar" => {
            let (name, count) = name_and_count(args)?;
            Command::Register { name, count }
        }
        "remove-entries" | "eliminar" => {
            let (name, count) = name_and_count(args)?;
            Command::RemoveEntries { name, count }
        }
        "draw" | "sorteo" => Command::Draw,
        "grant-room" | "generar" => Command::GrantRoom {
            room: (!args.is_empty()).then(|| args.join(" ")),
        },
        "clear-all" | "sorteo_eliminar" => Command::ClearAll,
        "my-entries" | "mis_participaciones" => Command::MyEntries,
        "list-participants" | "participantes" => Command::ListParticipants,
        "active-members" | "usuarios_activos" => Command::ActiveMembers,
        "list-members" | "miembros" => Command::ListMembers,
        _ => return Err(ArgumentError::UnknownCommand(name.to_string())),
    };

    Ok(command)
}

/// Splits `<display name...> <count>` where the count is the last argument.
///
/// Unquoted names with spaces are joined back together.
fn name_and_count(mut args: Vec<String>) -> Result<(String, i64), ArgumentError> {
    if args.is_empty() {
        return Err(ArgumentError::Missing("display_name"));
    }
    if args.len() == 1 {
        return Err(ArgumentError::Missing("count"));
    }

    let raw = args.pop().unwrap_or_default();
    let count = raw.parse::<i64>().map_err(|_| ArgumentError::Malformed {
        name: "count",
        value: raw.clone(),
    })?;

    Ok((args.join(" "), count))
}

/// Whitespace tokenizer with double-quote grouping.
///
/// An unterminated quote extends to the end of the input.
fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for c in input.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    tokens.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        tokens.push(current);
    }

    tokens
}
