//! Errors raised while validating command input and resolving identities.

use thiserror::Error;

/// A command argument was missing, malformed or out of range.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    /// A required positional argument was not supplied.
    #[error("Missing required argument: {0}")]
    Missing(&'static str),

    /// An entry count was zero or negative.
    #[error("Entry count must be greater than 0, got {0}")]
    InvalidCount(i64),

    /// An entry count, or the resulting total, does not fit in the ledger.
    #[error("Entry count {0} is too large")]
    CountTooLarge(i64),

    /// The command name after the prefix is not recognized.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// An argument could not be parsed into the expected type.
    #[error("Could not parse argument {name} from '{value}'")]
    Malformed {
        /// Argument name
        name: &'static str,
        /// Raw text supplied
        value: String,
    },
}

impl ArgumentError {
    pub(crate) fn user_message(&self) -> String {
        match self {
            Self::Missing("display_name") => "Faltó introducir el nombre del usuario.".to_string(),
            Self::Missing("count") => {
                "Faltan las participaciones. Por favor, proporciona el número de participaciones."
                    .to_string()
            }
            Self::Missing(name) => format!("Falta el argumento requerido '{}'.", name),
            Self::InvalidCount(_) => "El número de participaciones debe ser mayor a 0.".to_string(),
            Self::CountTooLarge(_) => format!(
                "El número de participaciones es demasiado grande (máximo {}).",
                u32::MAX
            ),
            Self::UnknownCommand(_) => {
                "Comando no encontrado. Por favor verifica la sintaxis y el nombre del comando."
                    .to_string()
            }
            Self::Malformed { name, value } => {
                format!("El valor '{}' no es válido para '{}'.", value, name)
            }
        }
    }
}

/// A user or room referenced by a command does not exist.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotFoundError {
    /// No directory member matched the name query.
    #[error("No user matches '{0}'")]
    User(String),

    /// No voice channel with this name exists in the guild.
    #[error("No voice channel named '{0}'")]
    Room(String),
}

impl NotFoundError {
    pub(crate) fn user_message(&self) -> String {
        match self {
            Self::User(query) => format!(
                "No se encontró un usuario con el nombre '{}' en el servidor.",
                query
            ),
            Self::Room(name) => format!("No se encontró un canal de voz llamado '{}'.", name),
        }
    }
}
