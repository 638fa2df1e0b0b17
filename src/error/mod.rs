//! Error types and user-facing message mapping.
//!
//! This module provides the bot's error hierarchy. `AppError` is the single error type
//! returned by every ledger, identity and draw operation. Each variant maps onto a closed
//! `ErrorKind` so callers and tests can branch on the category of failure without matching
//! on details, and the command boundary renders every error to exactly one reply through
//! `AppError::user_message`.

pub mod command;
pub mod config;
pub mod draw;

use thiserror::Error;

use crate::error::{
    command::{ArgumentError, NotFoundError},
    config::ConfigError,
    draw::EmptyPoolError,
};

/// Closed classification of every failure the bot can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad count, missing or malformed argument.
    InvalidArgument,
    /// User identity or room could not be resolved.
    NotFound,
    /// A removal asked for more entries than the user holds.
    InsufficientEntries,
    /// The room is empty or none of its occupants hold entries.
    EmptyPool,
    /// A Discord API call failed or timed out.
    ExternalServiceError,
    /// Anything unanticipated (I/O, serialization, configuration).
    Internal,
}

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Domain errors carry
/// enough detail to tell the user which precondition failed; infrastructure errors are
/// logged in full and shown generically.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// A command argument was missing, malformed or out of range.
    #[error(transparent)]
    ArgumentErr(#[from] ArgumentError),

    /// A user or room could not be resolved.
    #[error(transparent)]
    NotFoundErr(#[from] NotFoundError),

    /// A removal exceeded the user's current holding.
    ///
    /// # Fields
    /// - `held` - Entries the user currently holds (0 when absent)
    /// - `requested` - Entries the caller tried to remove
    #[error("Cannot remove {requested} entries, only {held} held")]
    InsufficientEntries { held: u32, requested: u32 },

    /// The draw had nobody to draw from.
    #[error(transparent)]
    EmptyPoolErr(#[from] EmptyPoolError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// A Discord call did not complete within the configured bound.
    ///
    /// # Fields
    /// - Name of the operation that timed out
    #[error("Discord request timed out: {0}")]
    Timeout(&'static str),

    /// Ledger file I/O failure.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Ledger file (de)serialization failure.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Internal error with custom message.
    ///
    /// # Fields
    /// - Detailed error message for logging
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Classifies the error into the closed `ErrorKind` taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArgumentErr(_) => ErrorKind::InvalidArgument,
            Self::NotFoundErr(_) => ErrorKind::NotFound,
            Self::InsufficientEntries { .. } => ErrorKind::InsufficientEntries,
            Self::EmptyPoolErr(_) => ErrorKind::EmptyPool,
            Self::DiscordErr(_) | Self::Timeout(_) => ErrorKind::ExternalServiceError,
            Self::ConfigErr(_) | Self::IoErr(_) | Self::JsonErr(_) | Self::InternalError(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Renders the error as the single reply shown to the invoking user.
    ///
    /// Domain errors state which precondition failed. External and internal errors are
    /// logged with full detail and replaced by a generic message to avoid leaking
    /// implementation details into the channel.
    ///
    /// # Returns
    /// - `String` - Message text, already prefixed with the error marker
    pub fn user_message(&self) -> String {
        let text = match self {
            Self::ArgumentErr(err) => err.user_message(),
            Self::NotFoundErr(err) => err.user_message(),
            Self::InsufficientEntries { held, requested } => format!(
                "El usuario no tiene suficientes participaciones para eliminar (tiene {}, se pidieron {}).",
                held, requested
            ),
            Self::EmptyPoolErr(err) => err.user_message(),
            Self::DiscordErr(_) | Self::Timeout(_) => {
                tracing::error!("Discord API error: {}", self);
                "Ocurrió un error con la API de Discord, inténtalo de nuevo.".to_string()
            }
            err => {
                tracing::error!("Internal error: {}", err);
                "Ocurrió un error inesperado.".to_string()
            }
        };

        format!("❌ {}", text)
    }
}
