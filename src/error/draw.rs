use thiserror::Error;

/// The draw or grant had nobody to operate on.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EmptyPoolError {
    /// The voice channel exists but nobody is connected to it.
    #[error("Voice channel '{0}' has no members")]
    EmptyRoom(String),

    /// Members are connected but none of them hold entries.
    #[error("No participant in voice channel '{0}' holds entries")]
    NoEligibleCandidates(String),
}

impl EmptyPoolError {
    pub(crate) fn user_message(&self) -> String {
        match self {
            Self::EmptyRoom(room) => format!("No hay usuarios en el canal de voz '{}'.", room),
            Self::NoEligibleCandidates(_) => {
                "No hay participantes del sorteo que estén en el canal de voz.".to_string()
            }
        }
    }
}
