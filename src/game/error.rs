//! Error taxonomy of the arena core.

use thiserror::Error;

use crate::game::types::ConnectionId;

/// Errors raised by the registries, the matchmaker and the round coordinator.
///
/// None of them is fatal: the actor layer logs them and, where the client
/// needs to know, turns them into an outbound frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The connection id is not in the registry.
    #[error("unknown connection {0}")]
    UnknownConnection(ConnectionId),

    /// Display name missing or empty.
    #[error("display name must not be empty")]
    InvalidName,

    /// The transport handed out the same connection id twice.
    #[error("connection {0} is already registered")]
    DuplicateId(ConnectionId),

    /// The partner reference no longer resolves to a live player.
    #[error("partner of connection {0} is gone")]
    NoOpponent(ConnectionId),

    /// A pair was registered for a player who already belongs to one.
    #[error("connection {0} already belongs to a pair")]
    AlreadyPaired(ConnectionId),
}

impl GameError {
    /// Stable code sent to clients in error frames.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::UnknownConnection(_) => "UNKNOWN_CONNECTION",
            GameError::InvalidName => "INVALID_NAME",
            GameError::DuplicateId(_) => "DUPLICATE_ID",
            GameError::NoOpponent(_) => "NO_OPPONENT",
            GameError::AlreadyPaired(_) => "ALREADY_PAIRED",
        }
    }
}
