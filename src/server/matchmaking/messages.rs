use actix::prelude::*;
use serde::{Serialize, Deserialize};

use crate::game::types::{ArenaEvent, Choice};

// Client -> server messages
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    #[serde(rename = "request_to_play")]
    RequestToPlay {
        #[serde(rename = "playerName", default)]
        player_name: String,
    },
    #[serde(rename = "playerChoiceFromClient")]
    PlayerChoice {
        choice: Choice,
    },
    Ping,
}

// Server -> client messages
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    OpponentFound {
        #[serde(rename = "opponentName")]
        opponent_name: String,
    },
    OpponentNotFound,
    #[serde(rename = "opponentChoiceFromServer")]
    OpponentChoiceFromServer {
        choice: Choice,
    },
    #[serde(rename = "opponentLeftMatch")]
    OpponentLeftMatch,
    Error {
        code: String,
        message: String,
        context: String,
    },
}

impl ServerWsMessage {
    pub fn error(code: &str, message: &str, context: Option<&str>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
            context: context.unwrap_or("").to_string(),
        }
    }
}

impl From<ArenaEvent> for ServerWsMessage {
    fn from(event: ArenaEvent) -> Self {
        match event {
            ArenaEvent::OpponentFound { opponent_name } => Self::OpponentFound { opponent_name },
            ArenaEvent::OpponentNotFound => Self::OpponentNotFound,
            ArenaEvent::OpponentChoice { choice } => Self::OpponentChoiceFromServer { choice },
            ArenaEvent::OpponentLeftMatch => Self::OpponentLeftMatch,
        }
    }
}
