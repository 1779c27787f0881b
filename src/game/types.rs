use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// Opaque identifier bound to one live WebSocket connection.
pub type ConnectionId = Uuid;

/// Identifier of an active pairing.
pub type PairId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    #[serde(alias = "rock")]
    Rock,
    #[serde(alias = "paper")]
    Paper,
    #[serde(alias = "scissors")]
    Scissors,
}

/// Per-player round sub-state. Both players of a pair go back to
/// `AwaitingChoice` together when the round resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundState {
    #[default]
    AwaitingChoice,
    ChoiceMade(Choice),
}

impl RoundState {
    pub fn choice(&self) -> Option<Choice> {
        match self {
            RoundState::AwaitingChoice => None,
            RoundState::ChoiceMade(choice) => Some(*choice),
        }
    }
}

/// One record per live connection.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: ConnectionId,
    pub display_name: Option<String>,
    pub connected: bool,
    /// Lookup key into the registry, never an owned reference.
    pub partner_id: Option<ConnectionId>,
    pub round: RoundState,
    /// Sequence stamp of the moment this player last became idle.
    /// Drives FIFO selection among idle candidates.
    pub(crate) idle_since: Option<u64>,
}

impl Player {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            display_name: None,
            connected: true,
            partner_id: None,
            round: RoundState::AwaitingChoice,
            idle_since: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.partner_id.is_some()
    }

    /// Connected, named and not bound into a pair.
    pub fn is_idle(&self) -> bool {
        self.connected && !self.is_matched() && self.display_name.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub id: PairId,
    pub player_a: ConnectionId,
    pub player_b: ConnectionId,
}

impl Pair {
    pub fn new(player_a: ConnectionId, player_b: ConnectionId) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_a,
            player_b,
        }
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        &self.player_a == id || &self.player_b == id
    }

    pub fn other(&self, id: &ConnectionId) -> Option<ConnectionId> {
        if &self.player_a == id {
            Some(self.player_b)
        } else if &self.player_b == id {
            Some(self.player_a)
        } else {
            None
        }
    }
}

/// Events the core asks the transport layer to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaEvent {
    OpponentFound { opponent_name: String },
    OpponentNotFound,
    OpponentChoice { choice: Choice },
    OpponentLeftMatch,
}

/// An event addressed to a single connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub to: ConnectionId,
    pub event: ArenaEvent,
}

impl Outbound {
    pub fn new(to: ConnectionId, event: ArenaEvent) -> Self {
        Self { to, event }
    }
}

/// Counters describing the arena at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub connected: usize,
    pub idle: usize,
    pub waiting_for_choice: usize,
    pub pairs: usize,
}
