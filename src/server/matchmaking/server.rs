/// Matchmaking server actor.
///
/// Owns the single `ArenaState` and the outbound channel of every live session.
/// Each transport event is one actor message handled to completion, which keeps
/// pairing, round resolution and disconnect cleanup atomic with respect to
/// each other.

use actix::prelude::*;
use std::collections::HashMap;
use log::{debug, error, warn};

use super::messages::ServerWsMessage;
use crate::game::error::GameError;
use crate::game::state::ArenaState;
use crate::game::types::{ArenaSnapshot, Choice, ConnectionId, Outbound};

type SessionRecipient = Recipient<ServerWsMessage>;

/// Main matchmaking server actor.
pub struct MatchmakingServer {
    /// Registries and round state.
    arena: ArenaState,
    /// Outbound channel of each connected session.
    sessions: HashMap<ConnectionId, SessionRecipient>,
}

impl MatchmakingServer {
    /// Create a new matchmaking server.
    pub fn new() -> Self {
        Self {
            arena: ArenaState::new(),
            sessions: HashMap::new(),
        }
    }

    /// Deliver core events to their sessions.
    fn dispatch(&self, outbound: Vec<Outbound>) {
        for Outbound { to, event } in outbound {
            match self.sessions.get(&to) {
                Some(addr) => addr.do_send(ServerWsMessage::from(event)),
                None => debug!("[Matchmaking] Dropping {:?} for closed session {}", event, to),
            }
        }
    }

    /// Apply the error policy: log, and tell the client when it can act on it.
    fn report(&self, id: &ConnectionId, err: GameError) {
        match err {
            GameError::UnknownConnection(_) => {
                debug!("[Matchmaking] Dropping event: {}", err);
            }
            GameError::InvalidName => {
                debug!("[Matchmaking] Rejected join request from {}: {}", id, err);
                if let Some(addr) = self.sessions.get(id) {
                    addr.do_send(ServerWsMessage::error(
                        err.code(),
                        "A non-empty player name is required.",
                        Some(&id.to_string()),
                    ));
                }
            }
            GameError::NoOpponent(_) => {
                warn!("[Matchmaking] {}", err);
            }
            GameError::DuplicateId(_) | GameError::AlreadyPaired(_) => {
                error!("[Matchmaking] Registry contract violated: {}", err);
            }
        }
    }

    fn handle_result(&self, id: &ConnectionId, result: Result<Vec<Outbound>, GameError>) {
        match result {
            Ok(outbound) => self.dispatch(outbound),
            Err(err) => self.report(id, err),
        }
    }
}

impl Default for MatchmakingServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Message: a session opened.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: ConnectionId,
    pub addr: SessionRecipient,
}

/// Message: a player asks to be paired.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RequestToPlay {
    pub id: ConnectionId,
    pub player_name: String,
}

/// Message: a player submits a choice for the current round.
#[derive(Message)]
#[rtype(result = "()")]
pub struct PlayerChoice {
    pub id: ConnectionId,
    pub choice: Choice,
}

/// Message: a session closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: ConnectionId,
}

/// Message: read the arena counters.
#[derive(Message)]
#[rtype(result = "ArenaSnapshot")]
pub struct GetArenaSnapshot;

impl Actor for MatchmakingServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for MatchmakingServer {
    type Result = ();

    /// Registers the session; a colliding id keeps the existing session.
    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        match self.arena.connect(msg.id) {
            Ok(()) => {
                self.sessions.insert(msg.id, msg.addr);
            }
            Err(err) => self.report(&msg.id, err),
        }
    }
}

impl Handler<RequestToPlay> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: RequestToPlay, _ctx: &mut Self::Context) -> Self::Result {
        let result = self.arena.request_match(&msg.id, &msg.player_name);
        self.handle_result(&msg.id, result);
    }
}

impl Handler<PlayerChoice> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: PlayerChoice, _ctx: &mut Self::Context) -> Self::Result {
        let result = self.arena.submit_choice(&msg.id, msg.choice);
        self.handle_result(&msg.id, result);
    }
}

impl Handler<Disconnect> for MatchmakingServer {
    type Result = ();

    /// Tears down the pairing and notifies a surviving partner.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        let outbound = self.arena.disconnect(&msg.id);
        self.sessions.remove(&msg.id);
        self.dispatch(outbound);
    }
}

impl Handler<GetArenaSnapshot> for MatchmakingServer {
    type Result = MessageResult<GetArenaSnapshot>;

    fn handle(&mut self, _msg: GetArenaSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.arena.snapshot())
    }
}
