//! Connection registry: one `Player` record per live connection.
//!
//! Pure bookkeeping. Pairing policy lives in `matchmaker`, round
//! progression in `round`.

use std::collections::HashMap;

use crate::game::error::GameError;
use crate::game::types::{ConnectionId, Player, RoundState};

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    players: HashMap<ConnectionId, Player>,
    /// Monotonic counter used to stamp idle transitions.
    idle_seq: u64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly connected player.
    pub fn add(&mut self, id: ConnectionId) -> Result<(), GameError> {
        if self.players.contains_key(&id) {
            return Err(GameError::DuplicateId(id));
        }
        self.players.insert(id, Player::new(id));
        Ok(())
    }

    /// Set the display name of a player.
    ///
    /// Names are immutable once set: a later call with a different name
    /// leaves the first one in place. An unmatched player becomes idle
    /// (discoverable) the first time it is named.
    pub fn set_name(&mut self, id: &ConnectionId, name: &str) -> Result<(), GameError> {
        if !self.players.contains_key(id) {
            return Err(GameError::UnknownConnection(*id));
        }
        if name.is_empty() {
            return Err(GameError::InvalidName);
        }
        let stamp = self.next_stamp();
        if let Some(player) = self.players.get_mut(id) {
            if player.display_name.is_none() {
                player.display_name = Some(name.to_string());
            }
            if !player.is_matched() && player.idle_since.is_none() {
                player.idle_since = Some(stamp);
            }
        }
        Ok(())
    }

    /// Remove a player. Already-absent ids are a no-op.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Player> {
        self.players.remove(id)
    }

    /// Return the idle, named player that has been waiting the longest,
    /// ignoring `excluding`.
    pub fn find_idle_named(&self, excluding: &ConnectionId) -> Option<ConnectionId> {
        self.players
            .values()
            .filter(|p| &p.id != excluding && p.is_idle())
            .min_by_key(|p| p.idle_since.unwrap_or(u64::MAX))
            .map(|p| p.id)
    }

    /// Bind two players to each other and drop them from the idle queue.
    pub fn bind(&mut self, a: &ConnectionId, b: &ConnectionId) -> Result<(), GameError> {
        if !self.players.contains_key(a) {
            return Err(GameError::UnknownConnection(*a));
        }
        if !self.players.contains_key(b) {
            return Err(GameError::UnknownConnection(*b));
        }
        for (id, partner) in [(a, b), (b, a)] {
            if let Some(player) = self.players.get_mut(id) {
                player.partner_id = Some(*partner);
                player.round = RoundState::AwaitingChoice;
                player.idle_since = None;
            }
        }
        Ok(())
    }

    /// Drop a player's pairing and put it back at the end of the idle queue.
    pub fn release(&mut self, id: &ConnectionId) {
        let stamp = self.next_stamp();
        if let Some(player) = self.players.get_mut(id) {
            player.partner_id = None;
            player.round = RoundState::AwaitingChoice;
            player.idle_since = player.display_name.as_ref().map(|_| stamp);
        }
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn get_mut(&mut self, id: &ConnectionId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.players.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    fn next_stamp(&mut self) -> u64 {
        self.idle_seq += 1;
        self.idle_seq
    }
}
