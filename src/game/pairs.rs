//! Active pairs, indexed by member for constant-time cleanup.

use std::collections::HashMap;

use crate::game::error::GameError;
use crate::game::types::{ConnectionId, Pair, PairId};

#[derive(Debug, Default)]
pub struct PairRegistry {
    pairs: HashMap<PairId, Pair>,
    by_member: HashMap<ConnectionId, PairId>,
}

impl PairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. Refuses a pair sharing a member with an active one.
    pub fn register(&mut self, pair: Pair) -> Result<(), GameError> {
        for member in [pair.player_a, pair.player_b] {
            if self.by_member.contains_key(&member) {
                return Err(GameError::AlreadyPaired(member));
            }
        }
        self.by_member.insert(pair.player_a, pair.id);
        self.by_member.insert(pair.player_b, pair.id);
        self.pairs.insert(pair.id, pair);
        Ok(())
    }

    /// Remove the pair containing `id`, if any.
    pub fn remove_by_member(&mut self, id: &ConnectionId) -> Option<Pair> {
        let pair_id = self.by_member.remove(id)?;
        let pair = self.pairs.remove(&pair_id)?;
        if let Some(other) = pair.other(id) {
            self.by_member.remove(&other);
        }
        Some(pair)
    }

    pub fn find_by_member(&self, id: &ConnectionId) -> Option<&Pair> {
        self.by_member.get(id).and_then(|pair_id| self.pairs.get(pair_id))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.values()
    }
}
