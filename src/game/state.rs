//! Arena state: the registries plus the operations that touch several
//! players at once.
//!
//! Every method runs to completion on `&mut self`, so callers that own the
//! state from a single actor get the critical section for free.

use log::{info, warn};

use crate::game::error::GameError;
use crate::game::matchmaker;
use crate::game::pairs::PairRegistry;
use crate::game::registry::ConnectionRegistry;
use crate::game::round;
use crate::game::types::{ArenaEvent, ArenaSnapshot, Choice, ConnectionId, Outbound, RoundState};

#[derive(Debug, Default)]
pub struct ArenaState {
    registry: ConnectionRegistry,
    pairs: PairRegistry,
}

impl ArenaState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, id: ConnectionId) -> Result<(), GameError> {
        self.registry.add(id)?;
        info!("[Arena] User connected: {}", id);
        Ok(())
    }

    pub fn request_match(&mut self, id: &ConnectionId, name: &str) -> Result<Vec<Outbound>, GameError> {
        matchmaker::request_match(&mut self.registry, &mut self.pairs, id, name)
    }

    /// Submit a round choice. A stale partner is healed here and reported to
    /// the caller as `OpponentLeftMatch`.
    pub fn submit_choice(&mut self, id: &ConnectionId, choice: Choice) -> Result<Vec<Outbound>, GameError> {
        match round::submit_choice(&mut self.registry, &mut self.pairs, id, choice) {
            Err(GameError::NoOpponent(id)) => {
                warn!("[Arena] Partner of {} is gone, player returned to idle", id);
                Ok(vec![Outbound::new(id, ArenaEvent::OpponentLeftMatch)])
            }
            other => other,
        }
    }

    /// Tear down everything a departing connection justified: its pairing,
    /// its partner's binding and its record. Unknown ids are a no-op.
    pub fn disconnect(&mut self, id: &ConnectionId) -> Vec<Outbound> {
        let Some(mut player) = self.registry.remove(id) else {
            return Vec::new();
        };
        player.connected = false;

        let mut outbound = Vec::new();
        if let Some(partner_id) = player.partner_id.take() {
            let bound_back = self
                .registry
                .get(&partner_id)
                .is_some_and(|partner| partner.connected && partner.partner_id == Some(*id));
            if bound_back {
                self.registry.release(&partner_id);
                outbound.push(Outbound::new(partner_id, ArenaEvent::OpponentLeftMatch));
            }
        }
        self.pairs.remove_by_member(id);

        info!(
            "[Arena] {} disconnected",
            player.display_name.as_deref().unwrap_or(&id.to_string())
        );
        outbound
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        let mut snapshot = ArenaSnapshot {
            connected: self.registry.len(),
            pairs: self.pairs.len(),
            ..ArenaSnapshot::default()
        };
        for player in self.registry.iter() {
            if player.is_idle() {
                snapshot.idle += 1;
            }
            if matches!(player.round, RoundState::ChoiceMade(_)) {
                snapshot.waiting_for_choice += 1;
            }
        }
        snapshot
    }

    #[cfg(test)]
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn pairs(&self) -> &PairRegistry {
        &self.pairs
    }

    /// Check the pairing invariants: pairs are disjoint, pair members point
    /// at each other, and every matched player belongs to a pair.
    #[cfg(test)]
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for pair in self.pairs.iter() {
            for (member, other) in [(pair.player_a, pair.player_b), (pair.player_b, pair.player_a)] {
                if !seen.insert(member) {
                    return Err(format!("{} belongs to two pairs", member));
                }
                let player = self
                    .registry
                    .get(&member)
                    .ok_or_else(|| format!("pair {} references missing player {}", pair.id, member))?;
                if player.partner_id != Some(other) {
                    return Err(format!("{} does not point back at {}", member, other));
                }
            }
        }
        for player in self.registry.iter() {
            if player.is_matched() && self.pairs.find_by_member(&player.id).is_none() {
                return Err(format!("{} is matched outside any pair", player.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn join(arena: &mut ArenaState, name: &str) -> (ConnectionId, Vec<Outbound>) {
        let id = Uuid::new_v4();
        arena.connect(id).unwrap();
        let out = arena.request_match(&id, name).unwrap();
        (id, out)
    }

    #[test]
    fn test_full_scenario() {
        let mut arena = ArenaState::new();
        let (a, out) = join(&mut arena, "Alice");
        assert_eq!(out, vec![Outbound::new(a, ArenaEvent::OpponentNotFound)]);

        let (b, out) = join(&mut arena, "Bob");
        assert!(out.contains(&Outbound::new(a, ArenaEvent::OpponentFound { opponent_name: "Bob".into() })));
        assert!(out.contains(&Outbound::new(b, ArenaEvent::OpponentFound { opponent_name: "Alice".into() })));

        assert!(arena.submit_choice(&a, Choice::Rock).unwrap().is_empty());
        let out = arena.submit_choice(&b, Choice::Scissors).unwrap();
        assert!(out.contains(&Outbound::new(a, ArenaEvent::OpponentChoice { choice: Choice::Scissors })));
        assert!(out.contains(&Outbound::new(b, ArenaEvent::OpponentChoice { choice: Choice::Rock })));
        assert!(arena.check_invariants().is_ok());
    }

    #[test]
    fn test_disconnect_notifies_partner_and_frees_it() {
        let mut arena = ArenaState::new();
        let (a, _) = join(&mut arena, "Alice");
        let (b, _) = join(&mut arena, "Bob");

        let out = arena.disconnect(&b);
        assert_eq!(out, vec![Outbound::new(a, ArenaEvent::OpponentLeftMatch)]);
        assert!(!arena.registry().contains(&b));
        assert!(!arena.registry().get(&a).unwrap().is_matched());
        assert!(arena.pairs().is_empty());

        let (c, out) = join(&mut arena, "Carol");
        assert!(out.contains(&Outbound::new(c, ArenaEvent::OpponentFound { opponent_name: "Alice".into() })));
        assert!(arena.check_invariants().is_ok());
    }

    #[test]
    fn test_released_partner_can_request_again() {
        let mut arena = ArenaState::new();
        let (a, _) = join(&mut arena, "Alice");
        let (b, _) = join(&mut arena, "Bob");
        arena.disconnect(&b);

        let out = arena.request_match(&a, "Alice").unwrap();
        assert_eq!(out, vec![Outbound::new(a, ArenaEvent::OpponentNotFound)]);
    }

    #[test]
    fn test_disconnect_clears_pending_choice_of_partner() {
        let mut arena = ArenaState::new();
        let (a, _) = join(&mut arena, "Alice");
        let (b, _) = join(&mut arena, "Bob");
        arena.submit_choice(&a, Choice::Paper).unwrap();
        arena.disconnect(&b);
        assert_eq!(arena.registry().get(&a).unwrap().round, RoundState::AwaitingChoice);
    }

    #[test]
    fn test_both_members_disconnect() {
        let mut arena = ArenaState::new();
        let (a, _) = join(&mut arena, "Alice");
        let (b, _) = join(&mut arena, "Bob");
        assert_eq!(arena.disconnect(&a).len(), 1);
        assert!(arena.disconnect(&b).is_empty());
        assert!(arena.disconnect(&b).is_empty());
        assert_eq!(arena.snapshot(), ArenaSnapshot::default());
    }

    #[test]
    fn test_choice_after_partner_left() {
        let mut arena = ArenaState::new();
        let (a, _) = join(&mut arena, "Alice");
        let (b, _) = join(&mut arena, "Bob");
        arena.disconnect(&b);
        // Released on disconnect, so the choice is simply ignored.
        assert!(arena.submit_choice(&a, Choice::Rock).unwrap().is_empty());
    }

    #[test]
    fn test_pending_choice_without_partner_response_stays() {
        let mut arena = ArenaState::new();
        let (a, _) = join(&mut arena, "Alice");
        join(&mut arena, "Bob");
        arena.submit_choice(&a, Choice::Rock).unwrap();
        let snapshot = arena.snapshot();
        assert_eq!(snapshot.waiting_for_choice, 1);
        assert_eq!(snapshot.pairs, 1);
        assert_eq!(snapshot.idle, 0);
    }

    #[test]
    fn test_invariants_hold_under_churn() {
        let mut arena = ArenaState::new();
        let mut live: Vec<ConnectionId> = Vec::new();
        for step in 0..60u32 {
            let id = Uuid::new_v4();
            arena.connect(id).unwrap();
            arena.request_match(&id, &format!("p{}", step)).unwrap();
            live.push(id);
            if step % 3 == 0 {
                let gone = live.remove((step as usize * 7) % live.len());
                arena.disconnect(&gone);
            }
            if step % 5 == 0 {
                if let Some(id) = live.first() {
                    arena.submit_choice(id, Choice::Paper).unwrap();
                }
            }
            assert!(arena.check_invariants().is_ok(), "step {}", step);
        }
        for id in live {
            arena.disconnect(&id);
            assert!(arena.check_invariants().is_ok());
        }
        assert!(arena.pairs().is_empty());
    }
}
