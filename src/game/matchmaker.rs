//! Pairing policy.
//!
//! A join request names the player, then pairs it with the idle player that
//! has been waiting the longest. Without a candidate the requester stays idle
//! and is found by the next request from someone else. There is no queue
//! timeout.

use log::{debug, info};

use crate::game::error::GameError;
use crate::game::pairs::PairRegistry;
use crate::game::registry::ConnectionRegistry;
use crate::game::types::{ArenaEvent, ConnectionId, Outbound, Pair};

pub fn request_match(
    registry: &mut ConnectionRegistry,
    pairs: &mut PairRegistry,
    id: &ConnectionId,
    name: &str,
) -> Result<Vec<Outbound>, GameError> {
    let requester = registry.get(id).ok_or(GameError::UnknownConnection(*id))?;
    if name.is_empty() {
        return Err(GameError::InvalidName);
    }
    if requester.is_matched() {
        debug!("[Matchmaking] Ignoring join request from {}: already matched", id);
        return Ok(Vec::new());
    }

    registry.set_name(id, name)?;

    let Some(opponent_id) = registry.find_idle_named(id) else {
        info!("[Matchmaking] Waiting for opponent: {}", display_name(registry, id));
        return Ok(vec![Outbound::new(*id, ArenaEvent::OpponentNotFound)]);
    };

    let pair = Pair::new(*id, opponent_id);
    pairs.register(pair)?;
    registry.bind(id, &opponent_id)?;

    let requester_name = display_name(registry, id);
    let opponent_name = display_name(registry, &opponent_id);
    info!("[Matchmaking] Match started: {} vs {}", requester_name, opponent_name);

    Ok(vec![
        Outbound::new(*id, ArenaEvent::OpponentFound { opponent_name: opponent_name.clone() }),
        Outbound::new(opponent_id, ArenaEvent::OpponentFound { opponent_name: requester_name }),
    ])
}

fn display_name(registry: &ConnectionRegistry, id: &ConnectionId) -> String {
    registry
        .get(id)
        .and_then(|p| p.display_name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn connected(registry: &mut ConnectionRegistry) -> ConnectionId {
        let id = Uuid::new_v4();
        registry.add(id).unwrap();
        id
    }

    #[test]
    fn test_lonely_requester_gets_not_found() {
        let mut registry = ConnectionRegistry::new();
        let mut pairs = PairRegistry::new();
        let a = connected(&mut registry);

        let out = request_match(&mut registry, &mut pairs, &a, "Alice").unwrap();
        assert_eq!(out, vec![Outbound::new(a, ArenaEvent::OpponentNotFound)]);
        assert!(!registry.get(&a).unwrap().is_matched());
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_both_sides_get_opponent_found() {
        let mut registry = ConnectionRegistry::new();
        let mut pairs = PairRegistry::new();
        let a = connected(&mut registry);
        let b = connected(&mut registry);
        request_match(&mut registry, &mut pairs, &a, "Alice").unwrap();

        let out = request_match(&mut registry, &mut pairs, &b, "Bob").unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.contains(&Outbound::new(b, ArenaEvent::OpponentFound { opponent_name: "Alice".into() })));
        assert!(out.contains(&Outbound::new(a, ArenaEvent::OpponentFound { opponent_name: "Bob".into() })));
        assert_eq!(registry.get(&a).unwrap().partner_id, Some(b));
        assert_eq!(registry.get(&b).unwrap().partner_id, Some(a));
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_empty_name_changes_nothing() {
        let mut registry = ConnectionRegistry::new();
        let mut pairs = PairRegistry::new();
        let a = connected(&mut registry);
        let b = connected(&mut registry);
        request_match(&mut registry, &mut pairs, &a, "Alice").unwrap();

        assert_eq!(
            request_match(&mut registry, &mut pairs, &b, ""),
            Err(GameError::InvalidName)
        );
        assert!(registry.get(&b).unwrap().display_name.is_none());
        assert!(!registry.get(&a).unwrap().is_matched());
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_unknown_requester() {
        let mut registry = ConnectionRegistry::new();
        let mut pairs = PairRegistry::new();
        let ghost = Uuid::new_v4();
        assert_eq!(
            request_match(&mut registry, &mut pairs, &ghost, "Ghost"),
            Err(GameError::UnknownConnection(ghost))
        );
    }

    #[test]
    fn test_matched_player_is_not_paired_again() {
        let mut registry = ConnectionRegistry::new();
        let mut pairs = PairRegistry::new();
        let a = connected(&mut registry);
        let b = connected(&mut registry);
        let c = connected(&mut registry);
        request_match(&mut registry, &mut pairs, &a, "Alice").unwrap();
        request_match(&mut registry, &mut pairs, &b, "Bob").unwrap();
        request_match(&mut registry, &mut pairs, &c, "Carol").unwrap();

        let out = request_match(&mut registry, &mut pairs, &a, "Alice").unwrap();
        assert!(out.is_empty());
        assert_eq!(registry.get(&a).unwrap().partner_id, Some(b));
        assert!(!registry.get(&c).unwrap().is_matched());
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_longest_waiting_player_is_picked() {
        let mut registry = ConnectionRegistry::new();
        let mut pairs = PairRegistry::new();
        let first = connected(&mut registry);
        let second = connected(&mut registry);
        let late = connected(&mut registry);
        // `second` becomes idle after `first` without issuing a request.
        request_match(&mut registry, &mut pairs, &first, "First").unwrap();
        registry.set_name(&second, "Second").unwrap();

        request_match(&mut registry, &mut pairs, &late, "Late").unwrap();
        assert_eq!(registry.get(&late).unwrap().partner_id, Some(first));
        assert!(registry.get(&second).unwrap().is_idle());
    }
}
