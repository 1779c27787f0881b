//! Round coordination between the two members of a pair.
//!
//! Each member moves `AwaitingChoice -> ChoiceMade` on submission. The
//! second submission of a round is the synchronization point: each side is
//! sent the other's choice and both reset to `AwaitingChoice`. No verdict is
//! computed here.

use log::debug;

use crate::game::error::GameError;
use crate::game::pairs::PairRegistry;
use crate::game::registry::ConnectionRegistry;
use crate::game::types::{ArenaEvent, Choice, ConnectionId, Outbound, RoundState};

/// Record `choice` for `id` and resolve the round if the partner already chose.
///
/// Returns `NoOpponent` after downgrading the caller to idle when its partner
/// reference is stale. An unmatched caller is ignored.
pub fn submit_choice(
    registry: &mut ConnectionRegistry,
    pairs: &mut PairRegistry,
    id: &ConnectionId,
    choice: Choice,
) -> Result<Vec<Outbound>, GameError> {
    let player = registry.get(id).ok_or(GameError::UnknownConnection(*id))?;
    let Some(partner_id) = player.partner_id else {
        debug!("[Round] Ignoring choice from unmatched player {}", id);
        return Ok(Vec::new());
    };

    let partner_state = registry
        .get(&partner_id)
        .filter(|partner| partner.connected && partner.partner_id == Some(*id))
        .map(|partner| partner.round.choice());
    let Some(partner_choice) = partner_state else {
        registry.release(id);
        pairs.remove_by_member(id);
        return Err(GameError::NoOpponent(*id));
    };

    let Some(partner_choice) = partner_choice else {
        if let Some(player) = registry.get_mut(id) {
            player.round = RoundState::ChoiceMade(choice);
        }
        debug!("[Round] {} chose, waiting for {}", id, partner_id);
        return Ok(Vec::new());
    };

    for member in [id, &partner_id] {
        if let Some(player) = registry.get_mut(member) {
            player.round = RoundState::AwaitingChoice;
        }
    }
    debug!("[Round] Resolved: {} played {:?}, {} played {:?}", id, choice, partner_id, partner_choice);

    Ok(vec![
        Outbound::new(*id, ArenaEvent::OpponentChoice { choice: partner_choice }),
        Outbound::new(partner_id, ArenaEvent::OpponentChoice { choice }),
    ])
}
