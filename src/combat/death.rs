//! Death cascade.
//!
//! Creatures reduced to zero health stay on the field until
//! [`resolve_deaths`] runs. Each death moves the card to the graveyard,
//! fires its own `on_death` effects and the owner's `on_ally_death`
//! effects, then recomputes passives. Those effects may kill more
//! creatures, so the loop repeats until the fields are clean.

use tracing::debug;

use crate::core::{ActionKind, CreatureDestroyed, GameState, InstanceId, PlayerId, Result};
use crate::effects::{apply_passive_effects, EffectTrigger};
use crate::triggers::process_effect_trigger;

/// Remove every dead creature, resolving death triggers as they happen.
///
/// Returns the ids removed, in order.
pub fn resolve_deaths(state: &mut GameState) -> Result<Vec<InstanceId>> {
    let mut removed = Vec::new();

    while let Some(id) = next_dead(state) {
        let Some(creature) = state.take_creature(id) else {
            break;
        };
        let owner = creature.owner;
        let silenced = creature.is_silenced;
        debug!(card = %creature.name(), %owner, "creature destroyed");

        let kind = ActionKind::CreatureDestroyed(CreatureDestroyed {
            instance_id: id,
            owner,
            card_snapshot: creature.snapshot(),
        });
        state.log(owner, kind);
        state.attack_queue.retain(|queued| *queued != id);

        let card = creature.into_card();
        state.player_mut(owner).graveyard.push(card.clone());
        removed.push(id);

        if !silenced {
            process_effect_trigger(state, EffectTrigger::OnDeath, Some(&card), owner)?;
        }
        process_effect_trigger(state, EffectTrigger::OnAllyDeath, Some(&card), owner)?;
        apply_passive_effects(state)?;
    }

    Ok(removed)
}

/// First dead creature, active player's field first, then by position.
fn next_dead(state: &GameState) -> Option<InstanceId> {
    let first = state.current_player;
    [first, first.opponent()]
        .into_iter()
        .flat_map(|side: PlayerId| state.player(side).field.iter())
        .find(|c| !c.is_alive())
        .map(|c| c.id())
}
