//! Status effect upkeep.
//!
//! Poison ticks at the start of its owner's turn; stun wears off at the end
//! of it. Both only touch the named player's creatures.

use crate::cards::StatusEffect;
use crate::core::{ActionKind, EngineConfig, GameState, InstanceId, PlayerId, Result, StatusTick};
use crate::effects::EffectTrigger;
use crate::triggers::process_effect_trigger;

/// A fresh poison status from the configured strength.
#[must_use]
pub fn poison_status(config: &EngineConfig) -> StatusEffect {
    StatusEffect::Poison {
        damage: config.poison_damage,
        duration: config.poison_duration,
    }
}

/// Apply one poison tick to each poisoned creature of `player`.
///
/// Expired poison is removed. Deaths are left for the caller.
pub fn tick_poison(state: &mut GameState, player: PlayerId) -> Result<()> {
    let mut ticks: Vec<(InstanceId, StatusTick)> = Vec::new();

    for creature in state.player_mut(player).field.iter_mut().filter(|c| c.is_alive()) {
        let id = creature.id();
        let mut damage_taken = 0;
        let mut ticked = None;
        for status in creature.status_effects.iter_mut() {
            if let StatusEffect::Poison { damage, duration } = status {
                if *duration > 0 {
                    *duration -= 1;
                    damage_taken += *damage;
                    ticked = Some(*status);
                }
            }
        }
        let Some(status) = ticked else {
            continue;
        };
        let before = creature.current_health;
        creature.current_health -= damage_taken;
        creature
            .status_effects
            .retain(|s| !matches!(s, StatusEffect::Poison { duration: 0, .. }));
        ticks.push((
            id,
            StatusTick {
                instance_id: id,
                status,
                health_before: before,
                health_after: creature.current_health,
            },
        ));
    }

    for (id, tick) in ticks {
        let damaged = tick.health_after < tick.health_before;
        state.log(player, ActionKind::StatusTick(tick));
        if damaged {
            let Some(card) = state.find_creature(id).filter(|c| c.is_alive()).map(|c| c.card.clone()) else {
                continue;
            };
            process_effect_trigger(state, EffectTrigger::OnDamageTaken, Some(&card), player)?;
        }
    }
    Ok(())
}

/// Count down stuns on `player`'s creatures, dropping expired ones.
pub fn decrement_stuns(state: &mut GameState, player: PlayerId) {
    for creature in &mut state.player_mut(player).field {
        for status in creature.status_effects.iter_mut() {
            if let StatusEffect::Stun { duration } = status {
                *duration = duration.saturating_sub(1);
            }
        }
        creature
            .status_effects
            .retain(|s| !matches!(s, StatusEffect::Stun { duration: 0 }));
    }
}
