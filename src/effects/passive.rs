//! Passive effect recomputation.
//!
//! Passive modifiers are derived data. Every pass zeroes them and rebuilds
//! them from the `passive` effects currently on the field, so running the
//! pass twice without a field change is a no-op.
//!
//! Health bookkeeping: when a creature's passive health bonus grows, its
//! current health grows by the same amount; when it shrinks, current
//! health is only clamped to the new maximum.

use std::collections::BTreeMap;

use super::dynamic::effect_value;
use super::effect::{CardEffect, EffectAction, EffectTarget, EffectTrigger};
use super::targeting::apply_multiple_filters;
use crate::cards::FieldCard;
use crate::core::{
    ActionKind, EngineError, GameState, InstanceId, PassiveUpdate, PlayerId, Result, TargetDelta, TargetDeltas,
};

/// Recompute passive modifiers for both fields.
///
/// Logs one `passive_update` when any creature's attack or current health
/// changed. Returns whether that happened.
pub fn apply_passive_effects(state: &mut GameState) -> Result<bool> {
    let bonuses = collect_bonuses(state)?;

    let mut deltas = TargetDeltas::new();
    for player in PlayerId::ALL {
        for creature in &mut state.player_mut(player).field {
            let (attack, health) = bonuses.get(&creature.id()).copied().unwrap_or((0, 0));
            let before = (creature.attack(), creature.current_health);
            let gained = health - creature.passive_health_modifier;

            creature.passive_attack_modifier = attack;
            creature.passive_health_modifier = health;
            if gained > 0 {
                creature.current_health += gained;
            }
            creature.clamp_health();

            let delta = TargetDelta::creature(before, (creature.attack(), creature.current_health));
            if !delta.is_empty() {
                deltas.insert(creature.id().to_string(), delta);
            }
        }
    }

    if deltas.is_empty() {
        return Ok(false);
    }
    let current = state.current_player;
    state.log(current, ActionKind::PassiveUpdate(PassiveUpdate { targets: deltas }));
    Ok(true)
}

/// `(attack, health)` bonus per creature from every live passive effect.
fn collect_bonuses(state: &GameState) -> Result<BTreeMap<InstanceId, (i32, i32)>> {
    let mut bonuses: BTreeMap<InstanceId, (i32, i32)> = BTreeMap::new();

    for owner in PlayerId::ALL {
        for source in state.player(owner).living() {
            let passives = source
                .active_effects()
                .iter()
                .filter(|e| e.trigger == EffectTrigger::Passive);
            for effect in passives {
                let value = effect_value(state, effect, source.id(), owner);
                for id in passive_targets(state, effect, source, owner)? {
                    let entry = bonuses.entry(id).or_default();
                    match effect.action {
                        EffectAction::BuffAttack => entry.0 += value,
                        EffectAction::DebuffAttack => entry.0 -= value,
                        EffectAction::BuffHealth => entry.1 += value,
                        EffectAction::DebuffHealth => entry.1 -= value,
                        other => {
                            return Err(EngineError::malformed(
                                source.template().template_id.as_str(),
                                format!("passive effect uses non-stat action {other:?}"),
                            ));
                        }
                    }
                }
            }
        }
    }
    Ok(bonuses)
}

fn passive_targets(
    state: &GameState,
    effect: &CardEffect,
    source: &FieldCard,
    owner: PlayerId,
) -> Result<Vec<InstanceId>> {
    let sides = match effect.target {
        EffectTarget::SelfCard => return Ok(vec![source.id()]),
        EffectTarget::AllyAll => vec![owner],
        EffectTarget::EnemyAll => vec![owner.opponent()],
        EffectTarget::All => vec![owner, owner.opponent()],
        other => {
            return Err(EngineError::malformed(
                source.template().template_id.as_str(),
                format!("passive effect needs a fixed target, got {other:?}"),
            ));
        }
    };
    let pool: Vec<&FieldCard> = sides
        .iter()
        .flat_map(|side| state.player(*side).living())
        .collect();
    let kept = apply_multiple_filters(pool, &effect.rule_sets()?, Some(source.id()));
    Ok(kept.into_iter().map(|c| c.id()).collect())
}
