//! Attack resolution.
//!
//! One attack runs strictly in this order:
//!
//! 1. eligibility re-check, `hasAttacked` set, stealth dropped
//! 2. the attacker's `on_attack` effects
//! 3. target choice: a random guard if any is visible, else a random
//!    visible enemy, else the enemy player
//! 4. damage, then keywords (lifesteal, poison, trample, retaliate)
//! 5. `on_damage_taken` for whoever was hurt, then the death cascade
//!
//! Defenders do not strike back; only `retaliate` returns damage, half of
//! what was taken, rounded down.

use tracing::debug;

use super::death::resolve_deaths;
use super::status::poison_status;
use crate::cards::{Keyword, StatusEffect};
use crate::core::{ActionKind, CardAttack, GameState, InstanceId, KeywordTrigger, PlayerId, Result, TargetRef};
use crate::effects::EffectTrigger;
use crate::triggers::process_effect_trigger;

/// How an attack ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The attacker was missing or no longer eligible.
    Skipped,
    /// The attacker died to its own `on_attack` chain before striking.
    Interrupted,
    /// Damage was dealt to `target`.
    Resolved { target: TargetRef, damage: i32 },
}

/// Pick what `attacker_owner`'s creature must hit.
///
/// Guards among the visible enemies take priority; ties are broken by the
/// game RNG so replays pick the same guard.
pub fn choose_attack_target(state: &mut GameState, attacker_owner: PlayerId) -> (TargetRef, bool) {
    let defender = attacker_owner.opponent();
    let visible: Vec<(InstanceId, bool)> = state
        .player(defender)
        .living()
        .filter(|c| c.is_targetable())
        .map(|c| (c.id(), c.has_keyword(Keyword::Guard)))
        .collect();

    let guards: Vec<InstanceId> = visible.iter().filter(|(_, guard)| *guard).map(|(id, _)| *id).collect();
    if let Some(id) = state.rng.choose(&guards).copied() {
        return (TargetRef::Creature(id), true);
    }

    let all: Vec<InstanceId> = visible.iter().map(|(id, _)| *id).collect();
    match state.rng.choose(&all).copied() {
        Some(id) => (TargetRef::Creature(id), false),
        None => (TargetRef::Player(defender), false),
    }
}

/// Resolve one attack by `attacker_id`.
pub fn resolve_attack(state: &mut GameState, attacker_id: InstanceId) -> Result<AttackOutcome> {
    let turn = state.turn_number;
    let Some(attacker) = state.find_creature_mut(attacker_id) else {
        return Ok(AttackOutcome::Skipped);
    };
    if !attacker.can_attack(turn) {
        debug!(card = %attacker.name(), "attacker no longer eligible");
        return Ok(AttackOutcome::Skipped);
    }
    attacker.has_attacked = true;
    attacker.is_stealthed = false;
    let owner = attacker.owner;
    let card = attacker.card.clone();

    process_effect_trigger(state, EffectTrigger::OnAttack, Some(&card), owner)?;
    let still_standing = state.find_creature(attacker_id).is_some_and(|c| c.is_alive());
    if !still_standing {
        resolve_deaths(state)?;
        return Ok(AttackOutcome::Interrupted);
    }

    let (target, guarded) = choose_attack_target(state, owner);
    let Some(attacker) = state.find_creature(attacker_id) else {
        return Ok(AttackOutcome::Interrupted);
    };
    let damage = attacker.attack();
    let attacker_name = attacker.name().to_string();
    let lifesteal = attacker.has_keyword(Keyword::Lifesteal);
    let poison = attacker.has_keyword(Keyword::Poison);
    let trample = attacker.has_keyword(Keyword::Trample);
    debug!(attacker = %attacker_name, %target, damage, guarded, "attack");

    let mut hurt = Vec::new();
    let (before, after) = match target {
        TargetRef::Player(side) => state.damage_player(side, damage),
        TargetRef::Creature(id) => match state.find_creature_mut(id) {
            Some(defender) => {
                let before = defender.current_health;
                defender.current_health -= damage;
                (before, defender.current_health)
            }
            None => return Ok(AttackOutcome::Skipped),
        },
    };
    state.log(
        owner,
        ActionKind::CardAttack(CardAttack {
            attacker_id,
            attacker_name,
            target,
            damage,
            before,
            after,
            guarded,
        }),
    );
    let dealt = damage.min(before.max(0));

    if lifesteal && dealt > 0 {
        let (life_before, life_after) = state.heal_player(owner, dealt);
        log_keyword(state, owner, Keyword::Lifesteal, attacker_id, TargetRef::Player(owner), dealt, life_before, life_after);
    }

    if let TargetRef::Creature(defender_id) = target {
        if damage > 0 {
            hurt.push(defender_id);
        }

        if poison && after > 0 {
            let status = poison_status(&state.config);
            if let Some(defender) = state.find_creature_mut(defender_id) {
                defender
                    .status_effects
                    .retain(|s| !matches!(s, StatusEffect::Poison { .. }));
                defender.status_effects.push(status);
                let health = defender.current_health;
                let amount = state.config.poison_damage;
                log_keyword(state, owner, Keyword::Poison, attacker_id, target, amount, health, health);
            }
        }

        if trample && after < 0 {
            let overflow = -after;
            let defender_side = owner.opponent();
            let (life_before, life_after) = state.damage_player(defender_side, overflow);
            log_keyword(
                state,
                owner,
                Keyword::Trample,
                attacker_id,
                TargetRef::Player(defender_side),
                overflow,
                life_before,
                life_after,
            );
        }

        let retaliates = state
            .find_creature(defender_id)
            .is_some_and(|d| d.has_keyword(Keyword::Retaliate));
        let returned = damage / 2;
        if retaliates && returned > 0 {
            if let Some(attacker) = state.find_creature_mut(attacker_id) {
                let health_before = attacker.current_health;
                attacker.current_health -= returned;
                let health_after = attacker.current_health;
                log_keyword(
                    state,
                    owner.opponent(),
                    Keyword::Retaliate,
                    defender_id,
                    TargetRef::Creature(attacker_id),
                    returned,
                    health_before,
                    health_after,
                );
                hurt.push(attacker_id);
            }
        }
    }

    for id in hurt {
        let Some(creature) = state.find_creature(id).filter(|c| c.is_alive()) else {
            continue;
        };
        let card = creature.card.clone();
        let side = creature.owner;
        process_effect_trigger(state, EffectTrigger::OnDamageTaken, Some(&card), side)?;
    }

    resolve_deaths(state)?;
    Ok(AttackOutcome::Resolved { target, damage })
}

#[allow(clippy::too_many_arguments)]
fn log_keyword(
    state: &mut GameState,
    player: PlayerId,
    keyword: Keyword,
    source_id: InstanceId,
    target: TargetRef,
    amount: i32,
    before: i32,
    after: i32,
) {
    let kind = ActionKind::KeywordTrigger(KeywordTrigger {
        keyword,
        source_id,
        target,
        amount,
        before,
        after,
    });
    state.log(player, kind);
}
