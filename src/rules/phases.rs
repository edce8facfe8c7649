//! Per-phase work.
//!
//! Each function performs the entry actions of one phase for the current
//! player. None of them moves `state.phase`; the engine does that.

use tracing::debug;

use super::tactics::choose_card;
use crate::combat::{decrement_stuns, resolve_attack, resolve_deaths, tick_poison};
use crate::core::{
    ActionKind, CardPlay, CombatStage, DrawOutcome, DrawSkipReason, DrawSkipped, EnergyUpdate, Fatigue, GameState,
    PlayerId, Result,
};
use crate::effects::{apply_passive_effects, EffectTrigger};
use crate::triggers::process_effect_trigger;

/// Turn start: `turn_start` effects, poison, then one draw.
pub fn run_draw(state: &mut GameState) -> Result<()> {
    let player = state.current_player;

    process_effect_trigger(state, EffectTrigger::TurnStart, None, player)?;
    resolve_deaths(state)?;
    tick_poison(state, player)?;
    resolve_deaths(state)?;

    match state.draw_card_logged(player) {
        DrawOutcome::Drawn(_) => {}
        DrawOutcome::HandFull => {
            debug!(%player, "hand full, card stays in deck");
            state.log(player, ActionKind::DrawSkipped(DrawSkipped { reason: DrawSkipReason::HandFull }));
        }
        DrawOutcome::DeckEmpty => {
            state.log(player, ActionKind::DrawSkipped(DrawSkipped { reason: DrawSkipReason::DeckEmpty }));
            if state.config.fatigue {
                apply_fatigue(state, player);
            }
        }
    }
    Ok(())
}

fn apply_fatigue(state: &mut GameState, player: PlayerId) {
    let damage = {
        let seat = state.player_mut(player);
        seat.fatigue += 1;
        seat.fatigue
    };
    let (life_before, life_after) = state.damage_player(player, damage);
    debug!(%player, damage, "fatigue");
    state.log(
        player,
        ActionKind::Fatigue(Fatigue {
            damage,
            life_before,
            life_after,
        }),
    );
}

/// Raise max energy by one (up to the cap) and refill.
pub fn run_energy(state: &mut GameState) {
    let player = state.current_player;
    let cap = state.config.energy_cap;
    let seat = state.player_mut(player);
    let before = seat.max_energy;
    seat.max_energy = (before + 1).min(cap);
    seat.energy = seat.max_energy;
    let (after, energy) = (seat.max_energy, seat.energy);

    if after != before {
        state.log(
            player,
            ActionKind::EnergyUpdate(EnergyUpdate {
                max_energy_before: before,
                max_energy_after: after,
                energy,
            }),
        );
    }
}

/// Play cards until nothing playable remains.
pub fn run_deploy(state: &mut GameState) -> Result<()> {
    let player = state.current_player;
    while let Some(index) = choose_card(state, player) {
        play_card(state, player, index)?;
    }
    Ok(())
}

/// Play the card at `index` of `player`'s hand.
///
/// The caller checks playability; an unplayable card is left in hand with
/// its energy unspent. A creature is placed before it leaves the hand.
pub fn play_card(state: &mut GameState, player: PlayerId, index: usize) -> Result<()> {
    let limit = state.config.field_limit;
    let seat = state.player_mut(player);
    if index >= seat.hand.len() {
        return Ok(());
    }
    let cost = seat.hand[index].template.cost;
    if cost > seat.energy {
        return Ok(());
    }
    if seat.hand[index].is_creature() && seat.free_position(limit).is_none() {
        return Ok(());
    }

    let card = seat.hand[index].clone();
    let placed = if card.is_creature() {
        match state.place_creature(player, card.clone()) {
            Ok(id) => Some(id),
            Err(_) => return Ok(()),
        }
    } else {
        None
    };

    let seat = state.player_mut(player);
    seat.hand.remove(index);
    let energy_before = seat.energy;
    seat.energy -= cost;
    let energy_after = seat.energy;
    let template = card.template.clone();
    debug!(%player, card = %template.name, cost, "play");

    if let Some(id) = placed {
        let field_card = state.find_creature(id);
        let kind = ActionKind::CardPlay(CardPlay {
            instance_id: id,
            template_id: template.template_id.clone(),
            name: template.name.clone(),
            card_type: template.card_type,
            cost,
            energy_before,
            energy_after,
            position: field_card.map(|c| c.position),
            card: field_card.map(|c| c.snapshot()),
        });
        state.log(player, kind);
        apply_passive_effects(state)?;
        process_effect_trigger(state, EffectTrigger::OnPlay, Some(&card), player)?;
    } else {
        let kind = ActionKind::CardPlay(CardPlay {
            instance_id: card.instance_id,
            template_id: template.template_id.clone(),
            name: template.name.clone(),
            card_type: template.card_type,
            cost,
            energy_before,
            energy_after,
            position: None,
            card: None,
        });
        state.log(player, kind);
        process_effect_trigger(state, EffectTrigger::OnPlay, Some(&card), player)?;
        process_effect_trigger(state, EffectTrigger::OnSpellPlay, Some(&card), player)?;
        state.player_mut(player).graveyard.push(card);
    }

    resolve_deaths(state)?;
    Ok(())
}

/// Queue this turn's attackers.
pub fn run_battle(state: &mut GameState) {
    let player = state.current_player;
    let turn = state.turn_number;
    let attackers: Vec<_> = state
        .player(player)
        .living()
        .filter(|c| c.can_attack(turn))
        .map(|c| c.id())
        .collect();

    state.attack_queue.clone_from(&attackers);
    state.log(player, ActionKind::CombatStage(CombatStage { attackers }));
}

/// Resolve the next queued attacker.
pub fn run_battle_attack(state: &mut GameState) -> Result<()> {
    if state.attack_queue.is_empty() {
        return Ok(());
    }
    let attacker = state.attack_queue.remove(0);
    resolve_attack(state, attacker)?;
    Ok(())
}

/// Turn end: `turn_end` effects, stun countdown, flag cleanup.
pub fn run_end(state: &mut GameState) -> Result<()> {
    let player = state.current_player;

    process_effect_trigger(state, EffectTrigger::TurnEnd, None, player)?;
    resolve_deaths(state)?;
    decrement_stuns(state, player);

    for side in PlayerId::ALL {
        for creature in &mut state.player_mut(side).field {
            creature.has_attacked = false;
            creature.readied_this_turn = false;
        }
    }
    state.attack_queue.clear();
    Ok(())
}
