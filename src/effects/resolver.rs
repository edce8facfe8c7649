//! Effect resolution - applying one `CardEffect` to the game state.
//!
//! `execute_card_effect` runs the fixed pipeline:
//!
//! 1. activation condition (false: no-op, nothing logged)
//! 2. dynamic value, computed once
//! 3. target selection, narrowed by filter rules
//! 4. the action itself, clamped to capacity limits
//! 5. one `effect_trigger` entry with the observed stat deltas
//!
//! Deaths caused here are not resolved here. Creatures at zero health stay
//! on the field until the caller runs the death cascade.

use tracing::debug;

use super::dynamic::effect_value;
use super::effect::{CardEffect, EffectAction, EffectTarget, EffectTrigger};
use super::passive::apply_passive_effects;
use super::targeting::apply_multiple_filters;
use crate::cards::{Card, FieldCard, StatusEffect};
use crate::core::{
    ActionKind, CardBanished, CardDiscarded, CardSummon, DiscardSource, DrawOutcome, EffectTriggered,
    EngineError, GameState, InstanceId, Phase, PlayerId, Result, TargetDelta, TargetDeltas, TargetRef,
};
use crate::effects::FilterRule;
use crate::triggers::process_effect_trigger;

/// What happened to an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The action ran against this many targets (possibly zero).
    Applied { targets: usize },
    /// The activation condition was false.
    Skipped,
}

/// Side products of one resolution.
#[derive(Default)]
struct Resolution {
    deltas: TargetDeltas,
    damaged: Vec<InstanceId>,
    field_changed: bool,
    targets: usize,
}

impl Resolution {
    fn record(&mut self, target: TargetRef, delta: TargetDelta) {
        if !delta.is_empty() {
            self.deltas.insert(target.to_string(), delta);
        }
    }
}

/// Execute one effect owned by `player`, with `source` as the card that
/// carries it.
pub fn execute_card_effect(
    state: &mut GameState,
    effect: &CardEffect,
    source: &Card,
    player: PlayerId,
) -> Result<ResolveOutcome> {
    if let Some(condition) = &effect.activation_condition {
        if !condition.evaluate(state, player) {
            debug!(card = %source.name(), trigger = ?effect.trigger, "activation condition not met");
            return Ok(ResolveOutcome::Skipped);
        }
    }

    let value = effect_value(state, effect, source.instance_id, player);
    let rule_sets = effect.rule_sets()?;
    let mut res = Resolution::default();

    match effect.action {
        EffectAction::Damage
        | EffectAction::Heal
        | EffectAction::BuffAttack
        | EffectAction::BuffHealth
        | EffectAction::DebuffAttack
        | EffectAction::DebuffHealth
        | EffectAction::Silence
        | EffectAction::Stun
        | EffectAction::SwapAttackHealth
        | EffectAction::Ready
        | EffectAction::ApplyBrand
        | EffectAction::Banish => {
            let targets = select_targets(state, effect, &rule_sets, source.instance_id, player);
            res.targets = targets.len();
            for target in targets {
                apply_to_target(state, effect, target, value, &mut res);
            }
        }
        EffectAction::Summon => summon(state, effect, source, affected_player(effect.target, player), value, &mut res)?,
        EffectAction::Resurrect => resurrect(
            state,
            &rule_sets,
            source,
            affected_player(effect.target, player),
            value,
            &mut res,
        ),
        EffectAction::DrawCard => {
            let side = affected_player(effect.target, player);
            for _ in 0..value.max(0) {
                match state.draw_card_logged(side) {
                    DrawOutcome::Drawn(_) => res.targets += 1,
                    DrawOutcome::HandFull | DrawOutcome::DeckEmpty => {
                        debug!(player = %side, "draw effect stopped: hand full or deck empty");
                        break;
                    }
                }
            }
        }
        EffectAction::DestroyDeckTop => {
            let side = affected_player(effect.target, player);
            for _ in 0..value.max(0) {
                let Some(card) = state.player_mut(side).deck.pop() else {
                    debug!(player = %side, "deck empty, nothing to destroy");
                    break;
                };
                discard(state, side, card, DiscardSource::Deck);
                res.targets += 1;
            }
        }
        EffectAction::HandDiscard => {
            let side = affected_player(effect.target, player);
            for _ in 0..value.max(0) {
                let len = state.player(side).hand.len();
                let Some(index) = state.rng.choose_index(len) else {
                    break;
                };
                let card = state.player_mut(side).hand.remove(index);
                discard(state, side, card, DiscardSource::Hand);
                res.targets += 1;
            }
        }
        EffectAction::DestroyAllCreatures => {
            let ids = filtered_creatures(state, &[player, player.opponent()], false, &rule_sets, source.instance_id);
            res.targets = ids.len();
            for id in ids {
                if let Some(creature) = state.find_creature_mut(id) {
                    let before = (creature.attack(), creature.current_health);
                    creature.current_health = creature.current_health.min(0);
                    let after = (creature.attack(), creature.current_health);
                    res.record(TargetRef::Creature(id), TargetDelta::creature(before, after));
                }
            }
        }
    }

    let kind = ActionKind::EffectTrigger(EffectTriggered {
        source_id: source.instance_id,
        source_name: source.name().to_string(),
        trigger: effect.trigger,
        action: effect.action,
        value,
        targets: std::mem::take(&mut res.deltas),
    });
    state.log(player, kind);

    if res.field_changed {
        apply_passive_effects(state)?;
    }

    for id in dedup(res.damaged) {
        let Some(creature) = state.find_creature(id).filter(|c| c.is_alive()) else {
            continue;
        };
        let card = creature.card.clone();
        let owner = creature.owner;
        process_effect_trigger(state, EffectTrigger::OnDamageTaken, Some(&card), owner)?;
    }

    Ok(ResolveOutcome::Applied { targets: res.targets })
}

/// The player a player-level action lands on.
fn affected_player(target: EffectTarget, player: PlayerId) -> PlayerId {
    match target {
        EffectTarget::EnemyPlayer | EffectTarget::EnemyAll | EffectTarget::EnemyRandom => player.opponent(),
        _ => player,
    }
}

fn select_targets(
    state: &mut GameState,
    effect: &CardEffect,
    rule_sets: &[Vec<FilterRule>],
    source_id: InstanceId,
    player: PlayerId,
) -> Vec<TargetRef> {
    let opponent = player.opponent();
    let creatures = match effect.target {
        EffectTarget::Player => return vec![TargetRef::Player(player)],
        EffectTarget::EnemyPlayer => return vec![TargetRef::Player(opponent)],
        EffectTarget::SelfCard => {
            return state
                .find_creature(source_id)
                .filter(|c| c.is_alive())
                .map(|c| vec![TargetRef::Creature(c.id())])
                .unwrap_or_default();
        }
        EffectTarget::AllyAll => filtered_creatures(state, &[player], false, rule_sets, source_id),
        EffectTarget::EnemyAll => filtered_creatures(state, &[opponent], false, rule_sets, source_id),
        EffectTarget::All => filtered_creatures(state, &[player, opponent], false, rule_sets, source_id),
        EffectTarget::AllyRandom => {
            let pool = filtered_creatures(state, &[player], false, rule_sets, source_id);
            pick_random(state, pool, effect.random_count)
        }
        EffectTarget::EnemyRandom => {
            let pool = filtered_creatures(state, &[opponent], true, rule_sets, source_id);
            pick_random(state, pool, effect.random_count)
        }
    };
    creatures.into_iter().map(TargetRef::Creature).collect()
}

/// Living creatures on `sides`, in side then position order, that pass
/// every rule set.
fn filtered_creatures(
    state: &GameState,
    sides: &[PlayerId],
    skip_stealthed: bool,
    rule_sets: &[Vec<FilterRule>],
    source_id: InstanceId,
) -> Vec<InstanceId> {
    let pool: Vec<&FieldCard> = sides
        .iter()
        .flat_map(|side| state.player(*side).living())
        .filter(|c| !skip_stealthed || !c.is_stealthed)
        .collect();
    apply_multiple_filters(pool, rule_sets, Some(source_id))
        .into_iter()
        .map(|c| c.id())
        .collect()
}

/// Up to `count` distinct picks.
fn pick_random(state: &mut GameState, mut pool: Vec<InstanceId>, count: usize) -> Vec<InstanceId> {
    let mut picked = Vec::with_capacity(count.min(pool.len()));
    for _ in 0..count {
        match state.rng.choose_index(pool.len()) {
            Some(index) => picked.push(pool.remove(index)),
            None => break,
        }
    }
    picked
}

fn apply_to_target(state: &mut GameState, effect: &CardEffect, target: TargetRef, value: i32, res: &mut Resolution) {
    let id = match target {
        TargetRef::Player(side) => {
            let (before, after) = match effect.action {
                EffectAction::Damage => state.damage_player(side, value),
                EffectAction::Heal => state.heal_player(side, value),
                _ => {
                    debug!(action = ?effect.action, "creature-only action aimed at a player");
                    return;
                }
            };
            res.record(target, TargetDelta::life(before, after));
            return;
        }
        TargetRef::Creature(id) => id,
    };

    if effect.action == EffectAction::Banish {
        banish(state, id, res);
        return;
    }

    let phase = state.phase;
    let current = state.current_player;
    let turn = state.turn_number;
    let Some(creature) = state.find_creature_mut(id) else {
        return;
    };
    let before = (creature.attack(), creature.current_health);

    match effect.action {
        EffectAction::Damage => {
            let amount = value.max(0);
            creature.current_health -= amount;
            if amount > 0 {
                res.damaged.push(id);
            }
        }
        EffectAction::Heal => {
            let max = creature.max_health();
            if creature.current_health < max {
                creature.current_health = (creature.current_health + value.max(0)).min(max);
            }
        }
        EffectAction::BuffAttack => creature.attack_modifier += value,
        EffectAction::DebuffAttack => creature.attack_modifier -= value,
        EffectAction::BuffHealth => {
            creature.health_modifier += value;
            creature.current_health += value;
            creature.clamp_health();
        }
        EffectAction::DebuffHealth => {
            creature.health_modifier -= value;
            creature.current_health -= value;
            creature.clamp_health();
        }
        EffectAction::Silence => {
            if !creature.is_silenced {
                creature.is_silenced = true;
                creature.is_stealthed = false;
                res.field_changed = true;
            }
        }
        EffectAction::Stun => {
            let turns = effect.duration.unwrap_or(1).max(1);
            let existing = creature
                .status_effects
                .iter_mut()
                .find_map(|s| match s {
                    StatusEffect::Stun { duration } => Some(duration),
                    _ => None,
                });
            match existing {
                Some(duration) => *duration = (*duration).max(turns),
                None => creature.status_effects.push(StatusEffect::Stun { duration: turns }),
            }
        }
        EffectAction::SwapAttackHealth => {
            let raw_attack =
                creature.template().attack + creature.attack_modifier + creature.passive_attack_modifier;
            let (attack, health) = (creature.attack(), creature.current_health);
            creature.attack_modifier += health - raw_attack;
            creature.health_modifier += attack - creature.max_health();
            creature.current_health = attack;
        }
        EffectAction::Ready => {
            if creature.readied_this_turn {
                debug!(card = %creature.name(), "already readied this turn");
            } else {
                creature.readied_this_turn = true;
                creature.has_attacked = false;
                let requeue = phase == Phase::BattleAttack && creature.owner == current && creature.can_attack(turn);
                if requeue && !state.attack_queue.contains(&id) {
                    state.attack_queue.push(id);
                }
                return;
            }
        }
        EffectAction::ApplyBrand => {
            if !creature.is_branded() {
                creature.status_effects.push(StatusEffect::Branded);
            }
        }
        EffectAction::Summon
        | EffectAction::DrawCard
        | EffectAction::Resurrect
        | EffectAction::DestroyDeckTop
        | EffectAction::HandDiscard
        | EffectAction::DestroyAllCreatures
        | EffectAction::Banish => {}
    }

    let after = (creature.attack(), creature.current_health);
    res.record(target, TargetDelta::creature(before, after));
}

fn banish(state: &mut GameState, id: InstanceId, res: &mut Resolution) {
    let Some(creature) = state.take_creature(id) else {
        return;
    };
    let owner = creature.owner;
    let kind = ActionKind::CardBanished(CardBanished {
        instance_id: id,
        owner,
        card_snapshot: creature.snapshot(),
    });
    state.log(owner, kind);
    state.player_mut(owner).banished_cards.push(creature.into_card());
    state.attack_queue.retain(|queued| *queued != id);
    res.field_changed = true;
}

fn summon(
    state: &mut GameState,
    effect: &CardEffect,
    source: &Card,
    side: PlayerId,
    count: i32,
    res: &mut Resolution,
) -> Result<()> {
    let template_id = effect
        .summon
        .as_ref()
        .ok_or_else(|| EngineError::malformed(source.template.template_id.as_str(), "summon effect names no template"))?;
    let limit = state.config.field_limit;

    for _ in 0..count.max(0) {
        if state.player(side).free_position(limit).is_none() {
            debug!(player = %side, template = %template_id, "field full, summon skipped");
            break;
        }
        let card = state.create_card(template_id)?;
        let Ok(id) = state.place_creature(side, card) else {
            break;
        };
        log_summon(state, side, source.instance_id, id);
        res.targets += 1;
        res.field_changed = true;
    }
    Ok(())
}

/// Return the most recent matching creatures from a graveyard to the field.
fn resurrect(
    state: &mut GameState,
    rule_sets: &[Vec<FilterRule>],
    source: &Card,
    side: PlayerId,
    count: i32,
    res: &mut Resolution,
) {
    let limit = state.config.field_limit;

    for _ in 0..count.max(0) {
        if state.player(side).free_position(limit).is_none() {
            debug!(player = %side, "field full, resurrect skipped");
            break;
        }
        let pick = {
            let candidates: Vec<&Card> = state
                .player(side)
                .graveyard
                .iter()
                .rev()
                .filter(|c| c.is_creature())
                .collect();
            apply_multiple_filters(candidates, rule_sets, Some(source.instance_id))
                .first()
                .map(|c| c.instance_id)
        };
        let Some(id) = pick else {
            break;
        };
        let graveyard = &mut state.player_mut(side).graveyard;
        let Some(index) = graveyard.iter().position(|c| c.instance_id == id) else {
            break;
        };
        let card = graveyard.remove(index);
        if state.place_creature(side, card).is_err() {
            break;
        }
        log_summon(state, side, source.instance_id, id);
        res.targets += 1;
        res.field_changed = true;
    }
}

fn log_summon(state: &mut GameState, side: PlayerId, source_id: InstanceId, id: InstanceId) {
    if let Some(snapshot) = state.find_creature(id).map(FieldCard::snapshot) {
        let kind = ActionKind::CardSummon(CardSummon {
            source_id: Some(source_id),
            card: snapshot,
        });
        state.log(side, kind);
    }
}

fn discard(state: &mut GameState, owner: PlayerId, card: Card, from: DiscardSource) {
    let kind = ActionKind::CardDiscarded(CardDiscarded {
        instance_id: card.instance_id,
        template_id: card.template.template_id.clone(),
        owner,
        from,
    });
    state.log(owner, kind);
    state.player_mut(owner).graveyard.push(card);
}

fn dedup(mut ids: Vec<InstanceId>) -> Vec<InstanceId> {
    let mut seen = Vec::with_capacity(ids.len());
    ids.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(*id);
            true
        }
    });
    ids
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardRegistry, CardTemplate, Faction, Keyword, TemplateId};
    use crate::core::{EngineConfig, ActionLog};
    use crate::effects::{BrandOp, DynamicSource, DynamicValue};

    fn registry() -> Arc<CardRegistry> {
        let mut registry = CardRegistry::new();
        registry
            .register(CardTemplate::creature("imp", "Imp", Faction::Neutral, 1, 1, 1))
            .unwrap();
        registry
            .register(CardTemplate::creature("ogre", "Ogre", Faction::Berserker, 4, 4, 5))
            .unwrap();
        registry
            .register(CardTemplate::creature("wall", "Wall", Faction::Knight, 2, 0, 4).with_keyword(Keyword::Guard))
            .unwrap();
        registry
            .register(CardTemplate::spell("bolt", "Bolt", Faction::Mage, 1))
            .unwrap();
        Arc::new(registry)
    }

    fn state() -> GameState {
        GameState::new("g", "resolver", EngineConfig::deterministic(), registry())
    }

    fn put(state: &mut GameState, player: PlayerId, template: &str) -> InstanceId {
        let card = state.create_card(&TemplateId::new(template)).unwrap();
        state.place_creature(player, card).unwrap()
    }

    fn spell(state: &mut GameState) -> Card {
        state.create_card(&TemplateId::new("bolt")).unwrap()
    }

    fn last_effect(log: &ActionLog) -> EffectTriggered {
        log.iter()
            .rev()
            .find_map(|a| match &a.kind {
                ActionKind::EffectTrigger(e) => Some(e.clone()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_damage_creature_logs_delta() {
        let mut state = state();
        let ogre = put(&mut state, PlayerId::Player2, "ogre");
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Damage, EffectTarget::EnemyAll, 2);

        let outcome = execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert_eq!(outcome, ResolveOutcome::Applied { targets: 1 });
        assert_eq!(state.find_creature(ogre).unwrap().current_health, 3);

        let logged = last_effect(&state.action_log);
        let delta = &logged.targets[&ogre.to_string()];
        assert_eq!(delta.health_before, Some(5));
        assert_eq!(delta.health_after, Some(3));
        assert_eq!(delta.attack_before, None);
    }

    #[test]
    fn test_lethal_damage_leaves_corpse_for_cascade() {
        let mut state = state();
        let imp = put(&mut state, PlayerId::Player2, "imp");
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Damage, EffectTarget::EnemyAll, 2);

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert!(state.find_creature(imp).unwrap().current_health <= 0);
    }

    #[test]
    fn test_failed_condition_is_silent() {
        use crate::triggers::{ActivationCondition, CompareOp, ConditionSubject};

        let mut state = state();
        put(&mut state, PlayerId::Player2, "ogre");
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Damage, EffectTarget::EnemyAll, 2)
            .with_condition(ActivationCondition::new(ConditionSubject::PlayerLife, CompareOp::Lt, 5));

        let outcome = execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert_eq!(outcome, ResolveOutcome::Skipped);
        assert!(state.action_log.is_empty());
    }

    #[test]
    fn test_no_change_still_logs_once() {
        let mut state = state();
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Heal, EffectTarget::Player, 3);

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert_eq!(state.action_log.len(), 1);
        assert!(last_effect(&state.action_log).targets.is_empty());
    }

    #[test]
    fn test_summon_respects_field_limit() {
        let mut state = state();
        for _ in 0..4 {
            put(&mut state, PlayerId::Player1, "imp");
        }
        let source = spell(&mut state);
        let effect = CardEffect::summon(EffectTrigger::OnPlay, "imp", 3);

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert_eq!(state.player(PlayerId::Player1).field.len(), 5);
        assert_eq!(state.action_log.count_of("card_summon"), 1);

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert_eq!(state.player(PlayerId::Player1).field.len(), 5);
    }

    #[test]
    fn test_draw_respects_hand_limit() {
        let mut state = state();
        for _ in 0..7 {
            let card = state.create_card(&TemplateId::new("imp")).unwrap();
            state.player_mut(PlayerId::Player1).hand.push(card);
            let card = state.create_card(&TemplateId::new("imp")).unwrap();
            state.player_mut(PlayerId::Player1).deck.push(card);
        }
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::DrawCard, EffectTarget::Player, 2);

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert_eq!(state.player(PlayerId::Player1).hand.len(), 7);
        assert_eq!(state.player(PlayerId::Player1).deck.len(), 7);
    }

    #[test]
    fn test_buff_health_raises_current() {
        let mut state = state();
        let ogre = put(&mut state, PlayerId::Player1, "ogre");
        state.find_creature_mut(ogre).unwrap().current_health = 2;
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::BuffHealth, EffectTarget::AllyAll, 2);

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        let ogre = state.find_creature(ogre).unwrap();
        assert_eq!(ogre.current_health, 4);
        assert_eq!(ogre.max_health(), 7);
    }

    #[test]
    fn test_swap_attack_health() {
        let mut state = state();
        let ogre = put(&mut state, PlayerId::Player2, "ogre");
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::SwapAttackHealth, EffectTarget::EnemyAll, 0);

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        let ogre = state.find_creature(ogre).unwrap();
        assert_eq!(ogre.attack(), 5);
        assert_eq!(ogre.current_health, 4);
        assert_eq!(ogre.max_health(), 4);
    }

    #[test]
    fn test_silence_and_stun() {
        let mut state = state();
        let wall = put(&mut state, PlayerId::Player2, "wall");
        let source = spell(&mut state);

        let silence = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Silence, EffectTarget::EnemyAll, 0);
        execute_card_effect(&mut state, &silence, &source, PlayerId::Player1).unwrap();
        assert!(!state.find_creature(wall).unwrap().has_keyword(Keyword::Guard));

        let stun = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Stun, EffectTarget::EnemyAll, 0).with_duration(2);
        execute_card_effect(&mut state, &stun, &source, PlayerId::Player1).unwrap();
        execute_card_effect(&mut state, &stun, &source, PlayerId::Player1).unwrap();
        let wall = state.find_creature(wall).unwrap();
        assert_eq!(wall.status_effects.as_slice(), &[StatusEffect::Stun { duration: 2 }]);
    }

    #[test]
    fn test_brand_filter_targets() {
        let mut state = state();
        let a = put(&mut state, PlayerId::Player2, "ogre");
        let b = put(&mut state, PlayerId::Player2, "ogre");
        state.find_creature_mut(b).unwrap().status_effects.push(StatusEffect::Branded);
        let source = spell(&mut state);

        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Damage, EffectTarget::EnemyAll, 3)
            .with_rule(FilterRule::Brand { op: BrandOp::Has });
        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();

        assert_eq!(state.find_creature(a).unwrap().current_health, 5);
        assert_eq!(state.find_creature(b).unwrap().current_health, 2);
    }

    #[test]
    fn test_dynamic_damage_to_enemy_player() {
        let mut state = state();
        put(&mut state, PlayerId::Player1, "imp");
        put(&mut state, PlayerId::Player1, "imp");
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Damage, EffectTarget::EnemyPlayer, 0)
            .with_dynamic(DynamicValue::count(DynamicSource::Field).times(2));

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert_eq!(state.player(PlayerId::Player2).life, 11);
        let logged = last_effect(&state.action_log);
        assert_eq!(logged.value, 4);
        assert_eq!(logged.targets["player2"].life_after, Some(11));
    }

    #[test]
    fn test_enemy_random_skips_stealthed() {
        let mut state = state();
        let visible = put(&mut state, PlayerId::Player2, "ogre");
        let hidden = put(&mut state, PlayerId::Player2, "ogre");
        state.find_creature_mut(hidden).unwrap().is_stealthed = true;
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Damage, EffectTarget::EnemyRandom, 1);

        for _ in 0..4 {
            execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        }
        assert_eq!(state.find_creature(visible).unwrap().current_health, 1);
        assert_eq!(state.find_creature(hidden).unwrap().current_health, 5);
    }

    #[test]
    fn test_banish_skips_graveyard() {
        let mut state = state();
        let ogre = put(&mut state, PlayerId::Player2, "ogre");
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Banish, EffectTarget::EnemyAll, 0);

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        let enemy = state.player(PlayerId::Player2);
        assert!(enemy.field.is_empty());
        assert!(enemy.graveyard.is_empty());
        assert_eq!(enemy.banished_cards[0].instance_id, ogre);
        assert_eq!(state.action_log.count_of("card_banished"), 1);
        assert_eq!(state.action_log.count_of("creature_destroyed"), 0);
    }

    #[test]
    fn test_resurrect_most_recent_creature() {
        let mut state = state();
        let imp = state.create_card(&TemplateId::new("imp")).unwrap();
        let ogre = state.create_card(&TemplateId::new("ogre")).unwrap();
        let ogre_id = ogre.instance_id;
        let bolt = spell(&mut state);
        state.player_mut(PlayerId::Player1).graveyard = vec![imp, ogre, bolt];
        let source = spell(&mut state);

        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Resurrect, EffectTarget::Player, 1);
        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();

        let me = state.player(PlayerId::Player1);
        assert_eq!(me.field.len(), 1);
        assert_eq!(me.field[0].id(), ogre_id);
        assert_eq!(me.field[0].current_health, 5);
        assert_eq!(me.graveyard.len(), 2);
    }

    #[test]
    fn test_deck_top_and_discard() {
        let mut state = state();
        for _ in 0..3 {
            let card = state.create_card(&TemplateId::new("imp")).unwrap();
            state.player_mut(PlayerId::Player2).deck.push(card);
        }
        let card = state.create_card(&TemplateId::new("imp")).unwrap();
        state.player_mut(PlayerId::Player2).hand.push(card);
        let source = spell(&mut state);

        let burn = CardEffect::new(EffectTrigger::OnPlay, EffectAction::DestroyDeckTop, EffectTarget::EnemyPlayer, 5);
        execute_card_effect(&mut state, &burn, &source, PlayerId::Player1).unwrap();
        let discard = CardEffect::new(EffectTrigger::OnPlay, EffectAction::HandDiscard, EffectTarget::EnemyPlayer, 2);
        execute_card_effect(&mut state, &discard, &source, PlayerId::Player1).unwrap();

        let enemy = state.player(PlayerId::Player2);
        assert!(enemy.deck.is_empty());
        assert!(enemy.hand.is_empty());
        assert_eq!(enemy.graveyard.len(), 4);
        assert_eq!(state.action_log.count_of("card_discarded"), 4);
    }

    #[test]
    fn test_ready_once_per_turn() {
        let mut state = state();
        let ogre = put(&mut state, PlayerId::Player1, "ogre");
        state.find_creature_mut(ogre).unwrap().has_attacked = true;
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Ready, EffectTarget::AllyAll, 0);

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        let creature = state.find_creature(ogre).unwrap();
        assert!(!creature.has_attacked);
        assert!(creature.readied_this_turn);
        assert!(creature.can_attack(state.turn_number));

        state.find_creature_mut(ogre).unwrap().has_attacked = true;
        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert!(state.find_creature(ogre).unwrap().has_attacked);
    }

    #[test]
    fn test_destroy_all_with_filter() {
        let mut state = state();
        let imp = put(&mut state, PlayerId::Player1, "imp");
        let ogre = put(&mut state, PlayerId::Player2, "ogre");
        let source = spell(&mut state);
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::DestroyAllCreatures, EffectTarget::All, 0)
            .with_rule(FilterRule::cost_range(3, 10));

        execute_card_effect(&mut state, &effect, &source, PlayerId::Player1).unwrap();
        assert!(state.find_creature(imp).unwrap().is_alive());
        assert!(!state.find_creature(ogre).unwrap().is_alive());
    }
}
