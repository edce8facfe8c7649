//! Combat integration tests.
//!
//! Target selection, keywords and the death cascade, exercised on small
//! hand-built boards.

mod common;

use std::collections::HashSet;

use card_duel::cards::{CardTemplate, Faction, Keyword, StatusEffect};
use card_duel::combat::{resolve_attack, tick_poison, AttackOutcome};
use card_duel::core::{ActionKind, Phase, PlayerId, TargetRef};
use card_duel::effects::{CardEffect, EffectAction, EffectTarget, EffectTrigger};
use card_duel::rules::process_game_step;

use common::{board, field, registry_of};

const P1: PlayerId = PlayerId::Player1;
const P2: PlayerId = PlayerId::Player2;

fn bestiary() -> std::sync::Arc<card_duel::cards::CardRegistry> {
    let n = Faction::Neutral;
    registry_of(vec![
        CardTemplate::creature("brute", "Brute", n, 3, 3, 3),
        CardTemplate::creature("wall", "Wall", n, 2, 0, 4).with_keyword(Keyword::Guard),
        CardTemplate::creature("rat", "Rat", n, 1, 1, 2),
        CardTemplate::creature("shade", "Shade", n, 2, 2, 2).with_keyword(Keyword::Stealth),
        CardTemplate::creature("stomper", "Stomper", n, 5, 5, 5).with_keyword(Keyword::Trample),
        CardTemplate::creature("leech", "Leech", n, 3, 3, 3).with_keyword(Keyword::Lifesteal),
        CardTemplate::creature("thorn", "Thorn", n, 2, 1, 6).with_keyword(Keyword::Retaliate),
        CardTemplate::creature("viper", "Viper", n, 2, 1, 2).with_keyword(Keyword::Poison),
        CardTemplate::creature("martyr", "Martyr", n, 1, 1, 1)
            .with_effect(CardEffect::new(EffectTrigger::OnDeath, EffectAction::Damage, EffectTarget::EnemyPlayer, 2)),
        CardTemplate::creature("mourner", "Mourner", n, 2, 1, 4).with_effect(CardEffect::new(
            EffectTrigger::OnAllyDeath,
            EffectAction::BuffAttack,
            EffectTarget::SelfCard,
            1,
        )),
        CardTemplate::creature("zealot", "Zealot", n, 3, 3, 3).with_effect(CardEffect::new(
            EffectTrigger::OnAttack,
            EffectAction::Ready,
            EffectTarget::SelfCard,
            0,
        )),
    ])
}

fn target_of(outcome: AttackOutcome) -> TargetRef {
    match outcome {
        AttackOutcome::Resolved { target, .. } => target,
        other => panic!("attack did not resolve: {other:?}"),
    }
}

/// A visible guard always absorbs the attack, whatever the seed.
#[test]
fn test_guard_priority_across_seeds() {
    for i in 0..50 {
        let mut state = board(&format!("guard-{i}"), bestiary());
        let brute = field(&mut state, P1, "brute");
        field(&mut state, P2, "rat");
        let wall = field(&mut state, P2, "wall");
        field(&mut state, P2, "rat");

        let outcome = resolve_attack(&mut state, brute).unwrap();
        assert_eq!(target_of(outcome), TargetRef::Creature(wall), "seed guard-{i}");
    }
}

/// Between two guards the choice is random, not first-in-line.
#[test]
fn test_guard_tie_break_hits_both() {
    let mut hit = HashSet::new();
    for i in 0..100 {
        let mut state = board(&format!("tie-{i}"), bestiary());
        let brute = field(&mut state, P1, "brute");
        field(&mut state, P2, "wall");
        field(&mut state, P2, "wall");

        let outcome = resolve_attack(&mut state, brute).unwrap();
        let position = target_of(outcome)
            .as_creature()
            .and_then(|id| state.find_creature(id))
            .map(|c| c.position)
            .unwrap();
        hit.insert(position);
    }
    assert_eq!(hit.len(), 2);
}

/// The same seed picks the same guard.
#[test]
fn test_guard_choice_is_reproducible() {
    let pick = || {
        let mut state = board("repeat", bestiary());
        let brute = field(&mut state, P1, "brute");
        field(&mut state, P2, "wall");
        field(&mut state, P2, "wall");
        field(&mut state, P2, "wall");
        target_of(resolve_attack(&mut state, brute).unwrap())
    };
    assert_eq!(pick(), pick());
}

/// Stealthed creatures cannot be attacked; with nothing else visible the
/// attack goes face.
#[test]
fn test_stealth_sends_attack_face() {
    let mut state = board("stealth", bestiary());
    let brute = field(&mut state, P1, "brute");
    let shade = field(&mut state, P2, "shade");

    let outcome = resolve_attack(&mut state, brute).unwrap();
    assert_eq!(target_of(outcome), TargetRef::Player(P2));
    assert_eq!(state.player(P2).life, 12);
    assert_eq!(state.find_creature(shade).unwrap().current_health, 2);
}

/// Attacking reveals a stealthed attacker.
#[test]
fn test_attacking_breaks_stealth() {
    let mut state = board("reveal", bestiary());
    let shade = field(&mut state, P1, "shade");
    resolve_attack(&mut state, shade).unwrap();
    assert!(!state.find_creature(shade).unwrap().is_stealthed);
}

/// A creature reduced to zero leaves the field for the graveyard and is
/// logged with its final stats.
#[test]
fn test_lethal_attack_removes_creature() {
    let mut state = board("lethal", bestiary());
    let brute = field(&mut state, P1, "brute");
    let rat = field(&mut state, P2, "rat");

    resolve_attack(&mut state, brute).unwrap();
    assert!(state.find_creature(rat).is_none());
    assert_eq!(state.player(P2).graveyard.len(), 1);
    assert_eq!(state.player(P2).graveyard[0].instance_id, rat);

    let destroyed = state
        .action_log
        .iter()
        .find_map(|a| match &a.kind {
            ActionKind::CreatureDestroyed(d) => Some(d.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(destroyed.card_snapshot.instance_id, rat);
    assert!(destroyed.card_snapshot.health <= 0);
}

/// Death triggers fire: the dying card's `on_death`, then allies'
/// `on_ally_death`.
#[test]
fn test_death_cascade_triggers() {
    let mut state = board("cascade", bestiary());
    let brute = field(&mut state, P1, "brute");
    field(&mut state, P2, "martyr");
    let mourner = field(&mut state, P2, "mourner");
    state.find_creature_mut(mourner).unwrap().is_stealthed = true;

    resolve_attack(&mut state, brute).unwrap();
    assert_eq!(state.player(P1).life, 13);
    assert_eq!(state.find_creature(mourner).unwrap().attack(), 2);
}

/// Trample carries the overflow past a dying blocker.
#[test]
fn test_trample_overflow() {
    let mut state = board("trample", bestiary());
    let stomper = field(&mut state, P1, "stomper");
    field(&mut state, P2, "rat");

    resolve_attack(&mut state, stomper).unwrap();
    assert_eq!(state.player(P2).life, 12);
    assert_eq!(state.action_log.count_of("keyword_trigger"), 1);
}

/// Lifesteal heals by damage dealt, never past max life.
#[test]
fn test_lifesteal() {
    let mut state = board("lifesteal", bestiary());
    let leech = field(&mut state, P1, "leech");
    state.player_mut(P1).life = 10;

    resolve_attack(&mut state, leech).unwrap();
    assert_eq!(state.player(P1).life, 13);
    assert_eq!(state.player(P2).life, 12);

    state.find_creature_mut(leech).unwrap().has_attacked = false;
    state.player_mut(P1).life = 14;
    resolve_attack(&mut state, leech).unwrap();
    assert_eq!(state.player(P1).life, 15);
}

/// Retaliate returns half the damage taken, rounded down.
#[test]
fn test_retaliate_half_rounded_down() {
    let mut state = board("retaliate", bestiary());
    let brute = field(&mut state, P1, "brute");
    let thorn = field(&mut state, P2, "thorn");

    resolve_attack(&mut state, brute).unwrap();
    assert_eq!(state.find_creature(thorn).unwrap().current_health, 3);
    assert_eq!(state.find_creature(brute).unwrap().current_health, 2);
}

/// Poison sticks to a surviving defender and ticks on its owner's turn.
#[test]
fn test_poison_applies_and_ticks() {
    let mut state = board("poison", bestiary());
    let viper = field(&mut state, P1, "viper");
    let thorn = field(&mut state, P2, "thorn");

    resolve_attack(&mut state, viper).unwrap();
    let defender = state.find_creature(thorn).unwrap();
    assert_eq!(defender.current_health, 5);
    assert!(defender
        .status_effects
        .iter()
        .any(|s| matches!(s, StatusEffect::Poison { .. })));

    tick_poison(&mut state, P2).unwrap();
    tick_poison(&mut state, P2).unwrap();
    tick_poison(&mut state, P2).unwrap();
    let defender = state.find_creature(thorn).unwrap();
    assert_eq!(defender.current_health, 3);
    assert!(defender.status_effects.is_empty());
    assert_eq!(state.action_log.count_of("status_tick"), 2);
}

/// A creature that already attacked this turn is skipped.
#[test]
fn test_no_double_attack() {
    let mut state = board("double", bestiary());
    let brute = field(&mut state, P1, "brute");
    resolve_attack(&mut state, brute).unwrap();
    assert_eq!(resolve_attack(&mut state, brute).unwrap(), AttackOutcome::Skipped);
    assert_eq!(state.player(P2).life, 12);
}

/// A creature readied mid-battle goes back in the queue and strikes again,
/// but only once per turn.
#[test]
fn test_ready_during_battle_requeues_attacker() {
    let mut state = board("requeue", bestiary());
    let zealot = field(&mut state, P1, "zealot");
    state.phase = Phase::Battle;

    let state = process_game_step(state).unwrap();
    assert_eq!(state.attack_queue, vec![zealot]);
    assert_eq!(state.phase, Phase::BattleAttack);

    let state = process_game_step(state).unwrap();
    assert_eq!(state.attack_queue, vec![zealot]);
    assert_eq!(state.phase, Phase::BattleAttack);
    assert_eq!(state.player(P2).life, 12);

    let state = process_game_step(state).unwrap();
    assert!(state.attack_queue.is_empty());
    assert_eq!(state.phase, Phase::End);
    assert_eq!(state.player(P2).life, 9);
    assert_eq!(state.action_log.count_of("card_attack"), 2);
    assert!(state.find_creature(zealot).unwrap().has_attacked);
}
