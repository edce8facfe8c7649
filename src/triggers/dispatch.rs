//! Trigger dispatch.
//!
//! `process_effect_trigger` finds every effect a game event wakes up and
//! resolves them in order. Which cards are scanned depends on the
//! trigger's [`TriggerScope`]:
//!
//! - `Source`: only the card that caused the event. An attack wakes the
//!   attacker's `on_attack` effects and nobody else's.
//! - `Owner`: every non-silenced living creature on the acting player's
//!   field, in position order. The opponent's creatures never react.
//! - `Continuous`: nothing; passives are recomputed, not dispatched.
//!
//! A trigger fired at [`MAX_TRIGGER_DEPTH`] resolves nothing and logs a
//! `trigger_truncated` entry instead.

use tracing::{debug, warn};

use crate::cards::Card;
use crate::core::{ActionKind, GameState, PlayerId, Result, TriggerEvent, TriggerTruncated};
use crate::effects::{execute_card_effect, EffectTrigger, TriggerScope};

/// Deepest chain of triggers firing triggers. Deeper triggers are logged
/// as `trigger_truncated` and not resolved.
pub const MAX_TRIGGER_DEPTH: u32 = 16;

/// An effect waiting to resolve: its card and its index in the template.
struct Pending {
    card: Card,
    index: usize,
}

/// Fire `trigger` for `player`.
///
/// `source` is the card that caused the event (the played card, the dying
/// creature, the attacker). Source-scoped triggers need it; owner-scoped
/// ones use it only for the log.
///
/// Returns how many effects were dispatched.
pub fn process_effect_trigger(
    state: &mut GameState,
    trigger: EffectTrigger,
    source: Option<&Card>,
    player: PlayerId,
) -> Result<usize> {
    let pending = collect(state, trigger, source, player);
    if pending.is_empty() {
        return Ok(0);
    }
    if state.trigger_depth >= MAX_TRIGGER_DEPTH {
        warn!(?trigger, depth = state.trigger_depth, dropped = pending.len(), "trigger chain too deep, dropping");
        let kind = ActionKind::TriggerTruncated(TriggerTruncated {
            trigger,
            source_id: source.map(|c| c.instance_id),
            depth: state.trigger_depth,
            dropped_effects: pending.len(),
        });
        state.log(player, kind);
        return Ok(0);
    }

    let count = pending.len();
    let kind = ActionKind::TriggerEvent(TriggerEvent {
        trigger,
        source_id: source.map(|c| c.instance_id),
        effect_count: count,
    });
    state.log(player, kind);

    state.trigger_depth += 1;
    let result = run(state, &pending, player);
    state.trigger_depth -= 1;
    result.map(|()| count)
}

fn collect(state: &GameState, trigger: EffectTrigger, source: Option<&Card>, player: PlayerId) -> Vec<Pending> {
    let matching = |card: &Card, effects: &[crate::effects::CardEffect]| -> Vec<Pending> {
        effects
            .iter()
            .enumerate()
            .filter(|(_, e)| e.trigger == trigger)
            .map(|(index, _)| Pending {
                card: card.clone(),
                index,
            })
            .collect()
    };

    match trigger.scope() {
        TriggerScope::Continuous => Vec::new(),
        TriggerScope::Source => {
            let Some(card) = source else {
                return Vec::new();
            };
            match state.find_creature(card.instance_id) {
                Some(creature) if !creature.is_alive() => Vec::new(),
                Some(creature) => matching(card, creature.active_effects()),
                None => matching(card, &card.template.effects),
            }
        }
        TriggerScope::Owner => state
            .player(player)
            .living()
            .flat_map(|creature| matching(&creature.card, creature.active_effects()))
            .collect(),
    }
}

fn run(state: &mut GameState, pending: &[Pending], player: PlayerId) -> Result<()> {
    for item in pending {
        // A creature killed earlier in the chain no longer acts.
        if let Some(creature) = state.find_creature(item.card.instance_id) {
            if !creature.is_alive() || creature.is_silenced {
                debug!(card = %item.card.name(), "source gone before its effect resolved");
                continue;
            }
        }
        let effect = &item.card.template.effects[item.index];
        execute_card_effect(state, effect, &item.card, player)?;
    }
    Ok(())
}
