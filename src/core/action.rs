//! Action log: the engine's only externally observable output.
//!
//! Every state change is recorded as a `GameAction`:
//!
//! ```json
//! {"sequence": 4, "playerId": "player1", "timestamp": 0, "type": "card_play", "data": {...}}
//! ```
//!
//! `sequence` is assigned by `ActionLog::push` and always equals the
//! entry's index. The log is append-only; entries are never edited or
//! removed.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::entity::{InstanceId, TargetRef};
use super::player::PlayerId;
use super::state::{EndReason, Phase};
use crate::cards::{CardSnapshot, CardType, Keyword, StatusEffect, TemplateId};
use crate::effects::{EffectAction, EffectTrigger};

/// One recorded event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameAction {
    pub sequence: u32,
    pub player_id: PlayerId,
    /// Wall-clock milliseconds, or 0 when the clock is disabled.
    pub timestamp: u64,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl GameAction {
    /// Wire name of this action's kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Equality that ignores the timestamp.
    #[must_use]
    pub fn same_event(&self, other: &GameAction) -> bool {
        self.sequence == other.sequence && self.player_id == other.player_id && self.kind == other.kind
    }
}

/// Event payloads, keyed by `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ActionKind {
    PhaseChange(PhaseChange),
    CardDraw(CardDraw),
    DrawSkipped(DrawSkipped),
    Fatigue(Fatigue),
    EnergyUpdate(EnergyUpdate),
    CardPlay(CardPlay),
    CombatStage(CombatStage),
    CardAttack(CardAttack),
    KeywordTrigger(KeywordTrigger),
    EffectTrigger(EffectTriggered),
    TriggerEvent(TriggerEvent),
    TriggerTruncated(TriggerTruncated),
    PassiveUpdate(PassiveUpdate),
    CardSummon(CardSummon),
    CreatureDestroyed(CreatureDestroyed),
    CardBanished(CardBanished),
    CardDiscarded(CardDiscarded),
    StatusTick(StatusTick),
    GameEnd(GameEnd),
}

impl ActionKind {
    /// Wire name, matching the serialized `type` field.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            ActionKind::PhaseChange(_) => "phase_change",
            ActionKind::CardDraw(_) => "card_draw",
            ActionKind::DrawSkipped(_) => "draw_skipped",
            ActionKind::Fatigue(_) => "fatigue",
            ActionKind::EnergyUpdate(_) => "energy_update",
            ActionKind::CardPlay(_) => "card_play",
            ActionKind::CombatStage(_) => "combat_stage",
            ActionKind::CardAttack(_) => "card_attack",
            ActionKind::KeywordTrigger(_) => "keyword_trigger",
            ActionKind::EffectTrigger(_) => "effect_trigger",
            ActionKind::TriggerEvent(_) => "trigger_event",
            ActionKind::TriggerTruncated(_) => "trigger_truncated",
            ActionKind::PassiveUpdate(_) => "passive_update",
            ActionKind::CardSummon(_) => "card_summon",
            ActionKind::CreatureDestroyed(_) => "creature_destroyed",
            ActionKind::CardBanished(_) => "card_banished",
            ActionKind::CardDiscarded(_) => "card_discarded",
            ActionKind::StatusTick(_) => "status_tick",
            ActionKind::GameEnd(_) => "game_end",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseChange {
    /// `None` for the opening entry.
    pub from: Option<Phase>,
    pub to: Phase,
    pub turn_number: u32,
    pub current_player: PlayerId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraw {
    pub instance_id: InstanceId,
    pub template_id: TemplateId,
    pub hand_size: usize,
    pub deck_size: usize,
}

/// Why a draw did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawSkipReason {
    HandFull,
    DeckEmpty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawSkipped {
    pub reason: DrawSkipReason,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fatigue {
    pub damage: i32,
    pub life_before: i32,
    pub life_after: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyUpdate {
    pub max_energy_before: u32,
    pub max_energy_after: u32,
    pub energy: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPlay {
    pub instance_id: InstanceId,
    pub template_id: TemplateId,
    pub name: String,
    pub card_type: CardType,
    pub cost: u32,
    pub energy_before: u32,
    pub energy_after: u32,
    /// Field position for creatures.
    pub position: Option<usize>,
    /// Creature stats as it entered the field.
    pub card: Option<CardSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStage {
    pub attackers: Vec<InstanceId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAttack {
    pub attacker_id: InstanceId,
    pub attacker_name: String,
    pub target: TargetRef,
    pub damage: i32,
    /// Target health, or life for a player target.
    pub before: i32,
    pub after: i32,
    /// A guard forced the choice of target.
    pub guarded: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordTrigger {
    pub keyword: Keyword,
    pub source_id: InstanceId,
    pub target: TargetRef,
    pub amount: i32,
    pub before: i32,
    pub after: i32,
}

/// Before/after values of the stats an effect changed on one target.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_before: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_after: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_before: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_after: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_before: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_after: Option<i32>,
}

impl TargetDelta {
    /// Delta from `(attack, health)` pairs, keeping only what changed.
    #[must_use]
    pub fn creature(before: (i32, i32), after: (i32, i32)) -> Self {
        let mut delta = Self::default();
        if before.0 != after.0 {
            delta.attack_before = Some(before.0);
            delta.attack_after = Some(after.0);
        }
        if before.1 != after.1 {
            delta.health_before = Some(before.1);
            delta.health_after = Some(after.1);
        }
        delta
    }

    /// Delta for a player's life total.
    #[must_use]
    pub fn life(before: i32, after: i32) -> Self {
        let mut delta = Self::default();
        if before != after {
            delta.life_before = Some(before);
            delta.life_after = Some(after);
        }
        delta
    }

    /// No observable numeric change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attack_before.is_none() && self.health_before.is_none() && self.life_before.is_none()
    }
}

/// Target key (`card-12`, `player2`) to stat deltas.
pub type TargetDeltas = BTreeMap<String, TargetDelta>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectTriggered {
    pub source_id: InstanceId,
    pub source_name: String,
    pub trigger: EffectTrigger,
    pub action: EffectAction,
    pub value: i32,
    pub targets: TargetDeltas,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    pub trigger: EffectTrigger,
    pub source_id: Option<InstanceId>,
    pub effect_count: usize,
}

/// A trigger that woke effects but was not resolved because the chain
/// reached the depth cap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerTruncated {
    pub trigger: EffectTrigger,
    pub source_id: Option<InstanceId>,
    pub depth: u32,
    pub dropped_effects: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassiveUpdate {
    pub targets: TargetDeltas,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummon {
    pub source_id: Option<InstanceId>,
    pub card: CardSnapshot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureDestroyed {
    pub instance_id: InstanceId,
    pub owner: PlayerId,
    pub card_snapshot: CardSnapshot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBanished {
    pub instance_id: InstanceId,
    pub owner: PlayerId,
    pub card_snapshot: CardSnapshot,
}

/// Zone a discarded card left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardSource {
    Hand,
    Deck,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDiscarded {
    pub instance_id: InstanceId,
    pub template_id: TemplateId,
    pub owner: PlayerId,
    pub from: DiscardSource,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTick {
    pub instance_id: InstanceId,
    /// The status after ticking; a zero duration means it expired.
    pub status: StatusEffect,
    pub health_before: i32,
    pub health_after: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEnd {
    pub winner: Option<PlayerId>,
    pub reason: EndReason,
    pub total_turns: u32,
}

/// Append-only log with contiguous sequence numbers.
///
/// Backed by `im::Vector` so that cloning a `GameState` on every step
/// stays O(1).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog {
    entries: Vector<GameAction>,
}

impl ActionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, assigning the next sequence number.
    pub fn push(&mut self, player_id: PlayerId, timestamp: u64, kind: ActionKind) -> u32 {
        let sequence = self.entries.len() as u32;
        self.entries.push_back(GameAction {
            sequence,
            player_id,
            timestamp,
            kind,
        });
        sequence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GameAction> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn last(&self) -> Option<&GameAction> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &GameAction> {
        self.entries.iter()
    }

    /// Entries from `start` onward.
    pub fn since(&self, start: usize) -> impl Iterator<Item = &GameAction> {
        self.entries.iter().skip(start)
    }

    /// Count entries of one kind.
    #[must_use]
    pub fn count_of(&self, type_name: &str) -> usize {
        self.entries.iter().filter(|a| a.type_name() == type_name).count()
    }

    /// Check that `sequence == index` for every entry.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, a)| a.sequence as usize == i)
    }

    /// Compare two logs event by event, ignoring timestamps.
    #[must_use]
    pub fn same_events(&self, other: &ActionLog) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.same_event(b))
    }

    /// Check that `self` is a prefix of `other`, ignoring timestamps.
    #[must_use]
    pub fn is_prefix_of(&self, other: &ActionLog) -> bool {
        self.len() <= other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.same_event(b))
    }

    /// Serialize to the JSON wire format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
