//! Effect definitions.
//!
//! A card's abilities are a list of `CardEffect`s. Each one pairs a
//! trigger (when), an action (what), a target selector (who) and a value
//! (how much), optionally refined by a dynamic value, an activation
//! condition and filter rules. All of these are closed enums so the
//! resolver can dispatch with an exhaustive `match`.

use serde::{Deserialize, Serialize};

use crate::cards::TemplateId;
use crate::core::Result;
use crate::triggers::ActivationCondition;

use super::targeting::{FilterRule, LegacyFilter};

/// When an effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTrigger {
    OnPlay,
    OnDeath,
    OnAllyDeath,
    TurnStart,
    TurnEnd,
    Passive,
    OnDamageTaken,
    OnAttack,
    OnSpellPlay,
}

/// Which effects a trigger dispatch considers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerScope {
    /// Only the effects printed on the card that caused the event.
    Source,
    /// Every creature on the acting player's field, in position order.
    Owner,
    /// Never dispatched; recomputed by the passive pass.
    Continuous,
}

impl EffectTrigger {
    /// Dispatch scope of this trigger.
    #[must_use]
    pub fn scope(self) -> TriggerScope {
        match self {
            EffectTrigger::OnPlay
            | EffectTrigger::OnDeath
            | EffectTrigger::OnAttack
            | EffectTrigger::OnDamageTaken => TriggerScope::Source,
            EffectTrigger::OnAllyDeath
            | EffectTrigger::TurnStart
            | EffectTrigger::TurnEnd
            | EffectTrigger::OnSpellPlay => TriggerScope::Owner,
            EffectTrigger::Passive => TriggerScope::Continuous,
        }
    }
}

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectAction {
    Damage,
    Heal,
    BuffAttack,
    BuffHealth,
    DebuffAttack,
    DebuffHealth,
    Summon,
    DrawCard,
    Resurrect,
    Silence,
    Stun,
    DestroyDeckTop,
    SwapAttackHealth,
    HandDiscard,
    DestroyAllCreatures,
    Ready,
    ApplyBrand,
    Banish,
}

impl EffectAction {
    /// Actions that only adjust attack/health modifiers.
    ///
    /// These are the only actions allowed on passive effects.
    #[must_use]
    pub fn is_stat_modifier(self) -> bool {
        matches!(
            self,
            EffectAction::BuffAttack
                | EffectAction::BuffHealth
                | EffectAction::DebuffAttack
                | EffectAction::DebuffHealth
        )
    }
}

/// Who an effect is aimed at, before filter rules narrow the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    /// The card carrying the effect.
    #[serde(rename = "self")]
    SelfCard,
    /// The owning player.
    Player,
    /// The opposing player.
    EnemyPlayer,
    AllyAll,
    AllyRandom,
    EnemyAll,
    EnemyRandom,
    /// Every creature on both fields.
    All,
}

impl EffectTarget {
    /// True for selectors that draw from the RNG.
    #[must_use]
    pub fn is_random(self) -> bool {
        matches!(self, EffectTarget::AllyRandom | EffectTarget::EnemyRandom)
    }
}

/// Live state an effect's value can be computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicSource {
    /// Owner's graveyard.
    Graveyard,
    /// Owner's field.
    Field,
    /// Opponent's field.
    EnemyField,
}

/// Narrowing applied when counting a dynamic source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFilter {
    /// Count creatures only (graveyards also hold spells).
    #[serde(default)]
    pub creatures: bool,
    /// Do not count the source card itself.
    #[serde(default)]
    pub exclude_self: bool,
}

fn default_multiplier() -> i32 {
    1
}

/// Replaces `effect.value` with `count(source) * multiplier` at resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicValue {
    pub source: DynamicSource,
    #[serde(default)]
    pub filter: DynamicFilter,
    #[serde(default = "default_multiplier")]
    pub multiplier: i32,
}

impl DynamicValue {
    /// Count of a source, multiplier 1.
    #[must_use]
    pub fn count(source: DynamicSource) -> Self {
        Self {
            source,
            filter: DynamicFilter::default(),
            multiplier: 1,
        }
    }

    /// Count creatures only.
    #[must_use]
    pub fn creatures_only(mut self) -> Self {
        self.filter.creatures = true;
        self
    }

    /// Leave the source card out of the count.
    #[must_use]
    pub fn excluding_self(mut self) -> Self {
        self.filter.exclude_self = true;
        self
    }

    /// Scale the count.
    #[must_use]
    pub fn times(mut self, multiplier: i32) -> Self {
        self.multiplier = multiplier;
        self
    }
}

fn default_random_count() -> usize {
    1
}

/// One ability on a card.
///
/// ## Example
///
/// ```
/// use card_duel::effects::{CardEffect, DynamicSource, DynamicValue, EffectAction, EffectTarget, EffectTrigger, FilterRule};
///
/// // "When played, allies other than this gain +1 attack per creature in your graveyard."
/// let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::BuffAttack, EffectTarget::AllyAll, 0)
///     .with_dynamic(DynamicValue::count(DynamicSource::Graveyard).creatures_only())
///     .with_rule(FilterRule::ExcludeSelf);
///
/// assert_eq!(effect.selection_rules.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEffect {
    pub trigger: EffectTrigger,
    pub action: EffectAction,
    pub target: EffectTarget,
    #[serde(default)]
    pub value: i32,
    /// Turns a stun lasts; defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_value: Option<DynamicValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_condition: Option<ActivationCondition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection_rules: Vec<FilterRule>,
    /// Older object-shaped filter, kept for card data written before rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<LegacyFilter>,
    /// Template created by `summon`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summon: Option<TemplateId>,
    /// How many targets a random selector picks.
    #[serde(default = "default_random_count")]
    pub random_count: usize,
}

impl CardEffect {
    /// Create an effect with no refinements.
    #[must_use]
    pub fn new(trigger: EffectTrigger, action: EffectAction, target: EffectTarget, value: i32) -> Self {
        Self {
            trigger,
            action,
            target,
            value,
            duration: None,
            dynamic_value: None,
            activation_condition: None,
            selection_rules: Vec::new(),
            filter: None,
            summon: None,
            random_count: 1,
        }
    }

    /// Summon `count` copies of a template onto the owner's field.
    #[must_use]
    pub fn summon(trigger: EffectTrigger, template: impl Into<String>, count: i32) -> Self {
        let mut effect = Self::new(trigger, EffectAction::Summon, EffectTarget::Player, count);
        effect.summon = Some(TemplateId::new(template));
        effect
    }

    #[must_use]
    pub fn with_dynamic(mut self, dynamic: DynamicValue) -> Self {
        self.dynamic_value = Some(dynamic);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: ActivationCondition) -> Self {
        self.activation_condition = Some(condition);
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: FilterRule) -> Self {
        self.selection_rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_legacy_filter(mut self, filter: LegacyFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }

    #[must_use]
    pub fn with_random_count(mut self, count: usize) -> Self {
        self.random_count = count;
        self
    }

    /// Selection rules plus the legacy filter translated into rules.
    pub fn rule_sets(&self) -> Result<Vec<Vec<FilterRule>>> {
        let mut sets = Vec::with_capacity(2);
        if !self.selection_rules.is_empty() {
            sets.push(self.selection_rules.clone());
        }
        if let Some(filter) = &self.filter {
            sets.push(filter.to_rules()?);
        }
        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Keyword;

    #[test]
    fn test_trigger_scopes() {
        assert_eq!(EffectTrigger::OnPlay.scope(), TriggerScope::Source);
        assert_eq!(EffectTrigger::OnAttack.scope(), TriggerScope::Source);
        assert_eq!(EffectTrigger::TurnEnd.scope(), TriggerScope::Owner);
        assert_eq!(EffectTrigger::OnAllyDeath.scope(), TriggerScope::Owner);
        assert_eq!(EffectTrigger::Passive.scope(), TriggerScope::Continuous);
    }

    #[test]
    fn test_effect_serde_names() {
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::BuffAttack, EffectTarget::SelfCard, 2);
        let json = serde_json::to_string(&effect).unwrap();
        assert!(json.contains("\"trigger\":\"on_play\""));
        assert!(json.contains("\"action\":\"buff_attack\""));
        assert!(json.contains("\"target\":\"self\""));
    }

    #[test]
    fn test_effect_deserialize_defaults() {
        let json = r#"{"trigger":"turn_end","action":"heal","target":"player","value":1}"#;
        let effect: CardEffect = serde_json::from_str(json).unwrap();
        assert_eq!(effect.random_count, 1);
        assert!(effect.selection_rules.is_empty());
        assert!(effect.dynamic_value.is_none());
    }

    #[test]
    fn test_summon_builder() {
        let effect = CardEffect::summon(EffectTrigger::OnDeath, "token_skeleton", 2);
        assert_eq!(effect.action, EffectAction::Summon);
        assert_eq!(effect.summon, Some(TemplateId::new("token_skeleton")));
        assert_eq!(effect.value, 2);
    }

    #[test]
    fn test_rule_sets_include_legacy() {
        let effect = CardEffect::new(EffectTrigger::OnPlay, EffectAction::Damage, EffectTarget::EnemyAll, 1)
            .with_rule(FilterRule::ExcludeSelf)
            .with_legacy_filter(LegacyFilter {
                has_keyword: Some(Keyword::Guard),
                ..LegacyFilter::default()
            });

        let sets = effect.rule_sets().unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0], vec![FilterRule::ExcludeSelf]);
        assert_eq!(sets[1], vec![FilterRule::Keyword { keyword: Keyword::Guard }]);
    }

    #[test]
    fn test_dynamic_value_builder() {
        let dv = DynamicValue::count(DynamicSource::Field).excluding_self().times(2);
        assert!(dv.filter.exclude_self);
        assert!(!dv.filter.creatures);
        assert_eq!(dv.multiplier, 2);
    }
}
