//! Card instances - runtime card state.
//!
//! - `Card`: a template plus a unique instance id. Lives in a deck, hand,
//!   graveyard or banished pile and carries no battlefield state.
//! - `FieldCard`: a creature on a battlefield position, with damage,
//!   modifiers, flags and status effects.
//!
//! Modifier bookkeeping:
//! - `attack_modifier` / `health_modifier` come from direct effects and
//!   persist.
//! - `passive_attack_modifier` / `passive_health_modifier` are derived and
//!   rebuilt from zero by every passive recomputation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardTemplate, CardType, Faction, Keyword};
use crate::core::{InstanceId, PlayerId};
use crate::effects::{CardEffect, Filterable};

/// A card instance outside the battlefield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub instance_id: InstanceId,
    pub template: Arc<CardTemplate>,
}

impl Card {
    #[must_use]
    pub fn new(instance_id: InstanceId, template: Arc<CardTemplate>) -> Self {
        Self { instance_id, template }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.template.is_creature()
    }
}

impl Filterable for Card {
    fn instance_id(&self) -> InstanceId {
        self.instance_id
    }
    fn cost(&self) -> u32 {
        self.template.cost
    }
    fn has_keyword(&self, keyword: Keyword) -> bool {
        self.template.has_keyword(keyword)
    }
    fn card_type(&self) -> CardType {
        self.template.card_type
    }
    fn faction(&self) -> Faction {
        self.template.faction
    }
    fn is_branded(&self) -> bool {
        false
    }
}

/// Status effects attached to a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusEffect {
    /// Cannot attack; counts down at the end of the owner's turn.
    Stun { duration: u32 },
    /// Takes `damage` at the start of the owner's turn.
    Poison { damage: i32, duration: u32 },
    /// Marked for brand-aware effects. Permanent.
    Branded,
}

/// A creature on the battlefield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCard {
    pub card: Card,
    pub owner: PlayerId,
    pub current_health: i32,
    pub attack_modifier: i32,
    pub health_modifier: i32,
    pub passive_attack_modifier: i32,
    pub passive_health_modifier: i32,
    pub summon_turn: u32,
    pub position: usize,
    pub has_attacked: bool,
    pub is_stealthed: bool,
    pub is_silenced: bool,
    pub status_effects: SmallVec<[StatusEffect; 2]>,
    pub readied_this_turn: bool,
}

impl FieldCard {
    /// Put a creature card onto a field position.
    #[must_use]
    pub fn summon(card: Card, owner: PlayerId, position: usize, turn: u32) -> Self {
        let health = card.template.health;
        let stealthed = card.template.has_keyword(Keyword::Stealth);
        Self {
            card,
            owner,
            current_health: health,
            attack_modifier: 0,
            health_modifier: 0,
            passive_attack_modifier: 0,
            passive_health_modifier: 0,
            summon_turn: turn,
            position,
            has_attacked: false,
            is_stealthed: stealthed,
            is_silenced: false,
            status_effects: SmallVec::new(),
            readied_this_turn: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.card.instance_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.card.name()
    }

    #[must_use]
    pub fn template(&self) -> &CardTemplate {
        &self.card.template
    }

    /// Effective attack, never negative.
    #[must_use]
    pub fn attack(&self) -> i32 {
        (self.card.template.attack + self.attack_modifier + self.passive_attack_modifier).max(0)
    }

    /// Maximum health including both modifier layers.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.card.template.health + self.health_modifier + self.passive_health_modifier
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Keyword check; silenced creatures have none.
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        !self.is_silenced && self.card.template.has_keyword(keyword)
    }

    /// Effects that still work; silenced creatures have none.
    #[must_use]
    pub fn active_effects(&self) -> &[CardEffect] {
        if self.is_silenced {
            &[]
        } else {
            &self.card.template.effects
        }
    }

    #[must_use]
    pub fn is_stunned(&self) -> bool {
        self.status_effects
            .iter()
            .any(|s| matches!(s, StatusEffect::Stun { duration } if *duration > 0))
    }

    #[must_use]
    pub fn is_branded(&self) -> bool {
        self.status_effects.iter().any(|s| matches!(s, StatusEffect::Branded))
    }

    /// Can be picked by attacks and random enemy effects.
    #[must_use]
    pub fn is_targetable(&self) -> bool {
        self.is_alive() && !self.is_stealthed
    }

    /// Eligible to attack on `turn`.
    ///
    /// Freshly summoned creatures need `rush` or a `ready` effect.
    #[must_use]
    pub fn can_attack(&self, turn: u32) -> bool {
        self.is_alive()
            && !self.has_attacked
            && !self.is_silenced
            && !self.is_stunned()
            && self.attack() > 0
            && (self.summon_turn < turn || self.has_keyword(Keyword::Rush) || self.readied_this_turn)
    }

    /// Keep health within the current maximum.
    pub fn clamp_health(&mut self) {
        self.current_health = self.current_health.min(self.max_health());
    }

    /// Stats frozen at this moment, for logs.
    #[must_use]
    pub fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            instance_id: self.id(),
            template_id: self.card.template.template_id.to_string(),
            name: self.name().to_string(),
            owner: self.owner,
            attack: self.attack(),
            health: self.current_health,
            max_health: self.max_health(),
            position: self.position,
            keywords: self.card.template.keywords.to_vec(),
            status_effects: self.status_effects.to_vec(),
            is_silenced: self.is_silenced,
        }
    }

    /// Strip battlefield state, returning the bare card.
    #[must_use]
    pub fn into_card(self) -> Card {
        self.card
    }
}

impl Filterable for FieldCard {
    fn instance_id(&self) -> InstanceId {
        self.id()
    }
    fn cost(&self) -> u32 {
        self.card.template.cost
    }
    fn has_keyword(&self, keyword: Keyword) -> bool {
        FieldCard::has_keyword(self, keyword)
    }
    fn card_type(&self) -> CardType {
        self.card.template.card_type
    }
    fn faction(&self) -> Faction {
        self.card.template.faction
    }
    fn is_branded(&self) -> bool {
        FieldCard::is_branded(self)
    }
}

/// Stats of a creature at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSnapshot {
    pub instance_id: InstanceId,
    pub template_id: String,
    pub name: String,
    pub owner: PlayerId,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub position: usize,
    pub keywords: Vec<Keyword>,
    pub status_effects: Vec<StatusEffect>,
    pub is_silenced: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature(attack: i32, health: i32) -> Card {
        Card::new(
            InstanceId::new(7),
            Arc::new(CardTemplate::creature("c", "Critter", Faction::Berserker, 2, attack, health)),
        )
    }

    #[test]
    fn test_summon_defaults() {
        let field = FieldCard::summon(creature(3, 4), PlayerId::Player1, 2, 5);
        assert_eq!(field.current_health, 4);
        assert_eq!(field.attack(), 3);
        assert_eq!(field.max_health(), 4);
        assert_eq!(field.position, 2);
        assert_eq!(field.summon_turn, 5);
        assert!(!field.is_stealthed);
    }

    #[test]
    fn test_modifier_layers() {
        let mut field = FieldCard::summon(creature(3, 4), PlayerId::Player1, 0, 1);
        field.attack_modifier = 2;
        field.passive_attack_modifier = 1;
        field.health_modifier = 1;
        field.passive_health_modifier = 2;

        assert_eq!(field.attack(), 6);
        assert_eq!(field.max_health(), 7);

        field.attack_modifier = -10;
        assert_eq!(field.attack(), 0);
    }

    #[test]
    fn test_summoning_sickness() {
        let field = FieldCard::summon(creature(2, 2), PlayerId::Player1, 0, 3);
        assert!(!field.can_attack(3));
        assert!(field.can_attack(4));

        let rusher = FieldCard::summon(
            Card::new(
                InstanceId::new(8),
                Arc::new(
                    CardTemplate::creature("r", "Rusher", Faction::Berserker, 2, 2, 2).with_keyword(Keyword::Rush),
                ),
            ),
            PlayerId::Player1,
            0,
            3,
        );
        assert!(rusher.can_attack(3));
    }

    #[test]
    fn test_stun_and_silence_block_attacks() {
        let mut field = FieldCard::summon(creature(2, 2), PlayerId::Player1, 0, 1);
        field.status_effects.push(StatusEffect::Stun { duration: 1 });
        assert!(field.is_stunned());
        assert!(!field.can_attack(5));

        field.status_effects.clear();
        field.is_silenced = true;
        assert!(!field.can_attack(5));
    }

    #[test]
    fn test_silence_hides_keywords_and_effects() {
        let template = CardTemplate::creature("g", "Guard", Faction::Knight, 2, 1, 3)
            .with_keyword(Keyword::Guard)
            .with_effect(CardEffect::new(
                crate::effects::EffectTrigger::TurnEnd,
                crate::effects::EffectAction::Heal,
                crate::effects::EffectTarget::Player,
                1,
            ));
        let mut field = FieldCard::summon(Card::new(InstanceId::new(1), Arc::new(template)), PlayerId::Player2, 0, 1);
        assert!(field.has_keyword(Keyword::Guard));
        assert_eq!(field.active_effects().len(), 1);

        field.is_silenced = true;
        assert!(!field.has_keyword(Keyword::Guard));
        assert!(field.active_effects().is_empty());
    }

    #[test]
    fn test_snapshot() {
        let mut field = FieldCard::summon(creature(3, 4), PlayerId::Player2, 1, 1);
        field.current_health = -1;
        field.status_effects.push(StatusEffect::Branded);

        let snap = field.snapshot();
        assert_eq!(snap.instance_id, InstanceId::new(7));
        assert_eq!(snap.health, -1);
        assert_eq!(snap.owner, PlayerId::Player2);
        assert_eq!(snap.status_effects, vec![StatusEffect::Branded]);
    }

    #[test]
    fn test_stealth_from_keyword() {
        let template = CardTemplate::creature("s", "Shade", Faction::Necromancer, 2, 2, 1).with_keyword(Keyword::Stealth);
        let field = FieldCard::summon(Card::new(InstanceId::new(1), Arc::new(template)), PlayerId::Player1, 0, 1);
        assert!(field.is_stealthed);
        assert!(!field.is_targetable());
    }
}
