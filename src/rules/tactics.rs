//! Tactics: how an automated player values the cards in its hand.
//!
//! Each archetype is a weight table. A card's value is a weighted sum of
//! its stats, keywords and effects, plus a flat bonus when it belongs to
//! the player's own faction. The deploy phase plays the best playable card
//! until nothing playable is left.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardTemplate, Faction, Keyword};
use crate::core::{GameState, PlayerId};

/// Bonus for a card of the player's own faction.
pub const FACTION_SYNERGY_BONUS: f64 = 1.0;

/// Behavioral archetype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactics {
    Aggressive,
    Defensive,
    #[default]
    Balanced,
    Control,
}

/// Weight table behind a [`Tactics`] archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TacticsWeights {
    pub attack: f64,
    pub health: f64,
    /// Applied to cost; negative weights prefer cheap cards.
    pub cost: f64,
    /// Flat value of any spell.
    pub spell: f64,
    /// Per printed effect.
    pub effect: f64,
    pub guard: f64,
    pub lifesteal: f64,
    pub retaliate: f64,
    pub poison: f64,
    pub trample: f64,
    pub stealth: f64,
    pub rush: f64,
}

impl TacticsWeights {
    #[must_use]
    pub fn keyword(&self, keyword: Keyword) -> f64 {
        match keyword {
            Keyword::Guard => self.guard,
            Keyword::Lifesteal => self.lifesteal,
            Keyword::Retaliate => self.retaliate,
            Keyword::Poison => self.poison,
            Keyword::Trample => self.trample,
            Keyword::Stealth => self.stealth,
            Keyword::Rush => self.rush,
        }
    }
}

impl Tactics {
    pub const ALL: [Tactics; 4] = [Tactics::Aggressive, Tactics::Defensive, Tactics::Balanced, Tactics::Control];

    #[must_use]
    pub fn weights(self) -> TacticsWeights {
        match self {
            Tactics::Aggressive => TacticsWeights {
                attack: 2.0,
                health: 0.5,
                cost: 0.5,
                spell: 1.0,
                effect: 1.0,
                guard: 0.0,
                lifesteal: 1.0,
                retaliate: 0.5,
                poison: 1.5,
                trample: 2.0,
                stealth: 1.5,
                rush: 2.5,
            },
            Tactics::Defensive => TacticsWeights {
                attack: 0.5,
                health: 2.0,
                cost: 0.5,
                spell: 1.0,
                effect: 1.0,
                guard: 3.0,
                lifesteal: 2.0,
                retaliate: 2.0,
                poison: 0.5,
                trample: 0.0,
                stealth: 0.5,
                rush: 0.0,
            },
            Tactics::Balanced => TacticsWeights {
                attack: 1.0,
                health: 1.0,
                cost: 0.5,
                spell: 1.5,
                effect: 1.5,
                guard: 1.5,
                lifesteal: 1.5,
                retaliate: 1.0,
                poison: 1.0,
                trample: 1.0,
                stealth: 1.0,
                rush: 1.0,
            },
            Tactics::Control => TacticsWeights {
                attack: 0.5,
                health: 1.0,
                cost: 0.25,
                spell: 3.0,
                effect: 2.5,
                guard: 1.5,
                lifesteal: 1.0,
                retaliate: 1.5,
                poison: 1.0,
                trample: 0.5,
                stealth: 0.5,
                rush: 0.5,
            },
        }
    }

    /// Value of a card for a player of `faction`.
    #[must_use]
    pub fn card_value(self, template: &CardTemplate, faction: Faction) -> f64 {
        let w = self.weights();
        let mut value = f64::from(template.cost) * w.cost + template.effects.len() as f64 * w.effect;
        if template.is_creature() {
            value += f64::from(template.attack) * w.attack + f64::from(template.health) * w.health;
            value += template.keywords.iter().map(|k| w.keyword(*k)).sum::<f64>();
        } else {
            value += w.spell;
        }
        if template.faction == faction {
            value += FACTION_SYNERGY_BONUS;
        }
        value
    }
}

/// Can `player` play `card` right now?
#[must_use]
pub fn is_playable(state: &GameState, player: PlayerId, card: &Card) -> bool {
    let seat = state.player(player);
    card.template.cost <= seat.energy
        && (!card.is_creature() || seat.free_position(state.config.field_limit).is_some())
}

/// Hand index of the card the player's tactics pick, if any is playable.
///
/// Ties go to the earliest hand index.
#[must_use]
pub fn choose_card(state: &GameState, player: PlayerId) -> Option<usize> {
    let seat = state.player(player);
    let mut best: Option<(usize, f64)> = None;
    for (index, card) in seat.hand.iter().enumerate() {
        if !is_playable(state, player, card) {
            continue;
        }
        let value = seat.tactics.card_value(&card.template, seat.faction);
        if best.map_or(true, |(_, v)| value > v) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}
