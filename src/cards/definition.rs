//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card: cost, stats,
//! keywords and effects. Templates are built once (see `catalog`) and
//! shared by every instance through an `Arc`.
//!
//! Instance-specific data (damage taken, modifiers, position) lives in
//! `FieldCard`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::effects::CardEffect;

/// Identifier of a card template, e.g. `"necro_bone_lord"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    /// Create a new template ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Thematic card pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Necromancer,
    Berserker,
    Mage,
    Knight,
    Inquisitor,
    /// Tokens and generic cards usable by every faction.
    Neutral,
}

impl Faction {
    /// The five playable factions.
    pub const PLAYABLE: [Faction; 5] = [
        Faction::Necromancer,
        Faction::Berserker,
        Faction::Mage,
        Faction::Knight,
        Faction::Inquisitor,
    ];
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Creature,
    Spell,
}

/// Creature keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    /// Attackers must target a guard first.
    Guard,
    /// Damage dealt by this creature heals its owner.
    Lifesteal,
    /// Returns half of the damage taken to the attacker.
    Retaliate,
    /// Attacks also apply a poison status.
    Poison,
    /// Excess damage on a killed blocker carries to the player.
    Trample,
    /// Cannot be chosen as a target until it attacks.
    Stealth,
    /// May attack on the turn it is summoned.
    Rush,
}

/// Keyword set; most cards carry at most two.
pub type KeywordSet = SmallVec<[Keyword; 2]>;

/// Immutable master definition of a card.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{CardTemplate, Faction, Keyword};
///
/// let knight = CardTemplate::creature("knight_squire", "Squire", Faction::Knight, 2, 2, 3)
///     .with_keyword(Keyword::Guard);
///
/// assert!(knight.has_keyword(Keyword::Guard));
/// assert_eq!(knight.cost, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub template_id: TemplateId,
    pub name: String,
    pub faction: Faction,
    pub cost: u32,
    pub card_type: CardType,
    /// Base attack (0 for spells).
    pub attack: i32,
    /// Base health (0 for spells).
    pub health: i32,
    #[serde(default)]
    pub keywords: KeywordSet,
    /// Effects in resolution order.
    #[serde(default)]
    pub effects: Vec<CardEffect>,
    #[serde(default)]
    pub flavor_text: String,
}

impl CardTemplate {
    /// Create a creature template.
    #[must_use]
    pub fn creature(
        id: impl Into<String>,
        name: impl Into<String>,
        faction: Faction,
        cost: u32,
        attack: i32,
        health: i32,
    ) -> Self {
        Self {
            template_id: TemplateId::new(id),
            name: name.into(),
            faction,
            cost,
            card_type: CardType::Creature,
            attack,
            health,
            keywords: KeywordSet::new(),
            effects: Vec::new(),
            flavor_text: String::new(),
        }
    }

    /// Create a spell template.
    #[must_use]
    pub fn spell(id: impl Into<String>, name: impl Into<String>, faction: Faction, cost: u32) -> Self {
        Self {
            template_id: TemplateId::new(id),
            name: name.into(),
            faction,
            cost,
            card_type: CardType::Spell,
            attack: 0,
            health: 0,
            keywords: KeywordSet::new(),
            effects: Vec::new(),
            flavor_text: String::new(),
        }
    }

    /// Add a keyword (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the flavor text (builder pattern).
    #[must_use]
    pub fn with_flavor(mut self, text: impl Into<String>) -> Self {
        self.flavor_text = text.into();
        self
    }

    /// Check for a printed keyword.
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.card_type == CardType::Spell
    }
}
