//! Entity identification.
//!
//! Every card instance created for a game gets a unique `InstanceId`,
//! allocated monotonically by the owning `GameState`. Effects and attacks
//! address either a creature or a player through `TargetRef`.
//!
//! ```
//! use card_duel::core::{InstanceId, PlayerId, TargetRef};
//!
//! let creature = TargetRef::Creature(InstanceId::new(12));
//! let face = TargetRef::Player(PlayerId::Player2);
//!
//! assert_eq!(creature.to_string(), "card-12");
//! assert_eq!(face.to_string(), "player2");
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Unique identifier for a card instance within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

/// Something an effect or attack can hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum TargetRef {
    Creature(InstanceId),
    Player(PlayerId),
}

impl TargetRef {
    /// The creature this refers to, if any.
    #[must_use]
    pub fn as_creature(self) -> Option<InstanceId> {
        match self {
            TargetRef::Creature(id) => Some(id),
            TargetRef::Player(_) => None,
        }
    }

    /// Check if this refers to a player.
    #[must_use]
    pub fn is_player(self) -> bool {
        matches!(self, TargetRef::Player(_))
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetRef::Creature(id) => write!(f, "{id}"),
            TargetRef::Player(p) => write!(f, "{p}"),
        }
    }
}
