//! Binary snapshots of a `GameState`.
//!
//! A snapshot is a small bincode envelope carrying a format version, the
//! game id, the last logged sequence and the state itself as JSON. The
//! state's log uses tagged and flattened enums, which bincode cannot
//! decode, so the payload stays in its wire format inside the envelope.
//!
//! The card registry is never stored. [`Snapshot::restore`] re-attaches
//! one and re-links every card to the registry's shared template.
//!
//! ```
//! use std::sync::Arc;
//!
//! use card_duel::cards::CardRegistry;
//! use card_duel::core::{EngineConfig, GameState};
//! use card_duel::rules::Snapshot;
//!
//! let registry = Arc::new(CardRegistry::standard().unwrap());
//! let state = GameState::new("g", "seed", EngineConfig::deterministic(), registry.clone());
//!
//! let bytes = Snapshot::capture(&state).unwrap().to_bytes().unwrap();
//! let restored = Snapshot::from_bytes(&bytes).unwrap().restore(registry).unwrap();
//! assert_eq!(restored.game_id, "g");
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardRegistry};
use crate::core::{EngineError, GameState, Result};

/// Bumped whenever the payload layout changes.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    pub game_id: String,
    /// Sequence of the last logged action, if any.
    pub sequence: Option<u32>,
    state_json: Vec<u8>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Result<Self> {
        let state_json = serde_json::to_vec(state).map_err(|e| EngineError::Snapshot(e.to_string()))?;
        Ok(Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            game_id: state.game_id.clone(),
            sequence: state.action_log.last().map(|a| a.sequence),
            state_json,
        })
    }

    /// Rebuild the state against `registry`.
    ///
    /// Fails with `UnknownCard` if a stored card has no template there.
    pub fn restore(&self, registry: Arc<CardRegistry>) -> Result<GameState> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(EngineError::Snapshot(format!(
                "unsupported format version {}",
                self.format_version
            )));
        }
        let mut state: GameState =
            serde_json::from_slice(&self.state_json).map_err(|e| EngineError::Snapshot(e.to_string()))?;
        relink(&mut state, &registry)?;
        state.attach_registry(registry);
        Ok(state)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

fn relink(state: &mut GameState, registry: &CardRegistry) -> Result<()> {
    let link = |card: &mut Card| -> Result<()> {
        card.template = registry.lookup(&card.template.template_id)?;
        Ok(())
    };
    for (_, seat) in state.players.iter_mut() {
        for card in seat
            .deck
            .iter_mut()
            .chain(seat.hand.iter_mut())
            .chain(seat.graveyard.iter_mut())
            .chain(seat.banished_cards.iter_mut())
        {
            link(card)?;
        }
        for creature in &mut seat.field {
            link(&mut creature.card)?;
        }
    }
    Ok(())
}
