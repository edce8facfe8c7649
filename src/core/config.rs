//! Engine configuration.
//!
//! All rule constants live in `EngineConfig` so tests and hosts can tweak
//! them without touching engine code. `EngineConfig::default()` is the
//! standard ruleset.

use serde::{Deserialize, Serialize};

/// Rule constants and runtime switches for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Life each player starts with.
    pub starting_life: i32,

    /// Healing never raises a player above this.
    pub max_life: i32,

    /// `maxEnergy` at game start.
    pub starting_energy: u32,

    /// Hard cap on `maxEnergy`.
    pub energy_cap: u32,

    /// Maximum cards in hand.
    pub hand_limit: usize,

    /// Maximum creatures on a field.
    pub field_limit: usize,

    /// Cards dealt to each player before the first turn.
    pub opening_hand: usize,

    /// A game still running after this many turns ends on life comparison.
    pub max_turns: u32,

    /// `execute_full_game` gives up after this many steps.
    pub step_limit: usize,

    /// Damage dealt by one poison tick.
    pub poison_damage: i32,

    /// Number of ticks a fresh poison lasts.
    pub poison_duration: u32,

    /// Drawing from an empty deck deals escalating damage when enabled.
    pub fatigue: bool,

    /// Stamp log entries with wall-clock milliseconds. Off yields zeroes,
    /// which makes whole logs byte-comparable.
    pub wall_clock: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_life: 15,
            max_life: 15,
            starting_energy: 1,
            energy_cap: 8,
            hand_limit: 7,
            field_limit: 5,
            opening_hand: 5,
            max_turns: 30,
            step_limit: 10_000,
            poison_damage: 1,
            poison_duration: 2,
            fatigue: true,
            wall_clock: true,
        }
    }
}

impl EngineConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set starting (and maximum) life.
    #[must_use]
    pub fn with_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self.max_life = life;
        self
    }

    /// Set the turn limit.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Set the step limit used by `execute_full_game`.
    #[must_use]
    pub fn with_step_limit(mut self, steps: usize) -> Self {
        self.step_limit = steps;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    /// Enable or disable fatigue damage.
    #[must_use]
    pub fn with_fatigue(mut self, enabled: bool) -> Self {
        self.fatigue = enabled;
        self
    }

    /// Enable or disable wall-clock timestamps.
    #[must_use]
    pub fn with_wall_clock(mut self, enabled: bool) -> Self {
        self.wall_clock = enabled;
        self
    }

    /// Deterministic configuration: standard rules, zeroed timestamps.
    #[must_use]
    pub fn deterministic() -> Self {
        Self::default().with_wall_clock(false)
    }
}
