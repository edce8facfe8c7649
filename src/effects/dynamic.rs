//! Dynamic value resolution.
//!
//! Pure: reads the board, never writes it.

use super::effect::{CardEffect, DynamicSource, DynamicValue};
use crate::core::{GameState, InstanceId, PlayerId};

/// Compute a dynamic value for the effect owned by `player`.
#[must_use]
pub fn resolve_dynamic_value(
    state: &GameState,
    dynamic: &DynamicValue,
    source_id: InstanceId,
    player: PlayerId,
) -> i32 {
    let filter = dynamic.filter;
    let count = match dynamic.source {
        DynamicSource::Graveyard => state
            .player(player)
            .graveyard
            .iter()
            .filter(|c| !filter.creatures || c.is_creature())
            .filter(|c| !filter.exclude_self || c.instance_id != source_id)
            .count(),
        DynamicSource::Field => state
            .player(player)
            .living()
            .filter(|c| !filter.exclude_self || c.id() != source_id)
            .count(),
        DynamicSource::EnemyField => state.player(player.opponent()).living().count(),
    };
    count as i32 * dynamic.multiplier
}

/// The value an effect resolves with: dynamic if present, else printed.
#[must_use]
pub fn effect_value(state: &GameState, effect: &CardEffect, source_id: InstanceId, player: PlayerId) -> i32 {
    match &effect.dynamic_value {
        Some(dynamic) => resolve_dynamic_value(state, dynamic, source_id, player),
        None => effect.value,
    }
}
