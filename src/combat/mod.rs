//! Combat: attacks, the death cascade and status upkeep.

mod attack;
mod death;
mod status;

pub use attack::{choose_attack_target, resolve_attack, AttackOutcome};
pub use death::resolve_deaths;
pub use status::{decrement_stuns, poison_status, tick_poison};
