//! Activation conditions.
//!
//! An effect with an `activationCondition` only resolves when the
//! condition holds at resolution time. A condition compares a board
//! quantity (the subject) against a constant or against another subject:
//!
//! ```json
//! {"subject": "playerLife", "operator": "lt", "value": "opponentLife"}
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};

/// Board quantity, measured from the effect owner's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionSubject {
    PlayerLife,
    OpponentLife,
    /// Cards in the owner's graveyard.
    Graveyard,
    /// Living creatures on the owner's field.
    AllyCount,
    /// Living creatures on the opponent's field.
    EnemyCount,
    /// Living branded creatures on the opponent's field.
    BrandedEnemies,
    HandSize,
}

impl ConditionSubject {
    /// Measure this subject on `state` for `player`.
    #[must_use]
    pub fn measure(self, state: &GameState, player: PlayerId) -> i32 {
        let own = state.player(player);
        let enemy = state.player(player.opponent());
        let count = match self {
            ConditionSubject::PlayerLife => return own.life,
            ConditionSubject::OpponentLife => return enemy.life,
            ConditionSubject::Graveyard => own.graveyard.len(),
            ConditionSubject::AllyCount => own.living().count(),
            ConditionSubject::EnemyCount => enemy.living().count(),
            ConditionSubject::BrandedEnemies => enemy.living().filter(|c| c.is_branded()).count(),
            ConditionSubject::HandSize => own.hand.len(),
        };
        count as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
}

impl CompareOp {
    #[must_use]
    pub fn compare(self, left: i32, right: i32) -> bool {
        match self {
            CompareOp::Lt => left < right,
            CompareOp::Lte => left <= right,
            CompareOp::Gt => left > right,
            CompareOp::Gte => left >= right,
            CompareOp::Eq => left == right,
        }
    }
}

/// Right-hand side: a number or another subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionOperand {
    Value(i32),
    Subject(ConditionSubject),
}

impl From<i32> for ConditionOperand {
    fn from(value: i32) -> Self {
        ConditionOperand::Value(value)
    }
}

impl From<ConditionSubject> for ConditionOperand {
    fn from(subject: ConditionSubject) -> Self {
        ConditionOperand::Subject(subject)
    }
}

/// Gate on an effect.
///
/// ## Example
///
/// ```
/// use card_duel::triggers::{ActivationCondition, CompareOp, ConditionSubject};
///
/// // "If you have less life than your opponent..."
/// let behind = ActivationCondition::new(
///     ConditionSubject::PlayerLife,
///     CompareOp::Lt,
///     ConditionSubject::OpponentLife,
/// );
/// assert_eq!(behind.operator, CompareOp::Lt);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationCondition {
    pub subject: ConditionSubject,
    pub operator: CompareOp,
    pub value: ConditionOperand,
}

impl ActivationCondition {
    #[must_use]
    pub fn new(subject: ConditionSubject, operator: CompareOp, value: impl Into<ConditionOperand>) -> Self {
        Self {
            subject,
            operator,
            value: value.into(),
        }
    }

    /// Check the condition for the effect owned by `player`.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, player: PlayerId) -> bool {
        let left = self.subject.measure(state, player);
        let right = match self.value {
            ConditionOperand::Value(v) => v,
            ConditionOperand::Subject(s) => s.measure(state, player),
        };
        self.operator.compare(left, right)
    }
}
