//! Target filter engine.
//!
//! Filters narrow a candidate list with independent predicates that must
//! all pass:
//! - `FilterRule`: one predicate (brand, cost range, keyword, type, faction,
//!   self-exclusion)
//! - `LegacyFilter`: the older object-shaped filter, translated into rules
//! - `Filterable`: what a candidate must expose to be filtered
//!
//! Every function here is pure; candidates are returned in input order.

use serde::{Deserialize, Serialize};

use crate::cards::{CardType, Faction, Keyword};
use crate::core::{EngineError, InstanceId, Result};

/// Anything the filter engine can inspect.
pub trait Filterable {
    fn instance_id(&self) -> InstanceId;
    fn cost(&self) -> u32;
    fn has_keyword(&self, keyword: Keyword) -> bool;
    fn card_type(&self) -> CardType;
    fn faction(&self) -> Faction;
    fn is_branded(&self) -> bool;
}

impl<T: Filterable + ?Sized> Filterable for &T {
    fn instance_id(&self) -> InstanceId {
        (**self).instance_id()
    }
    fn cost(&self) -> u32 {
        (**self).cost()
    }
    fn has_keyword(&self, keyword: Keyword) -> bool {
        (**self).has_keyword(keyword)
    }
    fn card_type(&self) -> CardType {
        (**self).card_type()
    }
    fn faction(&self) -> Faction {
        (**self).faction()
    }
    fn is_branded(&self) -> bool {
        (**self).is_branded()
    }
}

/// Presence test for the `branded` status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandOp {
    Has,
    NotHas,
}

/// A single filter predicate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterRule {
    Brand {
        op: BrandOp,
    },
    /// Inclusive cost range; a missing bound is open.
    Cost {
        #[serde(default)]
        min: Option<u32>,
        #[serde(default)]
        max: Option<u32>,
    },
    Keyword {
        keyword: Keyword,
    },
    CardType {
        card_type: CardType,
    },
    Faction {
        faction: Faction,
    },
    /// Drops the candidate whose id equals the source id.
    ExcludeSelf,
}

impl FilterRule {
    /// Inclusive cost range.
    #[must_use]
    pub fn cost_range(min: u32, max: u32) -> Self {
        FilterRule::Cost {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Check one candidate against this rule.
    #[must_use]
    pub fn matches<T: Filterable>(&self, candidate: &T, source_id: Option<InstanceId>) -> bool {
        match self {
            FilterRule::Brand { op: BrandOp::Has } => candidate.is_branded(),
            FilterRule::Brand { op: BrandOp::NotHas } => !candidate.is_branded(),
            FilterRule::Cost { min, max } => {
                let cost = candidate.cost();
                min.is_none_or(|m| cost >= m) && max.is_none_or(|m| cost <= m)
            }
            FilterRule::Keyword { keyword } => candidate.has_keyword(*keyword),
            FilterRule::CardType { card_type } => candidate.card_type() == *card_type,
            FilterRule::Faction { faction } => candidate.faction() == *faction,
            FilterRule::ExcludeSelf => source_id != Some(candidate.instance_id()),
        }
    }
}

/// Keep the candidates that pass every rule.
///
/// ```
/// use card_duel::cards::{Card, CardTemplate, Faction};
/// use card_duel::core::InstanceId;
/// use card_duel::effects::{filter_targets, FilterRule};
/// use std::sync::Arc;
///
/// let cheap = Card::new(InstanceId::new(1), Arc::new(CardTemplate::creature("a", "A", Faction::Mage, 1, 1, 1)));
/// let pricey = Card::new(InstanceId::new(2), Arc::new(CardTemplate::creature("b", "B", Faction::Mage, 6, 5, 5)));
///
/// let kept = filter_targets(vec![&cheap, &pricey], &[FilterRule::cost_range(0, 3)], None);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].instance_id, InstanceId::new(1));
/// ```
pub fn filter_targets<T: Filterable>(
    candidates: Vec<T>,
    rules: &[FilterRule],
    source_id: Option<InstanceId>,
) -> Vec<T> {
    if rules.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|candidate| rules.iter().all(|rule| rule.matches(candidate, source_id)))
        .collect()
}

/// Apply several rule sets in sequence (AND across sets).
pub fn apply_multiple_filters<T: Filterable>(
    candidates: Vec<T>,
    rule_sets: &[Vec<FilterRule>],
    source_id: Option<InstanceId>,
) -> Vec<T> {
    rule_sets
        .iter()
        .fold(candidates, |remaining, rules| filter_targets(remaining, rules, source_id))
}

/// Object-shaped filter used by older card data.
///
/// Field names follow that data as written, including `hasBrand`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_keyword: Option<Keyword>,
    #[serde(default)]
    pub exclude_self: bool,
    #[serde(default, rename = "hasBrand", alias = "has_brand", skip_serializing_if = "Option::is_none")]
    pub has_brand: Option<bool>,
    /// `faction` or `card_type`, compared for equality with `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl LegacyFilter {
    /// Translate into the equivalent rule list.
    ///
    /// An unknown `property`, or one without a parseable `value`, is a
    /// card-data bug and reported as `MalformedEffect`.
    pub fn to_rules(&self) -> Result<Vec<FilterRule>> {
        let mut rules = Vec::new();

        if self.min_cost.is_some() || self.max_cost.is_some() {
            rules.push(FilterRule::Cost {
                min: self.min_cost,
                max: self.max_cost,
            });
        }
        if let Some(keyword) = self.has_keyword {
            rules.push(FilterRule::Keyword { keyword });
        }
        if self.exclude_self {
            rules.push(FilterRule::ExcludeSelf);
        }
        if let Some(has) = self.has_brand {
            let op = if has { BrandOp::Has } else { BrandOp::NotHas };
            rules.push(FilterRule::Brand { op });
        }
        if let Some(property) = &self.property {
            let value = self.value.as_deref().ok_or_else(|| {
                EngineError::malformed("legacy filter", format!("property `{property}` has no value"))
            })?;
            let rule = match property.as_str() {
                "faction" => FilterRule::Faction {
                    faction: parse_enum(value)?,
                },
                "card_type" | "type" => FilterRule::CardType {
                    card_type: parse_enum(value)?,
                },
                other => {
                    return Err(EngineError::malformed(
                        "legacy filter",
                        format!("unsupported property `{other}`"),
                    ))
                }
            };
            rules.push(rule);
        }

        Ok(rules)
    }

    /// Filter candidates with this legacy filter.
    pub fn apply<T: Filterable>(&self, candidates: Vec<T>, source_id: Option<InstanceId>) -> Result<Vec<T>> {
        Ok(filter_targets(candidates, &self.to_rules()?, source_id))
    }
}

fn parse_enum<T: serde::de::DeserializeOwned>(value: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| EngineError::malformed("legacy filter", format!("unrecognized value `{value}`")))
}
