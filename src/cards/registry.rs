//! Card registry for template lookup.
//!
//! The `CardRegistry` stores every `CardTemplate` a game can create
//! instances of. Templates are validated on registration so that bad card
//! data fails at load time instead of mid-game.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::catalog;
use super::definition::{CardTemplate, Faction, TemplateId};
use crate::core::{EngineError, Result};
use crate::effects::{EffectAction, EffectTarget, EffectTrigger};

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{CardRegistry, CardTemplate, Faction, TemplateId};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardTemplate::creature("wolf", "Grey Wolf", Faction::Neutral, 2, 2, 2))
///     .unwrap();
///
/// let wolf = registry.lookup(&TemplateId::new("wolf")).unwrap();
/// assert_eq!(wolf.name, "Grey Wolf");
/// assert!(registry.lookup(&TemplateId::new("bear")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    templates: FxHashMap<TemplateId, Arc<CardTemplate>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in catalog.
    pub fn standard() -> Result<Self> {
        let mut registry = Self::new();
        for template in catalog::all_templates() {
            registry.register(template)?;
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Register a template.
    ///
    /// Effects are checked here; references to other templates are checked
    /// by [`validate`](Self::validate) once everything is loaded.
    pub fn register(&mut self, template: CardTemplate) -> Result<()> {
        if self.templates.contains_key(&template.template_id) {
            return Err(EngineError::DuplicateTemplate(template.template_id.to_string()));
        }
        check_effects(&template)?;
        self.templates
            .insert(template.template_id.clone(), Arc::new(template));
        Ok(())
    }

    /// Check cross-template references (summon targets).
    pub fn validate(&self) -> Result<()> {
        for template in self.templates.values() {
            for effect in &template.effects {
                if let Some(summoned) = &effect.summon {
                    let target = self.lookup(summoned)?;
                    if !target.is_creature() {
                        return Err(EngineError::malformed(
                            template.template_id.as_str(),
                            format!("summons non-creature `{summoned}`"),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &TemplateId) -> Option<&Arc<CardTemplate>> {
        self.templates.get(id)
    }

    /// Get a template, failing on unknown ids.
    pub fn lookup(&self, id: &TemplateId) -> Result<Arc<CardTemplate>> {
        self.templates
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownCard(id.to_string()))
    }

    #[must_use]
    pub fn contains(&self, id: &TemplateId) -> bool {
        self.templates.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardTemplate>> {
        self.templates.values()
    }

    /// Templates of one faction, sorted by cost then id.
    #[must_use]
    pub fn by_faction(&self, faction: Faction) -> Vec<Arc<CardTemplate>> {
        let mut cards: Vec<_> = self
            .templates
            .values()
            .filter(|t| t.faction == faction)
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.template_id.cmp(&b.template_id)));
        cards
    }
}

fn check_effects(template: &CardTemplate) -> Result<()> {
    let card = template.template_id.as_str();

    if template.is_spell() && (template.attack != 0 || template.health != 0) {
        return Err(EngineError::malformed(card, "spells carry no attack or health"));
    }

    for effect in &template.effects {
        // Legacy filters must convert cleanly.
        effect.rule_sets()?;

        if effect.trigger == EffectTrigger::Passive {
            if template.is_spell() {
                return Err(EngineError::malformed(card, "spells cannot have passive effects"));
            }
            if !effect.action.is_stat_modifier() {
                return Err(EngineError::malformed(
                    card,
                    format!("passive effect uses non-stat action {:?}", effect.action),
                ));
            }
            if !matches!(
                effect.target,
                EffectTarget::SelfCard | EffectTarget::AllyAll | EffectTarget::EnemyAll | EffectTarget::All
            ) {
                return Err(EngineError::malformed(
                    card,
                    format!("passive effect needs a fixed target, got {:?}", effect.target),
                ));
            }
        }

        if template.is_spell() && effect.target == EffectTarget::SelfCard {
            return Err(EngineError::malformed(card, "spells cannot target themselves"));
        }

        match effect.action {
            EffectAction::Summon if effect.summon.is_none() => {
                return Err(EngineError::malformed(card, "summon effect names no template"));
            }
            EffectAction::Summon => {}
            _ if effect.summon.is_some() => {
                return Err(EngineError::malformed(
                    card,
                    format!("{:?} effect names a summon template", effect.action),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::CardEffect;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardTemplate::creature("a", "A", Faction::Mage, 1, 1, 1))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&TemplateId::new("a")));
        assert_eq!(
            registry.lookup(&TemplateId::new("missing")),
            Err(EngineError::UnknownCard("missing".to_string()))
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = CardRegistry::new();
        let template = CardTemplate::creature("a", "A", Faction::Mage, 1, 1, 1);
        registry.register(template.clone()).unwrap();
        assert!(matches!(
            registry.register(template),
            Err(EngineError::DuplicateTemplate(_))
        ));
    }

    #[test]
    fn test_passive_must_be_stat_effect() {
        let mut registry = CardRegistry::new();
        let template = CardTemplate::creature("bad", "Bad", Faction::Knight, 2, 1, 1).with_effect(CardEffect::new(
            EffectTrigger::Passive,
            EffectAction::Damage,
            EffectTarget::EnemyAll,
            1,
        ));
        let err = registry.register(template).unwrap_err();
        assert!(matches!(err, EngineError::MalformedEffect { .. }));
    }

    #[test]
    fn test_passive_random_target_rejected() {
        let mut registry = CardRegistry::new();
        let template = CardTemplate::creature("bad", "Bad", Faction::Knight, 2, 1, 1).with_effect(CardEffect::new(
            EffectTrigger::Passive,
            EffectAction::BuffAttack,
            EffectTarget::AllyRandom,
            1,
        ));
        assert!(registry.register(template).is_err());
    }

    #[test]
    fn test_dangling_summon_fails_validation() {
        let mut registry = CardRegistry::new();
        let template = CardTemplate::spell("call", "Call", Faction::Necromancer, 2).with_effect(CardEffect::summon(
            EffectTrigger::OnPlay,
            "ghost",
            1,
        ));
        registry.register(template).unwrap();
        assert_eq!(
            registry.validate(),
            Err(EngineError::UnknownCard("ghost".to_string()))
        );
    }

    #[test]
    fn test_standard_registry() {
        let registry = CardRegistry::standard().unwrap();
        for faction in Faction::PLAYABLE {
            assert!(registry.by_faction(faction).len() >= 6, "{faction:?}");
        }
        let costs: Vec<_> = registry.by_faction(Faction::Mage).iter().map(|t| t.cost).collect();
        let mut sorted = costs.clone();
        sorted.sort_unstable();
        assert_eq!(costs, sorted);
    }
}
