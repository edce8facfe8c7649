//! Built-in card catalog.
//!
//! Five factions with a distinct style each, plus neutral filler and the
//! tokens other cards summon:
//!
//! - **Necromancer**: death triggers, resurrection, graveyard scaling
//! - **Berserker**: rush, trample, self-buffs when hurt
//! - **Mage**: spells, card draw, discard, stuns
//! - **Knight**: guards, healing, persistent buffs
//! - **Inquisitor**: brands, silence, banishment

use super::definition::{CardTemplate, Faction, Keyword, TemplateId};
use crate::effects::EffectAction as A;
use crate::effects::EffectTarget as T;
use crate::effects::EffectTrigger as On;
use crate::effects::{BrandOp, CardEffect, DynamicSource, DynamicValue, FilterRule, LegacyFilter};
use crate::triggers::{ActivationCondition, CompareOp, ConditionSubject};

/// Every template in the catalog.
#[must_use]
pub fn all_templates() -> Vec<CardTemplate> {
    let mut cards = Vec::with_capacity(48);
    cards.extend(neutral());
    cards.extend(necromancer());
    cards.extend(berserker());
    cards.extend(mage());
    cards.extend(knight());
    cards.extend(inquisitor());
    cards
}

/// A 20-card deck for `faction`: two copies of its core cards plus neutral
/// filler. Neutral gets an all-neutral deck.
#[must_use]
pub fn starter_deck(faction: Faction) -> Vec<TemplateId> {
    let core: [&str; 7] = match faction {
        Faction::Necromancer => [
            "grave_rat",
            "bone_collector",
            "plague_bearer",
            "corpse_raiser",
            "soul_leech",
            "grave_tide",
            "lich_lord",
        ],
        Faction::Berserker => [
            "blood_cub",
            "frenzied_raider",
            "bloodlust",
            "axe_thrower",
            "war_chanter",
            "rampager",
            "warlord",
        ],
        Faction::Mage => [
            "apprentice",
            "fire_bolt",
            "arcane_scholar",
            "inversion",
            "frost_nova",
            "storm_caller",
            "meteor",
        ],
        Faction::Knight => [
            "squire",
            "shield_bearer",
            "field_medic",
            "blessing",
            "banner_knight",
            "call_to_arms",
            "paladin",
        ],
        Faction::Inquisitor => [
            "zealot",
            "witch_hunter",
            "censor",
            "purge",
            "confessor",
            "exile",
            "grand_inquisitor",
        ],
        Faction::Neutral => [
            "militia",
            "wandering_healer",
            "stone_sentinel",
            "militia",
            "wandering_healer",
            "stone_sentinel",
            "war_mammoth",
        ],
    };
    let filler = ["militia", "wandering_healer", "stone_sentinel"];

    core.iter()
        .chain(core.iter())
        .chain(filler.iter())
        .chain(filler.iter())
        .map(|id| TemplateId::new(*id))
        .collect()
}

fn neutral() -> Vec<CardTemplate> {
    let n = Faction::Neutral;
    vec![
        CardTemplate::creature("militia", "Village Militia", n, 1, 1, 2),
        CardTemplate::creature("wandering_healer", "Wandering Healer", n, 2, 2, 2)
            .with_effect(CardEffect::new(On::OnPlay, A::Heal, T::Player, 2)),
        CardTemplate::creature("stone_sentinel", "Stone Sentinel", n, 3, 2, 4).with_keyword(Keyword::Guard),
        CardTemplate::creature("war_mammoth", "War Mammoth", n, 5, 5, 5).with_keyword(Keyword::Trample),
        CardTemplate::creature("token_skeleton", "Skeleton", n, 1, 1, 1),
        CardTemplate::creature("token_recruit", "Recruit", n, 1, 1, 2).with_keyword(Keyword::Guard),
        CardTemplate::creature("token_familiar", "Familiar", n, 1, 1, 1).with_keyword(Keyword::Stealth),
    ]
}

fn necromancer() -> Vec<CardTemplate> {
    let f = Faction::Necromancer;
    vec![
        CardTemplate::creature("grave_rat", "Grave Rat", f, 1, 1, 1)
            .with_effect(CardEffect::summon(On::OnDeath, "token_skeleton", 1))
            .with_flavor("Where one falls, another crawls out."),
        CardTemplate::creature("bone_collector", "Bone Collector", f, 2, 2, 2)
            .with_effect(CardEffect::new(On::OnAllyDeath, A::BuffAttack, T::SelfCard, 1)),
        CardTemplate::creature("plague_bearer", "Plague Bearer", f, 3, 2, 3).with_keyword(Keyword::Poison),
        CardTemplate::spell("corpse_raiser", "Raise Corpse", f, 3).with_effect(
            CardEffect::new(On::OnPlay, A::Resurrect, T::Player, 1).with_legacy_filter(LegacyFilter {
                max_cost: Some(4),
                ..LegacyFilter::default()
            }),
        ),
        CardTemplate::creature("soul_leech", "Soul Leech", f, 4, 3, 3)
            .with_keyword(Keyword::Lifesteal)
            .with_effect(CardEffect::new(On::OnPlay, A::Damage, T::EnemyRandom, 1)),
        CardTemplate::spell("grave_tide", "Grave Tide", f, 5).with_effect(
            CardEffect::new(On::OnPlay, A::Damage, T::EnemyAll, 0)
                .with_dynamic(DynamicValue::count(DynamicSource::Graveyard).creatures_only()),
        ),
        CardTemplate::creature("lich_lord", "Lich Lord", f, 6, 4, 5)
            .with_effect(CardEffect::new(On::Passive, A::BuffAttack, T::AllyAll, 1)),
        CardTemplate::spell("death_knell", "Death Knell", f, 7).with_effect(
            CardEffect::new(On::OnPlay, A::DestroyAllCreatures, T::All, 0).with_condition(ActivationCondition::new(
                ConditionSubject::AllyCount,
                CompareOp::Lt,
                ConditionSubject::EnemyCount,
            )),
        ),
    ]
}

fn berserker() -> Vec<CardTemplate> {
    let f = Faction::Berserker;
    vec![
        CardTemplate::creature("blood_cub", "Blood Cub", f, 1, 2, 1).with_keyword(Keyword::Rush),
        CardTemplate::creature("frenzied_raider", "Frenzied Raider", f, 2, 2, 3)
            .with_effect(CardEffect::new(On::OnDamageTaken, A::BuffAttack, T::SelfCard, 1)),
        CardTemplate::spell("bloodlust", "Bloodlust", f, 2)
            .with_effect(CardEffect::new(On::OnPlay, A::BuffAttack, T::AllyAll, 2)),
        CardTemplate::creature("axe_thrower", "Axe Thrower", f, 3, 3, 2)
            .with_effect(CardEffect::new(On::OnAttack, A::Damage, T::EnemyRandom, 1)),
        CardTemplate::creature("war_chanter", "War Chanter", f, 3, 2, 3)
            .with_effect(CardEffect::new(On::TurnStart, A::Ready, T::AllyRandom, 0)),
        CardTemplate::creature("rampager", "Rampager", f, 5, 5, 4).with_keyword(Keyword::Trample),
        CardTemplate::creature("warlord", "Warlord", f, 6, 5, 5)
            .with_keyword(Keyword::Retaliate)
            .with_effect(
                CardEffect::new(On::OnPlay, A::BuffAttack, T::AllyAll, 0)
                    .with_dynamic(DynamicValue::count(DynamicSource::Field).excluding_self())
                    .with_rule(FilterRule::ExcludeSelf),
            )
            .with_effect(CardEffect::new(On::OnPlay, A::BuffAttack, T::SelfCard, 3).with_condition(
                ActivationCondition::new(ConditionSubject::PlayerLife, CompareOp::Lte, 8),
            )),
    ]
}

fn mage() -> Vec<CardTemplate> {
    let f = Faction::Mage;
    vec![
        CardTemplate::creature("apprentice", "Apprentice", f, 1, 1, 2)
            .with_effect(CardEffect::new(On::OnSpellPlay, A::Damage, T::EnemyRandom, 1)),
        CardTemplate::spell("fire_bolt", "Fire Bolt", f, 2)
            .with_effect(CardEffect::new(On::OnPlay, A::Damage, T::EnemyRandom, 3)),
        CardTemplate::creature("arcane_scholar", "Arcane Scholar", f, 2, 1, 3)
            .with_effect(CardEffect::new(On::OnPlay, A::DrawCard, T::Player, 1)),
        CardTemplate::spell("mind_rot", "Mind Rot", f, 2).with_effect(
            CardEffect::new(On::OnPlay, A::HandDiscard, T::EnemyPlayer, 2).with_condition(ActivationCondition::new(
                ConditionSubject::HandSize,
                CompareOp::Lte,
                3,
            )),
        ),
        CardTemplate::spell("inversion", "Inversion", f, 2)
            .with_effect(CardEffect::new(On::OnPlay, A::SwapAttackHealth, T::EnemyRandom, 0)),
        CardTemplate::spell("frost_nova", "Frost Nova", f, 3)
            .with_effect(CardEffect::new(On::OnPlay, A::Stun, T::EnemyAll, 0).with_duration(1)),
        CardTemplate::creature("storm_caller", "Storm Caller", f, 4, 3, 4)
            .with_effect(CardEffect::summon(On::OnPlay, "token_familiar", 2)),
        CardTemplate::spell("meteor", "Meteor", f, 6)
            .with_effect(CardEffect::new(On::OnPlay, A::Damage, T::EnemyAll, 3))
            .with_effect(CardEffect::new(On::OnPlay, A::Damage, T::EnemyPlayer, 2)),
    ]
}

fn knight() -> Vec<CardTemplate> {
    let f = Faction::Knight;
    vec![
        CardTemplate::creature("squire", "Squire", f, 1, 1, 3).with_keyword(Keyword::Guard),
        CardTemplate::creature("shield_bearer", "Shield Bearer", f, 2, 1, 4)
            .with_keyword(Keyword::Guard)
            .with_keyword(Keyword::Retaliate),
        CardTemplate::creature("field_medic", "Field Medic", f, 2, 2, 2)
            .with_effect(CardEffect::new(On::TurnEnd, A::Heal, T::AllyAll, 1)),
        CardTemplate::spell("blessing", "Blessing", f, 2)
            .with_effect(CardEffect::new(On::OnPlay, A::BuffHealth, T::AllyAll, 2)),
        CardTemplate::creature("banner_knight", "Banner Knight", f, 3, 2, 3)
            .with_effect(CardEffect::new(On::Passive, A::BuffHealth, T::AllyAll, 1)),
        CardTemplate::spell("call_to_arms", "Call to Arms", f, 3)
            .with_effect(CardEffect::summon(On::OnPlay, "token_recruit", 2)),
        CardTemplate::creature("paladin", "Paladin", f, 5, 4, 5)
            .with_keyword(Keyword::Guard)
            .with_keyword(Keyword::Lifesteal)
            .with_effect(CardEffect::new(On::OnPlay, A::Heal, T::Player, 3)),
    ]
}

fn inquisitor() -> Vec<CardTemplate> {
    let f = Faction::Inquisitor;
    let branded = FilterRule::Brand { op: BrandOp::Has };
    vec![
        CardTemplate::creature("zealot", "Zealot", f, 1, 2, 1)
            .with_effect(CardEffect::new(On::OnPlay, A::ApplyBrand, T::EnemyRandom, 0)),
        CardTemplate::creature("witch_hunter", "Witch Hunter", f, 2, 2, 2)
            .with_keyword(Keyword::Stealth)
            .with_effect(CardEffect::new(On::OnAttack, A::ApplyBrand, T::EnemyRandom, 0)),
        CardTemplate::creature("censor", "Censor", f, 3, 2, 3)
            .with_effect(CardEffect::new(On::OnPlay, A::Silence, T::EnemyRandom, 0)),
        CardTemplate::spell("purge", "Purge", f, 3)
            .with_effect(CardEffect::new(On::OnPlay, A::Damage, T::EnemyAll, 3).with_rule(branded.clone())),
        CardTemplate::creature("confessor", "Confessor", f, 3, 2, 4)
            .with_effect(CardEffect::new(On::OnPlay, A::DebuffAttack, T::EnemyAll, 1))
            .with_effect(CardEffect::new(On::OnPlay, A::DebuffHealth, T::EnemyAll, 1).with_condition(
                ActivationCondition::new(ConditionSubject::BrandedEnemies, CompareOp::Gte, 2),
            )),
        CardTemplate::spell("exile", "Exile", f, 4)
            .with_effect(CardEffect::new(On::OnPlay, A::Banish, T::EnemyRandom, 0).with_rule(branded)),
        CardTemplate::creature("grand_inquisitor", "Grand Inquisitor", f, 6, 5, 5)
            .with_effect(CardEffect::new(On::OnPlay, A::DestroyDeckTop, T::EnemyPlayer, 2))
            .with_effect(CardEffect::new(On::Passive, A::DebuffAttack, T::EnemyAll, 1)),
    ]
}
