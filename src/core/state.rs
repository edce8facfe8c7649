//! Game state.
//!
//! ## PlayerState
//!
//! One seat: life, energy, and the five card zones (deck, hand, field,
//! graveyard, banished).
//!
//! ## GameState
//!
//! Both seats plus turn/phase markers, the action log, the RNG and the
//! final result. The engine treats it as a value: `process_game_step`
//! consumes one state and returns the next. Cloning is cheap because the
//! log is a persistent vector and templates are shared through `Arc`.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::action::{ActionKind, ActionLog, CardDraw};
use super::config::EngineConfig;
use super::entity::InstanceId;
use super::error::Result;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, CardRegistry, Faction, FieldCard, TemplateId};
use crate::rules::Tactics;

/// Turn phases, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Draw,
    Energy,
    Deploy,
    Battle,
    BattleAttack,
    End,
}

impl Phase {
    /// The phase that normally follows this one.
    ///
    /// `BattleAttack` repeats while attackers remain; the engine decides
    /// that, this only gives the default successor.
    #[must_use]
    pub fn next(self) -> Phase {
        match self {
            Phase::Draw => Phase::Energy,
            Phase::Energy => Phase::Deploy,
            Phase::Deploy => Phase::Battle,
            Phase::Battle => Phase::BattleAttack,
            Phase::BattleAttack => Phase::End,
            Phase::End => Phase::Draw,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Draw => "draw",
            Phase::Energy => "energy",
            Phase::Deploy => "deploy",
            Phase::Battle => "battle",
            Phase::BattleAttack => "battle_attack",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    LifeZero,
    Timeout,
}

/// Final outcome. Created once and never revisited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// `None` is a draw.
    pub winner: Option<PlayerId>,
    pub reason: EndReason,
    pub total_turns: u32,
    pub duration_seconds: f64,
    pub end_time: u64,
}

/// One seat's resources and zones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub faction: Faction,
    pub tactics: Tactics,
    pub life: i32,
    pub energy: u32,
    pub max_energy: u32,
    /// Top of the deck is the end of the vector.
    pub deck: Vec<Card>,
    pub hand: Vec<Card>,
    /// Sorted by position.
    pub field: Vec<FieldCard>,
    pub graveyard: Vec<Card>,
    pub banished_cards: Vec<Card>,
    /// Damage the next empty-deck draw deals.
    pub fatigue: i32,
}

impl PlayerState {
    #[must_use]
    pub fn new(faction: Faction, tactics: Tactics, config: &EngineConfig) -> Self {
        Self {
            faction,
            tactics,
            life: config.starting_life,
            energy: config.starting_energy,
            max_energy: config.starting_energy,
            deck: Vec::new(),
            hand: Vec::new(),
            field: Vec::new(),
            graveyard: Vec::new(),
            banished_cards: Vec::new(),
            fatigue: 0,
        }
    }

    /// Living creatures in position order.
    pub fn living(&self) -> impl Iterator<Item = &FieldCard> {
        self.field.iter().filter(|c| c.is_alive())
    }

    #[must_use]
    pub fn creature(&self, id: InstanceId) -> Option<&FieldCard> {
        self.field.iter().find(|c| c.id() == id)
    }

    pub fn creature_mut(&mut self, id: InstanceId) -> Option<&mut FieldCard> {
        self.field.iter_mut().find(|c| c.id() == id)
    }

    /// Lowest unused field position, if the field has room.
    #[must_use]
    pub fn free_position(&self, limit: usize) -> Option<usize> {
        if self.field.len() >= limit {
            return None;
        }
        (0..limit).find(|pos| !self.field.iter().any(|c| c.position == *pos))
    }
}

/// Result of trying to draw one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn(InstanceId),
    HandFull,
    DeckEmpty,
}

/// Complete game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: String,
    /// Starts at 1; increments each time the turn passes.
    pub turn_number: u32,
    pub current_player: PlayerId,
    /// The phase the next step will run.
    pub phase: Phase,
    pub players: PlayerMap<PlayerState>,
    pub action_log: ActionLog,
    pub random_seed: String,
    pub start_time: u64,
    pub result: Option<GameResult>,
    pub config: EngineConfig,
    pub rng: GameRng,
    /// Attackers still waiting in `battle_attack`.
    pub attack_queue: Vec<InstanceId>,
    next_instance_id: u32,
    /// Nesting of trigger dispatches inside the current step.
    #[serde(skip)]
    pub(crate) trigger_depth: u32,
    /// Card templates; not serialized, re-attached on restore.
    #[serde(skip)]
    registry: Arc<CardRegistry>,
}

impl GameState {
    /// Create an empty board: no cards anywhere, player 1 to act.
    #[must_use]
    pub fn new(
        game_id: impl Into<String>,
        seed: &str,
        config: EngineConfig,
        registry: Arc<CardRegistry>,
    ) -> Self {
        let players = PlayerMap::new(|_| PlayerState::new(Faction::Neutral, Tactics::Balanced, &config));
        let mut state = Self {
            game_id: game_id.into(),
            turn_number: 1,
            current_player: PlayerId::Player1,
            phase: Phase::Draw,
            players,
            action_log: ActionLog::new(),
            random_seed: seed.to_string(),
            start_time: 0,
            result: None,
            config,
            rng: GameRng::from_seed_str(seed),
            attack_queue: Vec::new(),
            next_instance_id: 1,
            trigger_depth: 0,
            registry,
        };
        state.start_time = state.now();
        state
    }

    // === Registry ===

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Re-attach templates after deserializing.
    pub fn attach_registry(&mut self, registry: Arc<CardRegistry>) {
        self.registry = registry;
    }

    /// Create a fresh card instance from a template id.
    pub fn create_card(&mut self, template_id: &TemplateId) -> Result<Card> {
        let template = self.registry.lookup(template_id)?;
        let id = self.alloc_instance();
        Ok(Card::new(id, template))
    }

    /// Allocate a new instance ID.
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_instance_id);
        self.next_instance_id += 1;
        id
    }

    // === Progress ===

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Current timestamp for log entries.
    #[must_use]
    pub fn now(&self) -> u64 {
        if !self.config.wall_clock {
            return 0;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Append an event to the log.
    pub fn log(&mut self, player: PlayerId, kind: ActionKind) -> u32 {
        let timestamp = self.now();
        self.action_log.push(player, timestamp, kind)
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// Lower a player's life. Returns `(before, after)`.
    pub fn damage_player(&mut self, player: PlayerId, amount: i32) -> (i32, i32) {
        let seat = &mut self.players[player];
        let before = seat.life;
        seat.life -= amount.max(0);
        (before, seat.life)
    }

    /// Raise a player's life, capped at `max_life`. Returns `(before, after)`.
    pub fn heal_player(&mut self, player: PlayerId, amount: i32) -> (i32, i32) {
        let cap = self.config.max_life;
        let seat = &mut self.players[player];
        let before = seat.life;
        if before < cap {
            seat.life = (before + amount.max(0)).min(cap);
        }
        (before, seat.life)
    }

    // === Creatures ===

    #[must_use]
    pub fn find_creature(&self, id: InstanceId) -> Option<&FieldCard> {
        PlayerId::ALL.iter().find_map(|p| self.players[*p].creature(id))
    }

    pub fn find_creature_mut(&mut self, id: InstanceId) -> Option<&mut FieldCard> {
        let owner = self.find_creature(id)?.owner;
        self.players[owner].creature_mut(id)
    }

    /// Living creature ids of one player, in position order.
    #[must_use]
    pub fn living_ids(&self, player: PlayerId) -> Vec<InstanceId> {
        self.players[player].living().map(FieldCard::id).collect()
    }

    /// Put a creature card onto the lowest free position.
    ///
    /// A full field hands the card back as `Err`.
    pub fn place_creature(&mut self, player: PlayerId, card: Card) -> std::result::Result<InstanceId, Card> {
        let limit = self.config.field_limit;
        let turn = self.turn_number;
        let seat = &mut self.players[player];
        let Some(position) = seat.free_position(limit) else {
            return Err(card);
        };
        let id = card.instance_id;
        seat.field.push(FieldCard::summon(card, player, position, turn));
        seat.field.sort_by_key(|c| c.position);
        Ok(id)
    }

    /// Remove a creature from whichever field holds it.
    pub fn take_creature(&mut self, id: InstanceId) -> Option<FieldCard> {
        let owner = self.find_creature(id)?.owner;
        let field = &mut self.players[owner].field;
        let index = field.iter().position(|c| c.id() == id)?;
        Some(field.remove(index))
    }

    // === Cards ===

    /// Move the top card of a deck into the hand.
    ///
    /// A full hand or empty deck leaves both zones untouched.
    pub fn draw_card(&mut self, player: PlayerId) -> DrawOutcome {
        let limit = self.config.hand_limit;
        let seat = &mut self.players[player];
        if seat.hand.len() >= limit {
            return DrawOutcome::HandFull;
        }
        match seat.deck.pop() {
            Some(card) => {
                let id = card.instance_id;
                seat.hand.push(card);
                DrawOutcome::Drawn(id)
            }
            None => DrawOutcome::DeckEmpty,
        }
    }

    /// Draw and log a `card_draw` when a card actually moved.
    pub fn draw_card_logged(&mut self, player: PlayerId) -> DrawOutcome {
        let outcome = self.draw_card(player);
        if let DrawOutcome::Drawn(instance_id) = outcome {
            let seat = &self.players[player];
            let template_id = seat
                .hand
                .last()
                .map(|c| c.template.template_id.clone())
                .unwrap_or_default();
            let kind = ActionKind::CardDraw(CardDraw {
                instance_id,
                template_id,
                hand_size: seat.hand.len(),
                deck_size: seat.deck.len(),
            });
            self.log(player, kind);
        }
        outcome
    }
}
