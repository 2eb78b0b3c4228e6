//! Level data model
//!
//! A level is a grid size plus a [`LevelLogic`] parameter block describing
//! spawn cadence, target lifetime, scoring tables, and win conditions. Levels
//! are serde round-trippable so stored or generated payloads with missing
//! fields load with the documented defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The kinds of targets that can occupy a board cell.
///
/// Ordering matters: weighted draws and fallbacks iterate kinds in this
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Dog,
    Cat,
    Rat,
    Bonus,
    Hazard,
}

impl TargetKind {
    /// All kinds in deterministic draw order.
    pub const ALL: [TargetKind; 5] = [
        TargetKind::Dog,
        TargetKind::Cat,
        TargetKind::Rat,
        TargetKind::Bonus,
        TargetKind::Hazard,
    ];

    /// Points awarded when a level's score table has no entry for the kind.
    pub fn default_points(self) -> i32 {
        match self {
            TargetKind::Dog => 2,
            TargetKind::Rat => 1,
            TargetKind::Cat => -5,
            TargetKind::Bonus => 10,
            TargetKind::Hazard => -10,
        }
    }

    /// Display glyph for board cells.
    pub fn icon(self) -> &'static str {
        match self {
            TargetKind::Dog => "🐶",
            TargetKind::Cat => "🐱",
            TargetKind::Rat => "🐭",
            TargetKind::Bonus => "⭐",
            TargetKind::Hazard => "💣",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetKind::Dog => "dog",
            TargetKind::Cat => "cat",
            TargetKind::Rat => "rat",
            TargetKind::Bonus => "bonus",
            TargetKind::Hazard => "hazard",
        }
    }
}

/// Win-condition flavor of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    /// Reach the goal score before time expires.
    #[default]
    Classic,
    /// Classic scoring, except every cat hit scores -15.
    Focus,
    /// Survival: hazard hits and missed must-catch targets cost lives.
    Catch,
}

impl GameType {
    pub fn label(self) -> &'static str {
        match self {
            GameType::Classic => "Classic",
            GameType::Focus => "Focus",
            GameType::Catch => "Catch",
        }
    }
}

/// Cosmetic audio/visual flavor tag. The engine carries it through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MoodProfile {
    #[default]
    Classic,
    Spooky,
    Upbeat,
    Frantic,
}

fn default_speed() -> f64 {
    1.0
}

fn default_size() -> f64 {
    1.0
}

fn default_spawn_interval() -> u32 {
    1200
}

fn default_active_duration() -> u32 {
    1000
}

fn default_win_goal() -> u32 {
    10
}

fn default_time_limit() -> u32 {
    30
}

fn default_weights() -> BTreeMap<TargetKind, u32> {
    BTreeMap::from([
        (TargetKind::Dog, 40),
        (TargetKind::Rat, 40),
        (TargetKind::Cat, 10),
        (TargetKind::Bonus, 5),
        (TargetKind::Hazard, 5),
    ])
}

/// Per-level gameplay parameters.
///
/// Base numbers only; difficulty and speed scaling are applied per session
/// (see `session::EffectiveParams`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLogic {
    /// Base ms between spawn ticks.
    pub spawn_interval_ms: u32,
    /// Base ms a target stays up before expiring unhit.
    pub active_duration_ms: u32,
    /// Base winning score (Classic/Focus).
    pub win_goal: u32,
    /// Session length in seconds. Difficulty never scales this.
    pub time_limit_secs: u32,
    /// Divides cadence and lifetime; > 1.0 means faster.
    pub speed_multiplier: f64,
    /// Cosmetic target scale for the presentation layer.
    pub size_multiplier: f64,
    pub game_type: GameType,
    pub mood: MoodProfile,
    /// Relative spawn weights per kind; need not sum to anything.
    pub target_weights: BTreeMap<TargetKind, u32>,
    /// Points per kind; absent kinds fall back to `TargetKind::default_points`.
    pub target_scores: BTreeMap<TargetKind, i32>,
    /// Which kinds cost a life when they expire unhit in Catch. Absent kinds
    /// use the default rule: every kind except Hazard penalizes.
    pub penalty_on_miss: BTreeMap<TargetKind, bool>,
}

impl Default for LevelLogic {
    fn default() -> Self {
        Self {
            spawn_interval_ms: default_spawn_interval(),
            active_duration_ms: default_active_duration(),
            win_goal: default_win_goal(),
            time_limit_secs: default_time_limit(),
            speed_multiplier: default_speed(),
            size_multiplier: default_size(),
            game_type: GameType::Classic,
            mood: MoodProfile::Classic,
            target_weights: default_weights(),
            target_scores: BTreeMap::new(),
            penalty_on_miss: BTreeMap::new(),
        }
    }
}

impl LevelLogic {
    /// Points for hitting `kind`: score table first, kind default otherwise.
    pub fn points_for(&self, kind: TargetKind) -> i32 {
        self.target_scores
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_points())
    }

    /// Whether an unhit expiry of `kind` costs a life in Catch.
    pub fn penalizes_on_miss(&self, kind: TargetKind) -> bool {
        self.penalty_on_miss
            .get(&kind)
            .copied()
            .unwrap_or(kind != TargetKind::Hazard)
    }
}

fn default_grid_size() -> usize {
    crate::consts::DEFAULT_GRID_SIZE
}

/// A playable level: metadata plus its [`LevelLogic`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLevel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// Board edge length in cells (3 to 5).
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default)]
    pub logic: LevelLogic,
    /// Running-average star rating, one decimal.
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub plays: u32,
    #[serde(default)]
    pub created_at: String,
}

impl GameLevel {
    pub fn record_play(&mut self) {
        self.plays = self.plays.saturating_add(1);
    }

    /// Folds a 1-5 star rating into the running average, rounded to one
    /// decimal. Returns the new rating.
    pub fn add_rating(&mut self, stars: u8) -> f32 {
        let stars = stars.clamp(1, 5);
        let total = f64::from(self.rating) * f64::from(self.rating_count) + f64::from(stars);
        let count = self.rating_count + 1;
        self.rating = ((total / f64::from(count)) * 10.0).round() as f32 / 10.0;
        self.rating_count = count;
        self.rating
    }
}

/// The out-of-the-box level.
pub fn builtin_level() -> GameLevel {
    GameLevel {
        id: "builtin-classic".to_string(),
        name: "Classic Kennel Chaos".to_string(),
        author: "mindwhack".to_string(),
        description: "Whack the dogs and rats, spare the cats.".to_string(),
        grid_size: 3,
        logic: LevelLogic::default(),
        rating: 4.5,
        rating_count: 2,
        plays: 0,
        created_at: "2023-10-01".to_string(),
    }
}
