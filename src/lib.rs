//! MindWhack - a whack-a-target arcade game
//!
//! Core modules:
//! - `session`: Deterministic play-session engine (board, scheduler, phases)
//! - `level`: Level data model and scoring tables
//! - `cues`: Collaborator seams (cue sink, result sink)
//! - `generate`: Level logic generation fallback
//! - `library`: Level collection with plays and ratings
//! - `settings` / `profile`: LocalStorage-backed preferences and stats
//! - `audio`: Web Audio cue rendering (wasm only)

pub mod cues;
pub mod generate;
pub mod level;
pub mod library;
pub mod profile;
pub mod session;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use cues::{Cue, CueSink, NullCues, NullResults, ResultSink, SessionReport};
pub use level::{GameLevel, GameType, LevelLogic, MoodProfile, TargetKind};
pub use library::LevelLibrary;
pub use profile::Profile;
pub use session::{Difficulty, EffectiveParams, Outcome, Session, SessionPhase};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Countdown display start value (3-2-1)
    pub const COUNTDOWN_START: u8 = 3;
    /// Lives per run; only drained in Catch sessions
    pub const DEFAULT_LIVES: u8 = 3;
    /// One clock tick
    pub const SECOND_MS: f64 = 1000.0;
    /// How long the cosmetic hit flash covers a cell
    pub const HIT_FLASH_MS: f64 = 500.0;
    /// Warning cues start when this much time remains
    pub const LOW_TIME_WARNING_SECS: u32 = 5;

    /// Supported board sizes
    pub const MIN_GRID_SIZE: usize = 3;
    pub const MAX_GRID_SIZE: usize = 5;
    pub const DEFAULT_GRID_SIZE: usize = 3;
}
