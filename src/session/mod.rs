//! Deterministic play-session core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by the caller's millisecond clock via `Session::advance`
//! - Seeded RNG only
//! - Explicit deadline records instead of host timers
//! - No rendering or platform dependencies

pub mod board;
pub mod difficulty;
pub mod hits;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use board::{ActiveTarget, Board};
pub use difficulty::{Difficulty, EffectiveParams};
pub use hits::{HitOutcome, apply_points, miss_costs_life, resolve_hit};
pub use scheduler::{ExpiryRecord, SpawnScheduler, weighted_draw};
pub use state::{Outcome, Session, SessionPhase};
