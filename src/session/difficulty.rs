//! Difficulty tiers and effective parameter derivation.
//!
//! A session never reads base [`LevelLogic`] numbers directly; it derives an
//! [`EffectiveParams`] once at start (and again on restart or difficulty
//! change) and holds it constant for the run.

use serde::{Deserialize, Serialize};

use crate::level::LevelLogic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Next tier, wrapping. Used by the shell's cycle button.
    pub fn cycle(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Multiplier applied to the base win goal (then floored).
    fn goal_factor(self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Multiplier applied to the speed-adjusted spawn interval.
    fn interval_factor(self) -> f64 {
        match self {
            Difficulty::Easy => 1.5,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 0.7,
        }
    }

    /// Multiplier applied to the speed-adjusted active duration.
    fn duration_factor(self) -> f64 {
        match self {
            Difficulty::Easy => 1.3,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 0.7,
        }
    }
}

/// Per-session numbers after speed and difficulty scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveParams {
    /// Ms between spawn ticks.
    pub spawn_interval_ms: f64,
    /// Ms a target stays up before expiring.
    pub active_duration_ms: f64,
    /// Winning score for Classic/Focus.
    pub win_goal: u32,
    /// Session length in seconds, unscaled by difficulty.
    pub time_limit_secs: u32,
}

impl EffectiveParams {
    pub fn derive(logic: &LevelLogic, difficulty: Difficulty) -> Self {
        let speed = if logic.speed_multiplier > 0.0 {
            logic.speed_multiplier
        } else {
            1.0
        };
        let interval =
            (f64::from(logic.spawn_interval_ms.max(1)) / speed) * difficulty.interval_factor();
        let duration =
            (f64::from(logic.active_duration_ms.max(1)) / speed) * difficulty.duration_factor();
        let goal = (f64::from(logic.win_goal) * difficulty.goal_factor()).floor() as u32;
        Self {
            spawn_interval_ms: interval,
            active_duration_ms: duration,
            win_goal: goal.max(1),
            time_limit_secs: logic.time_limit_secs.max(1),
        }
    }
}
