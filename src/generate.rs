//! Level logic generation seam
//!
//! The editor asks a generator for a [`LevelLogic`] matching a free-text
//! prompt. External services are out of scope here; the shipped
//! [`FallbackGenerator`] always answers with a fixed, known-good block, which
//! is also what a service-backed generator degrades to when unreachable.

use std::collections::BTreeMap;

use crate::level::{GameType, LevelLogic, MoodProfile, TargetKind};

pub trait LogicGenerator {
    fn generate(&self, prompt: &str) -> LevelLogic;
}

/// Deterministic generator of the known-good fallback block.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackGenerator;

impl LogicGenerator for FallbackGenerator {
    fn generate(&self, prompt: &str) -> LevelLogic {
        log::debug!("Generating fallback logic for prompt: {prompt:?}");
        fallback_logic()
    }
}

/// The fixed fallback parameter block.
pub fn fallback_logic() -> LevelLogic {
    LevelLogic {
        spawn_interval_ms: 1000,
        active_duration_ms: 800,
        win_goal: 15,
        time_limit_secs: 30,
        speed_multiplier: 1.0,
        size_multiplier: 1.0,
        game_type: GameType::Classic,
        mood: MoodProfile::Classic,
        target_weights: BTreeMap::from([
            (TargetKind::Dog, 30),
            (TargetKind::Cat, 20),
            (TargetKind::Rat, 30),
            (TargetKind::Bonus, 10),
            (TargetKind::Hazard, 10),
        ]),
        target_scores: BTreeMap::from([
            (TargetKind::Dog, 2),
            (TargetKind::Cat, -5),
            (TargetKind::Rat, 1),
            (TargetKind::Bonus, 10),
            (TargetKind::Hazard, -10),
        ]),
        penalty_on_miss: BTreeMap::new(),
    }
}

/// Prompt starters offered when no suggestion source is available.
pub fn theme_suggestions() -> [&'static str; 4] {
    ["Cyber City", "Magical Forest", "Deep Space", "Candy Land"]
}
