//! Pure hit and miss resolution.
//!
//! No session state here: given a kind and the level's tables, compute what a
//! tap or an unhit expiry is worth. The session applies the results.

use crate::level::{GameType, LevelLogic, TargetKind};

/// What one successful tap does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub points: i32,
    /// True for hazard hits in Catch.
    pub costs_life: bool,
}

/// Resolves a tap on an active target of `kind`.
///
/// Points come from the level's score table, falling back to the kind
/// default. Focus overrides every cat hit to -15 regardless of the table.
pub fn resolve_hit(kind: TargetKind, logic: &LevelLogic) -> HitOutcome {
    let points = if logic.game_type == GameType::Focus && kind == TargetKind::Cat {
        -15
    } else {
        logic.points_for(kind)
    };
    let costs_life = logic.game_type == GameType::Catch && kind == TargetKind::Hazard;
    HitOutcome { points, costs_life }
}

/// Whether an unhit expiry of `kind` costs a life. Only Catch penalizes
/// misses, per the level's miss-penalty table.
pub fn miss_costs_life(kind: TargetKind, logic: &LevelLogic) -> bool {
    logic.game_type == GameType::Catch && logic.penalizes_on_miss(kind)
}

/// Applies a signed point delta to a score that floors at zero.
pub fn apply_points(score: u32, delta: i32) -> u32 {
    (i64::from(score) + i64::from(delta)).max(0) as u32
}
