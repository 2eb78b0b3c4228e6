//! Collaborator seams: cue events and end-of-session reports.
//!
//! The session core never touches audio or storage APIs. It emits [`Cue`]
//! values into an injected [`CueSink`] and hands one [`SessionReport`] to an
//! injected [`ResultSink`] when a run completes.

use crate::level::{GameType, TargetKind};
use crate::session::{Difficulty, Outcome};

/// Abstract feedback events, in emission order within a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// One tick of the 3-2-1 countdown (fired for each displayed value).
    CountdownTick,
    /// Countdown finished; play begins.
    SessionStart,
    /// A target was tapped; carries what it was worth.
    Hit { kind: TargetKind, points: i32 },
    /// Time is running out (last five seconds, once per second).
    LowTimeWarning,
    /// The run reached a terminal evaluation.
    SessionEnd { won: bool },
}

pub trait CueSink {
    fn cue(&mut self, cue: Cue);
}

/// Swallows every cue. Default for native runs and tests that don't observe
/// feedback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCues;

impl CueSink for NullCues {
    fn cue(&mut self, _cue: Cue) {}
}

/// What a completed (non-abandoned) run reports, exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub level_id: String,
    pub score: u32,
    pub hits: u32,
    pub outcome: Outcome,
    pub difficulty: Difficulty,
    pub game_type: GameType,
}

pub trait ResultSink {
    fn session_over(&mut self, report: &SessionReport);
}

/// Drops reports. Default when nothing consumes results.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResults;

impl ResultSink for NullResults {
    fn session_over(&mut self, _report: &SessionReport) {}
}

/// Logs each report at info level. Used by the native demo runner.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingResults;

impl ResultSink for LoggingResults {
    fn session_over(&mut self, report: &SessionReport) {
        log::info!(
            "session over: level={} {:?} score={} hits={} ({:?}, {})",
            report.level_id,
            report.outcome,
            report.score,
            report.hits,
            report.difficulty,
            report.game_type.label(),
        );
    }
}
