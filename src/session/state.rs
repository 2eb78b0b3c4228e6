//! Session state: phases, outcome, and the [`Session`] container.
//!
//! Behavior (the event pump and player operations) lives in `tick`; this
//! module owns the data and the construction/reset paths.

use serde::{Deserialize, Serialize};

use crate::consts::{COUNTDOWN_START, DEFAULT_LIVES, MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::cues::{Cue, CueSink, ResultSink};
use crate::level::{GameLevel, GameType, LevelLogic, MoodProfile};
use crate::session::board::Board;
use crate::session::difficulty::{Difficulty, EffectiveParams};
use crate::session::scheduler::SpawnScheduler;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// 3-2-1 pre-roll; board is idle.
    Countdown,
    /// Timers run, taps resolve.
    Playing,
    /// Everything frozen; only resume/restart act.
    Paused,
    /// Terminal. Restart begins a fresh run.
    Ended,
}

/// Terminal evaluation of a run. Abandoned sessions have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// One play-through of a level: board, timers, score, lives, and phase,
/// driven entirely by an external millisecond clock via `advance`.
pub struct Session {
    pub(super) level_id: String,
    pub(super) logic: LevelLogic,
    pub(super) difficulty: Difficulty,
    pub(super) params: EffectiveParams,
    pub(super) board: Board,
    pub(super) scheduler: SpawnScheduler,
    pub(super) score: u32,
    pub(super) hits: u32,
    pub(super) lives: u8,
    pub(super) time_left_secs: u32,
    pub(super) countdown: u8,
    pub(super) phase: SessionPhase,
    pub(super) outcome: Option<Outcome>,
    /// Per-cell cosmetic "hit" flash deadlines.
    pub(super) flashes: Vec<Option<f64>>,
    pub(super) countdown_due: Option<f64>,
    pub(super) second_due: Option<f64>,
    /// Clock value of the most recent `advance`; never decreases.
    pub(super) now: f64,
    /// Deadlines are armed lazily on the first `advance`, so construction
    /// needs no clock.
    pub(super) started: bool,
    pub(super) paused_from: Option<SessionPhase>,
    pub(super) cues: Box<dyn CueSink>,
    pub(super) results: Box<dyn ResultSink>,
}

impl Session {
    pub fn new(
        level: &GameLevel,
        difficulty: Difficulty,
        seed: u64,
        cues: Box<dyn CueSink>,
        results: Box<dyn ResultSink>,
    ) -> Self {
        let grid_size = level.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        let params = EffectiveParams::derive(&level.logic, difficulty);
        let cell_count = grid_size * grid_size;
        Self {
            level_id: level.id.clone(),
            logic: level.logic.clone(),
            difficulty,
            params,
            board: Board::new(grid_size),
            scheduler: SpawnScheduler::new(seed),
            score: 0,
            hits: 0,
            lives: DEFAULT_LIVES,
            time_left_secs: params.time_limit_secs,
            countdown: COUNTDOWN_START,
            phase: SessionPhase::Countdown,
            outcome: None,
            flashes: vec![None; cell_count],
            countdown_due: None,
            second_due: None,
            now: 0.0,
            started: false,
            paused_from: None,
            cues,
            results,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Successful taps this run.
    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    /// Current countdown display value (3..=1) during the pre-roll.
    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn effective(&self) -> EffectiveParams {
        self.params
    }

    /// Winning score for Classic/Focus after difficulty scaling.
    pub fn win_goal(&self) -> u32 {
        self.params.win_goal
    }

    pub fn game_type(&self) -> GameType {
        self.logic.game_type
    }

    pub fn mood(&self) -> MoodProfile {
        self.logic.mood
    }

    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid_size(&self) -> usize {
        self.board.grid_size()
    }

    /// Whether a cell is inside its post-hit flash window.
    pub fn is_flashing(&self, cell: usize) -> bool {
        self.flashes
            .get(cell)
            .copied()
            .flatten()
            .is_some_and(|due| due > self.now)
    }

    pub(super) fn emit(&mut self, cue: Cue) {
        self.cues.cue(cue);
    }

    /// Zeroes a run: score, lives, clock, board, flashes, and every pending
    /// deadline. Callers set the phase and re-arm.
    pub(super) fn reset_run(&mut self) {
        self.score = 0;
        self.hits = 0;
        self.lives = DEFAULT_LIVES;
        self.time_left_secs = self.params.time_limit_secs;
        self.countdown = COUNTDOWN_START;
        self.outcome = None;
        self.board.clear_all();
        self.flashes.fill(None);
        self.scheduler.disarm();
        self.countdown_due = None;
        self.second_due = None;
        self.paused_from = None;
    }
}
