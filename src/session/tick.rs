//! Session event pump and player operations.
//!
//! Everything is driven by `advance(now_ms)`: countdown ticks, target
//! expiries, the once-per-second clock, and spawn ticks all fire from due
//! deadlines. Player input arrives as discrete operations (`tap`, `pause`,
//! `resume`, `restart`, `abandon`) between frames.

use crate::consts::{HIT_FLASH_MS, LOW_TIME_WARNING_SECS, SECOND_MS};
use crate::cues::{Cue, SessionReport};
use crate::level::GameType;
use crate::session::difficulty::{Difficulty, EffectiveParams};
use crate::session::hits::{apply_points, miss_costs_life, resolve_hit};
use crate::session::state::{Outcome, Session, SessionPhase};

impl Session {
    /// Processes every deadline due at `now_ms`, in order: countdown ticks,
    /// flash clears, target expiries, second ticks, then at most one spawn
    /// tick. A clock that moves backwards is clamped to the last seen value.
    pub fn advance(&mut self, now_ms: f64) {
        let now = if now_ms.is_finite() {
            now_ms.max(self.now)
        } else {
            self.now
        };
        self.now = now;
        if !self.started {
            self.started = true;
            if self.phase == SessionPhase::Countdown {
                self.emit(Cue::CountdownTick);
                self.countdown_due = Some(now + SECOND_MS);
            }
        }
        match self.phase {
            SessionPhase::Countdown => self.run_countdown(now),
            SessionPhase::Paused | SessionPhase::Ended => return,
            SessionPhase::Playing => {}
        }
        if self.phase == SessionPhase::Playing {
            self.clear_expired_flashes(now);
            self.fire_due_expiries(now);
            self.fire_second_ticks(now);
            self.fire_spawn_tick(now);
        }
    }

    /// A tap on `cell`. Ignored outside Playing, out of range, on an empty
    /// cell, or while the cell's hit flash is showing; an ignored tap has no
    /// side effects at all.
    pub fn tap(&mut self, cell: usize) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        if cell >= self.board.cell_count() || self.is_flashing(cell) {
            return;
        }
        let Some(target) = self.board.target_at(cell) else {
            return;
        };
        self.board.clear(cell);
        self.scheduler.cancel_expiry(cell, target.spawn_id);
        let hit = resolve_hit(target.kind, &self.logic);
        self.score = apply_points(self.score, hit.points);
        self.hits += 1;
        self.flashes[cell] = Some(self.now + HIT_FLASH_MS);
        self.emit(Cue::Hit { kind: target.kind, points: hit.points });
        if hit.costs_life && self.lose_life() {
            return;
        }
        // Score wins the score-vs-time race: the goal check runs at hit time,
        // before any same-instant clock tick.
        if self.logic.game_type != GameType::Catch && self.score >= self.params.win_goal {
            self.end_session();
        }
    }

    /// Freezes the session. Valid from Playing or Countdown; disarms every
    /// deadline so nothing can fire while paused.
    pub fn pause(&mut self) {
        if !matches!(self.phase, SessionPhase::Playing | SessionPhase::Countdown) {
            return;
        }
        self.paused_from = Some(self.phase);
        self.phase = SessionPhase::Paused;
        self.scheduler.disarm();
        self.countdown_due = None;
        self.second_due = None;
    }

    /// Unfreezes. Surviving targets get a fresh full lifetime, the spawn
    /// cycle re-arms immediately, and the clock tick lands one second out.
    pub fn resume(&mut self) {
        if self.phase != SessionPhase::Paused {
            return;
        }
        let back = self.paused_from.take().unwrap_or(SessionPhase::Playing);
        self.phase = back;
        match back {
            SessionPhase::Playing => {
                self.scheduler.arm_spawning(self.now);
                let due = self.now + self.params.active_duration_ms;
                let occupants: Vec<_> = self.board.occupied().collect();
                for (cell, target) in occupants {
                    self.scheduler
                        .track_expiry(cell, target.kind, target.spawn_id, due);
                }
                self.second_due = Some(self.now + SECOND_MS);
            }
            SessionPhase::Countdown => {
                self.countdown_due = Some(self.now + SECOND_MS);
            }
            _ => {}
        }
    }

    /// Back to a fresh countdown from any phase. Voids every pending
    /// deadline; activation ids are never reused, so records from the old
    /// run can never act on the new one.
    pub fn restart(&mut self) {
        self.reset_run();
        self.phase = SessionPhase::Countdown;
        if self.started {
            self.emit(Cue::CountdownTick);
            self.countdown_due = Some(self.now + SECOND_MS);
        }
    }

    /// Ends the session without an outcome, a cue, or a report. The exit
    /// path for a player leaving mid-run.
    pub fn abandon(&mut self) {
        self.scheduler.disarm();
        self.countdown_due = None;
        self.second_due = None;
        self.board.clear_all();
        self.flashes.fill(None);
        self.outcome = None;
        self.phase = SessionPhase::Ended;
    }

    /// Effective parameters are constant for a run, so a tier change derives
    /// fresh numbers and restarts. No-op when the tier is unchanged.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty == self.difficulty {
            return;
        }
        self.difficulty = difficulty;
        self.params = EffectiveParams::derive(&self.logic, difficulty);
        self.restart();
    }

    fn run_countdown(&mut self, now: f64) {
        while self.phase == SessionPhase::Countdown {
            let Some(due) = self.countdown_due else { break };
            if due > now {
                break;
            }
            if self.countdown > 1 {
                self.countdown -= 1;
                self.emit(Cue::CountdownTick);
                self.countdown_due = Some(due + SECOND_MS);
            } else {
                self.countdown = 0;
                self.countdown_due = None;
                self.begin_playing(now);
            }
        }
    }

    fn begin_playing(&mut self, now: f64) {
        self.phase = SessionPhase::Playing;
        self.emit(Cue::SessionStart);
        self.scheduler.arm_spawning(now);
        self.second_due = Some(now + SECOND_MS);
    }

    fn clear_expired_flashes(&mut self, now: f64) {
        for slot in &mut self.flashes {
            if slot.is_some_and(|due| due <= now) {
                *slot = None;
            }
        }
    }

    /// Fires due expiries. A record only acts when the cell still holds the
    /// same activation (kind and spawn id); anything else is stale and
    /// dropped.
    fn fire_due_expiries(&mut self, now: f64) {
        for record in self.scheduler.take_due_expiries(now) {
            if self.phase != SessionPhase::Playing {
                break;
            }
            let Some(target) = self.board.target_at(record.cell) else {
                continue;
            };
            if target.spawn_id != record.spawn_id || target.kind != record.kind {
                continue;
            }
            self.board.clear(record.cell);
            if miss_costs_life(record.kind, &self.logic) {
                self.lose_life();
            }
        }
    }

    fn fire_second_ticks(&mut self, now: f64) {
        while self.phase == SessionPhase::Playing {
            let Some(due) = self.second_due else { break };
            if due > now {
                break;
            }
            if self.time_left_secs <= 1 {
                self.time_left_secs = 0;
                self.second_due = None;
                self.end_session();
            } else {
                if self.time_left_secs <= LOW_TIME_WARNING_SECS {
                    self.emit(Cue::LowTimeWarning);
                }
                self.time_left_secs -= 1;
                self.second_due = Some(due + SECOND_MS);
            }
        }
    }

    fn fire_spawn_tick(&mut self, now: f64) {
        if self.phase == SessionPhase::Playing && self.scheduler.spawn_due(now) {
            self.scheduler.spawn_into(
                &mut self.board,
                &self.logic,
                self.params.active_duration_ms,
                now,
            );
            self.scheduler.rearm_spawn(now, self.params.spawn_interval_ms);
        }
    }

    fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.end_session();
            true
        } else {
            false
        }
    }

    /// The single terminal evaluation: Catch wins on surviving lives, the
    /// score modes win on reaching the goal. Emits one end cue and one
    /// report.
    fn end_session(&mut self) {
        let won = match self.logic.game_type {
            GameType::Catch => self.lives > 0,
            GameType::Classic | GameType::Focus => self.score >= self.params.win_goal,
        };
        let outcome = if won { Outcome::Won } else { Outcome::Lost };
        self.phase = SessionPhase::Ended;
        self.outcome = Some(outcome);
        self.scheduler.disarm();
        self.countdown_due = None;
        self.second_due = None;
        self.board.clear_all();
        self.flashes.fill(None);
        self.emit(Cue::SessionEnd { won });
        let report = SessionReport {
            level_id: self.level_id.clone(),
            score: self.score,
            hits: self.hits,
            outcome,
            difficulty: self.difficulty,
            game_type: self.logic.game_type,
        };
        self.results.session_over(&report);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use crate::cues::{Cue, CueSink, ResultSink, SessionReport};
    use crate::level::{GameLevel, GameType, LevelLogic, TargetKind, builtin_level};
    use crate::session::difficulty::Difficulty;
    use crate::session::state::{Outcome, Session, SessionPhase};

    /// Captures cues and reports through shared handles.
    #[derive(Clone, Default)]
    struct Recorder {
        cues: Rc<RefCell<Vec<Cue>>>,
        reports: Rc<RefCell<Vec<SessionReport>>>,
    }

    impl Recorder {
        fn count(&self, pred: impl Fn(&Cue) -> bool) -> usize {
            self.cues.borrow().iter().filter(|c| pred(c)).count()
        }
    }

    impl CueSink for Recorder {
        fn cue(&mut self, cue: Cue) {
            self.cues.borrow_mut().push(cue);
        }
    }

    impl ResultSink for Recorder {
        fn session_over(&mut self, report: &SessionReport) {
            self.reports.borrow_mut().push(report.clone());
        }
    }

    fn level_with(logic: LevelLogic) -> GameLevel {
        GameLevel { logic, ..builtin_level() }
    }

    fn single_kind(kind: TargetKind, game_type: GameType) -> GameLevel {
        level_with(LevelLogic {
            game_type,
            spawn_interval_ms: 1000,
            active_duration_ms: 800,
            target_weights: BTreeMap::from([(kind, 10)]),
            ..LevelLogic::default()
        })
    }

    fn session_with(level: &GameLevel) -> (Session, Recorder) {
        let rec = Recorder::default();
        let session = Session::new(
            level,
            Difficulty::Medium,
            7,
            Box::new(rec.clone()),
            Box::new(rec.clone()),
        );
        (session, rec)
    }

    /// Runs the countdown so the session is Playing at t=3000 with its first
    /// spawn already on the board.
    fn started_session(level: &GameLevel) -> (Session, Recorder) {
        let (mut s, rec) = session_with(level);
        s.advance(0.0);
        s.advance(3000.0);
        (s, rec)
    }

    fn first_occupied(s: &Session) -> usize {
        s.board().occupied().next().map(|(cell, _)| cell).unwrap()
    }

    #[test]
    fn test_countdown_ticks_then_playing_with_immediate_spawn() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, rec) = session_with(&level);
        s.advance(0.0);
        assert_eq!(s.phase(), SessionPhase::Countdown);
        assert_eq!(s.countdown(), 3);
        s.advance(999.0);
        assert_eq!(s.countdown(), 3);
        s.advance(1000.0);
        assert_eq!(s.countdown(), 2);
        s.advance(2000.0);
        assert_eq!(s.countdown(), 1);
        assert_eq!(s.board().active_count(), 0);
        s.advance(3000.0);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.board().active_count(), 1);
        assert_eq!(rec.count(|c| matches!(c, Cue::CountdownTick)), 3);
        assert_eq!(rec.count(|c| matches!(c, Cue::SessionStart)), 1);
    }

    #[test]
    fn test_tap_scores_flashes_and_cancels_expiry() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, rec) = started_session(&level);
        let cell = first_occupied(&s);
        s.tap(cell);
        assert_eq!(s.score(), 2);
        assert_eq!(s.hits(), 1);
        assert_eq!(s.board().active_count(), 0);
        assert!(s.is_flashing(cell));
        assert_eq!(
            rec.count(|c| matches!(c, Cue::Hit { kind: TargetKind::Dog, points: 2 })),
            1
        );
        // past the would-be expiry: nothing fires for the hit activation
        s.advance(3900.0);
        assert_eq!(s.score(), 2);
        assert_eq!(s.lives(), 3);
    }

    #[test]
    fn test_ignored_taps_have_no_effect() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, rec) = session_with(&level);
        s.advance(0.0);
        s.tap(0);
        assert_eq!(s.score(), 0);

        let (mut s, rec2) = started_session(&level);
        let occupied = first_occupied(&s);
        let empty = (0..s.board().cell_count()).find(|c| *c != occupied).unwrap();
        s.tap(empty);
        s.tap(999);
        assert_eq!(s.score(), 0);
        assert_eq!(s.hits(), 0);
        assert_eq!(rec.count(|c| matches!(c, Cue::Hit { .. })), 0);
        assert_eq!(rec2.count(|c| matches!(c, Cue::Hit { .. })), 0);
    }

    #[test]
    fn test_tap_blocked_while_flash_shows() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, _rec) = started_session(&level);
        let cell = first_occupied(&s);
        s.tap(cell);
        assert_eq!(s.score(), 2);
        // a new occupant lands while the flash is still up
        s.board.place(cell, TargetKind::Dog, 999);
        s.tap(cell);
        assert_eq!(s.score(), 2);
        assert!(s.board().target_at(cell).is_some());
        // flash expires at 3500; afterwards the cell is tappable again
        s.advance(3500.0);
        s.tap(cell);
        assert_eq!(s.score(), 4);
    }

    #[test]
    fn test_early_win_the_moment_goal_is_reached() {
        let mut level = single_kind(TargetKind::Dog, GameType::Classic);
        level.logic.win_goal = 2;
        let (mut s, rec) = started_session(&level);
        s.tap(first_occupied(&s));
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert_eq!(s.outcome(), Some(Outcome::Won));
        assert_eq!(rec.count(|c| matches!(c, Cue::SessionEnd { won: true })), 1);
        let reports = rec.reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].score, 2);
        assert_eq!(reports[0].hits, 1);
        assert_eq!(reports[0].outcome, Outcome::Won);
        assert_eq!(reports[0].level_id, level.id);
        assert_eq!(reports[0].game_type, GameType::Classic);
    }

    #[test]
    fn test_focus_cat_hit_floors_at_zero() {
        let level = single_kind(TargetKind::Cat, GameType::Focus);
        let (mut s, rec) = started_session(&level);
        s.tap(first_occupied(&s));
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(
            rec.count(|c| matches!(c, Cue::Hit { kind: TargetKind::Cat, points: -15 })),
            1
        );
    }

    #[test]
    fn test_catch_third_hazard_hit_ends_in_loss() {
        let mut level = single_kind(TargetKind::Hazard, GameType::Catch);
        level.logic.active_duration_ms = 10_000;
        let (mut s, rec) = started_session(&level);
        s.tap(first_occupied(&s));
        assert_eq!(s.lives(), 2);
        s.advance(4000.0);
        s.tap(first_occupied(&s));
        assert_eq!(s.lives(), 1);
        s.advance(5000.0);
        s.tap(first_occupied(&s));
        assert_eq!(s.lives(), 0);
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert_eq!(s.outcome(), Some(Outcome::Lost));
        assert_eq!(rec.count(|c| matches!(c, Cue::SessionEnd { won: false })), 1);
        assert_eq!(rec.reports.borrow().len(), 1);
    }

    #[test]
    fn test_catch_three_missed_targets_end_in_loss() {
        let level = single_kind(TargetKind::Dog, GameType::Catch);
        let (mut s, _rec) = started_session(&level);
        s.advance(3800.0);
        assert_eq!(s.lives(), 2);
        assert_eq!(s.board().active_count(), 0);
        s.advance(4000.0);
        s.advance(4800.0);
        assert_eq!(s.lives(), 1);
        s.advance(5000.0);
        s.advance(5800.0);
        assert_eq!(s.lives(), 0);
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert_eq!(s.outcome(), Some(Outcome::Lost));
    }

    #[test]
    fn test_hazard_expiry_costs_nothing() {
        let level = single_kind(TargetKind::Hazard, GameType::Catch);
        let (mut s, _rec) = started_session(&level);
        s.advance(3800.0);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.board().active_count(), 0);
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_hit_target_never_also_penalized_as_miss() {
        let level = single_kind(TargetKind::Dog, GameType::Catch);
        let (mut s, _rec) = started_session(&level);
        s.tap(first_occupied(&s));
        s.advance(3900.0);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_stale_expiry_cannot_clear_replacement_target() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, _rec) = started_session(&level);
        let cell = first_occupied(&s);
        s.tap(cell);
        // same kind, same cell, newer activation; a leftover record for the
        // old activation must not touch it
        s.board.place(cell, TargetKind::Dog, 999);
        s.scheduler.track_expiry(cell, TargetKind::Dog, 1, 3600.0);
        s.advance(3700.0);
        assert_eq!(s.board().target_at(cell).map(|t| t.spawn_id), Some(999));
    }

    #[test]
    fn test_pause_freezes_board_clock_and_spawns() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, _rec) = started_session(&level);
        assert_eq!(s.board().active_count(), 1);
        s.pause();
        assert_eq!(s.phase(), SessionPhase::Paused);
        s.advance(60_000.0);
        assert_eq!(s.board().active_count(), 1);
        assert_eq!(s.time_left_secs(), 30);
        assert_eq!(s.score(), 0);

        s.resume();
        assert_eq!(s.phase(), SessionPhase::Playing);
        s.advance(60_001.0);
        // immediate spawn on resume, and the survivor got a fresh lifetime
        assert_eq!(s.board().active_count(), 2);
        assert_eq!(s.time_left_secs(), 30);
        s.advance(60_900.0);
        // both expire only after a full fresh duration
        assert_eq!(s.board().active_count(), 0);
    }

    #[test]
    fn test_pause_during_countdown_resumes_countdown() {
        let level = builtin_level();
        let (mut s, _rec) = session_with(&level);
        s.advance(0.0);
        s.advance(1000.0);
        assert_eq!(s.countdown(), 2);
        s.pause();
        s.advance(50_000.0);
        assert_eq!(s.phase(), SessionPhase::Paused);
        assert_eq!(s.countdown(), 2);
        s.resume();
        assert_eq!(s.phase(), SessionPhase::Countdown);
        s.advance(51_000.0);
        assert_eq!(s.countdown(), 1);
        s.advance(52_000.0);
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_time_expiry_without_goal_is_a_loss() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, rec) = started_session(&level);
        s.advance(33_000.0);
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert_eq!(s.time_left_secs(), 0);
        assert_eq!(s.outcome(), Some(Outcome::Lost));
        assert_eq!(rec.count(|c| matches!(c, Cue::LowTimeWarning)), 4);
        assert_eq!(rec.count(|c| matches!(c, Cue::SessionEnd { won: false })), 1);
        assert_eq!(rec.reports.borrow().len(), 1);
    }

    #[test]
    fn test_catch_survival_to_time_expiry_wins() {
        let level = single_kind(TargetKind::Hazard, GameType::Catch);
        let (mut s, rec) = started_session(&level);
        let mut t = 3000.0;
        while s.phase() == SessionPhase::Playing {
            t += 250.0;
            s.advance(t);
        }
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.outcome(), Some(Outcome::Won));
        assert_eq!(rec.count(|c| matches!(c, Cue::SessionEnd { won: true })), 1);
    }

    #[test]
    fn test_restart_resets_run_and_voids_old_deadlines() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, _rec) = started_session(&level);
        s.tap(first_occupied(&s));
        s.advance(4000.0);
        assert_eq!(s.board().active_count(), 1);
        s.restart();
        assert_eq!(s.phase(), SessionPhase::Countdown);
        assert_eq!(s.countdown(), 3);
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.time_left_secs(), 30);
        assert_eq!(s.board().active_count(), 0);
        assert_eq!(s.outcome(), None);
        // the old run's expiry (due 4800) and spawn deadlines are gone
        s.advance(4900.0);
        assert_eq!(s.countdown(), 3);
        assert_eq!(s.board().active_count(), 0);
        s.advance(5000.0);
        assert_eq!(s.countdown(), 2);
        s.advance(7000.0);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.board().active_count(), 1);
    }

    #[test]
    fn test_restart_leaves_ended_state() {
        let mut level = single_kind(TargetKind::Dog, GameType::Classic);
        level.logic.win_goal = 2;
        let (mut s, _rec) = started_session(&level);
        s.tap(first_occupied(&s));
        assert_eq!(s.phase(), SessionPhase::Ended);
        s.restart();
        assert_eq!(s.phase(), SessionPhase::Countdown);
        assert_eq!(s.outcome(), None);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_abandon_reports_and_cues_nothing() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, rec) = started_session(&level);
        s.abandon();
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert_eq!(s.outcome(), None);
        assert_eq!(rec.count(|c| matches!(c, Cue::SessionEnd { .. })), 0);
        assert!(rec.reports.borrow().is_empty());
    }

    #[test]
    fn test_difficulty_change_rescales_and_restarts() {
        let level = builtin_level();
        let (mut s, _rec) = started_session(&level);
        assert_eq!(s.win_goal(), 10);
        s.set_difficulty(Difficulty::Hard);
        assert_eq!(s.phase(), SessionPhase::Countdown);
        assert_eq!(s.win_goal(), 15);
        assert_eq!(s.time_left_secs(), 30);
        assert_eq!(s.score(), 0);
        // same tier again is a no-op: no restart once playing
        s.advance(4000.0);
        s.advance(6000.0);
        assert_eq!(s.phase(), SessionPhase::Playing);
        s.set_difficulty(Difficulty::Hard);
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_backwards_clock_clamps() {
        let level = single_kind(TargetKind::Dog, GameType::Classic);
        let (mut s, rec) = started_session(&level);
        s.advance(2000.0);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.board().active_count(), 1);
        assert_eq!(rec.count(|c| matches!(c, Cue::CountdownTick)), 3);
        s.advance(4000.0);
        assert_eq!(s.time_left_secs(), 29);
        // the first dog expired at 3800 and the 4000 tick spawned a new one
        assert_eq!(s.board().active_count(), 1);
    }

    #[test]
    fn test_full_board_skips_spawn_ticks() {
        let level = level_with(LevelLogic {
            spawn_interval_ms: 1000,
            active_duration_ms: 60_000,
            target_weights: BTreeMap::from([(TargetKind::Dog, 10)]),
            ..LevelLogic::default()
        });
        let (mut s, _rec) = started_session(&level);
        let mut t = 3000.0;
        for _ in 0..12 {
            t += 1000.0;
            s.advance(t);
        }
        assert_eq!(s.board().active_count(), 9);
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_same_seed_same_script_same_session() {
        let level = builtin_level();
        let run = || {
            let rec = Recorder::default();
            let mut s = Session::new(
                &level,
                Difficulty::Medium,
                42,
                Box::new(rec.clone()),
                Box::new(rec),
            );
            s.advance(0.0);
            let mut t = 0.0;
            while t < 8000.0 {
                t += 500.0;
                s.advance(t);
                let first_occupied = s.board().occupied().next().map(|(cell, _)| cell);
                if let Some(cell) = first_occupied {
                    s.tap(cell);
                }
            }
            s
        };
        let a = run();
        let b = run();
        assert_eq!(a.score(), b.score());
        assert_eq!(a.hits(), b.hits());
        assert_eq!(a.lives(), b.lives());
        assert_eq!(a.time_left_secs(), b.time_left_secs());
        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.board(), b.board());
    }
}
