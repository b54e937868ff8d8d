//! Game state module - the single owner of a play session
//!
//! `GameState` ties the board, the piece controller, the spawner, the scoring
//! counters and the gravity clock together. Every input and every clock tick
//! goes through it, one call at a time, so no state is shared or global.
//!
//! Active piece lifecycle: Falling → (downward move blocked) → Locking (merge
//! and sweep) → Spawning → Falling, or GameOver when the spawn is blocked.

use crate::board::Board;
use crate::clock::GameClock;
use crate::controller::PieceController;
use crate::pieces::Piece;
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::{Rules, SessionStats};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::spawner::{SpawnResult, Spawner};
use crate::types::*;

/// What one clock tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    /// An automatic downward step was applied (it may have locked the piece)
    pub gravity_step: bool,
    /// The session is still running and wants another tick
    pub reschedule: bool,
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    rules: Rules,
    board: Board,
    controller: PieceController,
    spawner: Spawner,
    stats: SessionStats,
    phase: Phase,
    clock: GameClock,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Default 10x20 game with uniform random pieces from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_rules(BOARD_WIDTH, BOARD_HEIGHT, Rules::default(), seed)
    }

    /// Custom board size and progression rules with uniform random pieces
    pub fn with_rules(width: u8, height: u8, rules: Rules, seed: u32) -> Self {
        Self::with_source(
            Board::with_size(width, height),
            rules,
            Box::new(UniformSource::new(seed)),
        )
    }

    /// Start from an existing board and piece source
    pub fn with_source(board: Board, rules: Rules, source: Box<dyn PieceSource>) -> Self {
        Self {
            rules,
            board,
            controller: PieceController::new(),
            spawner: Spawner::new(source),
            stats: SessionStats::default(),
            phase: Phase::Ready,
            clock: GameClock::new(),
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    pub fn lines(&self) -> u32 {
        self.stats.lines
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.controller.active()
    }

    /// The buffered piece that will spawn next
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.spawner.peek()
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        self.rules.drop_interval_ms(self.stats.level)
    }

    /// Row the active piece would land on
    pub fn ghost_y(&self) -> Option<i8> {
        self.controller.landing_y(&self.board)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_id_grid(&mut out.board);
        out.active = self.controller.active().copied().map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self
            .spawner
            .peek()
            .map(|kind| PieceSnapshot::from(Piece::new(kind, 0, 0)));
        out.phase = self.phase;
        out.score = self.stats.score;
        out.level = self.stats.level;
        out.lines = self.stats.lines;
        out.drop_interval_ms = self.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Begin play from the ready state. Does nothing in any other phase; a
    /// finished game has to be reset first.
    pub fn request_start(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.phase = Phase::Running;
        self.clock.reset();
        self.clock.start();
        self.spawn_next();
    }

    /// Toggle between running and paused.
    pub fn request_pause(&mut self) {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.clock.stop();
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.clock.start();
            }
            Phase::Ready | Phase::GameOver => {}
        }
    }

    /// Empty the board, zero the counters and return to the ready state.
    pub fn request_reset(&mut self) {
        self.board.clear();
        self.controller.clear();
        self.spawner.clear();
        self.stats = SessionStats::default();
        self.phase = Phase::Ready;
        self.clock.reset();
        self.last_event = None;
    }

    pub fn request_move(&mut self, direction: Direction) {
        if !self.phase.is_running() {
            return;
        }
        let (dx, dy) = direction.delta();
        self.try_move(dx, dy);
    }

    /// Rotate clockwise
    pub fn request_rotate(&mut self) {
        self.rotate(RotateDirection::Cw);
    }

    pub fn request_rotate_ccw(&mut self) {
        self.rotate(RotateDirection::Ccw);
    }

    /// Move down until blocked; the blocked move locks the piece.
    pub fn request_hard_drop(&mut self) {
        if !self.phase.is_running() {
            return;
        }
        while self.try_move(0, 1) {}
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => self.request_move(Direction::Left),
            GameAction::MoveRight => self.request_move(Direction::Right),
            GameAction::SoftDrop => self.request_move(Direction::Down),
            GameAction::HardDrop => self.request_hard_drop(),
            GameAction::RotateCw => self.request_rotate(),
            GameAction::RotateCcw => self.request_rotate_ccw(),
            GameAction::Pause => self.request_pause(),
            GameAction::Start => self.request_start(),
            GameAction::Reset => self.request_reset(),
        }
    }

    /// Advance the gravity clock to `now_ms` (host monotonic time).
    pub fn tick(&mut self, now_ms: u64) -> Frame {
        if !self.phase.is_running() {
            self.clock.stop();
            return Frame::default();
        }

        let gravity_step = self.clock.advance(now_ms, self.drop_interval_ms());
        if gravity_step {
            self.try_move(0, 1);
        }

        Frame {
            gravity_step,
            reschedule: self.phase.is_running(),
        }
    }

    fn rotate(&mut self, direction: RotateDirection) {
        if !self.phase.is_running() {
            return;
        }
        let _ = self.controller.try_rotate(&self.board, direction);
    }

    /// Try to move the active piece; a blocked downward move locks it.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.controller.try_move(&self.board, dx, dy) {
            return true;
        }
        if dy > 0 && self.controller.active().is_some() {
            self.lock_piece();
        }
        false
    }

    /// Merge the active piece, clear rows, score, and spawn the next piece.
    fn lock_piece(&mut self) {
        let Some(piece) = self.controller.take() else {
            return;
        };

        crate::sweep::merge_piece(&mut self.board, &piece);
        let lines_cleared = crate::sweep::sweep_full_rows(&mut self.board);
        let result = self.stats.apply_clear(lines_cleared, &self.rules);

        let spawned = self.spawn_next();

        self.last_event = Some(LockEvent {
            lines_cleared,
            score_delta: result.score_delta,
            level: self.stats.level,
            level_up: result.level_up,
            game_over: !spawned,
        });
    }

    /// Spawn the next piece; a blocked spawn ends the game. Board and counters
    /// stay as they are for display.
    fn spawn_next(&mut self) -> bool {
        match self.spawner.spawn(&self.board) {
            SpawnResult::Spawned(piece) => {
                self.controller.replace(piece);
                true
            }
            SpawnResult::Blocked(_) => {
                self.controller.clear();
                self.phase = Phase::GameOver;
                self.clock.stop();
                false
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn scripted(board: Board, kinds: &[PieceKind]) -> GameState {
        GameState::with_source(
            board,
            Rules::default(),
            Box::new(ScriptedSource::new(kinds.to_vec())),
        )
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert!(state.active().is_none());
        assert!(state.next_piece().is_none());
    }

    #[test]
    fn test_inputs_before_start_are_ignored() {
        let mut state = GameState::new(12345);
        for action in [
            GameAction::MoveLeft,
            GameAction::RotateCw,
            GameAction::HardDrop,
            GameAction::SoftDrop,
            GameAction::Pause,
        ] {
            state.apply_action(action);
        }
        assert_eq!(state.phase(), Phase::Ready);
        assert!(state.active().is_none());
        assert_eq!(state.board().filled_count(), 0);
    }

    #[test]
    fn test_start_spawns_centered_with_lookahead() {
        let mut state = scripted(Board::new(), &[PieceKind::T, PieceKind::I]);
        state.request_start();

        assert_eq!(state.phase(), Phase::Running);
        let active = *state.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), (4, 0));
        assert_eq!(state.next_piece(), Some(PieceKind::I));
        assert!(state.clock().is_scheduled());
    }

    #[test]
    fn test_start_twice_keeps_piece() {
        let mut state = scripted(Board::new(), &[PieceKind::S, PieceKind::Z]);
        state.request_start();
        let first = *state.active().unwrap();
        state.request_start();
        assert_eq!(state.active(), Some(&first));
        assert_eq!(state.next_piece(), Some(PieceKind::Z));
    }

    #[test]
    fn test_move_stops_at_wall() {
        let mut state = scripted(Board::new(), &[PieceKind::O]);
        state.request_start();

        for _ in 0..20 {
            state.request_move(Direction::Left);
        }
        assert_eq!(state.active().unwrap().x, 0);

        for _ in 0..20 {
            state.request_move(Direction::Right);
        }
        assert_eq!(state.active().unwrap().x, 8);
    }

    #[test]
    fn test_soft_drop_at_floor_locks() {
        let mut state = scripted(Board::with_size(4, 4), &[PieceKind::O]);
        state.request_start();

        state.request_move(Direction::Down);
        state.request_move(Direction::Down);
        assert_eq!(state.active().unwrap().y, 2);
        assert!(state.take_last_event().is_none());

        state.request_move(Direction::Down);
        let event = state.take_last_event().expect("lock event");
        assert_eq!(event.lines_cleared, 0);
        assert!(state.board().is_occupied(1, 3));
        assert_eq!(state.stats().pieces_locked, 1);
    }

    #[test]
    fn test_hard_drop_locks_once_at_bottom() {
        let mut state = scripted(Board::new(), &[PieceKind::T]);
        state.request_start();
        state.request_hard_drop();

        assert_eq!(state.stats().pieces_locked, 1);
        assert!(state.take_last_event().is_some());
        // T bottom row is the full-width one.
        assert!(state.board().is_occupied(4, 19));
        assert!(state.board().is_occupied(5, 19));
        assert!(state.board().is_occupied(6, 19));
        assert!(state.board().is_occupied(5, 18));
        assert_eq!(state.board().filled_count(), 4);
        // Fresh piece at the top.
        assert_eq!(state.active().unwrap().y, 0);
    }

    #[test]
    fn test_pause_blocks_input_and_gravity() {
        let mut state = scripted(Board::new(), &[PieceKind::L]);
        state.request_start();
        state.tick(0);

        state.request_pause();
        assert_eq!(state.phase(), Phase::Paused);
        assert!(!state.clock().is_scheduled());

        let before = *state.active().unwrap();
        state.request_move(Direction::Left);
        state.request_rotate();
        state.request_hard_drop();
        assert_eq!(state.tick(10_000), Frame::default());
        assert_eq!(state.active(), Some(&before));

        state.request_pause();
        assert_eq!(state.phase(), Phase::Running);
        state.request_move(Direction::Left);
        assert_eq!(state.active().unwrap().x, before.x - 1);
    }

    #[test]
    fn test_tick_applies_gravity_after_interval() {
        let mut state = scripted(Board::new(), &[PieceKind::J]);
        state.request_start();

        assert_eq!(
            state.tick(0),
            Frame {
                gravity_step: false,
                reschedule: true
            }
        );
        assert!(!state.tick(1000).gravity_step);
        assert_eq!(state.active().unwrap().y, 0);

        assert!(state.tick(1001).gravity_step);
        assert_eq!(state.active().unwrap().y, 1);
    }

    #[test]
    fn test_resume_does_not_count_paused_time() {
        let mut state = scripted(Board::new(), &[PieceKind::J]);
        state.request_start();
        state.tick(0);
        state.tick(900);

        state.request_pause();
        state.request_pause();

        // 900ms before the pause plus 100ms after it is not yet over the interval.
        assert!(!state.tick(60_000).gravity_step);
        assert!(!state.tick(60_100).gravity_step);
        assert_eq!(state.active().unwrap().y, 0);

        assert!(state.tick(60_101).gravity_step);
        assert_eq!(state.active().unwrap().y, 1);
    }

    #[test]
    fn test_repeated_pausing_does_not_stall_gravity() {
        let mut state = scripted(Board::new(), &[PieceKind::J]);
        state.request_start();

        let mut now = 0;
        state.tick(now);
        for _ in 0..10 {
            now += 900;
            state.tick(now);
            state.request_pause();
            now += 5_000;
            state.tick(now);
            state.request_pause();
            state.tick(now);
        }
        // Progress carries across pauses: a step every second round.
        assert_eq!(state.active().unwrap().y, 5);
    }

    #[test]
    fn test_reset_discards_gravity_progress() {
        let mut state = scripted(Board::new(), &[PieceKind::J]);
        state.request_start();
        state.tick(0);
        state.tick(900);

        state.request_reset();
        assert_eq!(state.clock().accumulated_ms(), 0);
        state.request_start();
        state.tick(10_000);
        assert!(!state.tick(10_200).gravity_step);
        assert_eq!(state.active().unwrap().y, 0);
    }

    #[test]
    fn test_level_up_speeds_up_gravity() {
        // Every O on a 2-wide board clears two rows.
        let mut state = scripted(Board::with_size(2, 4), &[PieceKind::O]);
        state.request_start();

        for _ in 0..5 {
            state.request_hard_drop();
        }
        assert_eq!(state.lines(), 10);
        assert_eq!(state.score(), 5 * 200);
        assert_eq!(state.level(), 2);
        assert_eq!(state.drop_interval_ms(), 900);

        state.request_hard_drop();
        let event = state.take_last_event().unwrap();
        assert_eq!(event.score_delta, 2 * 100 * 2);
        assert!(!event.level_up);
        assert_eq!(state.score(), 1400);
    }

    #[test]
    fn test_lock_event_reports_level_up() {
        let mut state = scripted(Board::with_size(2, 4), &[PieceKind::O]);
        state.request_start();
        for _ in 0..4 {
            state.request_hard_drop();
        }
        state.request_hard_drop();
        let event = state.take_last_event().unwrap();
        assert!(event.level_up);
        assert_eq!(event.level, 2);
        assert_eq!(event.score_delta, 200);
    }

    #[test]
    fn test_game_over_keeps_board_and_counters() {
        // On a 3x2 board a T clears its bottom row, leaving its nub where the
        // next T must spawn.
        let mut state = scripted(Board::with_size(3, 2), &[PieceKind::T]);
        state.request_start();
        state.request_hard_drop();

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.score_delta, 100);
        assert!(event.game_over);

        assert_eq!(state.phase(), Phase::GameOver);
        assert!(state.active().is_none());
        assert_eq!(state.score(), 100);
        assert_eq!(state.lines(), 1);
        assert!(state.board().is_occupied(1, 1));
        assert!(!state.clock().is_scheduled());
        assert!(!state.tick(5_000).reschedule);

        // Start does not leave game over; reset does.
        state.request_start();
        assert_eq!(state.phase(), Phase::GameOver);
        state.request_reset();
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_reset_restores_initial_progression() {
        let mut state = scripted(Board::with_size(2, 4), &[PieceKind::O]);
        state.request_start();
        for _ in 0..6 {
            state.request_hard_drop();
        }
        assert_eq!(state.level(), 2);

        state.request_reset();
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert!(state.active().is_none());
        assert!(state.next_piece().is_none());
        assert!(state.take_last_event().is_none());

        state.request_start();
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = scripted(Board::with_size(4, 6), &[PieceKind::O, PieceKind::I]);
        state.request_start();
        let snap = state.snapshot();

        assert_eq!((snap.width, snap.height), (4, 6));
        assert_eq!(snap.board.len(), 24);
        assert_eq!(snap.active.unwrap().x, 1);
        assert_eq!(snap.ghost_y, Some(4));
        assert_eq!(snap.next.unwrap().kind, PieceKind::I);
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.drop_interval_ms, 1000);
        assert!(snap.playable());
    }
}
