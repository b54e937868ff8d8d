//! Scoring module - score, level and gravity progression
//!
//! Scoring is linear in both lines and level: clearing `n` rows at level `L`
//! is worth `n * points_per_line * L` (with the defaults, `n * 100 * L`). The
//! level used is the one in effect when the rows were cleared, before any
//! level-up those rows cause.
//!
//! Level starts at 1 and goes up by one every `lines_per_level` cumulative
//! lines. Gravity speeds up by `drop_step_ms` per level down to a floor.

use crate::types::{BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, MIN_DROP_MS, POINTS_PER_LINE};

/// Tunable progression rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub points_per_line: u32,
    pub lines_per_level: u32,
    pub base_drop_ms: u32,
    pub drop_step_ms: u32,
    pub min_drop_ms: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            points_per_line: POINTS_PER_LINE,
            lines_per_level: LINES_PER_LEVEL,
            base_drop_ms: BASE_DROP_MS,
            drop_step_ms: DROP_STEP_MS,
            min_drop_ms: MIN_DROP_MS,
        }
    }
}

impl Rules {
    /// Points for clearing `lines` rows at `level`
    pub fn line_clear_score(&self, lines: u32, level: u32) -> u32 {
        lines
            .saturating_mul(self.points_per_line)
            .saturating_mul(level)
    }

    /// Level reached after `total_lines` cumulative cleared lines
    pub fn level_for_lines(&self, total_lines: u32) -> u32 {
        1 + total_lines / self.lines_per_level.max(1)
    }

    /// Gravity interval in milliseconds for `level` (levels below 1 count as 1)
    pub fn drop_interval_ms(&self, level: u32) -> u32 {
        let speedup = level.saturating_sub(1).saturating_mul(self.drop_step_ms);
        self.base_drop_ms
            .saturating_sub(speedup)
            .max(self.min_drop_ms)
    }
}

/// Session counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces_locked: u32,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            pieces_locked: 0,
        }
    }
}

/// Result of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    pub score_delta: u32,
    pub level_up: bool,
}

impl SessionStats {
    /// Account for a lock that cleared `lines` rows.
    pub fn apply_clear(&mut self, lines: u32, rules: &Rules) -> ClearResult {
        self.pieces_locked = self.pieces_locked.saturating_add(1);
        if lines == 0 {
            return ClearResult::default();
        }

        let score_delta = rules.line_clear_score(lines, self.level);
        self.score = self.score.saturating_add(score_delta);
        self.lines = self.lines.saturating_add(lines);

        let new_level = rules.level_for_lines(self.lines);
        let level_up = new_level > self.level;
        self.level = new_level;

        ClearResult {
            score_delta,
            level_up,
        }
    }
}
