//! Scoring module - score deltas for clear events
//!
//! Two formulas exist and exactly one is active per game (see
//! [`ScoringRule`]):
//! - Classic: `cleared * 100`
//! - Progressive: `cleared * 10 + total lines cleared before this event`
//!
//! Clearing four rows doubles the delta, or triples it when the previous clear
//! event was also a four-row clear (quad streak).

use crate::types::ScoringRule;

/// Running score counters owned by the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreState {
    pub score: u32,
    pub lines: u32,
    /// Whether the most recent clear event removed four rows.
    pub last_clear_was_quad: bool,
}

/// Result of scoring one clear event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub delta: u32,
    /// Four rows cleared right after another four-row clear.
    pub quad_streak: bool,
}

/// Base delta before the four-row multiplier.
pub fn base_score(rule: ScoringRule, cleared: u32, total_lines_before: u32) -> u32 {
    match rule {
        ScoringRule::Classic => cleared.saturating_mul(100),
        ScoringRule::Progressive => cleared
            .saturating_mul(10)
            .saturating_add(total_lines_before),
    }
}

/// Multiplier for the quad streak bonus.
pub fn quad_multiplier(cleared: u32, previous_was_quad: bool) -> u32 {
    match (cleared, previous_was_quad) {
        (4, true) => 3,
        (4, false) => 2,
        _ => 1,
    }
}

impl ScoreState {
    /// Score a clear event and update counters and the streak flag.
    pub fn apply_clear(&mut self, rule: ScoringRule, cleared: u32) -> ScoreResult {
        if cleared == 0 {
            return ScoreResult::default();
        }

        let multiplier = quad_multiplier(cleared, self.last_clear_was_quad);
        let delta = base_score(rule, cleared, self.lines).saturating_mul(multiplier);
        let quad_streak = multiplier == 3;

        self.last_clear_was_quad = cleared == 4;
        self.score = self.score.saturating_add(delta);
        self.lines = self.lines.saturating_add(cleared);

        ScoreResult { delta, quad_streak }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_scores() {
        assert_eq!(base_score(ScoringRule::Classic, 1, 0), 100);
        assert_eq!(base_score(ScoringRule::Classic, 3, 50), 300);
    }

    #[test]
    fn test_progressive_scores() {
        assert_eq!(base_score(ScoringRule::Progressive, 1, 0), 10);
        assert_eq!(base_score(ScoringRule::Progressive, 2, 7), 27);
    }

    #[test]
    fn test_quad_multiplier() {
        assert_eq!(quad_multiplier(1, true), 1);
        assert_eq!(quad_multiplier(4, false), 2);
        assert_eq!(quad_multiplier(4, true), 3);
    }

    #[test]
    fn test_back_to_back_quads_score_higher() {
        let mut state = ScoreState::default();
        let first = state.apply_clear(ScoringRule::Classic, 4);
        let second = state.apply_clear(ScoringRule::Classic, 4);
        assert_eq!(first.delta, 800);
        assert_eq!(second.delta, 1200);
        assert!(!first.quad_streak);
        assert!(second.quad_streak);
        assert_eq!(state.lines, 8);
    }

    #[test]
    fn test_single_clear_breaks_streak() {
        let mut state = ScoreState::default();
        state.apply_clear(ScoringRule::Progressive, 4);
        assert!(state.last_clear_was_quad);
        state.apply_clear(ScoringRule::Progressive, 1);
        assert!(!state.last_clear_was_quad);
        let r = state.apply_clear(ScoringRule::Progressive, 4);
        // 4 * 10 + 5 lines so far, doubled
        assert_eq!(r.delta, 90);
    }

    #[test]
    fn test_zero_clear_is_noop() {
        let mut state = ScoreState {
            score: 40,
            lines: 3,
            last_clear_was_quad: true,
        };
        let before = state;
        assert_eq!(state.apply_clear(ScoringRule::Classic, 0), ScoreResult::default());
        assert_eq!(state, before);
    }
}
