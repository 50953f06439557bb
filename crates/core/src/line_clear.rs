//! Line-clear engine
//!
//! Runs once after a piece locks. Each pass scans bottom to top for the first
//! full row, extends the block upward through consecutive full rows (a gap
//! ends it), removes the block, drops everything above it, records the
//! collapse animation and scores the event. Passes repeat until a scan finds
//! nothing, at most [`MAX_CLEAR_PASSES`] times.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::collapse::RowCollapse;
use crate::scoring::ScoreState;
use crate::types::{ScoringRule, BOARD_HEIGHT, MAX_CLEAR_PASSES};

/// One contiguous block removed by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearPass {
    /// Lowest removed row (before removal).
    pub bottom: usize,
    pub count: u32,
    pub score_delta: u32,
    pub quad_streak: bool,
}

/// Everything a lock-in cleared.
pub type ClearReport = ArrayVec<ClearPass, MAX_CLEAR_PASSES>;

/// Find the lowest contiguous block of full rows: `(bottom, count)`.
pub fn find_full_block(board: &Board) -> Option<(usize, usize)> {
    let mut rows = (0..BOARD_HEIGHT as usize).rev();
    let bottom = rows.by_ref().find(|&y| board.is_row_full(y))?;
    let count = 1 + rows.take_while(|&y| board.is_row_full(y)).count();
    Some((bottom, count))
}

/// Clear full rows, animate the collapse and update the score.
///
/// A board without full rows is left untouched, as are the counters.
pub fn check_lines(
    board: &mut Board,
    collapse: &mut RowCollapse,
    score: &mut ScoreState,
    rule: ScoringRule,
) -> ClearReport {
    let mut report = ClearReport::new();

    for _ in 0..MAX_CLEAR_PASSES {
        let Some((bottom, count)) = find_full_block(board) else {
            break;
        };

        board.collapse_rows(bottom, count);
        collapse.record_collapse(bottom, count);
        let result = score.apply_clear(rule, count as u32);

        report.push(ClearPass {
            bottom,
            count: count as u32,
            score_delta: result.delta,
            quad_streak: result.quad_streak,
        });
    }

    report
}
