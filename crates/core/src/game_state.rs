//! Game state module - the falling-piece state machine and session
//!
//! One [`GameState`] owns the board, the active piece, the next-piece slot,
//! score counters and the row-collapse animator. [`GameState::tick`] is the
//! only mutating entry point during play; it runs, in order:
//!
//! 1. latch this tick's intents
//! 2. loss scan of the top row (deferred spawn policy only)
//! 3. spawn (no active piece, collapse settled) or falling step
//!    (rotate, shift, gravity, lock, line clear, loss check)
//! 4. row-collapse countdown
//!
//! Invalid intents are dropped silently; nothing here returns an error.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::collapse::RowCollapse;
use crate::collision::{
    overlaps, push_inside_bounds, would_hit_at_rotation, would_hit_falling,
    would_hit_moving_horizontally,
};
use crate::line_clear::check_lines;
use crate::pieces::{piece_def, spawn_position, PieceCells};
use crate::rng::PieceQueue;
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Events produced by a single tick.
pub type TickEvents = ArrayVec<GameEvent, 8>;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Board column of the bounding box's left edge.
    pub x: i8,
    /// Board row of the bounding box's top edge; negative above the board.
    pub y: i8,
    /// Ticks since the last gravity step.
    pub fall_timer: u32,
}

impl FallingPiece {
    /// A fresh piece at its spawn position.
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::R0,
            x,
            y,
            fall_timer: 0,
        }
    }

    /// Occupied cells in board coordinates.
    pub fn cells(&self) -> PieceCells {
        piece_def(self.kind)
            .cells(self.rotation)
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}

/// Pending intents waiting for the next falling step.
#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    rotate: bool,
    horizontal: i8,
    soft_drop: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<FallingPiece>,
    queue: PieceQueue,
    score: ScoreState,
    collapse: RowCollapse,
    rules: Rules,
    phase: SessionPhase,
    pending: Pending,
    /// Increments on every spawned piece.
    piece_serial: u32,
}

impl GameState {
    /// Create a new game with the given RNG seed and default rules
    pub fn new(seed: u32) -> Self {
        Self::with_queue(PieceQueue::random(seed), Rules::default())
    }

    pub fn with_rules(seed: u32, rules: Rules) -> Self {
        Self::with_queue(PieceQueue::random(seed), rules)
    }

    /// Create a game drawing pieces from `queue`.
    pub fn with_queue(queue: PieceQueue, rules: Rules) -> Self {
        Self {
            board: Board::new(),
            active: None,
            queue,
            score: ScoreState::default(),
            collapse: RowCollapse::new(),
            rules,
            phase: SessionPhase::NotStarted,
            pending: Pending::default(),
            piece_serial: 0,
        }
    }

    /// Start the game; the first piece spawns on the next tick.
    pub fn start(&mut self) {
        if self.phase == SessionPhase::NotStarted {
            self.phase = SessionPhase::Playing;
        }
    }

    /// Reset board, score and timers and start playing again.
    ///
    /// The piece queue carries on, so consecutive games differ.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.score.reset();
        self.collapse.reset();
        self.pending = Pending::default();
        self.phase = SessionPhase::Playing;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    pub fn lines(&self) -> u32 {
        self.score.lines
    }

    pub fn last_clear_was_quad(&self) -> bool {
        self.score.last_clear_was_quad
    }

    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn active(&self) -> Option<FallingPiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn row_offsets(&self) -> &[u8; BOARD_HEIGHT as usize] {
        self.collapse.offsets()
    }

    pub fn is_collapsing(&self) -> bool {
        self.collapse.is_active()
    }

    pub fn piece_serial(&self) -> u32 {
        self.piece_serial
    }

    /// Loss condition: anything in the top visible row.
    pub fn check_lost(&self) -> bool {
        self.board.is_top_row_occupied()
    }

    /// Advance one tick with this tick's intents.
    pub fn tick(&mut self, input: TickInput) -> TickEvents {
        let mut events = TickEvents::new();
        if self.phase != SessionPhase::Playing {
            return events;
        }

        // Intents only carry over to the piece in play or the one spawning now.
        if self.active.is_none() {
            self.pending = Pending::default();
        }
        if input.rotate {
            self.pending.rotate = true;
        }
        if input.horizontal != 0 {
            self.pending.horizontal = input.horizontal.signum();
        }
        self.pending.soft_drop = input.soft_drop;

        if self.rules.spawn == SpawnPolicy::Defer && self.check_lost() {
            self.end_game(&mut events);
            return events;
        }

        match self.active {
            None if !self.collapse.is_active() => self.spawn_piece(&mut events),
            None => {}
            Some(piece) => self.step_falling(piece, &mut events),
        }

        if self.collapse.tick() {
            events.push(GameEvent::RowsSettled {
                volume: DROP_VOLUME_SETTLE,
            });
        }

        events
    }

    /// Take the next piece into play.
    fn spawn_piece(&mut self, events: &mut TickEvents) {
        let kind = self.queue.draw();
        let piece = FallingPiece::spawn(kind);
        self.piece_serial = self.piece_serial.wrapping_add(1);

        if overlaps(&self.board, &piece) {
            match self.rules.spawn {
                SpawnPolicy::EndGame => self.end_game(events),
                SpawnPolicy::Defer => self.active = None,
            }
            return;
        }

        self.active = Some(piece);
        events.push(GameEvent::Spawned {
            kind,
            next: self.queue.peek(),
        });
    }

    fn step_falling(&mut self, mut piece: FallingPiece, events: &mut TickEvents) {
        if std::mem::take(&mut self.pending.rotate) {
            self.rotate_piece(&mut piece);
        }

        let dx = std::mem::take(&mut self.pending.horizontal);
        if dx != 0 && !would_hit_moving_horizontally(&self.board, &piece, dx) {
            piece.x += dx;
        }

        piece.fall_timer += 1;
        if piece.fall_timer >= self.rules.fall_interval(self.pending.soft_drop) {
            piece.fall_timer = 0;
            if would_hit_falling(&self.board, &piece) {
                self.active = None;
                self.lock_piece(piece, events);
                return;
            }
            piece.y += 1;
        }

        self.active = Some(piece);
    }

    /// Turn a quarter clockwise, push back inside the walls, or leave as is.
    fn rotate_piece(&self, piece: &mut FallingPiece) -> bool {
        let rotation = piece.rotation.rotate_cw();
        if would_hit_at_rotation(&self.board, piece, rotation, false) {
            return false;
        }

        let mut turned = FallingPiece { rotation, ..*piece };
        push_inside_bounds(&mut turned);
        if overlaps(&self.board, &turned) {
            return false;
        }

        *piece = turned;
        true
    }

    /// Rotate the active piece right away. Returns whether it turned.
    pub fn try_rotate(&mut self) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        let turned = self.rotate_piece(&mut piece);
        self.active = Some(piece);
        turned
    }

    /// Shift the active piece right away. Returns whether it moved.
    pub fn try_move(&mut self, dx: i8) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        if dx == 0 || would_hit_moving_horizontally(&self.board, &piece, dx) {
            return false;
        }
        piece.x += dx;
        self.active = Some(piece);
        true
    }

    /// Write the piece into the grid, clear lines, then run the loss check.
    fn lock_piece(&mut self, piece: FallingPiece, events: &mut TickEvents) {
        for (x, y) in piece.cells() {
            self.board.lock_cell(x, y, piece.kind);
        }
        events.push(GameEvent::Locked {
            kind: piece.kind,
            volume: DROP_VOLUME_LOCK,
        });

        let report = check_lines(
            &mut self.board,
            &mut self.collapse,
            &mut self.score,
            self.rules.scoring,
        );
        for pass in report {
            events.push(GameEvent::LinesCleared {
                count: pass.count,
                score_delta: pass.score_delta,
                quad_streak: pass.quad_streak,
            });
        }

        if self.check_lost() {
            self.end_game(events);
        }
    }

    fn end_game(&mut self, events: &mut TickEvents) {
        self.phase = SessionPhase::Ended;
        self.active = None;
        events.push(GameEvent::GameOver {
            score: self.score.score,
        });
    }

    /// Row the active piece would come to rest at if dropped straight down.
    pub fn ghost_y(&self) -> Option<i8> {
        let mut piece = self.active?;
        while !would_hit_falling(&self.board, &piece) {
            piece.y += 1;
        }
        Some(piece.y)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.row_offsets = *self.collapse.offsets();
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.queue.peek();
        out.phase = self.phase;
        out.score = self.score.score;
        out.lines = self.score.lines;
        out.last_clear_was_quad = self.score.last_clear_was_quad;
        out.piece_serial = self.piece_serial;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
