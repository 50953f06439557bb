//! Session flow around the game: attract demo, play, name entry, scores.
//!
//! ```text
//! Attract --Confirm--> Playing --loss--> GameOver --+--> EnterName --Confirm--> Scores
//!                         ^                           \--(score too low)------> |
//!                         \-------------------------Confirm---------------------/
//! ```

use crate::core::{GameSnapshot, GameState, TickEvents};
use crate::engine::AutoPlayer;
use crate::event_log::{EventLog, LogRecord};
use crate::scores::{Leaderboard, NameEntry, ScoreStore};
use crate::term::{Overlay, ViewStatus};
use crate::types::{Button, InputFrame, TickInput};

/// How long the final board stays up before moving on, unless skipped.
pub const GAME_OVER_HOLD_TICKS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Auto-play demo until someone presses Confirm.
    Attract,
    Playing,
    /// Final board under a banner; Confirm or the hold timeout moves on.
    GameOver,
    EnterName,
    Scores,
}

pub struct App<S: ScoreStore> {
    game: GameState,
    ai: AutoPlayer,
    auto_play: bool,
    phase: AppPhase,
    leaderboard: Leaderboard,
    name_entry: NameEntry,
    store: S,
    log: EventLog,
    ticks: u64,
    hold: u32,
    /// Problems to report once the terminal is restored.
    warnings: Vec<String>,
}

impl<S: ScoreStore> App<S> {
    /// Load the leaderboard and start the attract demo on `game`.
    pub fn new(mut game: GameState, store: S, log: EventLog) -> Self {
        let mut warnings = Vec::new();
        let leaderboard = match store.load() {
            Ok(board) => board,
            Err(e) => {
                warnings.push(format!("[Scores] using an empty table: {:#}", e));
                Leaderboard::default()
            }
        };

        game.start();
        Self {
            game,
            ai: AutoPlayer::new(),
            auto_play: true,
            phase: AppPhase::Attract,
            leaderboard,
            name_entry: NameEntry::new(),
            store,
            log,
            ticks: 0,
            hold: 0,
            warnings,
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn name_entry(&self) -> &NameEntry {
        &self.name_entry
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn view_status(&self) -> ViewStatus<'_> {
        let overlay = match self.phase {
            AppPhase::Attract => Overlay::Attract,
            AppPhase::Playing => Overlay::None,
            AppPhase::GameOver => Overlay::GameOver,
            AppPhase::EnterName => Overlay::NameEntry(&self.name_entry),
            AppPhase::Scores => Overlay::Scores(&self.leaderboard),
        };
        ViewStatus {
            auto_play: self.auto_play,
            overlay,
        }
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        self.warnings.extend(self.log.take_warning());
        std::mem::take(&mut self.warnings)
    }

    pub fn flush_log(&mut self) {
        if let Err(e) = self.log.flush() {
            self.warnings.push(format!("[EventLog] {:#}", e));
        }
    }

    /// Advance the session one tick. Returns what the game emitted.
    pub fn tick(&mut self, frame: &InputFrame) -> TickEvents {
        self.ticks = self.ticks.wrapping_add(1);
        let confirm = frame.pressed.contains(Button::Confirm);

        match self.phase {
            AppPhase::Attract => {
                if confirm {
                    self.new_game();
                    return TickEvents::new();
                }
                if self.game.game_over() {
                    self.game.restart();
                    self.ai.reset();
                }
                let input = self.ai.next_input(&self.game);
                self.game.tick(input)
            }
            AppPhase::Playing => self.tick_playing(frame),
            AppPhase::GameOver => {
                self.hold = self.hold.saturating_sub(1);
                if confirm || self.hold == 0 {
                    self.leave_game_over();
                }
                TickEvents::new()
            }
            AppPhase::EnterName => {
                if confirm {
                    self.submit_score();
                } else {
                    self.name_entry.update(frame);
                }
                TickEvents::new()
            }
            AppPhase::Scores => {
                if confirm {
                    self.new_game();
                }
                TickEvents::new()
            }
        }
    }

    fn tick_playing(&mut self, frame: &InputFrame) -> TickEvents {
        if frame.pressed.contains(Button::Toggle) {
            self.auto_play = !self.auto_play;
            self.ai.reset();
        }

        let input = if self.auto_play {
            self.ai.next_input(&self.game)
        } else {
            TickInput::from_frame(frame)
        };

        let events = self.game.tick(input);
        for event in &events {
            self.log.record_event(self.ticks, event);
        }

        if self.game.game_over() {
            self.phase = AppPhase::GameOver;
            self.hold = GAME_OVER_HOLD_TICKS;
        }
        events
    }

    fn leave_game_over(&mut self) {
        self.phase = if self.leaderboard.can_add_score(self.game.score()) {
            self.name_entry = NameEntry::new();
            AppPhase::EnterName
        } else {
            AppPhase::Scores
        };
    }

    fn submit_score(&mut self) {
        let name = self.name_entry.name();
        let score = self.game.score();

        if let Some(rank) = self.leaderboard.add_score(&name, score) {
            self.log.record(&LogRecord::ScoreSubmitted { name, score, rank });
            if let Err(e) = self.store.save(&self.leaderboard) {
                self.warnings.push(format!("[Scores] save failed: {:#}", e));
            }
        }
        self.phase = AppPhase::Scores;
    }

    /// Fresh board, score and timers; the player is in control.
    fn new_game(&mut self) {
        self.game.restart();
        self.ai.reset();
        self.auto_play = false;
        self.phase = AppPhase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, PieceQueue};
    use std::io::Write;
    use crate::scores::MemoryStore;
    use crate::types::{ButtonSet, PieceKind, Rules};

    fn app_with(store: MemoryStore) -> App<MemoryStore> {
        let game = GameState::with_queue(PieceQueue::sequence(&[PieceKind::O]), Rules::default());
        App::new(game, store, EventLog::disabled())
    }

    fn press(button: Button) -> InputFrame {
        InputFrame::from_levels(ButtonSet::EMPTY, ButtonSet::EMPTY.with(button))
    }

    fn idle() -> InputFrame {
        InputFrame::default()
    }

    #[test]
    fn starts_in_attract_with_demo_running() {
        let mut app = app_with(MemoryStore::new());
        assert_eq!(app.phase(), AppPhase::Attract);
        assert!(app.auto_play());
        app.tick(&idle());
        assert!(app.game().active().is_some());
        assert!(matches!(app.view_status().overlay, Overlay::Attract));
    }

    #[test]
    fn confirm_starts_player_game() {
        let mut app = app_with(MemoryStore::new());
        for _ in 0..50 {
            app.tick(&idle());
        }
        app.tick(&press(Button::Confirm));
        assert_eq!(app.phase(), AppPhase::Playing);
        assert!(!app.auto_play());
        assert_eq!(app.game().score(), 0);
        assert_eq!(app.game().board().filled_count(), 0);
        assert!(app.game().active().is_none());
    }

    #[test]
    fn toggle_switches_auto_play() {
        let mut app = app_with(MemoryStore::new());
        app.tick(&press(Button::Confirm));
        app.tick(&press(Button::Toggle));
        assert!(app.auto_play());
        app.tick(&press(Button::Toggle));
        assert!(!app.auto_play());
    }

    #[test]
    fn zero_score_goes_straight_to_scores() {
        let mut app = app_with(MemoryStore::new());
        app.tick(&press(Button::Confirm));
        app.game_mut().board_mut().set(0, 0, Some(PieceKind::J));
        app.tick(&idle());
        assert_eq!(app.phase(), AppPhase::GameOver);
        assert!(matches!(app.view_status().overlay, Overlay::GameOver));

        app.tick(&press(Button::Confirm));
        assert_eq!(app.phase(), AppPhase::Scores);

        app.tick(&press(Button::Confirm));
        assert_eq!(app.phase(), AppPhase::Playing);
        assert!(app.game().is_playing());
    }

    #[test]
    fn qualifying_score_is_entered_and_saved() {
        let store = MemoryStore::new();
        let mut app = app_with(store.clone());
        app.tick(&press(Button::Confirm));

        *app.game_mut().board_mut() = Board::from_rows(&["OOOO..OOOO"]);
        for _ in 0..2000 {
            app.tick(&idle());
            if app.game().score() > 0 {
                break;
            }
        }
        assert_eq!(app.game().score(), 10);

        app.game_mut().board_mut().set(0, 0, Some(PieceKind::J));
        app.tick(&idle());
        for _ in 1..GAME_OVER_HOLD_TICKS {
            app.tick(&idle());
            assert_eq!(app.phase(), AppPhase::GameOver);
        }
        app.tick(&idle());
        assert_eq!(app.phase(), AppPhase::EnterName);

        // Change the first letter to B, then confirm.
        app.tick(&InputFrame {
            released: ButtonSet::EMPTY.with(Button::Rotate),
            ..InputFrame::default()
        });
        app.tick(&press(Button::Confirm));
        assert_eq!(app.phase(), AppPhase::Scores);

        let top = &app.leaderboard().entries()[0];
        assert_eq!((top.name.as_str(), top.score), ("BAAAAAA", 10));
        assert_eq!(store.load().unwrap().entries()[0].score, 10);
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> anyhow::Result<Leaderboard> {
            anyhow::bail!("disk on fire")
        }

        fn save(&self, _board: &Leaderboard) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _data: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failing_event_log_is_reported_after_play() {
        let game = GameState::with_queue(PieceQueue::sequence(&[PieceKind::O]), Rules::default());
        let mut app = App::new(game, MemoryStore::new(), EventLog::to_writer(FullDisk));

        app.tick(&press(Button::Confirm));
        app.tick(&idle());
        app.tick(&idle());
        assert_eq!(app.phase(), AppPhase::Playing);

        let warnings = app.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("[EventLog] write failed"));
        assert!(app.take_warnings().is_empty());
    }

    #[test]
    fn broken_store_is_reported_not_fatal() {
        let mut app = App::new(GameState::new(3), BrokenStore, EventLog::disabled());
        assert_eq!(app.leaderboard(), &Leaderboard::default());

        let warnings = app.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("[Scores]"));
        assert!(app.take_warnings().is_empty());
    }
}
