//! Integration tests for the tick-driven game loop

use blockfall::core::{Board, GameState, PieceQueue};
use blockfall::types::{GameEvent, PieceKind, Rules, SessionPhase, SpawnPolicy, TickInput};

const SOFT_DROP: TickInput = TickInput {
    rotate: false,
    horizontal: 0,
    soft_drop: true,
};

fn game_of(kinds: &[PieceKind], rules: Rules) -> GameState {
    let mut state = GameState::with_queue(PieceQueue::sequence(kinds), rules);
    state.start();
    state
}

/// Tick until a piece is active, slide it to column `x`, then soft drop it
/// until it locks. Returns every event seen along the way.
fn drop_at(state: &mut GameState, x: i8) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..1000 {
        if state.active().is_some() {
            break;
        }
        events.extend(state.tick(TickInput::IDLE));
    }

    while let Some(piece) = state.active() {
        if piece.x == x {
            break;
        }
        assert!(state.try_move((x - piece.x).signum()));
    }

    for _ in 0..1000 {
        let tick = state.tick(SOFT_DROP);
        let locked = tick.iter().any(|e| matches!(e, GameEvent::Locked { .. }));
        events.extend(tick);
        if locked {
            break;
        }
    }
    events
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.phase(), SessionPhase::NotStarted);
    assert!(state.tick(TickInput::IDLE).is_empty());

    state.start();
    assert!(state.is_playing());

    let events = state.tick(TickInput::IDLE);
    assert!(matches!(events[0], GameEvent::Spawned { .. }));
    assert!(state.active().is_some());
    assert_eq!(state.piece_serial(), 1);
}

#[test]
fn test_o_locks_on_the_floor() {
    let mut state = game_of(&[PieceKind::O], Rules::default());

    let events = drop_at(&mut state, 4);

    assert!(events.contains(&GameEvent::Locked {
        kind: PieceKind::O,
        volume: 255
    }));
    assert!(state.active().is_none());
    let board = state.board();
    for (x, y) in [(4, 13), (5, 13), (4, 14), (5, 14)] {
        assert!(board.is_occupied(x, y), "({}, {})", x, y);
    }
    assert_eq!(board.filled_count(), 4);
}

#[test]
fn test_five_o_pieces_clear_two_rows() {
    let mut state = game_of(&[PieceKind::O], Rules::default());

    let mut events = Vec::new();
    for x in [0, 2, 4, 6, 8] {
        events = drop_at(&mut state, x);
    }

    assert!(events.contains(&GameEvent::LinesCleared {
        count: 2,
        score_delta: 20,
        quad_streak: false,
    }));
    assert_eq!(state.score(), 20);
    assert_eq!(state.lines(), 2);
    assert!(!state.last_clear_was_quad());
    assert_eq!(state.board().filled_count(), 0);
    assert!(state.is_collapsing());

    // No spawn until the collapse animation settles.
    let mut settled = false;
    for _ in 0..100 {
        let tick = state.tick(TickInput::IDLE);
        if tick.iter().any(|e| matches!(e, GameEvent::RowsSettled { .. })) {
            settled = true;
            assert!(state.active().is_none());
            break;
        }
        assert!(state.active().is_none());
    }
    assert!(settled);
    assert!(!state.is_collapsing());

    let tick = state.tick(TickInput::IDLE);
    assert!(matches!(tick[0], GameEvent::Spawned { .. }));
}

#[test]
fn test_blocked_spawn_is_caught_by_loss_check() {
    let mut state = game_of(&[PieceKind::O], Rules::default());
    state.board_mut().set(5, 0, Some(PieceKind::J));

    let events = state.tick(TickInput::IDLE);

    assert!(state.game_over());
    assert!(state.active().is_none());
    assert_eq!(events.as_slice(), &[GameEvent::GameOver { score: 0 }]);
    assert!(state.tick(TickInput::IDLE).is_empty());
}

#[test]
fn test_end_game_policy_ends_on_blocked_spawn() {
    let rules = Rules {
        spawn: SpawnPolicy::EndGame,
        ..Rules::default()
    };
    let mut state = game_of(&[PieceKind::I], rules);
    // The I spawns flat on row 0 across columns 3..=6.
    state.board_mut().set(4, 0, Some(PieceKind::J));

    let events = state.tick(TickInput::IDLE);
    assert!(state.game_over());
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { score: 0 })));
}

#[test]
fn test_quad_clear_sets_streak_flag() {
    let mut state = game_of(&[PieceKind::I], Rules::default());
    *state.board_mut() = Board::from_rows(&[
        "IIIIIIIII.",
        "IIIIIIIII.",
        "IIIIIIIII.",
        "IIIIIIIII.",
    ]);

    // Stand the I upright against the right wall.
    for _ in 0..1000 {
        if state.active().is_some() {
            break;
        }
        state.tick(TickInput::IDLE);
    }
    assert!(state.try_rotate());
    while state.try_move(1) {}
    let piece = state.active().unwrap();
    assert!(piece.cells().iter().all(|&(x, _)| x == 9));

    let mut cleared = None;
    for _ in 0..1000 {
        let tick = state.tick(SOFT_DROP);
        if let Some(e) = tick
            .iter()
            .find(|e| matches!(e, GameEvent::LinesCleared { .. }))
        {
            cleared = Some(*e);
            break;
        }
    }

    assert_eq!(
        cleared,
        Some(GameEvent::LinesCleared {
            count: 4,
            score_delta: 80,
            quad_streak: false,
        })
    );
    assert!(state.last_clear_was_quad());
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_restart_resets_counters_and_keeps_playing() {
    let mut state = game_of(&[PieceKind::O], Rules::default());
    for x in [0, 2, 4, 6, 8] {
        drop_at(&mut state, x);
    }
    assert_eq!(state.score(), 20);

    state.restart();

    assert!(state.is_playing());
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert!(!state.is_collapsing());
    assert!(state.active().is_none());
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_snapshot_mirrors_state() {
    let mut state = game_of(&[PieceKind::T, PieceKind::O], Rules::default());
    state.tick(TickInput::IDLE);

    let snap = state.snapshot();
    let active = snap.active.unwrap();
    assert_eq!(active.kind, PieceKind::T);
    assert_eq!((active.x, active.y), (4, -1));
    assert_eq!(snap.next, PieceKind::O);
    assert_eq!(snap.ghost_y, Some(13));
    assert!(snap.playable());
}
