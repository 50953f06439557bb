use blockfall::core::{GameState, PieceQueue};
use blockfall::scores::{Leaderboard, NameEntry};
use blockfall::term::{AnchorY, FrameBuffer, GameView, Overlay, ViewStatus, Viewport};
use blockfall::types::{PieceKind, Rules, TickInput};

fn screen(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_string(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn top_view() -> GameView {
    GameView::default().with_anchor_y(AnchorY::Top)
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // 10 cells * 2 columns + border, 15 rows + border.
    let fb = view.render(&snap, &ViewStatus::default(), Viewport::new(22, 17));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 16).unwrap().ch, '└');
    assert_eq!(fb.get(21, 16).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_live_piece_and_ghost() {
    let mut state = GameState::with_queue(PieceQueue::sequence(&[PieceKind::O]), Rules::default());
    state.start();
    for _ in 0..100 {
        if state.active().map(|p| p.y) == Some(0) {
            break;
        }
        state.tick(TickInput::IDLE);
    }
    let snap = state.snapshot();
    let active = snap.active.unwrap();
    assert_eq!(active.y, 0);

    let view = top_view();
    let vp = Viewport::new(50, 20);
    let fb = view.render(&snap, &ViewStatus::default(), vp);
    let well = view.frame_rect(vp).inset(1);

    // O at columns 4..=5, rows 0..=1; ghost on rows 13..=14.
    assert_eq!(fb.get(well.x + 8, well.y).unwrap().ch, '█');
    assert_eq!(fb.get(well.x + 11, well.y + 1).unwrap().ch, '█');
    assert_eq!(fb.get(well.x + 8, well.y + 14).unwrap().ch, '░');
    assert_eq!(fb.get(well.x, well.y + 14).unwrap().ch, '·');
}

#[test]
fn term_view_side_panel_tracks_auto_play() {
    let snap = GameState::new(1).snapshot();
    let view = top_view();
    let vp = Viewport::new(50, 20);

    let on = ViewStatus {
        auto_play: true,
        overlay: Overlay::None,
    };
    let text = screen(&view.render(&snap, &on, vp));
    assert!(text.contains("NEXT"));
    assert!(text.contains("AUTO"));
    assert!(text.contains("ON"));

    let off = ViewStatus::default();
    assert!(screen(&view.render(&snap, &off, vp)).contains("OFF"));
}

#[test]
fn term_view_side_panel_hidden_when_narrow() {
    let snap = GameState::new(1).snapshot();
    let fb = top_view().render(&snap, &ViewStatus::default(), Viewport::new(30, 20));
    assert!(!screen(&fb).contains("SCORE"));
}

#[test]
fn term_view_overlays() {
    let snap = GameState::new(1).snapshot();
    let view = top_view();
    let vp = Viewport::new(50, 20);

    let mut board = Leaderboard::new();
    board.add_score("ANN", 4321);
    let scores = ViewStatus {
        auto_play: false,
        overlay: Overlay::Scores(&board),
    };
    let text = screen(&view.render(&snap, &scores, vp));
    assert!(text.contains("SCORES"));
    assert!(text.contains("ANN"));
    assert!(text.contains("4321"));

    let entry = NameEntry::new();
    let naming = ViewStatus {
        auto_play: false,
        overlay: Overlay::NameEntry(&entry),
    };
    let text = screen(&view.render(&snap, &naming, vp));
    assert!(text.contains("ENTER NAME:"));
    assert!(text.contains("A A A A A A A"));

    let attract = ViewStatus {
        auto_play: true,
        overlay: Overlay::Attract,
    };
    assert!(screen(&view.render(&snap, &attract, vp)).contains("PRESS ENTER"));
}
