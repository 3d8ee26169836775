use tui_slidetoe::engine::TurnController;
use tui_slidetoe::input::{CursorHandler, Direction, InputEvent};
use tui_slidetoe::term::{BoardModel, FrameBuffer, GameView, Hud, Viewport, RULES_TEXT};
use tui_slidetoe::types::{GameAction, Player};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn model_after(actions: &[GameAction]) -> (TurnController, BoardModel) {
    let mut game = TurnController::default();
    let mut model = BoardModel::new();
    game.refresh(&mut model);
    for &a in actions {
        game.handle(a, &mut model);
    }
    (game, model)
}

#[test]
fn term_view_shows_banner_timers_and_start_hint() {
    let (_, model) = model_after(&[]);
    let view = GameView::default();
    let fb = view.render(&model, Hud::default(), Viewport::new(80, 24));
    let text = screen_text(&fb);

    assert!(text.contains("Current Turn: Player X"));
    assert!(text.contains("X 3:00"));
    assert!(text.contains("O 3:00"));
    assert!(text.contains("Press s to start"));
}

#[test]
fn term_view_draws_pieces_where_hit_test_points() {
    let (_, model) = model_after(&[GameAction::StartGame, GameAction::CellClicked(4)]);
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let fb = view.render(&model, Hud { started: true, ..Hud::default() }, vp);

    // Find the centre glyph of the X piece and map it back to a cell.
    let (x, y) = (0..vp.height)
        .flat_map(|y| (0..vp.width).map(move |x| (x, y)))
        .find(|&(x, y)| fb.get(x, y).map(|c| c.ch) == Some('X') && view.hit_test(vp, x, y).is_some())
        .expect("X glyph on board");
    assert_eq!(view.hit_test(vp, x, y), Some(4));
}

#[test]
fn term_view_every_cell_is_clickable_and_distinct() {
    let view = GameView::default();
    let vp = Viewport::new(100, 40);
    let mut seen = [false; 9];
    for y in 0..vp.height {
        for x in 0..vp.width {
            if let Some(i) = view.hit_test(vp, x, y) {
                seen[i as usize] = true;
            }
        }
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn term_view_popup_and_rules_overlays() {
    let mut game = TurnController::new(1);
    let mut model = BoardModel::new();
    game.refresh(&mut model);
    game.handle(GameAction::StartGame, &mut model);
    let token = game.armed().unwrap();
    game.on_tick(token, &mut model);

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let text = screen_text(&view.render(&model, Hud::default(), vp));
    assert!(text.contains("X ran out of time! Opponent wins!"));
    assert!(text.contains("X 0:00"));

    assert!(model.dismiss());
    let text = screen_text(&view.render(&model, Hud::default(), vp));
    assert!(!text.contains("ran out of time"));

    model.toggle_rules();
    let text = screen_text(&view.render(&model, Hud::default(), vp));
    assert!(text.contains(RULES_TEXT[0]));
    assert!(text.contains(" Rules "));
}

#[test]
fn term_view_timer_updates_follow_ticks() {
    let (mut game, mut model) = model_after(&[GameAction::StartGame]);
    let token = game.armed().unwrap();
    for _ in 0..65 {
        game.on_tick(token, &mut model);
    }
    assert_eq!(model.timer(Player::X), "1:55");
    assert_eq!(model.timer(Player::O), "3:00");

    let view = GameView::default();
    let hud = Hud {
        cursor: None,
        running: game.timer().running(),
        started: true,
    };
    let text = screen_text(&view.render(&model, hud, Viewport::new(80, 24)));
    assert!(text.contains("X 1:55"));
}

#[test]
fn keyboard_cursor_drives_clicks() {
    let (mut game, mut model) = model_after(&[GameAction::StartGame]);
    let mut cursor = CursorHandler::new();
    for input in [
        InputEvent::Cursor(Direction::Up),
        InputEvent::Cursor(Direction::Left),
        InputEvent::Activate,
    ] {
        if let Some(action) = cursor.handle(input) {
            game.handle(action, &mut model);
        }
    }
    assert_eq!(model.cell(0), Some(Player::X));
}

#[test]
fn term_view_survives_tiny_viewport() {
    let (_, model) = model_after(&[GameAction::StartGame]);
    let view = GameView::default();
    let fb = view.render(&model, Hud::default(), Viewport::new(10, 4));
    assert_eq!(fb.width(), 10);
    assert_eq!(fb.height(), 4);
}
