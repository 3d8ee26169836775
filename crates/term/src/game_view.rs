//! GameView: draws a [`BoardModel`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The same layout drives both drawing and
//! [`GameView::hit_test`], so a mouse click always maps to the cell drawn
//! under it.

use crate::board_model::BoardModel;
use crate::fb::{text_width, CellStyle, FrameBuffer, Rgb};
use crate::types::{CellFlags, Player, BOARD_CELLS, BOARD_SIDE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state drawn on top of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    /// Keyboard cursor cell
    pub cursor: Option<u8>,
    /// Player whose clock is counting down
    pub running: Option<Player>,
    pub started: bool,
}

/// Lines of the rules panel.
pub const RULES_TEXT: [&str; 8] = [
    "Players alternate turns, X first.",
    "Each player places 3 pieces on empty cells.",
    "Click one of your pieces to pick it up,",
    "then click an empty cell to slide it there.",
    "Click the picked-up piece again to drop it.",
    "Three in a row wins.",
    "Each player has 3 minutes on their clock.",
    "Running out of time loses the game.",
];

const HELP_TEXT: &str = "1-9/arrows+enter play  s start  r reset  ? rules  q quit";
const START_TEXT: &str = "Press s to start the clocks";

const BG: Rgb = Rgb::new(0, 0, 0);
const CELL_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(60, 60, 85);
const SELECTED_BG: Rgb = Rgb::new(130, 105, 20);
const WIN_BG: Rgb = Rgb::new(30, 115, 55);
const X_FG: Rgb = Rgb::new(80, 200, 240);
const O_FG: Rgb = Rgb::new(240, 140, 80);

/// Where everything goes for one viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    x: u16,
    banner_y: u16,
    board_y: u16,
    frame_w: u16,
    frame_h: u16,
    timers_y: u16,
    footer_y: u16,
}

/// Terminal renderer for the board, clocks and overlays.
pub struct GameView {
    /// Cell width in terminal columns.
    cell_w: u16,
    /// Cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 keeps cells roughly square in common terminal fonts.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let side = BOARD_SIDE as u16;
        let frame_w = side * self.cell_w + side + 1;
        let frame_h = side * self.cell_h + side + 1;
        // banner, gap, board, gap, timers, gap, footer
        let total_h = frame_h + 6;

        let x = viewport.width.saturating_sub(frame_w) / 2;
        let banner_y = viewport.height.saturating_sub(total_h) / 2;
        let board_y = banner_y + 2;
        let timers_y = board_y + frame_h + 1;
        Layout {
            x,
            banner_y,
            board_y,
            frame_w,
            frame_h,
            timers_y,
            footer_y: timers_y + 2,
        }
    }

    /// Top-left corner of the interior of cell `index`.
    fn cell_origin(&self, layout: &Layout, index: u8) -> (u16, u16) {
        let col = (index % BOARD_SIDE) as u16;
        let row = (index / BOARD_SIDE) as u16;
        (
            layout.x + 1 + col * (self.cell_w + 1),
            layout.board_y + 1 + row * (self.cell_h + 1),
        )
    }

    /// Cell under terminal position `(col, row)`, if any. Grid lines miss.
    pub fn hit_test(&self, viewport: Viewport, col: u16, row: u16) -> Option<u8> {
        let layout = self.layout(viewport);
        (0..BOARD_CELLS as u8).find(|&index| {
            let (x, y) = self.cell_origin(&layout, index);
            (x..x + self.cell_w).contains(&col) && (y..y + self.cell_h).contains(&row)
        })
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, model: &BoardModel, hud: Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());
        let layout = self.layout(viewport);

        let banner = CellStyle::new(Rgb::new(240, 240, 240), BG).bold();
        fb.put_str_centered(layout.x, layout.banner_y, layout.frame_w, model.banner(), banner);

        self.draw_grid(fb, &layout);
        for index in 0..BOARD_CELLS as u8 {
            self.draw_cell(fb, &layout, model, index, hud.cursor == Some(index));
        }

        self.draw_timers(fb, &layout, model, hud.running);

        let footer = CellStyle::new(Rgb::new(150, 150, 160), BG).dim();
        let text = if hud.started || model.has_result() {
            HELP_TEXT
        } else {
            START_TEXT
        };
        fb.put_str_centered(0, layout.footer_y, viewport.width, text, footer);

        if let Some(message) = model.popup() {
            self.draw_popup(fb, &layout, message);
        }
        if model.rules_visible() {
            self.draw_rules(fb, viewport);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, model: &BoardModel, hud: Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(model, hud, viewport, &mut fb);
        fb
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, layout: &Layout) {
        let style = CellStyle::new(Rgb::new(190, 190, 200), BG);
        fb.draw_box(layout.x, layout.board_y, layout.frame_w, layout.frame_h, style);

        let right = layout.x + layout.frame_w - 1;
        let bottom = layout.board_y + layout.frame_h - 1;
        for k in 1..BOARD_SIDE as u16 {
            let gx = layout.x + k * (self.cell_w + 1);
            let gy = layout.board_y + k * (self.cell_h + 1);
            for y in layout.board_y + 1..bottom {
                fb.put_char(gx, y, '│', style);
            }
            for x in layout.x + 1..right {
                fb.put_char(x, gy, '─', style);
            }
            fb.put_char(gx, layout.board_y, '┬', style);
            fb.put_char(gx, bottom, '┴', style);
            fb.put_char(layout.x, gy, '├', style);
            fb.put_char(right, gy, '┤', style);
        }
        for kx in 1..BOARD_SIDE as u16 {
            for ky in 1..BOARD_SIDE as u16 {
                let gx = layout.x + kx * (self.cell_w + 1);
                let gy = layout.board_y + ky * (self.cell_h + 1);
                fb.put_char(gx, gy, '┼', style);
            }
        }
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        model: &BoardModel,
        index: u8,
        under_cursor: bool,
    ) {
        let (x, y) = self.cell_origin(layout, index);
        let flags = model.flags(index);
        let bg = cell_background(flags, under_cursor);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', CellStyle::new(CELL_BG, bg));

        match model.cell(index) {
            Some(player) => self.draw_piece(fb, x, y, player, bg),
            None => {
                let label = CellStyle::new(Rgb::new(90, 90, 100), bg).dim();
                let digit = char::from(b'1' + index);
                fb.put_char(x, y, digit, label);
            }
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, x: u16, y: u16, player: Player, bg: Rgb) {
        let fg = match player {
            Player::X => X_FG,
            Player::O => O_FG,
        };
        let style = CellStyle::new(fg, bg).bold();

        if self.cell_w >= 3 && self.cell_h >= 3 {
            let art: [&str; 3] = match player {
                Player::X => ["\\ /", " X ", "/ \\"],
                Player::O => ["╭─╮", "│ │", "╰─╯"],
            };
            let top = y + (self.cell_h - 3) / 2;
            for (dy, line) in art.iter().enumerate() {
                fb.put_str_centered(x, top + dy as u16, self.cell_w, line, style);
            }
        } else {
            fb.put_char(x + (self.cell_w - 1) / 2, y + (self.cell_h - 1) / 2, player.as_char(), style);
        }
    }

    fn draw_timers(&self, fb: &mut FrameBuffer, layout: &Layout, model: &BoardModel, running: Option<Player>) {
        let half = layout.frame_w / 2;
        for (player, x) in [(Player::X, layout.x), (Player::O, layout.x + half)] {
            let text = format!("{} {}", player.as_char(), model.timer(player));
            let style = if running == Some(player) {
                CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(45, 45, 70)).bold()
            } else {
                CellStyle::new(Rgb::new(170, 170, 180), BG)
            };
            fb.put_str_centered(x, layout.timers_y, half, &text, style);
        }
    }

    fn draw_popup(&self, fb: &mut FrameBuffer, layout: &Layout, message: &str) {
        const HINT: &str = "r: new game  esc: close";
        let inner_w = text_width(message).max(text_width(HINT)) + 4;
        let w = inner_w + 2;
        let h = 6;
        let x = (layout.x + layout.frame_w / 2).saturating_sub(w / 2);
        let y = layout.board_y + layout.frame_h.saturating_sub(h) / 2;

        let frame = CellStyle::new(Rgb::new(255, 220, 120), Rgb::new(20, 20, 30)).bold();
        let body = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(20, 20, 30));
        fb.fill_rect(x, y, w, h, ' ', body);
        fb.draw_box(x, y, w, h, frame);
        fb.put_str_centered(x, y + 2, w, message, body.bold());
        fb.put_str_centered(x, y + 3, w, HINT, body.dim());
    }

    fn draw_rules(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let inner_w = RULES_TEXT.iter().map(|l| text_width(l)).max().unwrap_or(0);
        let w = inner_w + 4;
        let h = RULES_TEXT.len() as u16 + 4;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        let frame = CellStyle::new(Rgb::new(120, 200, 255), Rgb::new(15, 15, 25)).bold();
        let body = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(15, 15, 25));
        fb.fill_rect(x, y, w, h, ' ', body);
        fb.draw_box(x, y, w, h, frame);
        fb.put_str_centered(x, y, w, " Rules ", frame);
        for (i, line) in RULES_TEXT.iter().enumerate() {
            fb.put_str(x + 2, y + 2 + i as u16, line, body);
        }
    }
}

fn cell_background(flags: CellFlags, under_cursor: bool) -> Rgb {
    if flags.win {
        WIN_BG
    } else if flags.selected {
        SELECTED_BG
    } else if under_cursor {
        CURSOR_BG
    } else {
        CELL_BG
    }
}
