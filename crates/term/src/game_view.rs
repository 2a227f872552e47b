//! GameView and MenuView: map core snapshots into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Direction, GamePhase, Speed};

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

const SCREEN: Rgb = Rgb::new(0, 0, 0);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const DOT: Rgb = Rgb::new(70, 80, 70);
const BODY: Rgb = Rgb::new(90, 210, 90);
const HEAD: Rgb = Rgb::new(170, 255, 170);
const HEAD_PAUSED: Rgb = Rgb::new(190, 170, 40);
const FOOD: Rgb = Rgb::new(235, 70, 70);
const TEXT: Rgb = Rgb::new(255, 255, 255);

/// Play area background for each phase.
pub fn phase_tint(phase: GamePhase) -> Rgb {
    match phase {
        GamePhase::WaitingForFirstInput | GamePhase::Running => Rgb::new(22, 32, 22),
        GamePhase::Paused => Rgb::new(48, 48, 48),
        GamePhase::Dead => Rgb::new(72, 18, 18),
        GamePhase::PerfectScore => Rgb::new(18, 30, 84),
    }
}

/// Centered banner for each phase, if any.
pub fn phase_overlay(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::WaitingForFirstInput => Some("PRESS A DIRECTION"),
        GamePhase::Running => None,
        GamePhase::Paused => Some("PAUSED"),
        GamePhase::Dead => Some("GAME OVER"),
        GamePhase::PerfectScore => Some("PERFECT!"),
    }
}

/// Two terminal columns for one snake segment.
///
/// The first column is the joint, the second bridges towards a right-hand
/// neighbour so horizontal runs read as one line.
pub fn segment_glyphs(links: &[Direction]) -> [char; 2] {
    let has = |d: Direction| links.contains(&d);
    let bridge = if has(Direction::Right) { '━' } else { ' ' };
    let joint = match (
        has(Direction::Up),
        has(Direction::Left),
        has(Direction::Down),
        has(Direction::Right),
    ) {
        (true, false, true, false) => '┃',
        (false, true, false, true) => '━',
        (true, false, false, true) => '┗',
        (true, true, false, false) => '┛',
        (false, false, true, true) => '┏',
        (false, true, true, false) => '┓',
        (true, false, false, false) => '╹',
        (false, false, true, false) => '╻',
        (false, true, false, false) => '╸',
        (false, false, false, true) => '╺',
        _ => '■',
    };
    [joint, bridge]
}

/// Renders a running game: caption row above a bordered grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Top-left corner of the bordered frame for this snapshot and viewport.
    ///
    /// The caption row sits above the frame and the banner row below it.
    pub fn frame_origin(&self, snap: &GameSnapshot, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(snap);
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = viewport.height.saturating_sub(frame_h.saturating_add(2)) / 2 + 1;
        (x, y)
    }

    /// Terminal position of the first column of a grid cell.
    pub fn cell_origin(&self, snap: &GameSnapshot, viewport: Viewport, cell: usize) -> (u16, u16) {
        let (fx, fy) = self.frame_origin(snap, viewport);
        let (col, row) = snap.coord(cell);
        (
            fx.saturating_add(1).saturating_add(col.saturating_mul(self.cell_w)),
            fy.saturating_add(1).saturating_add(row),
        )
    }

    fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            snap.cols.saturating_mul(self.cell_w).saturating_add(2),
            snap.rows.saturating_add(2),
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, SCREEN).glyph(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let (fx, fy) = self.frame_origin(snap, viewport);
        let tint = phase_tint(snap.phase);

        let caption = snap.caption();
        let caption_x = fx.saturating_add(frame_w.saturating_sub(text_width(&caption)) / 2);
        fb.put_str(caption_x, fy.saturating_sub(1), &caption, CellStyle::new(TEXT, SCREEN).bold());

        draw_border(fb, fx, fy, frame_w, frame_h, CellStyle::new(BORDER, SCREEN));
        fb.fill_rect(
            fx + 1,
            fy + 1,
            frame_w.saturating_sub(2),
            frame_h.saturating_sub(2),
            ' ',
            CellStyle::new(DOT, tint),
        );
        let dot = CellStyle::new(DOT, tint).dim();
        for cell in snap.grid().cells() {
            let (x, y) = self.cell_origin(snap, viewport, cell);
            fb.put_char(x, y, '·', dot);
        }

        if let Some(food) = snap.food {
            let (x, y) = self.cell_origin(snap, viewport, food);
            fb.put_char(x, y, '◆', CellStyle::new(FOOD, tint).bold());
        }

        let last = snap.len().saturating_sub(1);
        for (index, &cell) in snap.snake.iter().enumerate() {
            let links = snap.connections(index);
            let [joint, bridge] = segment_glyphs(&links);
            let (x, y) = self.cell_origin(snap, viewport, cell);
            let body = CellStyle::new(BODY, tint);
            if index == last {
                let head = match snap.phase {
                    GamePhase::Paused => CellStyle::new(SCREEN, HEAD_PAUSED).bold(),
                    _ => CellStyle::new(HEAD, tint).bold(),
                };
                fb.put_char(x, y, '●', head);
            } else {
                fb.put_char(x, y, joint, body);
            }
            if self.cell_w > 1 {
                fb.put_char(x + 1, y, bridge, body);
            }
        }

        // Banner goes under the frame so it never hides a grid cell.
        if let Some(text) = phase_overlay(snap.phase) {
            let x = viewport.width.saturating_sub(text_width(text)) / 2;
            fb.put_str(x, fy.saturating_add(frame_h), text, CellStyle::new(TEXT, SCREEN).bold());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }
}

/// Title screen with the speed choice.
#[derive(Debug, Default, Clone, Copy)]
pub struct MenuView;

impl MenuView {
    pub const TITLE: &'static str = "S N A K E";
    pub const HINT: &'static str = "up/down choose  enter start  q quit";

    pub fn option_label(speed: Speed) -> &'static str {
        match speed {
            Speed::Normal => "NORMAL SPEED",
            Speed::Fast => "SUPER SPEED",
        }
    }

    pub fn render_into(&self, selected: Speed, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, SCREEN).glyph(' '));

        let top = viewport.height.saturating_sub(7) / 2;
        let centered = |s: &str| viewport.width.saturating_sub(text_width(s)) / 2;

        fb.put_str(centered(Self::TITLE), top, Self::TITLE, CellStyle::new(HEAD, SCREEN).bold());

        for (i, speed) in [Speed::Normal, Speed::Fast].into_iter().enumerate() {
            let label = Self::option_label(speed);
            let y = top + 2 + i as u16;
            let x = centered(label);
            if speed == selected {
                fb.put_char(x.saturating_sub(2), y, '>', CellStyle::new(FOOD, SCREEN).bold());
                fb.put_str(x, y, label, CellStyle::new(TEXT, SCREEN).bold());
            } else {
                fb.put_str(x, y, label, CellStyle::new(BORDER, SCREEN).dim());
            }
        }

        fb.put_str(centered(Self::HINT), top + 6, Self::HINT, CellStyle::new(DOT, SCREEN));
    }

    pub fn render(&self, selected: Speed, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(selected, viewport, &mut fb);
        fb
    }
}

fn text_width(s: &str) -> u16 {
    u16::try_from(s.chars().count()).unwrap_or(u16::MAX)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
