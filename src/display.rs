/// Rendering layer — all terminal I/O lives here.
///
/// A frame is composed at full viewport resolution on an RGBA canvas, then
/// shrunk onto the terminal grid: every cell shows two vertical samples
/// through an upper half-block glyph.  No game logic is performed; this
/// module only translates state into pixels and terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use image::RgbaImage;

use crate::config::{SCORE_ANCHOR, SCORE_COLOR, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::entities::{BeamHit, GameState, PlayerPose};
use crate::geometry::Rect;
use crate::sprites::SpriteSheet;

const HALF_BLOCK: char = '▀';

// ── Canvas ────────────────────────────────────────────────────────────────────

/// The viewport-sized pixel surface sprites are blitted onto.
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new() -> Self {
        Canvas {
            pixels: RgbaImage::new(VIEWPORT_WIDTH as u32, VIEWPORT_HEIGHT as u32),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Draw `sprite` with its top-left at `(x, y)`, clipped to the canvas.
    /// Fully transparent pixels are skipped; everything else is copied.
    pub fn blit(&mut self, sprite: &RgbaImage, x: i32, y: i32) {
        let (cw, ch) = (self.pixels.width() as i32, self.pixels.height() as i32);
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + sprite.width() as i32).min(cw);
        let y1 = (y + sprite.height() as i32).min(ch);
        for py in y0..y1 {
            for px in x0..x1 {
                let src = sprite.get_pixel((px - x) as u32, (py - y) as u32);
                if src[3] != 0 {
                    self.pixels.put_pixel(px as u32, py as u32, *src);
                }
            }
        }
    }

    pub fn blit_at(&mut self, sprite: &RgbaImage, rect: &Rect) {
        self.blit(sprite, rect.left(), rect.top());
    }

    pub fn fill_from(&mut self, background: &RgbaImage) {
        if background.dimensions() == self.pixels.dimensions() {
            self.pixels.copy_from_slice(background.as_raw());
        } else {
            self.pixels.pixels_mut().for_each(|p| p.0 = [0, 0, 0, 255]);
            self.blit(background, 0, 0);
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

// ── Text overlay ──────────────────────────────────────────────────────────────

/// Text printed straight to the terminal over the pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    /// Centre in viewport coordinates.
    pub center: (i32, i32),
    pub color: [u8; 3],
}

pub fn score_label(score: u32) -> Label {
    Label {
        text: format!("Score: {}", score),
        center: SCORE_ANCHOR,
        color: SCORE_COLOR,
    }
}

// ── Composition ───────────────────────────────────────────────────────────────

/// Draw a regular frame in the loop's order: background, explosions, player,
/// hazards, beams.
pub fn compose_frame(canvas: &mut Canvas, state: &GameState, sheet: &SpriteSheet) {
    canvas.fill_from(&sheet.background);

    for explosion in &state.explosions {
        let img = sheet.explosion(explosion.frame);
        let rect = Rect::from_center(
            explosion.center.0,
            explosion.center.1,
            img.width() as i32,
            img.height() as i32,
        );
        canvas.blit_at(img, &rect);
    }

    canvas.blit_at(sheet.player(state.player.pose), &state.player.rect);

    for hazard in &state.hazards {
        if let Some(img) = sheet.disc(hazard.radius, hazard.color) {
            canvas.blit_at(img, &hazard.rect);
        }
    }

    for beam in &state.beams {
        canvas.blit_at(sheet.beam(beam.direction), &beam.rect);
    }
}

/// The still frame held during a freeze: background and the player in `pose`.
pub fn compose_freeze(canvas: &mut Canvas, state: &GameState, sheet: &SpriteSheet, pose: PlayerPose) {
    canvas.fill_from(&sheet.background);
    canvas.blit_at(sheet.player(pose), &state.player.rect);
}

// ── Terminal output ───────────────────────────────────────────────────────────

/// Terminal cell nearest to a viewport point.
pub fn to_cell(point: (i32, i32), cols: u16, rows: u16) -> (u16, u16) {
    let x = point.0.clamp(0, VIEWPORT_WIDTH - 1) as i64;
    let y = point.1.clamp(0, VIEWPORT_HEIGHT - 1) as i64;
    let col = x * cols as i64 / VIEWPORT_WIDTH as i64;
    let row = y * rows as i64 / VIEWPORT_HEIGHT as i64;
    (col as u16, row as u16)
}

/// Top and bottom sample colours for one cell.
pub fn sample_cell(img: &RgbaImage, col: u16, row: u16, cols: u16, rows: u16) -> ([u8; 3], [u8; 3]) {
    let (w, h) = (img.width() as u64, img.height() as u64);
    let (cols, rows) = (cols.max(1) as u64, rows.max(1) as u64);
    let x = ((2 * col as u64 + 1) * w / (2 * cols)).min(w - 1);
    let sub_rows = 2 * rows;
    let y_top = ((2 * (2 * row as u64) + 1) * h / (2 * sub_rows)).min(h - 1);
    let y_bot = ((2 * (2 * row as u64 + 1) + 1) * h / (2 * sub_rows)).min(h - 1);
    let rgb = |y: u64| {
        let p = img.get_pixel(x as u32, y as u32);
        [p[0], p[1], p[2]]
    };
    (rgb(y_top), rgb(y_bot))
}

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb { r: c[0], g: c[1], b: c[2] }
}

/// Shrink the canvas onto a `cols`×`rows` terminal, print the labels on top
/// and flush.
pub fn present<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    labels: &[Label],
    (cols, rows): (u16, u16),
) -> std::io::Result<()> {
    let img = canvas.pixels();
    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row))?;
        let mut last: Option<([u8; 3], [u8; 3])> = None;
        for col in 0..cols {
            let (top, bottom) = sample_cell(img, col, row, cols, rows);
            if last.map(|(t, _)| t) != Some(top) {
                out.queue(style::SetForegroundColor(rgb(top)))?;
            }
            if last.map(|(_, b)| b) != Some(bottom) {
                out.queue(style::SetBackgroundColor(rgb(bottom)))?;
            }
            last = Some((top, bottom));
            out.queue(Print(HALF_BLOCK))?;
        }
    }

    out.queue(style::SetBackgroundColor(Color::Reset))?;
    for label in labels {
        let (col, row) = to_cell(label.center, cols, rows);
        let col = col.saturating_sub(label.text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(rgb(label.color)))?;
        out.queue(Print(&label.text))?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    canvas: &mut Canvas,
    state: &GameState,
    sheet: &SpriteSheet,
    size: (u16, u16),
) -> std::io::Result<()> {
    compose_frame(canvas, state, sheet);
    present(out, canvas, &[score_label(state.score)], size)
}

/// Score text for each hit's freeze frame, in order.  The text lags one hit
/// behind: the first freeze of a tick shows none, each later one the score
/// left by the hit before it.
pub fn hit_freeze_scores(hits: &[BeamHit]) -> Vec<Option<u32>> {
    let mut shown = None;
    hits.iter()
        .map(|hit| std::mem::replace(&mut shown, Some(hit.score)))
        .collect()
}

/// Render the still frame shown while the game freezes.  `score` is shown
/// when given.
pub fn render_freeze<W: Write>(
    out: &mut W,
    canvas: &mut Canvas,
    state: &GameState,
    sheet: &SpriteSheet,
    pose: PlayerPose,
    score: Option<u32>,
    size: (u16, u16),
) -> std::io::Result<()> {
    compose_freeze(canvas, state, sheet, pose);
    let labels: Vec<Label> = score.into_iter().map(score_label).collect();
    present(out, canvas, &labels, size)
}
