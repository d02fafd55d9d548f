/// Integer screen rectangles, the viewport bounds check and rotation extents.
///
/// Coordinates follow the screen convention: x grows right, y grows down.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// A `w`×`h` rectangle whose `center()` is `(cx, cy)`.
    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Rect { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Strict overlap: touching edges do not count, and a rectangle with no
    /// area never overlaps anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Report, per axis, whether `rect` lies fully inside `viewport`.
///
/// Returns `(x_in, y_in)`; each axis is judged independently.
pub fn in_bounds(rect: &Rect, viewport: &Rect) -> (bool, bool) {
    let x_in = !(rect.left() < viewport.left() || rect.right() > viewport.right());
    let y_in = !(rect.top() < viewport.top() || rect.bottom() > viewport.bottom());
    (x_in, y_in)
}

/// Size of the bounding box of a `w`×`h` image rotated by `degrees` and scaled
/// by `zoom`.
///
/// Quarter turns swap or keep the zoomed size exactly. Any other angle takes
/// the half-extents of the rotated corners, rounded up, never below one.
pub fn rotated_extent(w: u32, h: u32, degrees: f64, zoom: f64) -> (u32, u32) {
    let zw = ((w as f64) * zoom).round().max(1.0) as u32;
    let zh = ((h as f64) * zoom).round().max(1.0) as u32;

    if let Some(quarters) = quarter_turns(degrees) {
        return if quarters.rem_euclid(2) == 0 {
            (zw, zh)
        } else {
            (zh, zw)
        };
    }

    let rad = degrees.to_radians();
    let (c, s) = (rad.cos() * zoom, rad.sin() * zoom);
    let (hx, hy) = (w as f64 / 2.0, h as f64 / 2.0);
    let (cx, cy, sx, sy) = (c * hx, c * hy, s * hx, s * hy);

    let half_w = ceil_loose((cx + sy).abs().max((cx - sy).abs())).max(1.0);
    let half_h = ceil_loose((sx + cy).abs().max((sx - cy).abs())).max(1.0);
    (2 * half_w as u32, 2 * half_h as u32)
}

/// `Some(n)` when `degrees` is (within float noise) a whole number `n` of
/// quarter turns.
pub fn quarter_turns(degrees: f64) -> Option<i64> {
    let quarters = degrees / 90.0;
    let nearest = quarters.round();
    if (quarters - nearest).abs() < ANGLE_EPSILON {
        Some(nearest as i64)
    } else {
        None
    }
}

const ANGLE_EPSILON: f64 = 1e-9;

// Rounding noise from sin/cos must not add a pixel.
fn ceil_loose(v: f64) -> f64 {
    (v - ANGLE_EPSILON).ceil()
}
