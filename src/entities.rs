/// All game entity types — pure data, no logic.

use crate::config::STEP;
use crate::geometry::Rect;

// ── Directions ────────────────────────────────────────────────────────────────

/// One of the nine movement vectors the player can produce in a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    None,
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::None,
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a summed key displacement back onto a direction.
    /// Anything other than `{-STEP, 0, +STEP}` per axis is rejected.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }

    /// Displacement per tick, y pointing down.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Right => (STEP, 0),
            Direction::UpRight => (STEP, -STEP),
            Direction::Up => (0, -STEP),
            Direction::UpLeft => (-STEP, -STEP),
            Direction::Left => (-STEP, 0),
            Direction::DownLeft => (-STEP, STEP),
            Direction::Down => (0, STEP),
            Direction::DownRight => (STEP, STEP),
        }
    }

    /// Screen angle in degrees, counter-clockwise from "pointing right".
    pub fn angle_degrees(self) -> f64 {
        let (dx, dy) = self.delta();
        (-dy as f64).atan2(dx as f64).to_degrees()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Which image the player is currently shown with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerPose {
    Facing(Direction),
    /// Shown while the game freezes on a beam hit.
    Hit,
    /// Shown while the game freezes before it ends.
    Defeated,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Fixed-size box, sized from the default image when the game starts.
    pub rect: Rect,
    /// Last nonzero movement; aims new beams.
    pub facing: Direction,
    pub pose: PlayerPose,
}

// ── Hazards ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Hazard {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
    pub radius: i32,
    pub color: [u8; 3],
}

// ── Beams ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Beam {
    pub rect: Rect,
    /// Copied from the player's facing at creation and never changed.
    pub direction: Direction,
}

impl Beam {
    pub fn velocity(&self) -> (i32, i32) {
        self.direction.delta()
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub center: (i32, i32),
    /// Frame counter; the visible frame is `frame % EXPLOSION_FRAMES`.
    pub frame: usize,
    /// Remaining ticks.
    pub life: i32,
}

// ── Input snapshot ────────────────────────────────────────────────────────────

/// Directional keys held during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Sum of the per-key displacements. Opposing keys cancel; orthogonal
    /// keys combine into an unnormalised diagonal.
    pub fn delta(&self) -> (i32, i32) {
        let mut sum = (0, 0);
        let keys = [
            (self.up, Direction::Up),
            (self.down, Direction::Down),
            (self.left, Direction::Left),
            (self.right, Direction::Right),
        ];
        for (held, dir) in keys {
            if held {
                let (dx, dy) = dir.delta();
                sum.0 += dx;
                sum.1 += dy;
            }
        }
        sum
    }
}

/// Everything the player asked for during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: HeldKeys,
    /// Fire-key presses since the previous tick.
    pub fire_presses: u32,
}

// ── Tick results ──────────────────────────────────────────────────────────────

/// A beam destroyed a hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeamHit {
    pub hazard_center: (i32, i32),
    /// Score right after this hit was counted.
    pub score: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub beam_hits: Vec<BeamHit>,
    pub defeated: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Pixel sizes the simulation needs for its rectangles, read from the
/// loaded images once at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteMetrics {
    pub player: (u32, u32),
    /// Beam image before rotation.
    pub beam: (u32, u32),
}

/// The entire game state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub hazards: Vec<Hazard>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub viewport: Rect,
    pub metrics: SpriteMetrics,
}
