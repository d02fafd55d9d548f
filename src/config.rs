/// Game constants and asset-directory resolution.

use std::path::PathBuf;
use std::time::Duration;

// ── Viewport & pacing ─────────────────────────────────────────────────────────

pub const VIEWPORT_WIDTH: i32 = 1600;
pub const VIEWPORT_HEIGHT: i32 = 900;

pub const TITLE: &str = "Fight! Hazard Shooter";

pub const TICKS_PER_SECOND: u32 = 50;
pub const FRAME: Duration = Duration::from_millis(1000 / TICKS_PER_SECOND as u64);

/// How long the display stays frozen after a hit or a defeat.
pub const FREEZE: Duration = Duration::from_secs(1);

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_START: (i32, i32) = (900, 400);
/// Per-key displacement along one axis.
pub const STEP: i32 = 5;
pub const PLAYER_ZOOM: f64 = 2.0;

// ── Hazards ───────────────────────────────────────────────────────────────────

pub const HAZARD_COUNT: usize = 5;
pub const HAZARD_RADII: [i32; 5] = [10, 20, 30, 40, 50];
pub const HAZARD_PALETTE: [[u8; 3]; 5] = [
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [255, 255, 0],
    [255, 0, 255],
];
pub const HAZARD_MAX_SPEED: i32 = 5;

// ── Explosions & score ────────────────────────────────────────────────────────

pub const EXPLOSION_LIFE: i32 = 10;
pub const EXPLOSION_FRAMES: usize = 2;

/// Centre of the score label in viewport coordinates.
pub const SCORE_ANCHOR: (i32, i32) = (70, VIEWPORT_HEIGHT - 100);
pub const SCORE_COLOR: [u8; 3] = [0, 0, 255];

// ── Asset directory ───────────────────────────────────────────────────────────

pub const ASSETS_ENV: &str = "HAZARD_SHOOTER_ASSETS";
const ASSETS_DIR_NAME: &str = "fig";

/// Directory the sprites are loaded from.
///
/// `HAZARD_SHOOTER_ASSETS` wins when set. Otherwise a `fig/` directory next to
/// the executable is used, falling back to the one shipped in the crate.
pub fn asset_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(ASSETS_ENV) {
        return PathBuf::from(dir);
    }
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join(ASSETS_DIR_NAME)));
    match beside_exe {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(ASSETS_DIR_NAME),
    }
}
