//! Image loading and the precomputed sprite variants the renderer draws.
//!
//! Everything here happens once at startup; the game loop only looks
//! images up.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::info;

use crate::config::{EXPLOSION_FRAMES, HAZARD_PALETTE, HAZARD_RADII, PLAYER_ZOOM};
use crate::entities::{Direction, PlayerPose, SpriteMetrics};
use crate::error::{GameError, Result};
use crate::geometry::{quarter_turns, rotated_extent};

// ── Asset identifiers ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetId {
    /// Numbered player images.
    Player(u8),
    Beam,
    Background,
    Explosion,
}

pub const PLAYER_DEFAULT: u8 = 3;
pub const PLAYER_HIT: u8 = 6;
pub const PLAYER_DEFEATED: u8 = 8;

impl AssetId {
    pub fn file_name(self) -> String {
        match self {
            AssetId::Player(n) => format!("{}.png", n),
            AssetId::Beam => "beam.png".to_string(),
            AssetId::Background => "background.png".to_string(),
            AssetId::Explosion => "explosion.png".to_string(),
        }
    }
}

/// Read and decode one image from `dir`.
pub fn load(dir: &Path, id: AssetId) -> Result<RgbaImage> {
    let path: PathBuf = dir.join(id.file_name());
    let img = image::open(&path).map_err(|e| GameError::Asset {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    Ok(img.to_rgba8())
}

// ── Transforms ────────────────────────────────────────────────────────────────

pub fn zoom(img: &RgbaImage, factor: f64) -> RgbaImage {
    let (w, h) = rotated_extent(img.width(), img.height(), 0.0, factor);
    if (w, h) == img.dimensions() {
        return img.clone();
    }
    imageops::resize(img, w, h, FilterType::Nearest)
}

pub fn mirror(img: &RgbaImage) -> RgbaImage {
    imageops::flip_horizontal(img)
}

/// Rotate counter-clockwise by `degrees` and scale by `factor`, sampling the
/// nearest source pixel.  The output is sized by `rotated_extent`; uncovered
/// pixels are transparent.
pub fn rotozoom(img: &RgbaImage, degrees: f64, factor: f64) -> RgbaImage {
    if let Some(quarters) = quarter_turns(degrees) {
        let turned = match quarters.rem_euclid(4) {
            1 => imageops::rotate270(img),
            2 => imageops::rotate180(img),
            3 => imageops::rotate90(img),
            _ => img.clone(),
        };
        return zoom(&turned, factor);
    }

    let (dw, dh) = rotated_extent(img.width(), img.height(), degrees, factor);
    let (sw, sh) = (img.width() as f64, img.height() as f64);
    let rad = degrees.to_radians();
    let (c, s) = (rad.cos(), rad.sin());

    let mut out = RgbaImage::new(dw, dh);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let dx = (x as f64 + 0.5 - dw as f64 / 2.0) / factor;
        let dy = (y as f64 + 0.5 - dh as f64 / 2.0) / factor;
        let sx = c * dx - s * dy + sw / 2.0;
        let sy = s * dx + c * dy + sh / 2.0;
        if sx >= 0.0 && sy >= 0.0 && sx < sw && sy < sh {
            *px = *img.get_pixel(sx as u32, sy as u32);
        }
    }
    out
}

/// A transparent `2r`×`2r` square holding a filled disc.
pub fn disc(radius: i32, color: [u8; 3]) -> RgbaImage {
    let size = (2 * radius).max(1) as u32;
    let r = radius as f64;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f64 + 0.5 - r;
        let dy = y as f64 + 0.5 - r;
        if dx * dx + dy * dy <= r * r {
            Rgba([color[0], color[1], color[2], 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

// ── Sprite sheet ──────────────────────────────────────────────────────────────

/// Every image variant the game shows, built from the asset files.
pub struct SpriteSheet {
    /// Indexed by `Direction::index`.
    player: Vec<RgbaImage>,
    player_hit: RgbaImage,
    player_defeated: RgbaImage,
    /// Indexed by `Direction::index`.
    beams: Vec<RgbaImage>,
    beam_base: (u32, u32),
    explosion: Vec<RgbaImage>,
    pub background: RgbaImage,
    discs: HashMap<(i32, [u8; 3]), RgbaImage>,
}

impl SpriteSheet {
    pub fn load(dir: &Path) -> Result<Self> {
        info!("loading sprites from {}", dir.display());

        // The player artwork faces left.
        let left = zoom(&load(dir, AssetId::Player(PLAYER_DEFAULT))?, PLAYER_ZOOM);
        let right = mirror(&left);
        let player = Direction::ALL
            .iter()
            .map(|dir| match dir {
                Direction::None | Direction::Right => right.clone(),
                Direction::UpRight => rotozoom(&right, 45.0, 1.0),
                Direction::Up => rotozoom(&right, 90.0, 1.0),
                Direction::UpLeft => rotozoom(&left, -45.0, 1.0),
                Direction::Left => left.clone(),
                Direction::DownLeft => rotozoom(&left, 45.0, 1.0),
                Direction::Down => rotozoom(&right, -90.0, 1.0),
                Direction::DownRight => rotozoom(&right, -45.0, 1.0),
            })
            .collect();

        let player_hit = zoom(&load(dir, AssetId::Player(PLAYER_HIT))?, PLAYER_ZOOM);
        let player_defeated = zoom(&load(dir, AssetId::Player(PLAYER_DEFEATED))?, PLAYER_ZOOM);

        let beam = load(dir, AssetId::Beam)?;
        let beam_base = beam.dimensions();
        let beams = Direction::ALL
            .iter()
            .map(|dir| rotozoom(&beam, dir.angle_degrees(), 1.0))
            .collect();

        let blast = load(dir, AssetId::Explosion)?;
        let explosion = vec![blast.clone(), mirror(&blast)];
        debug_assert_eq!(explosion.len(), EXPLOSION_FRAMES);

        let background = load(dir, AssetId::Background)?;

        let mut discs = HashMap::new();
        for &radius in HAZARD_RADII.iter() {
            for &color in HAZARD_PALETTE.iter() {
                discs.insert((radius, color), disc(radius, color));
            }
        }

        info!(
            "player {:?}, beam {:?}, explosion {:?}",
            right.dimensions(),
            beam_base,
            explosion[0].dimensions()
        );

        Ok(SpriteSheet {
            player,
            player_hit,
            player_defeated,
            beams,
            beam_base,
            explosion,
            background,
            discs,
        })
    }

    /// Sizes the simulation needs; the player box is the default image's.
    pub fn metrics(&self) -> SpriteMetrics {
        SpriteMetrics {
            player: self.player[Direction::Right.index()].dimensions(),
            beam: self.beam_base,
        }
    }

    pub fn player(&self, pose: PlayerPose) -> &RgbaImage {
        match pose {
            PlayerPose::Facing(dir) => &self.player[dir.index()],
            PlayerPose::Hit => &self.player_hit,
            PlayerPose::Defeated => &self.player_defeated,
        }
    }

    pub fn beam(&self, dir: Direction) -> &RgbaImage {
        &self.beams[dir.index()]
    }

    pub fn explosion(&self, frame: usize) -> &RgbaImage {
        &self.explosion[frame % self.explosion.len()]
    }

    pub fn disc(&self, radius: i32, color: [u8; 3]) -> Option<&RgbaImage> {
        self.discs.get(&(radius, color))
    }
}
