/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and to log
/// output.

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{
    EXPLOSION_FRAMES, EXPLOSION_LIFE, HAZARD_COUNT, HAZARD_MAX_SPEED, HAZARD_PALETTE,
    HAZARD_RADII, PLAYER_START, STEP, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};
use crate::entities::{
    Beam, BeamHit, Direction, Explosion, GameState, GameStatus, Hazard, HeldKeys, Player,
    PlayerPose, SpriteMetrics, TickInput, TickReport,
};
use crate::geometry::{in_bounds, rotated_extent, Rect};

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn viewport() -> Rect {
    Rect::new(0, 0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
}

/// A hazard with random size, colour, centre and velocity.  The centre may sit
/// on the viewport edge, so a fresh hazard can start partly outside.
pub fn spawn_hazard(viewport: &Rect, rng: &mut impl Rng) -> Hazard {
    let radius = *HAZARD_RADII.choose(rng).unwrap_or(&HAZARD_RADII[0]);
    let color = *HAZARD_PALETTE.choose(rng).unwrap_or(&HAZARD_PALETTE[0]);
    let cx = rng.gen_range(viewport.left()..=viewport.right());
    let cy = rng.gen_range(viewport.top()..=viewport.bottom());
    Hazard {
        rect: Rect::from_center(cx, cy, 2 * radius, 2 * radius),
        vx: rng.gen_range(-HAZARD_MAX_SPEED..=HAZARD_MAX_SPEED),
        vy: rng.gen_range(-HAZARD_MAX_SPEED..=HAZARD_MAX_SPEED),
        radius,
        color,
    }
}

/// Build the opening state: player at its start point facing right, a full
/// set of hazards, nothing else.
pub fn init_state(metrics: SpriteMetrics, rng: &mut impl Rng) -> GameState {
    let viewport = viewport();
    let (pw, ph) = metrics.player;
    let mut hazards = Vec::with_capacity(HAZARD_COUNT);
    for _ in 0..HAZARD_COUNT {
        hazards.push(spawn_hazard(&viewport, rng));
    }
    GameState {
        player: Player {
            rect: Rect::from_center(PLAYER_START.0, PLAYER_START.1, pw as i32, ph as i32),
            facing: Direction::Right,
            pose: PlayerPose::Facing(Direction::Right),
        },
        hazards,
        beams: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        viewport,
        metrics,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Move the player by the held keys.  A move that would push the player's box
/// outside the viewport on either axis is cancelled on both axes.
pub fn move_player(state: &GameState, keys: &HeldKeys) -> GameState {
    let (dx, dy) = keys.delta();
    let direction = Direction::from_delta(dx, dy).unwrap_or_else(|| {
        warn!("ignoring movement vector ({}, {})", dx, dy);
        Direction::None
    });
    let (dx, dy) = direction.delta();

    let moved = state.player.rect.translate(dx, dy);
    let rect = if in_bounds(&moved, &state.viewport) == (true, true) {
        moved
    } else {
        state.player.rect
    };
    let facing = if direction == Direction::None {
        state.player.facing
    } else {
        direction
    };

    GameState {
        player: Player {
            rect,
            facing,
            pose: PlayerPose::Facing(direction),
        },
        ..state.clone()
    }
}

/// A beam leaving the player's leading edge in the facing direction.
pub fn new_beam(player: &Player, metrics: &SpriteMetrics) -> Beam {
    let direction = player.facing;
    let (vx, vy) = direction.delta();
    let (pcx, pcy) = player.rect.center();
    let cx = pcx + player.rect.w * vx / STEP;
    let cy = pcy + player.rect.h * vy / STEP;
    let (bw, bh) = rotated_extent(metrics.beam.0, metrics.beam.1, direction.angle_degrees(), 1.0);
    Beam {
        rect: Rect::from_center(cx, cy, bw as i32, bh as i32),
        direction,
    }
}

pub fn fire_beam(state: &GameState) -> GameState {
    let mut beams = state.beams.clone();
    beams.push(new_beam(&state.player, &state.metrics));
    GameState {
        beams,
        ..state.clone()
    }
}

// ── Entity updates ───────────────────────────────────────────────────────────

/// Bounce each hazard off the viewport edges, then move it.  Each axis flips
/// on its own, so a corner approach flips both.
pub fn update_hazards(state: &GameState) -> GameState {
    let hazards = state
        .hazards
        .iter()
        .map(|h| {
            let (x_in, y_in) = in_bounds(&h.rect, &state.viewport);
            let vx = if x_in { h.vx } else { -h.vx };
            let vy = if y_in { h.vy } else { -h.vy };
            Hazard {
                rect: h.rect.translate(vx, vy),
                vx,
                vy,
                ..h.clone()
            }
        })
        .collect();
    GameState {
        hazards,
        ..state.clone()
    }
}

pub fn update_beams(state: &GameState) -> GameState {
    let beams = state
        .beams
        .iter()
        .map(|b| {
            let (vx, vy) = b.velocity();
            Beam {
                rect: b.rect.translate(vx, vy),
                ..b.clone()
            }
        })
        .collect();
    GameState {
        beams,
        ..state.clone()
    }
}

/// Age every explosion by one tick, dropping those whose life has run out.
pub fn update_explosions(state: &GameState) -> GameState {
    let explosions = state
        .explosions
        .iter()
        .filter_map(|e| {
            let life = e.life - 1;
            if life <= 0 {
                return None;
            }
            let frame = if e.frame < EXPLOSION_FRAMES {
                e.frame + 1
            } else {
                e.frame
            };
            Some(Explosion { frame, life, ..e.clone() })
        })
        .collect();
    GameState {
        explosions,
        ..state.clone()
    }
}

/// Drop beams that are no longer fully inside the viewport.
pub fn prune_beams(state: &GameState) -> GameState {
    let beams = state
        .beams
        .iter()
        .filter(|b| in_bounds(&b.rect, &state.viewport) == (true, true))
        .cloned()
        .collect();
    GameState {
        beams,
        ..state.clone()
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// If any hazard touches the player the game is over.  Returns the new state
/// and whether the player was hit.
pub fn resolve_player_hit(state: &GameState) -> (GameState, bool) {
    let hit = state
        .hazards
        .iter()
        .any(|h| h.rect.overlaps(&state.player.rect));
    if !hit {
        return (state.clone(), false);
    }
    info!("player hit a hazard, final score {}", state.score);
    let next = GameState {
        player: Player {
            pose: PlayerPose::Defeated,
            ..state.player.clone()
        },
        status: GameStatus::GameOver,
        ..state.clone()
    };
    (next, true)
}

/// Destroy every hazard/beam pair that overlaps.  Each pair yields an
/// explosion at the hazard's centre and one point.  A beam is spent by its
/// first hit; a hazard stays a target for the rest of the pass, so several
/// beams on one hazard each score.
pub fn resolve_beam_hits(state: &GameState) -> (GameState, Vec<BeamHit>) {
    let mut hazard_alive = vec![true; state.hazards.len()];
    let mut beam_alive = vec![true; state.beams.len()];
    let mut explosions = state.explosions.clone();
    let mut hits = Vec::new();
    let mut score = state.score;

    for (hi, hazard) in state.hazards.iter().enumerate() {
        for (bi, beam) in state.beams.iter().enumerate() {
            if !beam_alive[bi] || !beam.rect.overlaps(&hazard.rect) {
                continue;
            }
            hazard_alive[hi] = false;
            beam_alive[bi] = false;
            score += 1;
            let center = hazard.rect.center();
            explosions.push(Explosion {
                center,
                frame: 0,
                life: EXPLOSION_LIFE,
            });
            debug!("beam hit hazard at {:?}, score {}", center, score);
            hits.push(BeamHit {
                hazard_center: center,
                score,
            });
        }
    }

    if hits.is_empty() {
        return (state.clone(), hits);
    }

    let hazards = state
        .hazards
        .iter()
        .zip(&hazard_alive)
        .filter(|(_, alive)| **alive)
        .map(|(h, _)| h.clone())
        .collect();
    let beams = state
        .beams
        .iter()
        .zip(&beam_alive)
        .filter(|(_, alive)| **alive)
        .map(|(b, _)| b.clone())
        .collect();

    let next = GameState {
        player: Player {
            pose: PlayerPose::Hit,
            ..state.player.clone()
        },
        hazards,
        beams,
        explosions,
        score,
        ..state.clone()
    };
    (next, hits)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Everything in a tick after collisions: explosions age, stray beams are
/// dropped, then player, hazards and beams move, in that order.
pub fn advance(state: &GameState, keys: &HeldKeys) -> GameState {
    let next = update_explosions(state);
    let next = prune_beams(&next);
    let next = move_player(&next, keys);
    let next = update_hazards(&next);
    let next = update_beams(&next);
    GameState {
        frame: state.frame + 1,
        ..next
    }
}

/// The collision half of a tick: queue this tick's beams, then check the
/// player and the beams against the hazards.  The caller shows the freezes
/// the report asks for and then calls `advance`, unless the player was
/// defeated.  A finished game is returned unchanged.
pub fn collide(state: &GameState, input: &TickInput) -> (GameState, TickReport) {
    let mut report = TickReport::default();
    if state.status == GameStatus::GameOver {
        return (state.clone(), report);
    }

    let mut next = state.clone();
    for _ in 0..input.fire_presses {
        next = fire_beam(&next);
    }

    let (next, defeated) = resolve_player_hit(&next);
    if defeated {
        report.defeated = true;
        return (next, report);
    }

    let (next, hits) = resolve_beam_hits(&next);
    report.beam_hits = hits;
    (next, report)
}
