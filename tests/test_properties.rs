use hazard_shooter::compute::*;
use hazard_shooter::entities::*;
use hazard_shooter::geometry::{in_bounds, Rect};

use proptest::prelude::*;

const METRICS: SpriteMetrics = SpriteMetrics {
    player: (100, 80),
    beam: (50, 12),
};

fn base_state(px: i32, py: i32) -> GameState {
    GameState {
        player: Player {
            rect: Rect::new(px, py, 100, 80),
            facing: Direction::Right,
            pose: PlayerPose::Facing(Direction::Right),
        },
        hazards: Vec::new(),
        beams: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        viewport: viewport(),
        metrics: METRICS,
    }
}

fn held_keys() -> impl Strategy<Value = HeldKeys> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(up, down, left, right)| HeldKeys { up, down, left, right })
}

fn hazard() -> impl Strategy<Value = Hazard> {
    (0i32..=1600, 0i32..=900, 0usize..5, -5i32..=5, -5i32..=5).prop_map(|(cx, cy, ri, vx, vy)| {
        let radius = [10, 20, 30, 40, 50][ri];
        Hazard {
            rect: Rect::from_center(cx, cy, 2 * radius, 2 * radius),
            vx,
            vy,
            radius,
            color: [0, 255, 0],
        }
    })
}

proptest! {
    #[test]
    fn player_never_leaves_viewport(
        px in 0i32..=1500, py in 0i32..=820,
        moves in prop::collection::vec(held_keys(), 1..300),
    ) {
        let mut s = base_state(px, py);
        for keys in &moves {
            let before = s.player.facing;
            s = move_player(&s, keys);
            prop_assert_eq!(in_bounds(&s.player.rect, &s.viewport), (true, true));
            let (dx, dy) = keys.delta();
            let dir = Direction::from_delta(dx, dy);
            prop_assert!(dir.is_some());
            if dir == Some(Direction::None) {
                prop_assert_eq!(s.player.facing, before);
            } else {
                prop_assert_eq!(Some(s.player.facing), dir);
            }
        }
    }

    #[test]
    fn hazard_flips_exactly_on_failing_axis(h in hazard()) {
        let mut s = base_state(0, 0);
        s.hazards = vec![h.clone()];
        let s = update_hazards(&s);
        let (x_in, y_in) = in_bounds(&h.rect, &s.viewport);
        let moved = &s.hazards[0];
        prop_assert_eq!(moved.vx, if x_in { h.vx } else { -h.vx });
        prop_assert_eq!(moved.vy, if y_in { h.vy } else { -h.vy });
        prop_assert_eq!(moved.rect, h.rect.translate(moved.vx, moved.vy));
    }

    #[test]
    fn score_grows_by_one_per_resolved_pair(
        hazards in prop::collection::vec(hazard(), 0..8),
        beams in prop::collection::vec((25i32..1575, 6i32..894, 0usize..9), 0..8),
    ) {
        let mut s = base_state(1490, 810);
        s.hazards = hazards;
        s.beams = beams
            .into_iter()
            .map(|(cx, cy, d)| Beam {
                rect: Rect::from_center(cx, cy, 50, 12),
                direction: Direction::ALL[d],
            })
            .collect();

        let input = TickInput::default();
        let mut last = s.score;
        for _ in 0..20 {
            let (next, report) = collide(&s, &input);
            prop_assert!(next.score >= last);
            prop_assert_eq!(next.score - last, report.beam_hits.len() as u32);
            if report.defeated {
                prop_assert_eq!(next.score, last);
                break;
            }
            last = next.score;
            s = advance(&next, &input.held);
        }
    }

    #[test]
    fn beam_keeps_its_velocity(
        facing in 0usize..9,
        moves in prop::collection::vec(held_keys(), 0..30),
    ) {
        let mut s = base_state(700, 400);
        s.player.facing = Direction::ALL[facing];
        s = fire_beam(&s);
        let expected = Direction::ALL[facing].delta();
        for keys in &moves {
            s = move_player(&s, keys);
            s = update_beams(&s);
            prop_assert_eq!(s.beams[0].velocity(), expected);
        }
    }
}
