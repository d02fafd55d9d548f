use std::io::{stdout, BufWriter, Write};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{debug, info, trace};
use rand::thread_rng;

use hazard_shooter::compute::{advance, collide, init_state};
use hazard_shooter::config::{asset_dir, FRAME, FREEZE, TITLE};
use hazard_shooter::display::{hit_freeze_scores, render, render_freeze, Canvas};
use hazard_shooter::entities::PlayerPose;
use hazard_shooter::input::{drain_events, KeyTracker};
use hazard_shooter::sprites::SpriteSheet;
use hazard_shooter::Result;

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits or is hit.  Both are normal endings.
///
/// Each tick: drain input, run the collision phase, show the freezes it
/// reports, then advance and draw the frame.  A hit freezes the display for
/// `FREEZE` with no input handled in between.
fn game_loop<W: Write>(out: &mut W, sheet: &SpriteSheet) -> Result<()> {
    let mut rng = thread_rng();
    let mut state = init_state(sheet.metrics(), &mut rng);
    let mut canvas = Canvas::new();
    let mut keys = KeyTracker::new();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let frame_input = drain_events(&mut keys)?;
        if frame_input.quit {
            info!("quit at tick {} with score {}", state.frame, state.score);
            return Ok(());
        }
        let input = keys.tick_input(&frame_input);

        let size = terminal::size()?;
        let (next, report) = collide(&state, &input);

        // ── Player ↔ hazards ends the game ───────────────────────────────────
        if report.defeated {
            render_freeze(out, &mut canvas, &next, sheet, PlayerPose::Defeated, None, size)?;
            thread::sleep(FREEZE);
            return Ok(());
        }

        // ── One freeze per destroyed pair ────────────────────────────────────
        for shown in hit_freeze_scores(&report.beam_hits) {
            render_freeze(out, &mut canvas, &next, sheet, PlayerPose::Hit, shown, size)?;
            thread::sleep(FREEZE);
        }

        // ── Move everything and draw ──────────────────────────────────────────
        state = advance(&next, &input.held);
        render(out, &mut canvas, &state, sheet, size)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        } else {
            trace!("tick {} overran by {:?}", state.frame, elapsed - FRAME);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // Off unless asked for: stderr shares the terminal with the game.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    // Load before touching the terminal so a missing image reports cleanly.
    let sheet = SpriteSheet::load(&asset_dir())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(TITLE))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    debug!("keyboard enhancement: {}", keyboard_enhanced);

    let result = game_loop(&mut out, &sheet);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
