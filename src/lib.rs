//! Hazard Shooter - a terminal arcade game
//!
//! The player dodges bouncing hazards and shoots them down with beams.
//!
//! Core modules:
//! - `entities`: Plain game data
//! - `compute`: Pure per-tick game logic
//! - `geometry`: Rectangles and the viewport bounds check
//! - `sprites`: Image loading and precomputed sprite variants
//! - `display`: Frame composition and terminal output
//! - `input`: Keyboard state from terminal events

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod sprites;

pub use error::{GameError, Result};
