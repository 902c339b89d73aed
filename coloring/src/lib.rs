#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Coloring canvas: tolerant flood fill over line art, plus the level ladder
//! and session flow of the coloring game.
//!
//! Image generation and grading are external collaborators reached through
//! [`ChallengeService`]; this crate performs no I/O of its own.

mod evaluation;
mod fill;
mod levels;
mod palette;
mod raster;
mod session;

pub use evaluation::{Evaluation, Medal, MAX_SCORE, PASS_SCORE};
pub use fill::{flood_fill, FillOutcome, MATCH_TOLERANCE, OUTLINE_THRESHOLD};
pub use levels::{evaluation_prompt, line_art_prompt, Level, Tier, MAX_LEVEL};
pub use palette::{
    find as find_swatch, resolve as resolve_color, PaletteError, Swatch, DEFAULT_SWATCH, PALETTE,
};
pub use raster::{ColorParseError, Raster, RasterError, Rgb};
pub use session::{
    Challenge, ChallengeService, GeneratedImage, Screen, ServiceError, Session, SessionError,
    FALLBACK_CANVAS_SIZE,
};
