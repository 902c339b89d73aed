//! PNG flood fill through the coloring canvas.

use std::path::Path;

use anyhow::{Context, Result};
use coloring_canvas::{flood_fill, FillOutcome, Raster, Rgb};
use image::RgbaImage;
use tracing::debug;

/// Fills the region under `(x, y)` in `input` and writes the result to `output`.
pub(crate) fn fill_png(
    input: &Path,
    output: &Path,
    x: u32,
    y: u32,
    color: Rgb,
) -> Result<FillOutcome> {
    let image = image::open(input)
        .with_context(|| format!("failed to read image {}", input.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    let mut raster = Raster::from_rgba(width, height, image.into_raw())?;

    let outcome = flood_fill(&mut raster, x, y, color);
    debug!(?outcome, x, y, %color, "flood fill finished");

    let filled = RgbaImage::from_raw(width, height, raster.into_rgba())
        .context("filled raster no longer matches the image dimensions")?;
    filled
        .save(output)
        .with_context(|| format!("failed to write image {}", output.display()))?;
    Ok(outcome)
}

/// Human-readable summary of a fill.
pub(crate) fn describe(outcome: FillOutcome) -> String {
    match outcome {
        FillOutcome::Filled { pixels } => format!("filled {pixels} pixels"),
        FillOutcome::OutlineSeed => "seed is on an outline; image left unchanged".to_owned(),
        FillOutcome::AlreadyTarget => {
            "seed already has that color; image left unchanged".to_owned()
        }
        FillOutcome::OutOfBounds => "seed lies outside the image; image left unchanged".to_owned(),
    }
}
