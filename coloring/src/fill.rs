//! Scanline seed fill over a [`Raster`].
//!
//! Each seed is walked up to the top of its column run, then painted
//! downward. While painting, the left and right neighbours are probed and a
//! new seed is queued once per contiguous matching span on either side.

use crate::raster::{Raster, Rgb};

/// Seeds whose channels all fall below this value are treated as outline.
pub const OUTLINE_THRESHOLD: u8 = 50;

/// Largest per-channel difference, exclusive, still considered the seed color.
pub const MATCH_TOLERANCE: u8 = 30;

/// Result of a fill request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillOutcome {
    /// The region was recolored.
    Filled {
        /// Number of pixels painted.
        pixels: usize,
    },
    /// The seed sits on dark line art; nothing was painted.
    OutlineSeed,
    /// The seed already carries the target color; nothing was painted.
    AlreadyTarget,
    /// The seed lies outside the raster; nothing was painted.
    OutOfBounds,
}

impl FillOutcome {
    /// Reports whether any pixel changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Filled { pixels } if *pixels > 0)
    }
}

/// Recolors the region connected to `(x, y)` whose pixels match the seed color.
pub fn flood_fill(raster: &mut Raster, x: u32, y: u32, target: Rgb) -> FillOutcome {
    let Some([r, g, b, _]) = raster.pixel(x, y) else {
        return FillOutcome::OutOfBounds;
    };
    let seed = Rgb::new(r, g, b);
    if r < OUTLINE_THRESHOLD && g < OUTLINE_THRESHOLD && b < OUTLINE_THRESHOLD {
        return FillOutcome::OutlineSeed;
    }
    if seed == target {
        return FillOutcome::AlreadyTarget;
    }

    let mut region = Region::new(raster, seed);
    let paint = target.to_rgba();
    let mut painted = 0;
    let mut stack = vec![(x, y)];

    while let Some((column, row)) = stack.pop() {
        let mut row = row;
        while row > 0 && region.fillable(raster, column, row - 1) {
            row -= 1;
        }
        if !region.fillable(raster, column, row) {
            continue;
        }

        let mut reach_left = false;
        let mut reach_right = false;
        while region.fillable(raster, column, row) {
            let _ = raster.set_pixel(column, row, paint);
            region.mark(raster, column, row);
            painted += 1;

            if column > 0 {
                probe(&region, raster, column - 1, row, &mut reach_left, &mut stack);
            }
            if column + 1 < raster.width() {
                probe(&region, raster, column + 1, row, &mut reach_right, &mut stack);
            }
            row += 1;
        }
    }

    FillOutcome::Filled { pixels: painted }
}

fn probe(
    region: &Region,
    raster: &Raster,
    column: u32,
    row: u32,
    reach: &mut bool,
    stack: &mut Vec<(u32, u32)>,
) {
    if region.fillable(raster, column, row) {
        if !*reach {
            stack.push((column, row));
            *reach = true;
        }
    } else {
        *reach = false;
    }
}

/// Tracks painted pixels so a target close to the seed color cannot loop.
struct Region {
    seed: Rgb,
    painted: Vec<bool>,
}

impl Region {
    fn new(raster: &Raster, seed: Rgb) -> Self {
        let len = raster.as_rgba().len() / 4;
        Self {
            seed,
            painted: vec![false; len],
        }
    }

    fn fillable(&self, raster: &Raster, column: u32, row: u32) -> bool {
        let Some(index) = raster.index(column, row) else {
            return false;
        };
        if self.painted.get(index).copied().unwrap_or(true) {
            return false;
        }
        raster
            .pixel(column, row)
            .is_some_and(|[r, g, b, _]| {
                r.abs_diff(self.seed.r) < MATCH_TOLERANCE
                    && g.abs_diff(self.seed.g) < MATCH_TOLERANCE
                    && b.abs_diff(self.seed.b) < MATCH_TOLERANCE
            })
    }

    fn mark(&mut self, raster: &Raster, column: u32, row: u32) {
        if let Some(slot) = raster
            .index(column, row)
            .and_then(|index| self.painted.get_mut(index))
        {
            *slot = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(239, 68, 68);

    /// White square of `inner` pixels framed by a one-pixel black border.
    fn framed_square(inner: u32) -> Raster {
        let size = inner + 2;
        let mut raster = Raster::filled(size, size, Rgb::WHITE).expect("raster");
        for i in 0..size {
            for (x, y) in [(i, 0), (i, size - 1), (0, i), (size - 1, i)] {
                let _ = raster.set_pixel(x, y, Rgb::BLACK.to_rgba());
            }
        }
        raster
    }

    #[test]
    fn fills_white_square_inside_black_border() {
        let mut raster = framed_square(4);
        let outcome = flood_fill(&mut raster, 2, 3, RED);

        assert_eq!(outcome, FillOutcome::Filled { pixels: 16 });
        for y in 0..6 {
            for x in 0..6 {
                let border = x == 0 || y == 0 || x == 5 || y == 5;
                let expected = if border { Rgb::BLACK } else { RED };
                assert_eq!(raster.pixel(x, y), Some(expected.to_rgba()), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn near_black_seed_is_refused() {
        let mut raster = Raster::filled(3, 3, Rgb::new(10, 10, 10)).expect("raster");
        let before = raster.clone();
        assert_eq!(flood_fill(&mut raster, 1, 1, RED), FillOutcome::OutlineSeed);
        assert_eq!(raster, before);
    }

    #[test]
    fn seed_already_in_target_color_is_a_no_op() {
        let mut raster = Raster::filled(3, 3, RED).expect("raster");
        let before = raster.clone();
        assert_eq!(flood_fill(&mut raster, 0, 0, RED), FillOutcome::AlreadyTarget);
        assert_eq!(raster, before);
    }

    #[test]
    fn seed_outside_raster_is_reported() {
        let mut raster = Raster::filled(2, 2, Rgb::WHITE).expect("raster");
        assert_eq!(flood_fill(&mut raster, 2, 0, RED), FillOutcome::OutOfBounds);
    }

    #[test]
    fn anti_aliased_pixels_within_tolerance_are_filled() {
        let mut raster = Raster::filled(3, 1, Rgb::WHITE).expect("raster");
        let _ = raster.set_pixel(1, 0, [230, 230, 230, 255]);
        let _ = raster.set_pixel(2, 0, [220, 255, 255, 255]);

        assert_eq!(flood_fill(&mut raster, 0, 0, RED), FillOutcome::Filled { pixels: 2 });
        assert_eq!(raster.pixel(1, 0), Some(RED.to_rgba()));
        assert_eq!(raster.pixel(2, 0), Some([220, 255, 255, 255]));
    }

    #[test]
    fn target_close_to_seed_terminates() {
        let mut raster = Raster::filled(4, 4, Rgb::WHITE).expect("raster");
        let near_white = Rgb::new(250, 250, 250);
        assert_eq!(
            flood_fill(&mut raster, 1, 1, near_white),
            FillOutcome::Filled { pixels: 16 }
        );
    }

    #[test]
    fn concave_regions_are_reached_around_obstacles() {
        // U-shaped wall: the seed column is blocked, the fill must wrap around.
        let mut raster = Raster::filled(5, 5, Rgb::WHITE).expect("raster");
        for (x, y) in [(1, 1), (1, 2), (1, 3), (2, 3), (3, 3), (3, 2), (3, 1)] {
            let _ = raster.set_pixel(x, y, Rgb::BLACK.to_rgba());
        }
        let outcome = flood_fill(&mut raster, 2, 4, RED);

        assert_eq!(outcome, FillOutcome::Filled { pixels: 25 - 7 });
        assert_eq!(raster.pixel(2, 1), Some(RED.to_rgba()));
        assert_eq!(raster.pixel(2, 2), Some(RED.to_rgba()));
    }
}
