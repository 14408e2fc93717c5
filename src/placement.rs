/// Non-overlapping spawn positions via rejection sampling.

use rand::Rng;

/// Result of a placement attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    /// False when the attempt cap was hit and the last draw was taken
    /// without an overlap check.
    pub checked: bool,
}

/// Uniform draw in `[0, bound - size]`, or 0 when the footprint does not fit.
fn draw_axis(rng: &mut impl Rng, bound: f32, size: f32) -> f32 {
    let span = bound - size;
    if span > 0.0 {
        rng.gen_range(0.0..span)
    } else {
        0.0
    }
}

/// Pick a top-left position for a `size`-wide square footprint inside
/// `(width, height)` whose distance to every position in `existing` is at
/// least `size`.
///
/// After `max_attempts` rejected draws the next draw is returned unchecked so
/// placement always terminates, even on a surface too crowded to satisfy it.
pub fn place(
    rng: &mut impl Rng,
    width: f32,
    height: f32,
    size: f32,
    existing: &[(f32, f32)],
    max_attempts: u32,
) -> Placement {
    for _ in 0..max_attempts {
        let x = draw_axis(rng, width, size);
        let y = draw_axis(rng, height, size);
        let overlaps = existing
            .iter()
            .any(|&(ex, ey)| (x - ex).hypot(y - ey) < size);
        if !overlaps {
            return Placement { x, y, checked: true };
        }
    }

    log::warn!(
        "placement gave up after {} attempts ({} existing, size {})",
        max_attempts,
        existing.len(),
        size
    );
    Placement {
        x: draw_axis(rng, width, size),
        y: draw_axis(rng, height, size),
        checked: false,
    }
}
