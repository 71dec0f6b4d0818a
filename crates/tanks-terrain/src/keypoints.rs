//! Key-point generation for the rolling hills.

use glam::DVec2;
use rand::Rng;

use crate::config::TerrainConfig;

/// Generate the terrain control vertices.
///
/// The first point sits one `min_dx` left of the origin at `lead_in_y`, the
/// second at `(0, height / 2)`. Each following step advances x by
/// `min_dx + U(0, range_dx)` and moves y up or down (alternating) by
/// `min_dy + U(0, range_dy)`, resampling until y lies strictly inside
/// `(padding_bottom, height - padding_top)`. An optional flat lead-in
/// replaces the second step, and an optional flat run-out follows the last
/// point.
///
/// `config` must have passed [`TerrainConfig::validate`]; the resampling
/// loop is unbounded otherwise.
pub fn generate_key_points<R: Rng + ?Sized>(config: &TerrainConfig, rng: &mut R) -> Vec<DVec2> {
    let mut points = Vec::with_capacity(config.min_key_points + 2);

    let band_top = config.height - config.padding_top;
    let mut x = -config.min_dx;
    let mut y = config.lead_in_y;
    // +1 going up, -1 going down
    let mut sign = 1.0;

    for i in 0..config.min_key_points {
        points.push(DVec2::new(x, y));

        if i == 0 {
            x = 0.0;
            y = config.height / 2.0;
        } else if i == 1 && config.begin > 0.0 {
            x += config.begin;
        } else {
            x += config.min_dx + sample(rng, config.range_dx);
            y = loop {
                let ny = y + sign * (config.min_dy + sample(rng, config.range_dy));
                if ny < band_top && ny > config.padding_bottom {
                    break ny;
                }
            };
        }

        sign = -sign;
    }

    // Last point drops to the floor of the band.
    let floor = config.min_dy + config.padding_bottom;
    x += config.min_dx + sample(rng, config.range_dx);
    points.push(DVec2::new(x, floor));

    if config.end > 0.0 {
        x += config.end;
        points.push(DVec2::new(x, floor));
    }

    points
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: f64) -> f64 {
    if range > 0.0 {
        rng.gen_range(0.0..=range)
    } else {
        0.0
    }
}
