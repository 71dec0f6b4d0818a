//! Half-cosine expansion of key points into the collision boundary.

use std::f64::consts::PI;

use glam::DVec2;

/// Expand key points into a dense polyline of half-cosine hills.
///
/// Between each consecutive pair the curve follows
/// `ymid + ampl * cos(PI * t)` for `t` in `[0, 1]`, sampled at
/// `floor(dx / segment_width)` segments (at least one). The shared end point
/// of neighbouring hills is emitted once, so x is strictly increasing when
/// the key points' x is.
pub fn expand_hills(key_points: &[DVec2], segment_width: f64) -> Vec<DVec2> {
    let mut boundary = Vec::new();
    let Some(first) = key_points.first() else {
        return boundary;
    };
    boundary.push(*first);

    for pair in key_points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        let segments = ((p1.x - p0.x) / segment_width).floor().max(1.0);
        let steps = segments as usize;

        let dx = (p1.x - p0.x) / segments;
        let da = PI / segments;
        let ymid = (p0.y + p1.y) / 2.0;
        let ampl = (p0.y - p1.y) / 2.0;

        for j in 1..steps {
            let j = j as f64;
            boundary.push(DVec2::new(p0.x + j * dx, ymid + ampl * (da * j).cos()));
        }
        // Land exactly on the key point instead of trusting cos(PI).
        boundary.push(p1);
    }

    boundary
}

/// Boundary closed down to `y = 0` at both ends, for filled rendering.
pub fn closed_outline(boundary: &[DVec2]) -> Vec<DVec2> {
    let (Some(first), Some(last)) = (boundary.first(), boundary.last()) else {
        return Vec::new();
    };
    let mut outline = Vec::with_capacity(boundary.len() + 2);
    outline.push(DVec2::new(first.x, 0.0));
    outline.extend_from_slice(boundary);
    outline.push(DVec2::new(last.x, 0.0));
    outline
}

/// Linear interpolation of the boundary height at `x`.
/// Returns `None` outside the boundary's x range.
pub fn height_at(boundary: &[DVec2], x: f64) -> Option<f64> {
    let first = boundary.first()?;
    let last = boundary.last()?;
    if x < first.x || x > last.x {
        return None;
    }

    // First vertex with vertex.x >= x.
    let idx = boundary.partition_point(|p| p.x < x);
    if idx == 0 {
        return Some(first.y);
    }
    let (a, b) = (boundary[idx - 1], boundary[idx]);
    let t = (x - a.x) / (b.x - a.x);
    Some(a.y + (b.y - a.y) * t)
}
