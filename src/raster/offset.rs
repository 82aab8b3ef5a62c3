//! Feather outline repair.
//!
//! Hard mask edges alias badly when sampled once per pixel, so every edge is
//! given at least a one pixel ramp: either a synthesized feather outline or a
//! widened copy of the user feather where it is thinner than that.

use crate::foundation::math::{P2, add, dist_sq, normalize, perp, ring_area2, scale, sub};

/// Outward unit normals of a polyline, one per point.
///
/// Each normal is perpendicular to the bisector of the point's two adjacent
/// edge directions. Closed rings use their winding to pick the outside;
/// open polylines use the right-hand side of the travel direction.
pub fn outward_normals(points: &[P2], cyclic: bool) -> Vec<P2> {
    let n = points.len();
    if n < 2 {
        return vec![[0.0, 0.0]; n];
    }
    let ccw = !cyclic || ring_area2(points) >= 0.0;

    let edge_dir = |i: usize, j: usize| normalize(sub(points[j], points[i]));
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let d_prev = if i > 0 {
            edge_dir(i - 1, i)
        } else if cyclic {
            edge_dir(n - 1, 0)
        } else {
            [0.0, 0.0]
        };
        let d_next = if i + 1 < n {
            edge_dir(i, i + 1)
        } else if cyclic {
            edge_dir(n - 1, 0)
        } else {
            [0.0, 0.0]
        };

        let mut t = normalize(add(d_prev, d_next));
        if t == [0.0, 0.0] {
            // hairpin: both edges cancel out
            t = if d_prev != [0.0, 0.0] { d_prev } else { d_next };
        }
        let left = perp(t);
        out.push(if ccw { scale(left, -1.0) } else { left });
    }
    out
}

/// Build a feather outline `width` away from `points` along the outward normals.
///
/// A negative `width` places the outline on the inner side.
pub fn synthesize_feather(points: &[P2], cyclic: bool, width: f32) -> Vec<P2> {
    outward_normals(points, cyclic)
        .into_iter()
        .zip(points)
        .map(|(n, &p)| add(p, scale(n, width)))
        .collect()
}

/// Push feather points closer than `min_width` to their fill point outward to
/// exactly `min_width`. Points that are already wide enough are untouched.
/// A negative `min_width` pushes them inward instead.
///
/// Returns how many points were moved.
pub fn widen_feather(points: &[P2], feather: &mut [P2], cyclic: bool, min_width: f32) -> usize {
    debug_assert_eq!(points.len(), feather.len());
    let min_sq = min_width * min_width;
    if !feather
        .iter()
        .zip(points)
        .any(|(f, p)| dist_sq(*f, *p) < min_sq)
    {
        return 0;
    }

    let normals = outward_normals(points, cyclic);
    let mut moved = 0;
    for ((f, &p), n) in feather.iter_mut().zip(points).zip(normals) {
        if dist_sq(*f, p) < min_sq {
            *f = add(p, scale(n, min_width));
            moved += 1;
        }
    }
    moved
}

#[cfg(test)]
#[path = "../../tests/unit/raster/offset.rs"]
mod tests;
