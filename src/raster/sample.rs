//! Point queries against a built layer.

use crate::{
    foundation::core::Bounds,
    foundation::math::{P2, point_in_tri, point_in_tri_ccw, tri_weights},
    raster::bucket::{BUCKET_END, BucketGrid},
    raster::geometry::{Face, MaskVertex},
    raster::set::MaskRasterLayer,
};

/// Feather depth of `layer` at `xy`: `0.0` fully inside, `1.0` outside.
///
/// Total over all of ℝ²: points outside the layer bounds, in empty cells or
/// in empty layers report `1.0`.
pub fn sample_layer(layer: &MaskRasterLayer, xy: [f32; 2]) -> f32 {
    match (layer.bounds(), layer.grid()) {
        (Some(bounds), Some(grid)) => {
            depth_at(layer.vertices(), layer.faces(), grid, bounds, xy)
        }
        _ => 1.0,
    }
}

pub(crate) fn depth_at(
    vertices: &[MaskVertex],
    faces: &[Face],
    grid: &BucketGrid,
    bounds: Bounds,
    xy: P2,
) -> f32 {
    if !bounds.contains(xy) {
        return 1.0;
    }
    let Some(list) = grid.faces_at(xy) else {
        return 1.0;
    };

    let mut best = 1.0f32;
    for &fi in list {
        if fi == BUCKET_END {
            break;
        }
        let Some(face) = faces.get(fi as usize) else {
            continue;
        };
        let d = face_depth(vertices, *face, best, xy);
        if d < best {
            best = d;
            // triangles are exactly zero; nothing can beat that
            if best == 0.0 {
                return 0.0;
            }
        }
    }
    best
}

/// Depth of one face at `xy`, or `1.0` on a miss.
fn face_depth(vertices: &[MaskVertex], face: Face, best: f32, xy: P2) -> f32 {
    let v = |i: u32| vertices.get(i as usize);

    if face.is_tri() {
        let [a, b, c, _] = face.0;
        let (Some(a), Some(b), Some(c)) = (v(a), v(b), v(c)) else {
            return 1.0;
        };
        // stored counter-clockwise at build time
        return if point_in_tri_ccw(xy, a.pos, b.pos, c.pos) {
            0.0
        } else {
            1.0
        };
    }

    let [a0, a1, f1, f0] = face.0;
    let (Some(a0), Some(a1), Some(f1), Some(f0)) = (v(a0), v(a1), v(f1), v(f0)) else {
        return 1.0;
    };
    let min_depth = a0.depth.min(a1.depth).min(f1.depth).min(f0.depth);
    if min_depth >= best {
        return 1.0;
    }

    // Corner depths are 0/0/1/1, so only the feather-side weights count.
    if point_in_tri(xy, a0.pos, a1.pos, f1.pos)
        && let Some(w) = tri_weights(xy, a0.pos, a1.pos, f1.pos)
    {
        return w[2].clamp(0.0, 1.0);
    }
    if point_in_tri(xy, a0.pos, f1.pos, f0.pos)
        && let Some(w) = tri_weights(xy, a0.pos, f1.pos, f0.pos)
    {
        return (w[1] + w[2]).clamp(0.0, 1.0);
    }
    1.0
}

#[cfg(test)]
#[path = "../../tests/unit/raster/sample.rs"]
mod tests;
