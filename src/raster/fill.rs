//! Planar fill of closed outlines.
//!
//! Filling is delegated to earcut, which runs once at build time. Besides the
//! triangles, the result tags the outline edges so the geometry builder knows
//! where feather ribbons attach; internal diagonals never get one.

use earcutr::earcut;

use crate::foundation::math::{P2, orient, point_in_ring};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillError {
    /// Fewer than three points in the outer ring.
    TooFewPoints,
    /// earcut refused the input.
    EarcutFailed,
    /// earcut ran but every triangle was degenerate.
    NoTriangles,
}

/// Triangles and boundary edges of one filled region.
///
/// Indices address the concatenation of the input rings, outer ring first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillResult {
    pub triangles: Vec<[usize; 3]>,
    pub boundary: Vec<[usize; 2]>,
}

/// One outer ring and the rings punched out of it, as indices into the
/// caller's ring list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingGroup {
    pub outer: usize,
    pub holes: Vec<usize>,
}

/// Triangulate `outer` minus `holes`.
pub fn fill_rings(outer: &[P2], holes: &[&[P2]]) -> Result<FillResult, FillError> {
    if outer.len() < 3 {
        return Err(FillError::TooFewPoints);
    }

    let total = outer.len() + holes.iter().map(|h| h.len()).sum::<usize>();
    let mut coords = Vec::<f64>::with_capacity(total * 2);
    let mut hole_starts = Vec::<usize>::with_capacity(holes.len());
    let mut boundary = Vec::<[usize; 2]>::with_capacity(total);

    let mut base = 0usize;
    for (ri, ring) in std::iter::once(outer).chain(holes.iter().copied()).enumerate() {
        if ri > 0 {
            hole_starts.push(base);
        }
        for p in ring {
            coords.push(f64::from(p[0]));
            coords.push(f64::from(p[1]));
        }
        let n = ring.len();
        for i in 0..n {
            boundary.push([base + i, base + (i + 1) % n]);
        }
        base += n;
    }

    let idx = earcut(&coords, &hole_starts, 2).map_err(|_| FillError::EarcutFailed)?;

    let point = |i: usize| -> P2 { [coords[i * 2] as f32, coords[i * 2 + 1] as f32] };
    let triangles: Vec<[usize; 3]> = idx
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .filter(|t| orient(point(t[0]), point(t[1]), point(t[2])) != 0.0)
        .collect();

    if triangles.is_empty() {
        return Err(FillError::NoTriangles);
    }
    Ok(FillResult {
        triangles,
        boundary,
    })
}

/// Group closed rings by even-odd nesting.
///
/// A ring nested at odd depth is a hole of its innermost enclosing ring;
/// rings at even depth (including islands inside holes) start new groups.
pub fn group_rings(rings: &[&[P2]]) -> Vec<RingGroup> {
    let n = rings.len();
    let contains = |outer: usize, inner: usize| -> bool {
        outer != inner
            && !rings[inner].is_empty()
            && rings[outer].len() >= 3
            && point_in_ring(rings[inner][0], rings[outer])
    };

    let depth: Vec<usize> = (0..n)
        .map(|i| (0..n).filter(|&j| contains(j, i)).count())
        .collect();

    let mut groups: Vec<RingGroup> = Vec::new();
    let mut group_of = vec![usize::MAX; n];
    for i in 0..n {
        if depth[i] % 2 == 0 {
            group_of[i] = groups.len();
            groups.push(RingGroup {
                outer: i,
                holes: Vec::new(),
            });
        }
    }
    for i in 0..n {
        if depth[i] % 2 == 1 {
            let parent = (0..n).find(|&j| depth[j] + 1 == depth[i] && contains(j, i));
            match parent {
                Some(p) => groups[group_of[p]].holes.push(i),
                None => {
                    // containment chain broken by touching outlines; fill it on its own
                    groups.push(RingGroup {
                        outer: i,
                        holes: Vec::new(),
                    });
                }
            }
        }
    }
    groups
}

#[cfg(test)]
#[path = "../../tests/unit/raster/fill.rs"]
mod tests;
