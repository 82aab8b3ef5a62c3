//! Small f32 2D helpers shared by the builder and the sampler.

pub(crate) type P2 = [f32; 2];

pub(crate) fn sub(a: P2, b: P2) -> P2 {
    [a[0] - b[0], a[1] - b[1]]
}

pub(crate) fn add(a: P2, b: P2) -> P2 {
    [a[0] + b[0], a[1] + b[1]]
}

pub(crate) fn scale(a: P2, s: f32) -> P2 {
    [a[0] * s, a[1] * s]
}

pub(crate) fn dot(a: P2, b: P2) -> f32 {
    a[0] * b[0] + a[1] * b[1]
}

pub(crate) fn len_sq(a: P2) -> f32 {
    dot(a, a)
}

pub(crate) fn dist_sq(a: P2, b: P2) -> f32 {
    len_sq(sub(a, b))
}

/// Unit vector along `a`, or zero for a zero-length input.
pub(crate) fn normalize(a: P2) -> P2 {
    let len = len_sq(a).sqrt();
    if len > 0.0 { scale(a, 1.0 / len) } else { [0.0, 0.0] }
}

/// Rotate `a` by 90 degrees counter-clockwise.
pub(crate) fn perp(a: P2) -> P2 {
    [-a[1], a[0]]
}

/// Rotate `p` around `center` by `angle` radians.
pub(crate) fn rotate_around(p: P2, center: P2, angle: f32) -> P2 {
    let (s, c) = angle.sin_cos();
    let d = sub(p, center);
    [
        center[0] + d[0] * c - d[1] * s,
        center[1] + d[0] * s + d[1] * c,
    ]
}

/// Twice the signed area of `(a, b, p)`; positive when counter-clockwise.
///
/// Evaluated in f64: differences and products of f32 inputs are exact there,
/// so the sign is antisymmetric in `a`/`b` and shared edges never crack.
pub(crate) fn orient(a: P2, b: P2, p: P2) -> f64 {
    let (ax, ay) = (f64::from(a[0]), f64::from(a[1]));
    let (bx, by) = (f64::from(b[0]), f64::from(b[1]));
    let (px, py) = (f64::from(p[0]), f64::from(p[1]));
    (bx - ax) * (py - ay) - (by - ay) * (px - ax)
}

/// Inclusive point-in-triangle for counter-clockwise triangles only.
pub(crate) fn point_in_tri_ccw(p: P2, a: P2, b: P2, c: P2) -> bool {
    orient(a, b, p) >= 0.0 && orient(b, c, p) >= 0.0 && orient(c, a, p) >= 0.0
}

/// Inclusive point-in-triangle for either winding.
pub(crate) fn point_in_tri(p: P2, a: P2, b: P2, c: P2) -> bool {
    let d0 = orient(a, b, p);
    let d1 = orient(b, c, p);
    let d2 = orient(c, a, p);
    (d0 >= 0.0 && d1 >= 0.0 && d2 >= 0.0) || (d0 <= 0.0 && d1 <= 0.0 && d2 <= 0.0)
}

/// Barycentric weights of `p` in `(a, b, c)`; `None` for zero-area triangles.
pub(crate) fn tri_weights(p: P2, a: P2, b: P2, c: P2) -> Option<[f32; 3]> {
    let area = orient(a, b, c);
    if area == 0.0 || !area.is_finite() {
        return None;
    }
    let wa = orient(b, c, p) / area;
    let wb = orient(c, a, p) / area;
    let wc = 1.0 - wa - wb;
    Some([wa as f32, wb as f32, wc as f32])
}

pub(crate) fn dist_sq_to_segment(p: P2, a: P2, b: P2) -> f32 {
    let ab = sub(b, a);
    let denom = len_sq(ab);
    if denom <= 0.0 {
        return dist_sq(p, a);
    }
    let t = (dot(sub(p, a), ab) / denom).clamp(0.0, 1.0);
    dist_sq(p, add(a, scale(ab, t)))
}

/// Twice the signed area of a closed ring; positive when counter-clockwise.
pub(crate) fn ring_area2(ring: &[P2]) -> f32 {
    let n = ring.len();
    let mut acc = 0.0f64;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        acc += f64::from(a[0]) * f64::from(b[1]) - f64::from(b[0]) * f64::from(a[1]);
    }
    acc as f32
}

/// Even-odd point-in-polygon.
pub(crate) fn point_in_ring(p: P2, ring: &[P2]) -> bool {
    let n = ring.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a[1] > p[1]) != (b[1] > p[1]) {
            let x = a[0] + (p[1] - a[1]) / (b[1] - a[1]) * (b[0] - a[0]);
            if p[0] < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
