//! Layer geometry: spline outlines to a flat triangle/quad mesh.
//!
//! Every vertex carries a depth hint: `0.0` on the opaque outline, `1.0` on
//! the outer feather edge. Faces come in two kinds sharing one storage type:
//!
//! - triangles (fourth index is [`FACE_TRI`]) cover filled interiors and are
//!   fully opaque,
//! - quads `[a0, a1, f1, f0]` connect two outline vertices to their feather
//!   partners; corner depths are always `0, 0, 1, 1` in that order.
//!
//! Round caps on open strokes reuse the quad layout with `a0 == a1`.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    foundation::error::{MaskError, MaskResult},
    foundation::math::{P2, dist_sq, dot, orient, rotate_around, scale, sub},
    raster::fill::{FillError, RingGroup, fill_rings, group_rings},
    raster::offset::{synthesize_feather, widen_feather},
};

/// Fourth face index marking a triangle.
pub const FACE_TRI: u32 = u32::MAX;

/// Splines with fewer points than this contribute no geometry.
pub const MIN_SPLINE_POINTS: usize = 4;

/// Pixels of cap radius covered by one angular cap segment.
pub const CAP_PIXELS_PER_SEGMENT: f32 = 2.0;
/// Lower bound on angular segments per 180 degree cap.
pub const CAP_SEGMENTS_MIN: u32 = 4;
/// Upper bound on angular segments per 180 degree cap.
pub const CAP_SEGMENTS_MAX: u32 = 64;

const DEPTH_SOLID: f32 = 0.0;
const DEPTH_FEATHER: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
/// A mesh vertex: position plus feather depth hint.
pub struct MaskVertex {
    /// Position in normalized mask space.
    pub pos: [f32; 2],
    /// `0.0` on the opaque outline, `1.0` on the outer feather edge.
    pub depth: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Three or four vertex indices; see the module docs for the corner layout.
pub struct Face(pub [u32; 4]);

impl Face {
    /// An opaque triangle.
    pub fn tri(a: u32, b: u32, c: u32) -> Self {
        Self([a, b, c, FACE_TRI])
    }

    /// A feather quad `[a0, a1, f1, f0]`.
    pub fn quad(a0: u32, a1: u32, f1: u32, f0: u32) -> Self {
        Self([a0, a1, f1, f0])
    }

    /// Whether this face is an opaque triangle.
    pub fn is_tri(self) -> bool {
        self.0[3] == FACE_TRI
    }

    /// The used vertex indices (three or four).
    pub fn indices(&self) -> &[u32] {
        if self.is_tri() { &self.0[..3] } else { &self.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One densified spline, prepared for geometry building.
pub struct SplineInput {
    /// Outline points.
    pub fill: Vec<[f32; 2]>,
    /// Feather outline paired with `fill`, if any.
    pub feather: Option<Vec<[f32; 2]>>,
    /// Whether the outline is closed.
    pub cyclic: bool,
    /// Skip the interior even when closed.
    pub no_fill: bool,
}

impl SplineInput {
    fn is_filled(&self) -> bool {
        self.cyclic && !self.no_fill
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Knobs for [`build_layer_geometry`].
pub struct GeometryParams {
    /// Size of one target pixel in mask space.
    pub pixel_size: f32,
    /// Use spline feather outlines.
    pub feather: bool,
    /// Enforce a minimum one pixel feather.
    pub fake_aa: bool,
    /// Nested filled splines punch holes.
    pub fill_holes: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why a spline was skipped or degraded during building.
pub enum SplineIssue {
    /// Fewer than [`MIN_SPLINE_POINTS`] outline points.
    TooFewPoints {
        /// Points supplied.
        points: usize,
    },
    /// The feather outline does not pair with the fill outline; it was ignored.
    FeatherLengthMismatch {
        /// Outline points.
        points: usize,
        /// Feather points.
        feather: usize,
    },
    /// The planar fill rejected the outline (self-intersecting or zero-area).
    FillRejected,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Flat mesh of one layer.
pub struct LayerGeometry {
    /// All vertices.
    pub vertices: Vec<MaskVertex>,
    /// Faces indexing into `vertices`.
    pub faces: Vec<Face>,
}

impl LayerGeometry {
    fn push_vertex(&mut self, pos: P2, depth: f32) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(MaskVertex { pos, depth });
        idx
    }

    fn pos(&self, idx: u32) -> P2 {
        self.vertices[idx as usize].pos
    }

    /// Push an opaque triangle, normalized to counter-clockwise winding.
    fn push_tri(&mut self, a: u32, b: u32, c: u32) {
        if orient(self.pos(a), self.pos(b), self.pos(c)) < 0.0 {
            self.faces.push(Face::tri(a, c, b));
        } else {
            self.faces.push(Face::tri(a, b, c));
        }
    }
}

struct Prepared<'a> {
    index: usize,
    fill: &'a [P2],
    feather: Option<Vec<P2>>,
    cyclic: bool,
}

/// Build the mesh for one layer from its splines.
///
/// Splines that cannot contribute (too few points, rejected by the fill) are
/// skipped; the result may be empty.
pub fn build_layer_geometry(splines: &[SplineInput], params: &GeometryParams) -> LayerGeometry {
    match build_geometry::<Infallible>(splines, params, &mut || Ok(()), &mut |_, _| {}) {
        Ok(geom) => geom,
        Err(never) => match never {},
    }
}

/// [`build_layer_geometry`] with a cancellation flag (polled between splines)
/// and a sink receiving `(spline index, issue)` for skipped or degraded splines.
pub(crate) fn build_layer_geometry_with(
    splines: &[SplineInput],
    params: &GeometryParams,
    cancel: Option<&AtomicBool>,
    report: &mut dyn FnMut(usize, SplineIssue),
) -> MaskResult<LayerGeometry> {
    let mut check_cancel = || -> MaskResult<()> {
        match cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(MaskError::Cancelled),
            _ => Ok(()),
        }
    };
    build_geometry(splines, params, &mut check_cancel, report)
}

fn build_geometry<E>(
    splines: &[SplineInput],
    params: &GeometryParams,
    check_cancel: &mut dyn FnMut() -> Result<(), E>,
    report: &mut dyn FnMut(usize, SplineIssue),
) -> Result<LayerGeometry, E> {
    let mut filled = Vec::<Prepared<'_>>::new();
    let mut open = Vec::<Prepared<'_>>::new();
    for (index, spline) in splines.iter().enumerate() {
        check_cancel()?;
        let Some(prepared) = prepare_spline(index, spline, params, report) else {
            continue;
        };
        if spline.is_filled() {
            filled.push(prepared);
        } else {
            open.push(prepared);
        }
    }

    let groups: Vec<RingGroup> = if params.fill_holes {
        let rings: Vec<&[P2]> = filled.iter().map(|p| p.fill).collect();
        group_rings(&rings)
    } else {
        (0..filled.len())
            .map(|outer| RingGroup {
                outer,
                holes: Vec::new(),
            })
            .collect()
    };

    if params.fake_aa {
        // hole rings ramp into the hole, everything else away from its fill
        let mut hole = vec![false; filled.len()];
        for &h in groups.iter().flat_map(|g| &g.holes) {
            hole[h] = true;
        }
        for (spline, is_hole) in filled.iter_mut().zip(hole) {
            apply_fake_aa(spline, params.pixel_size, is_hole);
        }
        for spline in &mut open {
            apply_fake_aa(spline, params.pixel_size, false);
        }
    }

    let mut geom = LayerGeometry::default();
    for group in &groups {
        check_cancel()?;
        let members: Vec<&Prepared<'_>> = std::iter::once(group.outer)
            .chain(group.holes.iter().copied())
            .map(|i| &filled[i])
            .collect();
        if let Err(err) = push_filled_group(&mut geom, &members) {
            tracing::trace!(?err, outer = members[0].index, "fill rejected");
            for m in &members {
                report(m.index, SplineIssue::FillRejected);
            }
        }
    }

    for spline in open.iter().filter(|s| s.feather.is_some()) {
        check_cancel()?;
        push_open_stroke(&mut geom, spline, params.pixel_size);
    }

    Ok(geom)
}

fn prepare_spline<'a>(
    index: usize,
    spline: &'a SplineInput,
    params: &GeometryParams,
    report: &mut dyn FnMut(usize, SplineIssue),
) -> Option<Prepared<'a>> {
    let points = spline.fill.len();
    if points < MIN_SPLINE_POINTS {
        report(index, SplineIssue::TooFewPoints { points });
        return None;
    }

    let feather = match (&spline.feather, params.feather) {
        (Some(f), true) if f.len() == points => Some(f.clone()),
        (Some(f), true) => {
            report(
                index,
                SplineIssue::FeatherLengthMismatch {
                    points,
                    feather: f.len(),
                },
            );
            None
        }
        _ => None,
    };

    Some(Prepared {
        index,
        fill: &spline.fill,
        feather,
        cyclic: spline.cyclic,
    })
}

/// Give every edge at least a one pixel ramp. `inward` flips the side for
/// hole rings, whose outside is the filled material.
fn apply_fake_aa(spline: &mut Prepared<'_>, pixel_size: f32, inward: bool) {
    let width = if inward { -pixel_size } else { pixel_size };
    match spline.feather.as_mut() {
        Some(f) => {
            widen_feather(spline.fill, f, spline.cyclic, width);
        }
        None => {
            spline.feather = Some(synthesize_feather(spline.fill, spline.cyclic, width));
        }
    }
}

/// Fill one outer ring (plus holes) and attach feather quads to its outline.
fn push_filled_group(geom: &mut LayerGeometry, members: &[&Prepared<'_>]) -> Result<(), FillError> {
    let outer = members[0].fill;
    let holes: Vec<&[P2]> = members[1..].iter().map(|m| m.fill).collect();
    let fill = fill_rings(outer, &holes)?;

    // Ring `r` occupies fill indices `ring_start[r]..ring_start[r] + len`.
    let mut ring_start = Vec::with_capacity(members.len());
    let base = geom.vertices.len() as u32;
    for m in members {
        ring_start.push(geom.vertices.len() as u32 - base);
        for &p in m.fill {
            geom.push_vertex(p, DEPTH_SOLID);
        }
    }
    let feather_start: Vec<Option<u32>> = members
        .iter()
        .map(|m| {
            m.feather.as_ref().map(|f| {
                let start = geom.vertices.len() as u32;
                for &p in f {
                    geom.push_vertex(p, DEPTH_FEATHER);
                }
                start
            })
        })
        .collect();

    for t in &fill.triangles {
        geom.push_tri(base + t[0] as u32, base + t[1] as u32, base + t[2] as u32);
    }

    for edge in &fill.boundary {
        let (a, b) = (edge[0] as u32, edge[1] as u32);
        let ring = ring_start.partition_point(|&s| s <= a) - 1;
        let Some(fstart) = feather_start[ring] else {
            continue;
        };
        let local = |i: u32| i - ring_start[ring];
        geom.faces.push(Face::quad(
            base + a,
            base + b,
            fstart + local(b),
            fstart + local(a),
        ));
    }
    Ok(())
}

/// Feather-only stroke: a ribbon on both sides of the outline plus round caps.
///
/// Each outline point contributes a vertex triple `center, side a, side b`,
/// where side b mirrors side a through the center.
fn push_open_stroke(geom: &mut LayerGeometry, spline: &Prepared<'_>, pixel_size: f32) {
    let Some(feather) = spline.feather.as_deref() else {
        return;
    };
    let n = spline.fill.len() as u32;
    let offset = geom.vertices.len() as u32;
    for (&c, &fa) in spline.fill.iter().zip(feather) {
        geom.push_vertex(c, DEPTH_SOLID);
        geom.push_vertex(fa, DEPTH_FEATHER);
        geom.push_vertex(sub(scale(c, 2.0), fa), DEPTH_FEATHER);
    }

    let span = |geom: &mut LayerGeometry, j: u32, k: u32| {
        geom.faces.push(Face::quad(k, j, j + 1, k + 1));
        geom.faces.push(Face::quad(j, k, k + 2, j + 2));
    };
    for i in 0..n - 1 {
        let j = offset + i * 3;
        span(geom, j, j + 3);
    }

    if spline.cyclic {
        span(geom, offset + (n - 1) * 3, offset);
        return;
    }

    push_cap(geom, offset, offset + 3, pixel_size);
    push_cap(geom, offset + (n - 1) * 3, offset + (n - 2) * 3, pixel_size);
}

/// Half-disc fan closing the stroke at the vertex triple `end`.
///
/// `inner` is the neighbouring triple; the arc sweeps away from it.
fn push_cap(geom: &mut LayerGeometry, end: u32, inner: u32, pixel_size: f32) {
    let center = geom.pos(end);
    let side_a = geom.pos(end + 1);
    let toward_stroke = sub(geom.pos(inner), center);

    let radius = dist_sq(side_a, center).sqrt();
    let segments = cap_segments(radius, pixel_size);

    let probe = rotate_around(side_a, center, std::f32::consts::FRAC_PI_2);
    let sign = if dot(sub(probe, center), toward_stroke) > 0.0 {
        -1.0
    } else {
        1.0
    };

    let mut prev = end + 1;
    for k in 1..segments {
        let angle = sign * std::f32::consts::PI * k as f32 / segments as f32;
        let q = geom.push_vertex(rotate_around(side_a, center, angle), DEPTH_FEATHER);
        geom.faces.push(Face::quad(end, end, prev, q));
        prev = q;
    }
    geom.faces.push(Face::quad(end, end, prev, end + 2));
}

/// Angular segment count of a cap with the given radius.
pub fn cap_segments(radius: f32, pixel_size: f32) -> u32 {
    let ideal = radius / (pixel_size * CAP_PIXELS_PER_SEGMENT);
    // float-to-int casts saturate; NaN maps to 0
    (ideal as u32).clamp(CAP_SEGMENTS_MIN, CAP_SEGMENTS_MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/geometry.rs"]
mod tests;
