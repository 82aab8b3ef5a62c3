//! Uniform bucket grid over a layer's mesh.
//!
//! Each cell lists the faces that may cover any point inside it, so a point
//! query only tests a handful of faces. Membership is conservative: a face
//! may be listed in a cell it does not touch, never the other way around.

use smallvec::SmallVec;

use crate::{
    foundation::core::Bounds,
    foundation::math::{P2, dist_sq_to_segment, point_in_tri},
    raster::geometry::{Face, MaskVertex},
};

/// Target pixels per cell edge.
pub const BUCKET_PIXELS_PER_CELL: f32 = 8.0;
/// Minimum cells per axis.
pub const GRID_MIN: u32 = 8;
/// Maximum cells per axis.
pub const GRID_MAX: u32 = 512;
/// Terminates every non-empty cell list.
pub const BUCKET_END: u32 = u32::MAX;

/// Cell counts for a layer of the given extent.
///
/// Roughly one cell per `8 x 8` pixel block, always within
/// `[GRID_MIN, GRID_MAX]` per axis whatever the inputs (including zero,
/// infinite or NaN sizes).
pub fn grid_dims(width: f32, height: f32, pixel_size: f32) -> (u32, u32) {
    let axis = |extent: f32| -> u32 {
        let ideal = (extent / pixel_size) / BUCKET_PIXELS_PER_CELL;
        // float-to-int casts saturate; NaN maps to 0
        (ideal as u32).clamp(GRID_MIN, GRID_MAX)
    };
    (axis(width), axis(height))
}

#[derive(Clone, Debug, PartialEq)]
/// Face lists per cell over a fixed rectangle.
pub struct BucketGrid {
    width: u32,
    height: u32,
    origin: P2,
    /// Maps offsets from `origin` to fractional cell coordinates.
    scalar: P2,
    cells: Vec<Option<Box<[u32]>>>,
}

impl BucketGrid {
    /// Bucket `faces` over `bounds`.
    pub fn build(vertices: &[MaskVertex], faces: &[Face], bounds: Bounds, pixel_size: f32) -> Self {
        let (width, height) = grid_dims(bounds.width(), bounds.height(), pixel_size);
        let dim = [bounds.width(), bounds.height()];
        let scalar = [
            width as f32 / (dim[0] + f32::EPSILON),
            height as f32 / (dim[1] + f32::EPSILON),
        ];
        let cell_size = [
            (dim[0] + f32::EPSILON) / width as f32,
            (dim[1] + f32::EPSILON) / height as f32,
        ];
        let max_rad = cell_size[0].max(cell_size[1]) * std::f32::consts::SQRT_2 + f32::EPSILON;
        let max_rad_sq = max_rad * max_rad;

        let mut grid = Self {
            width,
            height,
            origin: [bounds.x0, bounds.y0],
            scalar,
            cells: Vec::new(),
        };

        let mut store: Vec<SmallVec<[u32; 8]>> =
            vec![SmallVec::new(); (width as usize) * (height as usize)];

        let pos = |i: u32| -> P2 {
            vertices
                .get(i as usize)
                .map(|v| v.pos)
                .unwrap_or([f32::NAN, f32::NAN])
        };

        for (face_index, face) in faces.iter().enumerate() {
            let corners: SmallVec<[P2; 4]> = face.indices().iter().map(|&i| pos(i)).collect();
            let Some(fb) = Bounds::from_points(corners.iter().copied()) else {
                continue;
            };
            let Some(fb) = fb.intersect(Bounds::UNIT) else {
                continue;
            };

            let (xi_min, yi_min) = grid.cell_coords([fb.x0, fb.y0]);
            let (xi_max, yi_max) = grid.cell_coords([fb.x1, fb.y1]);
            for yi in yi_min..=yi_max {
                for xi in xi_min..=xi_max {
                    let cell_min = [
                        bounds.x0 + cell_size[0] * xi as f32,
                        bounds.y0 + cell_size[1] * yi as f32,
                    ];
                    let center = [
                        cell_min[0] + cell_size[0] * 0.5,
                        cell_min[1] + cell_size[1] * 0.5,
                    ];
                    if face_near_point(&corners, center, max_rad_sq) {
                        store[(yi * width + xi) as usize].push(face_index as u32);
                    }
                }
            }
        }

        grid.cells = store
            .into_iter()
            .map(|list| {
                (!list.is_empty()).then(|| {
                    list.into_iter()
                        .chain(std::iter::once(BUCKET_END))
                        .collect::<Box<[u32]>>()
                })
            })
            .collect();
        grid
    }

    /// Cells along x.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Cells along y.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Face list of cell `(x, y)`, terminated by [`BUCKET_END`].
    ///
    /// `None` for empty cells and for coordinates outside the grid.
    pub fn cell(&self, x: u32, y: u32) -> Option<&[u32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get((y * self.width + x) as usize)
            .and_then(|c| c.as_deref())
    }

    /// Face list of the cell owning `xy`, clamped into the grid.
    pub fn faces_at(&self, xy: [f32; 2]) -> Option<&[u32]> {
        let (x, y) = self.cell_coords(xy);
        self.cell(x, y)
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Total face references over all cells (terminators excluded).
    pub fn face_refs(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .map(|c| c.len().saturating_sub(1))
            .sum()
    }

    /// Cell coordinates of `xy`, clamped into the grid.
    fn cell_coords(&self, xy: P2) -> (u32, u32) {
        let fx = (xy[0] - self.origin[0]) * self.scalar[0];
        let fy = (xy[1] - self.origin[1]) * self.scalar[1];
        (
            (fx as u32).min(self.width - 1),
            (fy as u32).min(self.height - 1),
        )
    }
}

/// Cell-center-inside-face, or cell center within `rad_sq` of any face edge.
fn face_near_point(corners: &[P2], center: P2, rad_sq: f32) -> bool {
    let inside = match corners {
        &[a, b, c] => point_in_tri(center, a, b, c),
        &[a, b, c, d] => point_in_tri(center, a, b, c) || point_in_tri(center, a, c, d),
        _ => false,
    };
    if inside {
        return true;
    }
    let n = corners.len();
    (0..n).any(|i| dist_sq_to_segment(center, corners[i], corners[(i + 1) % n]) < rad_sq)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bucket.rs"]
mod tests;
