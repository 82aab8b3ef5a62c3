pub use kurbo::Point;

/// Axis-aligned rectangle in normalized mask space.
///
/// Mask geometry lives in `[0, 1]²` (x right, y up); the rasterizer works in
/// `f32` end-to-end, so this is a plain f32 rectangle rather than a
/// `kurbo::Rect`.
/// All containment and intersection tests are inclusive of the edges.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Minimum x.
    pub x0: f32,
    /// Minimum y.
    pub y0: f32,
    /// Maximum x.
    pub x1: f32,
    /// Maximum y.
    pub y1: f32,
}

impl Bounds {
    /// The default sampling domain.
    pub const UNIT: Self = Self {
        x0: 0.0,
        y0: 0.0,
        x1: 1.0,
        y1: 1.0,
    };

    /// Build bounds from two corners, normalizing their order.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Smallest bounds enclosing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = [f32; 2]>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Self {
            x0: first[0],
            y0: first[1],
            x1: first[0],
            y1: first[1],
        };
        for p in it {
            b.x0 = b.x0.min(p[0]);
            b.y0 = b.y0.min(p[1]);
            b.x1 = b.x1.max(p[0]);
            b.y1 = b.y1.max(p[1]);
        }
        Some(b)
    }

    /// Extent along x.
    pub fn width(self) -> f32 {
        self.x1 - self.x0
    }

    /// Extent along y.
    pub fn height(self) -> f32 {
        self.y1 - self.y0
    }

    /// Inclusive point containment.
    pub fn contains(self, p: [f32; 2]) -> bool {
        p[0] >= self.x0 && p[0] <= self.x1 && p[1] >= self.y0 && p[1] <= self.y1
    }

    /// Overlapping region, or `None` when the rectangles are disjoint.
    ///
    /// Rectangles that only touch along an edge intersect in a zero-area region.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let out = Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (out.x1 >= out.x0 && out.y1 >= out.y0).then_some(out)
    }

    /// Smallest bounds enclosing both rectangles.
    pub fn union(self, other: Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
