use crate::foundation::error::{MaskError, MaskResult};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Render configuration a [`crate::MaskRasterSet`] is built for.
///
/// Target dimensions only feed the pixel size used for feather minimums,
/// bucket resolution and aspect correction; nothing is rasterized here.
pub struct RasterOptions {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Rescale the shorter axis so masks keep their shape on non-square targets.
    #[serde(default = "default_true")]
    pub aspect_correct: bool,
    /// Guarantee at least a one pixel feather on every edge.
    #[serde(default)]
    pub fake_aa: bool,
    /// Use spline feather outlines when present.
    #[serde(default = "default_true")]
    pub feather: bool,
    /// Build layers on a dedicated rayon pool.
    #[serde(default)]
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl RasterOptions {
    /// Default options for a `width` x `height` target.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            aspect_correct: true,
            fake_aa: false,
            feather: true,
            parallel: false,
            threads: None,
        }
    }

    /// Validate option invariants.
    pub fn validate(&self) -> MaskResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MaskError::validation("raster width/height must be > 0"));
        }
        if self.threads == Some(0) {
            return Err(MaskError::validation(
                "raster 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Size of one pixel in normalized mask space, `1 / min(width, height)`.
    pub fn pixel_size(&self) -> f32 {
        1.0 / self.width.min(self.height).max(1) as f32
    }

    /// Per-axis scale for aspect correction, or `None` when not applicable.
    ///
    /// The shorter axis gets `short / long`; coordinates on it are remapped
    /// `c' = (c - 0.5) / aspect + 0.5`.
    pub fn aspect(&self) -> Option<AspectAxis> {
        if !self.aspect_correct || self.width == self.height || self.width == 0 || self.height == 0
        {
            return None;
        }
        if self.width < self.height {
            Some(AspectAxis::X(self.width as f32 / self.height as f32))
        } else {
            Some(AspectAxis::Y(self.height as f32 / self.width as f32))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// The axis (and ratio) remapped by aspect correction.
pub enum AspectAxis {
    /// Remap x by `short / long`.
    X(f32),
    /// Remap y by `short / long`.
    Y(f32),
}

impl AspectAxis {
    /// Apply the correction to a single point.
    pub fn apply(self, p: [f32; 2]) -> [f32; 2] {
        match self {
            Self::X(asp) => [(p[0] - 0.5) / asp + 0.5, p[1]],
            Self::Y(asp) => [p[0], (p[1] - 0.5) / asp + 0.5],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/options.rs"]
mod tests;
