use crate::foundation::{
    core::Point,
    error::{MaskError, MaskResult},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete mask: an ordered stack of layers composited bottom to top.
///
/// This is a pure snapshot of already-densified spline data. Building a
/// [`crate::MaskRasterSet`] from it is the only way to sample it.
pub struct Mask {
    /// Layers in compositing order.
    #[serde(default)]
    pub layers: Vec<MaskLayer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One independently composited group of splines.
pub struct MaskLayer {
    /// Layer name for authoring/debugging.
    #[serde(default)]
    pub name: String,
    /// Excluded from rendering; still occupies its slot as an empty layer.
    #[serde(default)]
    pub skip_render: bool,
    /// Layer opacity in `[0, 1]`. Zero disables the layer.
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    /// How the layer value combines with the layers below it.
    #[serde(default)]
    pub blend: BlendMode,
    /// Invert the layer value before blending.
    #[serde(default)]
    pub invert: bool,
    /// Curve applied to the feather ramp.
    #[serde(default)]
    pub falloff: Falloff,
    /// Treat filled splines nested inside other filled splines as holes.
    #[serde(default)]
    pub fill_holes: bool,
    /// Splines owned by this layer.
    #[serde(default)]
    pub splines: Vec<MaskSpline>,
}

impl Default for MaskLayer {
    fn default() -> Self {
        Self {
            name: String::new(),
            skip_render: false,
            alpha: default_alpha(),
            blend: BlendMode::default(),
            invert: false,
            falloff: Falloff::default(),
            fill_holes: false,
            splines: Vec::new(),
        }
    }
}

fn default_alpha() -> f32 {
    1.0
}

fn default_cyclic() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A densified spline outline in normalized `[0, 1]²` space.
pub struct MaskSpline {
    /// Fill outline points.
    pub points: Vec<Point>,
    /// Feather outline, paired index-by-index with `points`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feather: Option<Vec<Point>>,
    /// Whether the outline closes back onto its first point.
    #[serde(default = "default_cyclic")]
    pub cyclic: bool,
    /// Render only the feather ribbon, never the interior.
    #[serde(default)]
    pub no_fill: bool,
}

impl MaskSpline {
    /// A closed, filled spline without feather.
    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            feather: None,
            cyclic: true,
            no_fill: false,
        }
    }

    /// An open, unfilled stroke without feather.
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            feather: None,
            cyclic: false,
            no_fill: true,
        }
    }

    /// Attach a feather outline.
    pub fn with_feather(mut self, feather: Vec<Point>) -> Self {
        self.feather = Some(feather);
        self
    }

    /// Whether the interior is filled (closed and not flagged no-fill).
    pub fn is_filled(&self) -> bool {
        self.cyclic && !self.no_fill
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Per-layer blend mode.
pub enum BlendMode {
    /// `acc + v`.
    #[default]
    Add,
    /// `acc - v`.
    Subtract,
    /// `max(acc, v)`.
    Lighten,
    /// `min(acc, v)`.
    Darken,
    /// `acc * v`.
    Multiply,
    /// `acc * (1 - alpha) + v * alpha`.
    Replace,
    /// `|acc - v|`.
    Difference,
    /// `acc + v * (1 - acc)`.
    MergeAdd,
    /// `acc - v * acc`.
    MergeSubtract,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Curve remapping the linear feather ramp into the layer value.
pub enum Falloff {
    /// Identity.
    #[default]
    Linear,
    /// Smoothstep.
    Smooth,
    /// Quarter circle.
    Sphere,
    /// Square root.
    Root,
    /// Square.
    Sharp,
    /// `x * (2 - x)`.
    InverseSquare,
}

impl Mask {
    /// Parse a mask description from JSON and validate it.
    pub fn from_json(s: &str) -> MaskResult<Self> {
        let mask: Self = serde_json::from_str(s).map_err(|e| MaskError::serde(e.to_string()))?;
        mask.validate()?;
        Ok(mask)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> MaskResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MaskError::serde(e.to_string()))
    }

    /// Validate numeric invariants of every layer and spline.
    ///
    /// Geometric degeneracy (too few points, self intersection) is not checked
    /// here; the rasterizer skips such splines instead.
    pub fn validate(&self) -> MaskResult<()> {
        for (li, layer) in self.layers.iter().enumerate() {
            if !layer.alpha.is_finite() || !(0.0..=1.0).contains(&layer.alpha) {
                return Err(MaskError::validation(format!(
                    "layer {li} ('{}') alpha must be finite and in [0, 1]",
                    layer.name
                )));
            }
            for (si, spline) in layer.splines.iter().enumerate() {
                if !spline.points.iter().all(|p| p.is_finite()) {
                    return Err(MaskError::validation(format!(
                        "layer {li} spline {si} has non-finite points"
                    )));
                }
                if let Some(feather) = &spline.feather
                    && !feather.iter().all(|p| p.is_finite())
                {
                    return Err(MaskError::validation(format!(
                        "layer {li} spline {si} has non-finite feather points"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/mask.rs"]
mod tests;
