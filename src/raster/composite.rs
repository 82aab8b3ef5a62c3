//! Falloff curves and layer blending.

use crate::{
    model::mask::{BlendMode, Falloff},
    raster::sample::sample_layer,
    raster::set::MaskRasterLayer,
};

impl Falloff {
    /// Remap a linear ramp value in `[0, 1]`. Every curve fixes 0 and 1.
    pub fn apply(self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Self::Linear => x,
            Self::Smooth => x * x * (3.0 - 2.0 * x),
            Self::Sphere => (2.0 * x - x * x).max(0.0).sqrt(),
            Self::Root => x.sqrt(),
            Self::Sharp => x * x,
            Self::InverseSquare => x * (2.0 - x),
        }
    }
}

impl BlendMode {
    /// Combine a layer value into the running accumulator (unclamped).
    ///
    /// `alpha` is only consulted by [`BlendMode::Replace`]; every other mode
    /// expects it to be folded into `value` already.
    pub fn apply(self, acc: f32, value: f32, alpha: f32) -> f32 {
        match self {
            Self::Add => acc + value,
            Self::Subtract => acc - value,
            Self::Lighten => acc.max(value),
            Self::Darken => acc.min(value),
            Self::Multiply => acc * value,
            Self::Replace => acc * (1.0 - alpha) + value * alpha,
            Self::Difference => (acc - value).abs(),
            Self::MergeAdd => acc + value * (1.0 - acc),
            Self::MergeSubtract => acc - value * acc,
        }
    }
}

/// Value one layer contributes at `xy`: falloff, alpha and invert applied.
///
/// Disabled layers (alpha 0), empty layers and points outside the layer
/// bounds contribute 0 before inversion.
pub fn layer_value(layer: &MaskRasterLayer, xy: [f32; 2]) -> f32 {
    let applies = layer.alpha() != 0.0 && layer.bounds().is_some_and(|b| b.contains(xy));
    let mut value = if applies {
        let ramp = layer.falloff().apply(1.0 - sample_layer(layer, xy));
        if layer.blend() == BlendMode::Replace {
            ramp
        } else {
            ramp * layer.alpha()
        }
    } else {
        0.0
    };
    if layer.invert() {
        value = 1.0 - value;
    }
    value
}

/// Opacity of the whole layer stack at `xy`, in `[0, 1]`.
///
/// The accumulator starts at 0 and is clamped after every layer, so a
/// subtract following an over-bright add starts from 1, not from the excess.
pub fn composite(layers: &[MaskRasterLayer], xy: [f32; 2]) -> f32 {
    layers.iter().fold(0.0f32, |acc, layer| {
        layer
            .blend()
            .apply(acc, layer_value(layer, xy), layer.alpha())
            .clamp(0.0, 1.0)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
