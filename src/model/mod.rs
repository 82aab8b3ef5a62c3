//! Input side of the rasterizer: the mask description and render options.

pub(crate) mod mask;
pub(crate) mod options;
