//! Vector mask rasterization.
//!
//! A [`Mask`] is a stack of layers, each made of spline outlines with an
//! optional feather outline. Building a [`MaskRasterSet`] turns every layer
//! into a triangle/quad mesh plus a bucket grid; after that the set is
//! immutable and answers point queries from any number of threads:
//!
//! - Describe or load a [`Mask`] (e.g. via [`Mask::from_json`])
//! - Build a [`MaskRasterSet`] for a target size with [`RasterOptions`]
//! - Call [`MaskRasterSet::sample`] per pixel center in `[0, 1]²`
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod model;
mod raster;

pub use crate::foundation::core::{Bounds, Point};
pub use crate::foundation::error::{MaskError, MaskResult};

pub use crate::model::mask::{BlendMode, Falloff, Mask, MaskLayer, MaskSpline};
pub use crate::model::options::{AspectAxis, RasterOptions};

pub use crate::raster::bucket::{
    BUCKET_END, BUCKET_PIXELS_PER_CELL, BucketGrid, GRID_MAX, GRID_MIN, grid_dims,
};
pub use crate::raster::composite::{composite, layer_value};
pub use crate::raster::geometry::{
    CAP_PIXELS_PER_SEGMENT, CAP_SEGMENTS_MAX, CAP_SEGMENTS_MIN, FACE_TRI, Face, GeometryParams,
    LayerGeometry, MIN_SPLINE_POINTS, MaskVertex, SplineInput, SplineIssue, build_layer_geometry,
    cap_segments,
};
pub use crate::raster::offset::{outward_normals, synthesize_feather, widen_feather};
pub use crate::raster::sample::sample_layer;
pub use crate::raster::set::{BuildHooks, MaskRasterLayer, MaskRasterSet, SplineReport};
