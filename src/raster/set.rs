//! Built, immutable mask ready for concurrent sampling.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::{
    foundation::core::{Bounds, Point},
    foundation::error::{MaskError, MaskResult},
    model::mask::{BlendMode, Falloff, Mask, MaskLayer, MaskSpline},
    model::options::{AspectAxis, RasterOptions},
    raster::bucket::BucketGrid,
    raster::composite::{composite, layer_value},
    raster::geometry::{
        Face, GeometryParams, LayerGeometry, MaskVertex, SplineInput, SplineIssue,
        build_layer_geometry_with,
    },
    raster::sample::sample_layer,
};

#[derive(Clone, Copy, Default)]
/// Caller hooks consulted while a [`MaskRasterSet`] is being built.
pub struct BuildHooks<'a> {
    /// Polled between splines; once set, construction returns [`MaskError::Cancelled`].
    pub cancel: Option<&'a AtomicBool>,
    /// Receives every spline that was skipped or degraded.
    ///
    /// May be called from several threads when layers are built in parallel.
    pub on_issue: Option<&'a (dyn Fn(&SplineReport) + Sync)>,
}

impl std::fmt::Debug for BuildHooks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildHooks")
            .field("cancel", &self.cancel)
            .field("on_issue", &self.on_issue.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A spline-level build diagnostic.
pub struct SplineReport {
    /// Layer index within the mask.
    pub layer: usize,
    /// Spline index within the layer.
    pub spline: usize,
    /// What happened.
    pub issue: SplineIssue,
}

#[derive(Clone, Debug, PartialEq)]
/// One built layer: mesh, bucket index and compositing attributes.
///
/// A layer without bounds is empty: it was skipped for rendering, produced
/// no faces, or lies entirely outside the unit square. It keeps its slot so
/// layer indices match the source mask.
pub struct MaskRasterLayer {
    geometry: LayerGeometry,
    bounds: Option<Bounds>,
    grid: Option<BucketGrid>,
    alpha: f32,
    blend: BlendMode,
    invert: bool,
    falloff: Falloff,
}

impl MaskRasterLayer {
    fn empty(src: &MaskLayer) -> Self {
        Self {
            geometry: LayerGeometry::default(),
            bounds: None,
            grid: None,
            alpha: src.alpha,
            blend: src.blend,
            invert: src.invert,
            falloff: src.falloff,
        }
    }

    fn from_geometry(geometry: LayerGeometry, pixel_size: f32, src: &MaskLayer) -> Self {
        let bounds = if geometry.faces.is_empty() {
            None
        } else {
            Bounds::from_points(geometry.vertices.iter().map(|v| v.pos))
                .and_then(|b| b.intersect(Bounds::UNIT))
        };
        let Some(bounds) = bounds else {
            return Self::empty(src);
        };
        let grid = BucketGrid::build(&geometry.vertices, &geometry.faces, bounds, pixel_size);
        Self {
            geometry,
            bounds: Some(bounds),
            grid: Some(grid),
            ..Self::empty(src)
        }
    }

    /// Layer bounds clipped to the unit square; `None` for empty layers.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Whether the layer holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Mesh vertices.
    pub fn vertices(&self) -> &[MaskVertex] {
        &self.geometry.vertices
    }

    /// Mesh faces.
    pub fn faces(&self) -> &[Face] {
        &self.geometry.faces
    }

    /// Bucket index; `None` for empty layers.
    pub fn grid(&self) -> Option<&BucketGrid> {
        self.grid.as_ref()
    }

    /// Layer opacity.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Blend mode.
    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    /// Invert flag.
    pub fn invert(&self) -> bool {
        self.invert
    }

    /// Falloff curve.
    pub fn falloff(&self) -> Falloff {
        self.falloff
    }

    /// Raw feather depth at `xy`; see [`sample_layer`].
    pub fn sample_depth(&self, xy: [f32; 2]) -> f32 {
        sample_layer(self, xy)
    }

    /// Value this layer feeds into blending at `xy`; see [`layer_value`].
    pub fn value_at(&self, xy: [f32; 2]) -> f32 {
        layer_value(self, xy)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Every layer of a mask, built once for one render configuration.
///
/// Immutable after construction and `Send + Sync`: any number of threads may
/// call [`MaskRasterSet::sample`] concurrently. Changing the mask means
/// building a new set.
pub struct MaskRasterSet {
    layers: Vec<MaskRasterLayer>,
    bounds: Option<Bounds>,
}

impl MaskRasterSet {
    /// Build all layers of `mask` for the target described by `opts`.
    #[tracing::instrument(skip(mask, opts), fields(layers = mask.layers.len()))]
    pub fn new(mask: &Mask, opts: &RasterOptions) -> MaskResult<Self> {
        Self::new_with_hooks(mask, opts, &BuildHooks::default())
    }

    /// [`MaskRasterSet::new`] with cancellation and diagnostics hooks.
    #[tracing::instrument(skip(mask, opts, hooks), fields(layers = mask.layers.len()))]
    pub fn new_with_hooks(
        mask: &Mask,
        opts: &RasterOptions,
        hooks: &BuildHooks<'_>,
    ) -> MaskResult<Self> {
        opts.validate()?;
        mask.validate()?;

        let ctx = LayerBuildCtx {
            pixel_size: opts.pixel_size(),
            aspect: opts.aspect(),
            feather: opts.feather,
            fake_aa: opts.fake_aa,
            hooks: *hooks,
        };

        let layers = if opts.parallel && mask.layers.len() > 1 {
            let pool = build_thread_pool(opts.threads)?;
            pool.install(|| {
                mask.layers
                    .par_iter()
                    .enumerate()
                    .map(|(li, layer)| ctx.build(li, layer))
                    .collect::<MaskResult<Vec<_>>>()
            })?
        } else {
            mask.layers
                .iter()
                .enumerate()
                .map(|(li, layer)| ctx.build(li, layer))
                .collect::<MaskResult<Vec<_>>>()?
        };

        let bounds = layers
            .iter()
            .filter_map(MaskRasterLayer::bounds)
            .reduce(Bounds::union);

        Ok(Self { layers, bounds })
    }

    /// Composited opacity of the mask at `xy`, in `[0, 1]`.
    ///
    /// Total over all of ℝ²; points away from every layer saturate to the
    /// layers' outside value (0 unless a layer is inverted).
    pub fn sample(&self, xy: [f32; 2]) -> f32 {
        composite(&self.layers, xy)
    }

    /// Built layers, in mask order (empty layers included).
    pub fn layers(&self) -> &[MaskRasterLayer] {
        &self.layers
    }

    /// Union of all non-empty layer bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the set has no layers at all.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Release all geometry and bucket memory.
    pub fn free(self) {
        drop(self);
    }
}

struct LayerBuildCtx<'a> {
    pixel_size: f32,
    aspect: Option<AspectAxis>,
    feather: bool,
    fake_aa: bool,
    hooks: BuildHooks<'a>,
}

impl LayerBuildCtx<'_> {
    fn build(&self, li: usize, layer: &MaskLayer) -> MaskResult<MaskRasterLayer> {
        if let Some(flag) = self.hooks.cancel
            && flag.load(Ordering::Relaxed)
        {
            return Err(MaskError::Cancelled);
        }
        if layer.skip_render {
            tracing::debug!(layer = li, "layer skipped for render");
            return Ok(MaskRasterLayer::empty(layer));
        }

        let splines: Vec<SplineInput> = layer
            .splines
            .iter()
            .map(|s| spline_input(s, self.aspect))
            .collect();
        let params = GeometryParams {
            pixel_size: self.pixel_size,
            feather: self.feather,
            fake_aa: self.fake_aa,
            fill_holes: layer.fill_holes,
        };

        let mut report = |spline: usize, issue: SplineIssue| {
            tracing::trace!(layer = li, spline, ?issue, "spline degraded");
            if let Some(sink) = self.hooks.on_issue {
                sink(&SplineReport {
                    layer: li,
                    spline,
                    issue,
                });
            }
        };
        let geometry =
            build_layer_geometry_with(&splines, &params, self.hooks.cancel, &mut report)?;
        let built = MaskRasterLayer::from_geometry(geometry, self.pixel_size, layer);

        match built.grid() {
            Some(grid) => tracing::debug!(
                layer = li,
                vertices = built.vertices().len(),
                faces = built.faces().len(),
                grid_w = grid.width(),
                grid_h = grid.height(),
                occupied = grid.occupied_cells(),
                face_refs = grid.face_refs(),
                "built mask layer"
            ),
            None => tracing::debug!(layer = li, "mask layer is empty"),
        }
        Ok(built)
    }
}

fn spline_input(spline: &MaskSpline, aspect: Option<AspectAxis>) -> SplineInput {
    let convert = |pts: &[Point]| -> Vec<[f32; 2]> {
        pts.iter()
            .map(|p| {
                let xy = [p.x as f32, p.y as f32];
                match aspect {
                    Some(axis) => axis.apply(xy),
                    None => xy,
                }
            })
            .collect()
    };
    SplineInput {
        fill: convert(&spline.points),
        feather: spline.feather.as_deref().map(convert),
        cyclic: spline.cyclic,
        no_fill: spline.no_fill,
    }
}

fn build_thread_pool(threads: Option<usize>) -> MaskResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MaskError::validation(
            "raster 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MaskError::build(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/set.rs"]
mod tests;
