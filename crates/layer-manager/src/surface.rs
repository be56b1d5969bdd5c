//! Abstraction over the host map surface.

use factor_render::ClassificationExpr;

/// Source parameters the host turns into a COG/GeoTIFF tile source.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSourceSpec {
    pub url: String,

    /// Whether the host may interpolate between samples when resampling.
    pub interpolate: bool,

    /// Whether band values are normalized to 0..1. Classification
    /// expressions compare against data-space thresholds, so factor
    /// sources always set this false.
    pub normalize: bool,
}

impl RasterSourceSpec {
    /// A COG source carrying raw (non-normalized) band values.
    pub fn cog(url: impl Into<String>, interpolate: bool) -> Self {
        Self {
            url: url.into(),
            interpolate,
            normalize: false,
        }
    }
}

/// Creation parameters for a new GPU-shaded tile layer.
///
/// Opacity and z-index are deliberately absent here: the manager applies
/// them through the layer setters after creation, the same way it reapplies
/// them on every subsequent upsert.
#[derive(Debug, Clone)]
pub struct LayerSpec {
    pub source: RasterSourceSpec,
    pub style: ClassificationExpr,
}

/// Mutation surface of a single tile layer on the host map.
///
/// Tags are free-form key/value pairs attached to the layer object, used to
/// mark pipeline ownership for external tooling.
pub trait TileLayer {
    fn get_tag(&self, name: &str) -> Option<String>;
    fn set_tag(&mut self, name: &str, value: String);

    /// Replace the layer's backing raster source.
    fn set_source(&mut self, source: RasterSourceSpec);

    /// Replace the layer's color classification style.
    fn set_style(&mut self, style: ClassificationExpr);

    fn set_opacity(&mut self, opacity: f32);
    fn set_z_index(&mut self, z_index: i32);
}

/// The host map's layer collection.
///
/// Layer handles are expected to be cheap reference-counted proxies (GPU
/// tile layers are shared objects on the host side), so `Clone` hands out
/// another handle to the same layer, not a copy of it.
pub trait MapSurface {
    type Layer: TileLayer + Clone;

    /// Construct a GPU-shaded tile layer from the spec and add it to the
    /// surface's layer collection.
    fn add_layer(&mut self, spec: LayerSpec) -> Self::Layer;

    /// Remove a layer; returns false if the surface does not hold it.
    fn remove_layer(&mut self, layer: &Self::Layer) -> bool;

    /// Number of layers currently on the surface.
    fn layer_count(&self) -> usize;
}
