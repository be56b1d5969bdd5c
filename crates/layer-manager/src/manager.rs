//! Upsert lifecycle for factor overlay layers.

use crate::surface::{LayerSpec, MapSurface, RasterSourceSpec, TileLayer};
use factor_common::{LegendDef, RenderOptions};
use factor_render::compile;
use std::collections::HashMap;
use tracing::debug;

/// Tag carrying the logical factor key of a managed layer.
pub const FACTOR_LAYER_KEY_TAG: &str = "factorLayerKey";

/// Tag naming the owner of a managed layer.
pub const MANAGED_BY_TAG: &str = "managedBy";

/// Ownership value written to every layer this pipeline creates.
pub const MANAGED_BY: &str = "factor-overlay";

/// Per-upsert visual parameters.
///
/// These are caller-declared desired state, not deltas: every upsert call
/// fully determines the layer's opacity and stacking order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpsertParams {
    pub opacity: f32,
    pub z_index: i32,
    pub interpolate: bool,
}

impl Default for UpsertParams {
    fn default() -> Self {
        Self {
            opacity: 0.7,
            z_index: 50,
            interpolate: true,
        }
    }
}

/// Carries a factor's default opacity and z-index. `blend` is declared on
/// [`RenderOptions`] but not yet surfaced by any render path, so it is not
/// mapped here.
impl From<RenderOptions> for UpsertParams {
    fn from(render: RenderOptions) -> Self {
        Self {
            opacity: render.opacity,
            z_index: render.z_index,
            ..Self::default()
        }
    }
}

/// Owns the key-to-layer registry for factor overlays on one map surface.
///
/// At most one managed layer exists per key: the first upsert for a key
/// creates the layer, subsequent upserts swap its source and style in place,
/// and `remove`/`clear` destroy it. The registry is the single source of
/// truth for ownership; `factorLayerKey` and `managedBy` tags are still
/// written onto layers so external tooling can identify pipeline-owned
/// layers, but lookup never scans the host layer list.
///
/// Calls are synchronous against a single-writer surface. Interleaving
/// upserts for the same key from multiple threads is not supported; callers
/// must serialize per key.
pub struct FactorLayerManager<S: MapSurface> {
    layers: HashMap<String, S::Layer>,
}

impl<S: MapSurface> FactorLayerManager<S> {
    pub fn new() -> Self {
        Self {
            layers: HashMap::new(),
        }
    }

    /// Create or refresh the managed layer for `key`.
    ///
    /// The returned handle is identical across repeated upserts for the same
    /// key. Source and style are replaced wholesale on refresh (source URL
    /// and legend change independently, so there is no incremental patch),
    /// and opacity/z-index are reapplied unconditionally in both branches.
    pub fn upsert(
        &mut self,
        surface: &mut S,
        key: &str,
        url: &str,
        legend: &LegendDef,
        params: UpsertParams,
    ) -> S::Layer {
        let style = compile(legend);
        let source = RasterSourceSpec::cog(url, params.interpolate);

        let mut layer = match self.layers.get(key) {
            Some(layer) => {
                debug!(key = %key, url = %url, "refreshing managed factor layer");
                let mut layer = layer.clone();
                layer.set_source(source);
                layer.set_style(style);
                layer
            }
            None => {
                debug!(key = %key, url = %url, legend = %legend.id, "creating managed factor layer");
                let mut layer = surface.add_layer(LayerSpec { source, style });
                layer.set_tag(FACTOR_LAYER_KEY_TAG, key.to_string());
                layer.set_tag(MANAGED_BY_TAG, MANAGED_BY.to_string());
                self.layers.insert(key.to_string(), layer.clone());
                layer
            }
        };

        layer.set_opacity(params.opacity);
        layer.set_z_index(params.z_index);
        layer
    }

    /// Remove the managed layer for `key`. Returns false (not an error) if
    /// no layer is managed under that key.
    pub fn remove(&mut self, surface: &mut S, key: &str) -> bool {
        match self.layers.remove(key) {
            Some(layer) => {
                debug!(key = %key, "removing managed factor layer");
                surface.remove_layer(&layer);
                true
            }
            None => false,
        }
    }

    /// Remove every layer this manager owns, leaving layers it did not
    /// create untouched. Returns the number of layers removed.
    pub fn clear(&mut self, surface: &mut S) -> usize {
        let mut removed = 0;
        for (key, layer) in self.layers.drain() {
            debug!(key = %key, "clearing managed factor layer");
            if surface.remove_layer(&layer) {
                removed += 1;
            }
        }
        removed
    }

    /// Handle of the managed layer for `key`, if one exists.
    pub fn get(&self, key: &str) -> Option<&S::Layer> {
        self.layers.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.layers.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl<S: MapSurface> Default for FactorLayerManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
