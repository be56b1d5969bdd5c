//! Factor definitions: a named raster data layer with a time-resolvable
//! COG source and an associated legend.

use serde::{Deserialize, Serialize};

/// How a factor layer composites over the basemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Normal,
    Add,
    Multiply,
}

/// Default visual parameters for a factor's rendered layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    #[serde(default = "default_z_index")]
    pub z_index: i32,

    #[serde(default)]
    pub blend: BlendMode,
}

fn default_opacity() -> f32 {
    0.7
}

fn default_z_index() -> i32 {
    50
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            z_index: default_z_index(),
            blend: BlendMode::Normal,
        }
    }
}

/// Resolves a nullable epoch-millisecond timestamp to a COG source URL.
///
/// `None` means "the most recent available snapshot". Implementations must
/// be pure and deterministic: no I/O, same URL for the same input. The
/// formatting rule itself is per-factor business logic.
pub type CogUrlFn = fn(Option<i64>) -> String;

/// Backend addressing for a factor's raster source.
#[derive(Debug, Clone, Copy)]
pub struct FactorApi {
    /// Which endpoint family serves this factor (currently always "cog").
    pub endpoint_key: &'static str,

    /// Timestamp-to-URL resolver, see [`CogUrlFn`].
    pub build_cog_url: CogUrlFn,
}

/// A named geospatial data layer with a time-resolvable raster source.
#[derive(Debug, Clone)]
pub struct FactorDef {
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Id of the legend classifying this factor's samples.
    pub legend_id: String,

    pub api: FactorApi,

    pub render: RenderOptions,
}

impl FactorDef {
    /// Resolve the COG source URL for a timestamp (`None` = latest).
    pub fn cog_url(&self, time_ms: Option<i64>) -> String {
        (self.api.build_cog_url)(time_ms)
    }
}
