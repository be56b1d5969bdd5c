//! Managed factor overlay layers on a host map surface.
//!
//! The host map (its tile fetching, GPU upload, view handling) is an
//! external collaborator reached through the traits in [`surface`]; this
//! crate only drives the thin set-source / set-style / set-opacity /
//! set-z-index mutation surface and guarantees at most one managed layer
//! per logical factor key.

pub mod manager;
pub mod surface;

pub use manager::{FactorLayerManager, UpsertParams, FACTOR_LAYER_KEY_TAG, MANAGED_BY, MANAGED_BY_TAG};
pub use surface::{LayerSpec, MapSurface, RasterSourceSpec, TileLayer};
