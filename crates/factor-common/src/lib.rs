//! Common types and utilities shared across the factor overlay crates.

pub mod color;
pub mod error;
pub mod factor;
pub mod legend;
pub mod registry;
pub mod time;

pub use color::{ColorParseError, Rgba};
pub use error::{FactorError, FactorResult};
pub use factor::{BlendMode, FactorApi, FactorDef, RenderOptions};
pub use legend::{LegendDef, LegendStop};
pub use registry::{get_factor_by_id, get_legend_by_id, list_factors};
pub use time::cog_time_key;
