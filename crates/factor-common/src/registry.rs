//! Builtin factor and legend tables.
//!
//! Static lookup tables keyed by id. Unknown ids resolve to `None` rather
//! than erroring, matching the degrade-over-fail policy for config-driven
//! lookups.

use crate::factor::{FactorApi, FactorDef, RenderOptions};
use crate::legend::{LegendDef, LegendStop};
use crate::time::cog_time_key;
use once_cell::sync::Lazy;
use std::collections::HashMap;

fn rain_1h_cog_url(time_ms: Option<i64>) -> String {
    match time_ms {
        Some(ms) => format!("/cog/rain_1h/{}.tif", cog_time_key(ms)),
        None => "/cog/rain_1h/latest.tif".to_string(),
    }
}

fn rain_1h() -> FactorDef {
    FactorDef {
        id: "rain_1h".to_string(),
        name: "1h precipitation".to_string(),
        legend_id: "legend_rain".to_string(),
        api: FactorApi {
            endpoint_key: "cog",
            build_cog_url: rain_1h_cog_url,
        },
        render: RenderOptions {
            opacity: 1.0,
            z_index: 1,
            ..RenderOptions::default()
        },
    }
}

fn legend_rain() -> LegendDef {
    let stops = [
        (-36.0, "#4F0E4A"),
        (-34.0, "#4C0F72"),
        (-30.0, "#3C1397"),
        (-26.0, "#2D18B7"),
        (-22.0, "#2128D1"),
        (-18.0, "#2C51DF"),
        (-14.0, "#397CE2"),
        (-10.0, "#4CA1D5"),
        (-6.0, "#6DBDCB"),
        (-2.0, "#8CCFC3"),
        (2.0, "#84DB9E"),
        (6.0, "#93E461"),
        (10.0, "#D3ED51"),
        (14.0, "#F5D049"),
        (18.0, "#F79A42"),
        (22.0, "#F06339"),
        (26.0, "#DD3B30"),
        (30.0, "#C72828"),
        (34.0, "#AA2028"),
    ];

    LegendDef {
        id: "legend_rain".to_string(),
        name: "Precipitation".to_string(),
        unit: Some("mm".to_string()),
        stops: stops
            .iter()
            .map(|&(value, color)| LegendStop::new(value, color))
            .collect(),
        nodata_color: None,
    }
}

static FACTORS: Lazy<HashMap<String, FactorDef>> = Lazy::new(|| {
    [rain_1h()]
        .into_iter()
        .map(|f| (f.id.clone(), f))
        .collect()
});

static LEGENDS: Lazy<HashMap<String, LegendDef>> = Lazy::new(|| {
    [legend_rain()]
        .into_iter()
        .map(|l| (l.id.clone(), l))
        .collect()
});

/// Look up a builtin factor by id.
pub fn get_factor_by_id(id: &str) -> Option<&'static FactorDef> {
    FACTORS.get(id)
}

/// All builtin factors, ordered by id for stable listing.
pub fn list_factors() -> Vec<&'static FactorDef> {
    let mut factors: Vec<_> = FACTORS.values().collect();
    factors.sort_by(|a, b| a.id.cmp(&b.id));
    factors
}

/// Look up a builtin legend by id.
pub fn get_legend_by_id(id: &str) -> Option<&'static LegendDef> {
    LEGENDS.get(id)
}
