//! Legend definitions: value breakpoints mapped to colors.

use crate::error::{FactorError, FactorResult};
use serde::{Deserialize, Serialize};

/// A classification breakpoint: samples at or below `value` take `color`.
///
/// Stops are evaluated in ascending value order with first-match-wins
/// semantics, so duplicate values are allowed; the stop appearing earlier in
/// the legend's original order wins the tie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendStop {
    /// Upper bound of this class, in the legend's unit.
    pub value: f64,

    /// Color literal: `#RRGGBB`, `#RRGGBBAA`, `rgb(...)` or `rgba(...)`.
    pub color: String,

    /// Optional label for legend display.
    #[serde(default)]
    pub label: Option<String>,
}

impl LegendStop {
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
            label: None,
        }
    }
}

/// A complete legend: an id, display metadata and the breakpoint list.
///
/// Stops may arrive in any order; the compiler establishes ascending order
/// itself and never mutates the definition, so the original sequence stays
/// intact for the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendDef {
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Unit label for display (e.g. "mm")
    #[serde(default)]
    pub unit: Option<String>,

    /// Classification breakpoints, not necessarily sorted.
    pub stops: Vec<LegendStop>,

    /// Color for not-a-number samples; transparent when unset.
    #[serde(default)]
    pub nodata_color: Option<String>,
}

impl LegendDef {
    /// Parse a legend definition from a JSON string.
    pub fn from_json(json: &str) -> FactorResult<Self> {
        serde_json::from_str(json).map_err(|e| FactorError::InvalidLegend(e.to_string()))
    }
}
