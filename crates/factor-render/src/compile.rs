//! Legend to classification expression compilation.

use crate::expr::{ClassClause, ClassificationExpr};
use factor_common::{LegendDef, LegendStop, Rgba};
use std::cmp::Ordering;

/// Compile a legend into a piecewise classification expression.
///
/// Stops may arrive in any order; they are copied and stable-sorted
/// ascending by value, so two stops sharing a value keep their original
/// relative order and the earlier one wins under first-match evaluation.
/// A malformed stop color degrades that stop to transparent (logged) rather
/// than failing the compile; an empty stop list compiles to the NaN guard
/// plus the universal transparent fallback.
pub fn compile(legend: &LegendDef) -> ClassificationExpr {
    let nodata_color = legend
        .nodata_color
        .as_deref()
        .map(Rgba::parse_lossy)
        .unwrap_or(Rgba::transparent());

    let mut stops: Vec<&LegendStop> = legend.stops.iter().collect();
    // sort_by is stable, which the duplicate-value tie-break relies on; a
    // NaN stop value ties as Equal and keeps its input position.
    stops.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));

    let clauses = stops
        .iter()
        .map(|stop| ClassClause {
            max: stop.value,
            color: Rgba::parse_lossy(&stop.color),
        })
        .collect();

    ClassificationExpr {
        nodata_color,
        clauses,
        fallback: Rgba::transparent(),
    }
}
