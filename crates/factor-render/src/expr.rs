//! Classification expression tree.
//!
//! Pure data: compilation never touches the map surface, and the surface
//! consumes the expression through [`ClassificationExpr::to_style_json`].

use factor_common::Rgba;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One classification clause: samples at or below `max` take `color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassClause {
    pub max: f64,
    pub color: Rgba,
}

/// A piecewise color classification compiled from a legend.
///
/// Evaluation order is fixed: the NaN guard first, then the clauses in
/// ascending threshold order with first-match-wins, then the fallback for
/// anything above the last threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationExpr {
    /// Output for not-a-number samples; always tested first.
    pub nodata_color: Rgba,

    /// Ordered classification clauses.
    pub clauses: Vec<ClassClause>,

    /// Output for samples above every clause threshold.
    pub fallback: Rgba,
}

impl ClassificationExpr {
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Reference evaluation for a single band sample.
    ///
    /// Mirrors the first-true-clause-wins semantics of the GPU `case`
    /// expression; used by tests and legend previews, never by the render
    /// path itself.
    pub fn evaluate(&self, sample: f64) -> Rgba {
        if sample.is_nan() {
            return self.nodata_color;
        }
        for clause in &self.clauses {
            // A NaN clause threshold compares false and is skipped.
            if sample <= clause.max {
                return clause.color;
            }
        }
        self.fallback
    }

    /// The portable WebGL style expression consumed by the map surface:
    ///
    /// ```json
    /// ["case",
    ///   ["==", ["band", 1], "nan"], [0, 0, 0, 0],
    ///   ["<=", ["band", 1], v1], [r1, g1, b1, a1],
    ///   ...,
    ///   [0, 0, 0, 0]]
    /// ```
    pub fn to_style_json(&self) -> Value {
        let mut expr = vec![json!("case")];
        expr.push(json!(["==", ["band", 1], "nan"]));
        expr.push(color_value(self.nodata_color));
        for clause in &self.clauses {
            expr.push(json!(["<=", ["band", 1], clause.max]));
            expr.push(color_value(clause.color));
        }
        expr.push(color_value(self.fallback));
        Value::Array(expr)
    }
}

fn color_value(color: Rgba) -> Value {
    json!([color.r, color.g, color.b, color.a])
}
