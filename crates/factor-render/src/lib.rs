//! Legend compilation for GPU-shaded factor overlays.
//!
//! Turns a legend's value breakpoints into a piecewise color classification
//! expression the host map surface evaluates per sample on the GPU.

pub mod compile;
pub mod expr;

pub use compile::compile;
pub use expr::{ClassClause, ClassificationExpr};
