//! Rate model: passive effect totals and the per-tier draw weights they
//! produce.

pub mod effects;
pub mod model;

pub use effects::*;
pub use model::*;
