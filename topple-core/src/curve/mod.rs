//! Bezier sampling and the minimum-curvature stretch search.

pub mod bezier;
pub mod search;
