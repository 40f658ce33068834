use kurbo::Point;

use crate::composition::component::Port;
use crate::curve::bezier::{control_points, discrete_curvature, sample};
use crate::foundation::error::{ToppleError, ToppleResult};
use crate::geometry::planar::blend;

/// Bracket width below which the curvature search stops, in length units.
pub const BRACKET_TOLERANCE: f64 = 0.05;

/// Candidate stretch radii evaluated per narrowing step.
const BRACKET_POINTS: usize = 5;

/// Safety cap on narrowing steps. The bracket shrinks to at most half its
/// width per step, so a healthy search finishes in a handful of iterations;
/// hitting the cap is reported as [`ToppleError::Search`].
const MAX_ITERATIONS: usize = 64;

/// Outcome of the minimum-curvature search: the chosen control stretch and
/// the winning sampled polyline.
#[derive(Clone, Debug)]
pub struct CurveFit {
    /// Midpoint of the converged stretch bracket.
    pub radius: f64,
    /// Samples of the least-curvature candidate, start to end.
    pub samples: Vec<Point>,
}

/// Find the Bezier control stretch minimizing the path's maximum discrete
/// curvature between two oriented endpoints.
///
/// Five evenly spaced candidate radii are evaluated over the bracket, the
/// bracket narrows to the neighbors of the best candidate, and the search
/// stops once the bracket is narrower than [`BRACKET_TOLERANCE`]. Degenerate
/// sample triples grade as effectively infinite curvature, so they are
/// rejected by the minimization instead of aborting it.
#[tracing::instrument(level = "debug")]
pub fn search_min_curvature(start: Port, end: Port) -> ToppleResult<CurveFit> {
    let (mut lower, mut upper) = (0.0_f64, 1.0_f64);
    for iteration in 0..MAX_ITERATIONS {
        let step = (upper - lower) / (BRACKET_POINTS - 1) as f64;
        let mut best_index = 0;
        let mut best_curvature = f64::INFINITY;
        let mut best_samples = Vec::new();
        for i in 0..BRACKET_POINTS {
            let radius = lower + step * i as f64;
            let control = control_points(start, end, radius);
            let samples = sample(&control);
            let curvature = max_curvature(&control, &samples);
            if curvature < best_curvature {
                best_index = i;
                best_curvature = curvature;
                best_samples = samples;
            }
        }
        let previous_lower = lower;
        if best_index != 0 {
            lower = previous_lower + step * (best_index - 1) as f64;
        }
        if best_index != BRACKET_POINTS - 1 {
            upper = previous_lower + step * (best_index + 1) as f64;
        }
        tracing::trace!(iteration, lower, upper, best_curvature, "narrowed bracket");
        if upper - lower < BRACKET_TOLERANCE {
            return Ok(CurveFit {
                radius: (lower + upper) / 2.0,
                samples: best_samples,
            });
        }
    }
    Err(ToppleError::search(format!(
        "bracket [{lower}, {upper}] not below {BRACKET_TOLERANCE} after {MAX_ITERATIONS} iterations"
    )))
}

/// Maximum discrete curvature over the sampled polyline, extended by one
/// extrapolated point past each endpoint so the endpoint tangent constraints
/// participate.
fn max_curvature(control: &[Point; 4], samples: &[Point]) -> f64 {
    const OVERSHOOT: f64 = 1.0 + 1.0e-2;
    let mut extended = Vec::with_capacity(samples.len() + 2);
    extended.push(blend(control[0], control[1], OVERSHOOT));
    extended.extend_from_slice(samples);
    extended.push(blend(control[3], control[2], OVERSHOOT));
    extended
        .windows(3)
        .map(|w| discrete_curvature(w[0], w[1], w[2]))
        .fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
#[path = "../../tests/unit/curve/search.rs"]
mod tests;
