use glam::DVec3;

use crate::composition::component::{Component, Port};
use crate::curve::search::search_min_curvature;
use crate::foundation::error::{ToppleError, ToppleResult};
use crate::foundation::units::{CURVE_INTERVAL_RATIO, SZ};
use crate::geometry::planar::{blend, heading};
use crate::runs::single::Block;

/// A chain of blocks laid along a curvature-constrained Bezier path between
/// two oriented endpoints.
///
/// The path comes from the minimum-curvature stretch search; its polyline is
/// then resampled into exact arc-length intervals, each block oriented to a
/// blend of the tangents bracketing its position. This is the bridge
/// component that `Component::connect` inserts.
pub struct Curve;

impl Curve {
    /// Build between two promoted ports (or any two oriented planar poses).
    pub fn between(start: Port, end: Port, spacing: Option<f64>) -> ToppleResult<Component> {
        let fit = search_min_curvature(start, end)?;
        let mut samples = fit.samples;

        // One mirrored point past the end, plus the end heading and the
        // stretch radius as trailing table entries: the arc-length walk can
        // then run fractionally past the final sample without special cases.
        let n = samples.len();
        samples.push(blend(samples[n - 2], samples[n - 1], -1.0));

        let mut headings: Vec<f64> = samples
            .windows(2)
            .map(|pair| heading(pair[0], pair[1]))
            .collect();
        headings.push(end.heading);
        let mut lengths: Vec<f64> = samples
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .collect();
        lengths.push(fit.radius);

        let total: f64 = lengths[..lengths.len() - 2].iter().sum();
        let spacing = spacing.unwrap_or(SZ / CURVE_INTERVAL_RATIO);
        if !(spacing > 0.0) {
            return Err(ToppleError::validation("curve spacing must be > 0"));
        }
        let count = ((total / spacing).round() as usize + 1).max(2);
        let interval = total / (count - 1) as f64;

        let mut component = Component::root();
        component.insert(
            0,
            block_at(samples[0].x, samples[0].y, headings[0]),
        )?;
        if !(interval > 0.0) {
            // Coincident endpoints: nothing to walk, close the chain at the
            // end pose.
            component.insert(1, block_at(samples[n - 1].x, samples[n - 1].y, end.heading))?;
            return Ok(component);
        }
        let mut remaining = 0.0_f64;
        let mut segment: usize = 0;
        let mut entered = false;
        for i in 1..count {
            while remaining < interval {
                if entered {
                    segment += 1;
                } else {
                    entered = true;
                }
                remaining += lengths[segment];
            }
            remaining -= interval;
            let t = remaining / lengths[segment];
            let at = blend(samples[segment], samples[segment + 1], t);
            let yaw = headings[segment] * t + headings[segment + 1] * (1.0 - t);
            component.insert(i, block_at(at.x, at.y, yaw))?;
        }
        Ok(component)
    }
}

fn block_at(x: f64, y: f64, yaw: f64) -> Component {
    Block::new(
        DVec3::new(x, y, SZ / 2.0),
        crate::geometry::pose::Rpy::yaw(yaw),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/runs/curve.rs"]
mod tests;
