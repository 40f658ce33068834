use glam::DVec3;
use kurbo::Point;

use crate::composition::component::{Component, Port};
use crate::foundation::error::{ToppleError, ToppleResult};
use crate::foundation::units::{LINE_INTERVAL_RATIO, SY, SZ};
use crate::runs::single::{Block, Orientation};

/// Options for a straight-line run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineOptions {
    /// Whether to place a block flush at the start / end point. An excluded
    /// endpoint keeps its interval but leaves the slot empty, so a mechanism
    /// can sit there.
    pub contain: (bool, bool),
    /// Spacing between consecutive blocks. Defaults to the block height (or
    /// width, when side-laid) divided by [`LINE_INTERVAL_RATIO`].
    pub spacing: Option<f64>,
    /// Extra height under every block, for raised lines running over other
    /// mechanisms.
    pub base_z: f64,
    /// Lay blocks on their long side instead of upright.
    pub side: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            contain: (true, true),
            spacing: None,
            base_z: 0.0,
            side: false,
        }
    }
}

/// A straight sequence of evenly spaced blocks between two points.
///
/// The requested spacing is snapped so it divides the span exactly: the
/// interval count is `round(distance / spacing)` and the true interval is
/// recomputed as `distance / count`, so the line never drifts or overshoots.
pub struct Line;

impl Line {
    /// Build between two points on the ground plane.
    pub fn new(start: Point, end: Point, options: LineOptions) -> ToppleResult<Component> {
        let delta = end - start;
        let yaw = delta.y.atan2(delta.x);
        let mut component = Component::planar(start, yaw);

        let (height, orientation) = if options.side {
            (SY, Orientation::Xzy)
        } else {
            (SZ, Orientation::Xyz)
        };
        let spacing = options.spacing.unwrap_or(height / LINE_INTERVAL_RATIO);
        if !(spacing > 0.0) {
            return Err(ToppleError::validation("line spacing must be > 0"));
        }
        let distance = delta.hypot();
        let n_intervals = (distance / spacing).round() as usize;
        if n_intervals == 0 {
            return Err(ToppleError::validation(format!(
                "line span {distance} is too short for spacing {spacing}"
            )));
        }
        let interval = distance / n_intervals as f64;
        let n_blocks =
            n_intervals - 1 + usize::from(options.contain.0) + usize::from(options.contain.1);
        if n_blocks == 0 {
            return Err(ToppleError::validation(
                "line places no blocks: both endpoints excluded over a single interval",
            ));
        }

        let first_offset = if options.contain.0 { 0.0 } else { 1.0 };
        let x = |i: usize| interval * (i as f64 + first_offset);
        for i in 0..n_blocks {
            component.insert(
                i,
                Block::oriented(
                    DVec3::new(x(i), 0.0, options.base_z + height / 2.0),
                    orientation,
                ),
            )?;
        }
        component.add_port("in", Port::at(x(0) - SY, 0.0, 0.0))?;
        component.add_port("out", Port::at(x(n_blocks - 1) + SY, 0.0, 0.0))?;
        Ok(component)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runs/line.rs"]
mod tests;
