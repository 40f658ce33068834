use glam::DVec3;
use kurbo::Point;

use crate::composition::component::Component;
use crate::foundation::error::ToppleResult;
use crate::foundation::units::SX;
use crate::runs::single::{Block, Orientation};

/// A vertical stack of flat-laid blocks, each one block-thickness above the
/// previous.
pub struct Pile;

impl Pile {
    /// Build `n` stacked blocks at an xy position and heading.
    pub fn new(n: usize, at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        for i in 0..n {
            component.insert(
                i,
                Block::oriented(
                    DVec3::new(0.0, 0.0, SX * (i as f64 + 0.5)),
                    Orientation::Zyx,
                ),
            )?;
        }
        Ok(component)
    }
}
