use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use kurbo::Point;

use crate::composition::component::{Component, Port};
use crate::foundation::error::ToppleResult;
use crate::foundation::units::{SX, SY, SZ};
use crate::geometry::pose::Rpy;
use crate::mechanisms::triggers::LeanTrigger;
use crate::runs::single::{Block, Orientation};

/// A run of side-laid blocks leaning on each other like a staircase, so the
/// fall relays near-instantly from one end to the other.
///
/// Each block rests on the previous one with only a sliver of overlap; the
/// recurrence places blocks until the next one would land past the requested
/// endpoint, then parks a pre-toppling trigger beside the last block to
/// relay the chain onward.
pub struct FastPropagation;

impl FastPropagation {
    /// Fraction of the block length supporting the next block.
    pub const CONTACT_RATIO: f64 = 1.0e-2;

    /// Build from a start point towards an end point on the ground plane.
    ///
    /// The run stops at the placement closest to the end point, so the actual
    /// extent can fall slightly short of or past `end`.
    pub fn new(start: Point, end: Point) -> ToppleResult<Component> {
        let delta = end - start;
        let yaw = delta.y.atan2(delta.x);
        let distance = delta.hypot();
        let mut component = Component::planar(start, yaw);

        let mut n = 0_usize;
        component.insert(
            n,
            Block::oriented(DVec3::new(0.0, 0.0, SY / 2.0), Orientation::Yzx),
        )?;
        n += 1;

        let reach = SZ * (0.5 - Self::CONTACT_RATIO);
        let mut alpha = (SY / SZ * (1.0 - Self::CONTACT_RATIO)).asin();
        let mut x = SZ / 2.0 + reach * alpha.cos() + SY / 2.0 * alpha.sin();
        let mut z = SY - reach * alpha.sin() + SY / 2.0 * alpha.cos();
        loop {
            component.insert(
                n,
                Block::new(
                    DVec3::new(x, 0.0, z),
                    Rpy::new(FRAC_PI_2 + alpha, 0.0, FRAC_PI_2),
                ),
            )?;
            n += 1;
            // Top edge of the block just placed, where the next one rests.
            let contact_x = x + SY / 2.0 * alpha.sin() + reach * alpha.cos();
            let contact_z = z + SY / 2.0 * alpha.cos() - reach * alpha.sin();
            // Foot of the next block on the ground, one block length away.
            let support_x = contact_x + (SZ * SZ - contact_z * contact_z).sqrt();
            let new_alpha = (contact_z / SZ).asin();
            let new_x = (contact_x + support_x) / 2.0 + SY / 2.0 * new_alpha.sin();
            let new_z = contact_z / 2.0 + SY / 2.0 * new_alpha.cos();
            if (new_x - distance).abs() > (x - distance).abs() {
                break;
            }
            alpha = new_alpha;
            x = new_x;
            z = new_z;
        }

        component.insert(
            "trigger",
            LeanTrigger::new(
                Point::new(x, -SX / 2.0 - SZ * (SX / SZ).atan().sin()),
                FRAC_PI_2,
            )?,
        )?;
        component.add_port("inD", Port::at(0.0, -SY, FRAC_PI_2))?;
        component.add_port("inU", Port::at(0.0, SY, -FRAC_PI_2))?;
        component.add_port("out", Port::at(x, SY, FRAC_PI_2))?;
        Ok(component)
    }
}
