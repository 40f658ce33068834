use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::OnceLock;

use glam::DVec3;
use kurbo::Point;

use crate::composition::component::{Component, Port};
use crate::foundation::error::{ToppleError, ToppleResult};
use crate::foundation::units::{SX, SY, SZ};
use crate::geometry::pose::Rpy;
use crate::runs::single::{Block, Orientation};

/// Fraction of the trigger thickness resting on its base. Must sit slightly
/// above one half: stable at rest, toppled by a light tap.
pub const CONTACT_RATIO: f64 = 0.7;

const SOLVE_TOLERANCE: f64 = 1.0e-12;
const SOLVE_MAX_ITERATIONS: usize = 50;

/// Ramp inclination of the crossing, solved once from the block dimensions.
///
/// The angle is the root of
/// `(SZ - SX / sin a) * cos a + CONTACT_RATIO * SX - SY = 0`
/// nearest the seed `asin(SX / SZ)`: the inclination at which a block
/// sliding down the ramp lands exactly on the far trigger's contact ledge.
/// Solved by Newton iteration with a numeric derivative and cached for the
/// process lifetime.
pub fn crossing_contact_angle() -> ToppleResult<f64> {
    static ALPHA: OnceLock<Option<f64>> = OnceLock::new();
    ALPHA
        .get_or_init(|| solve_contact_angle(CONTACT_RATIO))
        .ok_or_else(|| ToppleError::search("crossing ramp angle solve did not converge"))
}

fn solve_contact_angle(contact_ratio: f64) -> Option<f64> {
    let residual = |a: f64| (SZ - SX / a.sin()) * a.cos() + contact_ratio * SX - SY;
    let mut a = (SX / SZ).asin();
    for _ in 0..SOLVE_MAX_ITERATIONS {
        let f = residual(a);
        if f.abs() < SOLVE_TOLERANCE {
            return Some(a);
        }
        let h = 1.0e-8;
        let derivative = (residual(a + h) - residual(a - h)) / (2.0 * h);
        if derivative == 0.0 || !derivative.is_finite() {
            return None;
        }
        a -= f / derivative;
        if !(0.0..FRAC_PI_2).contains(&a) {
            return None;
        }
    }
    None
}

/// A four-way crossing: two chains pass through each other at right angles
/// without interacting.
///
/// The left-right chain runs over a bridge held up by two inclined ramps;
/// the down-up chain passes underneath between the ramp feet. Either
/// horizontal trigger relays the chain up a ramp, across the bridge, and
/// down the far side.
pub struct Crossing;

impl Crossing {
    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let alpha = crossing_contact_angle()?;
        let mut component = Component::planar(at, yaw);
        component.insert(
            "center",
            Block::oriented(DVec3::new(0.0, 0.0, SX / 2.0), Orientation::Zyx),
        )?;
        let ramp_x = (SZ + SX * alpha.sin()) / 2.0 + SZ / 2.0 * alpha.cos();
        let ramp_z = SX / 2.0 * alpha.cos() + SZ / 2.0 * alpha.sin();
        component.insert(
            "rampR",
            Block::new(
                DVec3::new(ramp_x, 0.0, ramp_z),
                Rpy::new(0.0, FRAC_PI_2 - alpha, 0.0),
            ),
        )?;
        component.insert(
            "rampL",
            Block::new(
                DVec3::new(-ramp_x, 0.0, ramp_z),
                Rpy::new(0.0, FRAC_PI_2 - alpha, PI),
            ),
        )?;
        let base_x = (SY + SZ) / 2.0 + SX * alpha.sin() + SX / alpha.tan();
        component.insert(
            "baseR",
            Block::oriented(DVec3::new(base_x, 0.0, SX / 2.0), Orientation::Zxy),
        )?;
        component.insert(
            "baseL",
            Block::oriented(DVec3::new(-base_x, 0.0, SX / 2.0), Orientation::Zxy),
        )?;
        let trigger_x = SX * (0.5 - CONTACT_RATIO)
            + SZ / 2.0
            + SY
            + SX * alpha.sin()
            + SX / alpha.tan();
        component.insert(
            "triggerR",
            Block::oriented(DVec3::new(trigger_x, 0.0, SX + SZ / 2.0), Orientation::Xyz),
        )?;
        component.insert(
            "triggerL",
            Block::oriented(DVec3::new(-trigger_x, 0.0, SX + SZ / 2.0), Orientation::Xyz),
        )?;
        component.insert(
            "bridge",
            Block::oriented(DVec3::new(0.0, 0.0, SX + SZ / 2.0), Orientation::Yxz),
        )?;
        component.add_port("inL", Port::at(-trigger_x - SY, 0.0, 0.0))?;
        component.add_port("outL", Port::at(-trigger_x - SY, 0.0, PI))?;
        component.add_port("inR", Port::at(trigger_x + SY, 0.0, PI))?;
        component.add_port("outR", Port::at(trigger_x + SY, 0.0, 0.0))?;
        component.add_port("inD", Port::at(0.0, -SY, FRAC_PI_2))?;
        component.add_port("outD", Port::at(0.0, -SY, -FRAC_PI_2))?;
        component.add_port("inU", Port::at(0.0, SY, -FRAC_PI_2))?;
        component.add_port("outU", Port::at(0.0, SY, FRAC_PI_2))?;
        Ok(component)
    }
}
