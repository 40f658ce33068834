use glam::DVec3;
use kurbo::Point;

use crate::composition::component::{Component, Port};
use crate::foundation::error::ToppleResult;
use crate::foundation::units::{SX, SY, SZ};
use crate::geometry::pose::Rpy;
use crate::runs::single::{Block, Orientation};

/// A block standing just past its tipping angle, so it begins to fall as
/// soon as the simulation starts.
pub struct LeanTrigger;

impl LeanTrigger {
    /// Margin past the neutral tipping pitch `atan(SX / SZ)`.
    pub const LEAN_ANGLE: f64 = 1.0e-2;

    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        let pitch = (SX / SZ).atan();
        component.insert(
            "trigger",
            Block::new(
                DVec3::new(0.0, 0.0, SZ / pitch.cos() / 2.0),
                Rpy::new(0.0, pitch + Self::LEAN_ANGLE, 0.0),
            ),
        )?;
        component.add_port("out", Port::at(SY, 0.0, 0.0))?;
        Ok(component)
    }
}

/// A block balanced on the edge of a flat base with too little overlap to
/// stand; it falls forward on start.
pub struct EdgeTrigger;

impl EdgeTrigger {
    /// Fraction of the block thickness resting on the base. Must stay below
    /// one half or the trigger would be stable.
    pub const CONTACT_RATIO: f64 = 0.3;

    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        component.insert(
            "base",
            Block::oriented(DVec3::new(-SY / 2.0, 0.0, SX / 2.0), Orientation::Zxy),
        )?;
        component.insert(
            "trigger",
            Block::oriented(
                DVec3::new(SX * (0.5 - Self::CONTACT_RATIO), 0.0, SX + SZ / 2.0),
                Orientation::Xyz,
            ),
        )?;
        component.add_port("out", Port::at(SY, 0.0, 0.0))?;
        Ok(component)
    }
}

/// A covered lever that holds a raised trigger stable until the incoming
/// chain taps the lever away.
pub struct TapButton;

impl TapButton {
    /// Fraction of the block thickness resting on the cover. Must stay above
    /// one half so the trigger waits for the tap.
    pub const CONTACT_RATIO: f64 = 0.9;

    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        component.insert(
            "base",
            Block::oriented(DVec3::new(0.0, 0.0, SX / 2.0), Orientation::Zyx),
        )?;
        component.insert(
            "lever",
            Block::oriented(DVec3::new(-SZ / 2.0, 0.0, SX * 1.5), Orientation::Zyx),
        )?;
        component.insert(
            "support",
            Block::oriented(DVec3::new(SY / 2.0, 0.0, SX * 1.5), Orientation::Zxy),
        )?;
        component.insert(
            "cover",
            Block::oriented(DVec3::new(0.0, 0.0, SX * 2.5), Orientation::Zyx),
        )?;
        component.insert(
            "trigger",
            Block::oriented(
                DVec3::new(
                    SY + SX * (0.5 - Self::CONTACT_RATIO),
                    0.0,
                    SZ / 2.0 + SX * 3.0,
                ),
                Orientation::Xyz,
            ),
        )?;
        component.add_port("in", Port::at(-SY - SZ, 0.0, 0.0))?;
        component.add_port("out", Port::at(SY * 2.0, 0.0, 0.0))?;
        Ok(component)
    }
}
