use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;
use kurbo::Point;

use crate::composition::component::{Component, Port};
use crate::foundation::error::ToppleResult;
use crate::foundation::units::{SX, SY, SZ};
use crate::runs::line::{Line, LineOptions};
use crate::runs::pile::Pile;
use crate::runs::single::{Block, Orientation};

/// A gate across a main chain that stays shut until a control chain arrives
/// from above.
///
/// The control chain knocks the elevated connection block off the pile,
/// which falls onto the condition block and clears the path between the two
/// side triggers. Barriers catch stray blocks so an early main-chain arrival
/// stalls instead of leaking through.
pub struct ConditionGate;

impl ConditionGate {
    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        component.insert(
            "base",
            Pile::new(5, Point::new(0.0, -SY / 2.0 - SX + SZ / 2.0), FRAC_PI_2)?,
        )?;
        component.insert(
            "connection",
            Block::oriented(DVec3::new(0.0, SY + SX / 2.0, SX * 5.5), Orientation::Zyx),
        )?;
        component.insert(
            "condition",
            Block::oriented(DVec3::new(0.0, SY * 1.5 + SX, SZ / 2.0), Orientation::Yxz),
        )?;
        component.insert(
            "triggerL",
            Block::oriented(DVec3::new(-SZ / 2.0 - SX, 0.0, SZ / 2.0), Orientation::Xyz),
        )?;
        component.insert(
            "triggerR",
            Block::oriented(DVec3::new(SZ / 2.0 + SX, 0.0, SZ / 2.0), Orientation::Xyz),
        )?;
        component.insert(
            "barrierLD",
            Block::oriented(
                DVec3::new(-SY, -SY / 2.0 - SX / 2.0, SZ / 2.0),
                Orientation::Yxz,
            ),
        )?;
        component.insert(
            "barrierRD",
            Block::oriented(
                DVec3::new(SY, -SY / 2.0 - SX / 2.0, SZ / 2.0),
                Orientation::Yxz,
            ),
        )?;
        component.insert(
            "barrierLU",
            Block::oriented(
                DVec3::new(-SY / 2.0 - SZ / 2.0, SZ - SY / 2.0 - SX * 1.5, SY / 2.0),
                Orientation::Yzx,
            ),
        )?;
        component.insert(
            "barrierRU",
            Block::oriented(
                DVec3::new(SY / 2.0 + SZ / 2.0, SZ - SY / 2.0 - SX * 1.5, SY / 2.0),
                Orientation::Yzx,
            ),
        )?;
        component.add_port("inL", Port::at(-SZ - SX, 0.0, 0.0))?;
        component.add_port("outL", Port::at(-SZ - SX, 0.0, PI))?;
        component.add_port("inR", Port::at(SZ + SX, 0.0, PI))?;
        component.add_port("outR", Port::at(SZ + SX, 0.0, 0.0))?;
        component.add_port("inU", Port::at(0.0, SY * 2.0 + SX, -FRAC_PI_2))?;
        Ok(component)
    }
}

/// Two input blocks converging on a shared output: the output falls when
/// either input chain arrives.
pub struct OrGate;

impl OrGate {
    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        component.insert(
            "output",
            Block::oriented(DVec3::new(SX, 0.0, SZ / 2.0), Orientation::Xyz),
        )?;
        component.insert(
            "inputD",
            Block::oriented(
                DVec3::new(-SX / 2.0, -(SX + SY) / 2.0, SZ / 2.0),
                Orientation::Xyz,
            ),
        )?;
        component.insert(
            "inputU",
            Block::oriented(
                DVec3::new(-SX / 2.0, (SX + SY) / 2.0, SZ / 2.0),
                Orientation::Xyz,
            ),
        )?;
        component.add_port("inD", Port::at(-SY, -(SX + SY) / 2.0, 0.0))?;
        component.add_port("inU", Port::at(-SY, (SX + SY) / 2.0, 0.0))?;
        component.add_port("out", Port::at(SX + SY, 0.0, 0.0))?;
        Ok(component)
    }
}

/// Output fires only after both inputs arrive, in either order.
///
/// The upper input topples a raised line running over a barrier onto a pile;
/// the right input then pushes the pile through where the barrier used to
/// stand. Either event alone leaves the output side undisturbed.
pub struct AndGate;

impl AndGate {
    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        component.insert(
            "barrier",
            Line::new(
                Point::new(0.0, -SX),
                Point::new(0.0, SX),
                LineOptions {
                    spacing: Some(SX),
                    ..LineOptions::default()
                },
            )?,
        )?;
        component.insert(
            "base",
            Pile::new(3, Point::new((SX + SY + SZ) / 2.0, 0.0), 0.0)?,
        )?;
        component.insert(
            "highline",
            Line::new(
                Point::new(SY, 0.0),
                Point::new(SY + SX * 4.0, 0.0),
                LineOptions {
                    spacing: Some(SX * 2.0),
                    base_z: SX * 3.0,
                    ..LineOptions::default()
                },
            )?,
        )?;
        component.add_port("inR", Port::at(SY * 2.0 + SX * 4.0, 0.0, PI))?;
        component.add_port("inU", Port::at(0.0, SY, -FRAC_PI_2))?;
        component.add_port("out", Port::at(-SY, 0.0, PI))?;
        Ok(component)
    }
}
