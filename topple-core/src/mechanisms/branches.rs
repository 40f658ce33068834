use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;
use kurbo::Point;

use crate::composition::component::{Component, Port};
use crate::foundation::error::ToppleResult;
use crate::foundation::units::{LINE_INTERVAL_RATIO, SX, SY, SZ};
use crate::runs::single::{Block, Orientation};

/// A pass-through segment that also launches a perpendicular side chain.
///
/// The main chain knocks a covered trigger sideways on its way through, so
/// the branch fires whichever direction the chain arrives from.
pub struct SideBranch;

impl SideBranch {
    /// Fraction of the trigger thickness resting on the base. Must stay
    /// below one half so the trigger falls once nudged.
    pub const CONTACT_RATIO: f64 = 0.4;

    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        component.insert(
            "base",
            Block::oriented(DVec3::new(0.0, 0.0, SX / 2.0), Orientation::Zxy),
        )?;
        component.insert(
            "trigger",
            Block::oriented(
                DVec3::new(
                    0.0,
                    SZ / 2.0 + SX * (0.5 - Self::CONTACT_RATIO),
                    SX + SZ / 2.0,
                ),
                Orientation::Yxz,
            ),
        )?;
        component.insert(
            "connection",
            Block::oriented(DVec3::new(0.0, 0.0, SX + SZ / 2.0), Orientation::Xyz),
        )?;
        component.insert(
            "cover",
            Block::oriented(DVec3::new(0.0, SX, SX * 1.5 + SZ), Orientation::Zxy),
        )?;
        component.add_port("inL", Port::at(-SY, 0.0, 0.0))?;
        component.add_port("outL", Port::at(-SY, 0.0, PI))?;
        component.add_port("inR", Port::at(SY, 0.0, PI))?;
        component.add_port("outR", Port::at(SY, 0.0, 0.0))?;
        component.add_port("branch", Port::at(0.0, SZ / 2.0 + SY, FRAC_PI_2))?;
        Ok(component)
    }
}

/// A triangular fan splitting one chain into `n` parallel chains.
///
/// Row `i` holds `i + 1` blocks; each falling block knocks over both blocks
/// behind it. Output ports `out0..out{n-1}` sit past the last row, ordered
/// from the positive-y side down.
pub struct MultiBranch;

impl MultiBranch {
    /// Build an `n`-way fan at an xy position and heading. `gap` is the
    /// extra lateral space between adjacent blocks in a row, defaulting to
    /// one block thickness.
    pub fn new(n: usize, at: Point, yaw: f64, gap: Option<f64>) -> ToppleResult<Component> {
        let gap = gap.unwrap_or(SX);
        let mut component = Component::planar(at, yaw);
        for i in 0..n {
            let x = SZ / LINE_INTERVAL_RATIO * i as f64;
            for j in 0..=i {
                let y = (i as f64 / 2.0 - j as f64) * (gap + SY);
                component.insert(
                    format!("{i}_{j}"),
                    Block::oriented(DVec3::new(x, y, SZ / 2.0), Orientation::Xyz),
                )?;
                if i == n - 1 {
                    component.add_port(format!("out{j}"), Port::at(x + SY, y, 0.0))?;
                }
            }
        }
        component.add_port("in", Port::at(-SY, 0.0, 0.0))?;
        Ok(component)
    }
}

/// A hairpin that turns a chain back parallel to itself.
///
/// An elevated lever pivots on its support when either side trigger falls,
/// pushing the trigger on the other side over in the opposite direction.
pub struct UTurn;

impl UTurn {
    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        component.insert(
            "base1",
            Block::oriented(DVec3::new(SX * 1.5, 0.0, SX / 2.0), Orientation::Zyx),
        )?;
        component.insert(
            "base2",
            Block::oriented(DVec3::new(SX * 1.5, 0.0, SY / 2.0 + SX), Orientation::Yzx),
        )?;
        component.insert(
            "lever",
            Block::oriented(DVec3::new(SX, 0.0, SY * 1.5 + SX), Orientation::Xzy),
        )?;
        component.insert(
            "support",
            Block::oriented(
                DVec3::new(SX * 1.5 + SY / 2.0, 0.0, SY + SZ / 2.0 + SX),
                Orientation::Yxz,
            ),
        )?;
        component.insert(
            "triggerL",
            Block::oriented(DVec3::new(0.0, SX + SY / 1.5, SZ / 2.0), Orientation::Xyz),
        )?;
        component.insert(
            "triggerR",
            Block::oriented(DVec3::new(0.0, -SX - SY / 1.5, SZ / 2.0), Orientation::Xyz),
        )?;
        component.add_port("inD", Port::at(0.0, -SX - SY, 0.0))?;
        component.add_port("outD", Port::at(0.0, -SX - SY, PI))?;
        component.add_port("inU", Port::at(0.0, SX + SY, 0.0))?;
        component.add_port("outU", Port::at(0.0, SX + SY, PI))?;
        Ok(component)
    }
}
