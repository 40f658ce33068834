use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use kurbo::Point;

use crate::composition::component::{Component, Port};
use crate::foundation::error::{ToppleError, ToppleResult};
use crate::foundation::units::{SY, SZ};
use crate::geometry::pose::{Frame, Rpy};
use crate::physics::BlockDynamics;

/// The six canonical resting orientations of a rectangular block, named by
/// which local axis ends up along world x, y, z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    /// Upright, facing along x (the default standing domino).
    Xyz,
    /// Upright, flat side facing x.
    Xzy,
    /// Upright, facing along y.
    Yxz,
    /// Flat-laid, long edge along y.
    Yzx,
    /// Flat-laid on its face, width along x.
    Zxy,
    /// Flat-laid on its face, length along x.
    Zyx,
}

impl Orientation {
    /// All six aliases, in canonical order.
    pub const ALL: [Orientation; 6] = [
        Orientation::Xyz,
        Orientation::Xzy,
        Orientation::Yxz,
        Orientation::Yzx,
        Orientation::Zxy,
        Orientation::Zyx,
    ];

    /// The fixed roll/pitch/yaw triple this alias stands for.
    pub fn rpy(self) -> Rpy {
        match self {
            Orientation::Xyz => Rpy::new(0.0, 0.0, 0.0),
            Orientation::Xzy => Rpy::new(FRAC_PI_2, 0.0, 0.0),
            Orientation::Yxz => Rpy::new(0.0, 0.0, FRAC_PI_2),
            Orientation::Yzx => Rpy::new(FRAC_PI_2, 0.0, FRAC_PI_2),
            Orientation::Zxy => Rpy::new(0.0, FRAC_PI_2, FRAC_PI_2),
            Orientation::Zyx => Rpy::new(0.0, FRAC_PI_2, 0.0),
        }
    }

    /// Resolve a symbolic alias (`"xyz"` … `"zyx"`).
    pub fn parse(name: &str) -> ToppleResult<Orientation> {
        match name {
            "xyz" => Ok(Orientation::Xyz),
            "xzy" => Ok(Orientation::Xzy),
            "yxz" => Ok(Orientation::Yxz),
            "yzx" => Ok(Orientation::Yzx),
            "zxy" => Ok(Orientation::Zxy),
            "zyx" => Ok(Orientation::Zyx),
            other => Err(ToppleError::validation(format!(
                "unknown orientation alias '{other}'"
            ))),
        }
    }
}

/// A single physical block.
pub struct Block;

impl Block {
    /// One block at a position with explicit Euler angles.
    pub fn new(position: DVec3, rpy: Rpy) -> Component {
        Component::leaf(Frame::new(position, rpy), BlockDynamics::default())
    }

    /// One block at a position in a canonical orientation.
    pub fn oriented(position: DVec3, orientation: Orientation) -> Component {
        Self::new(position, orientation.rpy())
    }

    /// One block with per-instance dynamics overrides.
    pub fn with_dynamics(position: DVec3, rpy: Rpy, dynamics: BlockDynamics) -> Component {
        Component::leaf(Frame::new(position, rpy), dynamics)
    }
}

/// A free-standing upright block meant to be toppled by an incoming chain,
/// with an `in` port one block-width before it.
pub struct Target;

impl Target {
    /// Build at an xy position and heading.
    pub fn new(at: Point, yaw: f64) -> ToppleResult<Component> {
        let mut component = Component::planar(at, yaw);
        component.insert("target", Block::new(DVec3::new(0.0, 0.0, SZ / 2.0), Rpy::ZERO))?;
        component.add_port("in", Port::at(-SY, 0.0, 0.0))?;
        Ok(component)
    }
}
