use glam::{DQuat, DVec3, EulerRot};
use kurbo::Point;

/// Roll-pitch-yaw Euler angles, in radians.
///
/// The conversion to a quaternion uses the fixed-frame x-y-z convention
/// (roll about x, then pitch about y, then yaw about z), which every
/// orientation alias and port heading in this crate relies on.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rpy {
    /// Rotation about the x axis.
    pub roll: f64,
    /// Rotation about the y axis.
    pub pitch: f64,
    /// Rotation about the z (vertical) axis.
    pub yaw: f64,
}

impl Rpy {
    /// No rotation.
    pub const ZERO: Rpy = Rpy {
        roll: 0.0,
        pitch: 0.0,
        yaw: 0.0,
    };

    /// Build from the three angles.
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// A pure yaw rotation, the common case for planar layouts.
    pub fn yaw(yaw: f64) -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
            yaw,
        }
    }

    /// The equivalent unit quaternion.
    pub fn quat(self) -> DQuat {
        DQuat::from_euler(EulerRot::ZYX, self.yaw, self.pitch, self.roll)
    }
}

/// A rigid pose: position plus unit-quaternion orientation.
///
/// Immutable once built; world poses are always derived by [`Pose::compose`]
/// from the chain of ancestor frames, never stored redundantly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    /// Position in the parent frame.
    pub position: DVec3,
    /// Orientation in the parent frame.
    pub rotation: DQuat,
}

impl Pose {
    /// The identity pose.
    pub const IDENTITY: Pose = Pose {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    /// Build from a position and orientation.
    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// Rigid-transform composition: `local` expressed in the frame already
    /// offset and rotated by `self`.
    ///
    /// The local translation is rotated by the parent rotation and added to
    /// the parent translation; rotations multiply in parent-then-local order.
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * local.position,
            rotation: (self.rotation * local.rotation).normalize(),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A component's local frame as authored: position plus Euler angles.
///
/// The Euler form is kept alongside the derived quaternion because port
/// promotion works on the yaw component alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Position in the parent frame.
    pub position: DVec3,
    /// Orientation in the parent frame.
    pub rpy: Rpy,
}

impl Frame {
    /// The identity frame.
    pub const IDENTITY: Frame = Frame {
        position: DVec3::ZERO,
        rpy: Rpy::ZERO,
    };

    /// Build from a position and Euler angles.
    pub fn new(position: DVec3, rpy: Rpy) -> Self {
        Self { position, rpy }
    }

    /// A frame on the ground plane: xy position plus a heading.
    pub fn planar(at: Point, yaw: f64) -> Self {
        Self {
            position: DVec3::new(at.x, at.y, 0.0),
            rpy: Rpy::yaw(yaw),
        }
    }

    /// The equivalent rigid pose.
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: self.rpy.quat(),
        }
    }
}
