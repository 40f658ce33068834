//! The narrow boundary to an external rigid-body physics engine.
//!
//! The core never steps a simulation. It materializes a component tree by
//! asking a [`PhysicsWorld`] for one box body per primitive block, then
//! retains the returned handles for identity and sequencing queries.

use glam::DVec3;

use crate::foundation::error::ToppleResult;
use crate::geometry::pose::Pose;

/// Opaque identifier of one rigid body owned by the physics collaborator.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BodyHandle(pub u64);

impl BodyHandle {
    /// Sentinel for a block that has not been materialized yet.
    pub const INVALID: BodyHandle = BodyHandle(u64::MAX);

    /// Whether this handle refers to a created body.
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Per-block dynamics overrides applied at materialization time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockDynamics {
    /// Lateral friction coefficient.
    pub friction: f64,
    /// Restitution (bounciness).
    pub restitution: f64,
}

impl Default for BlockDynamics {
    fn default() -> Self {
        Self {
            friction: crate::foundation::units::DEFAULT_FRICTION,
            restitution: crate::foundation::units::DEFAULT_RESTITUTION,
        }
    }
}

/// Contract the core consumes from the physics engine.
pub trait PhysicsWorld {
    /// Instantiate one rigid box and return its handle.
    fn create_box_body(
        &mut self,
        half_extents: DVec3,
        mass: f64,
        pose: Pose,
        dynamics: BlockDynamics,
    ) -> ToppleResult<BodyHandle>;
}

/// One body instantiation captured by [`RecordingWorld`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RecordedBody {
    /// Handle assigned to the body.
    pub handle: BodyHandle,
    /// Collider half extents.
    pub half_extents: DVec3,
    /// Body mass.
    pub mass: f64,
    /// World pose at creation.
    pub pose: Pose,
    /// Dynamics overrides at creation.
    pub dynamics: BlockDynamics,
}

/// A [`PhysicsWorld`] double that assigns sequential handles and records
/// every instantiation. Used by the test suite and by callers that want a
/// dry-run materialization without a simulator.
#[derive(Clone, Debug, Default)]
pub struct RecordingWorld {
    bodies: Vec<RecordedBody>,
}

impl RecordingWorld {
    /// An empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded instantiations, in creation order.
    pub fn bodies(&self) -> &[RecordedBody] {
        &self.bodies
    }

    /// Number of bodies created so far.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether no bodies have been created.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl PhysicsWorld for RecordingWorld {
    fn create_box_body(
        &mut self,
        half_extents: DVec3,
        mass: f64,
        pose: Pose,
        dynamics: BlockDynamics,
    ) -> ToppleResult<BodyHandle> {
        let handle = BodyHandle(self.bodies.len() as u64);
        self.bodies.push(RecordedBody {
            handle,
            half_extents,
            mass,
            pose,
            dynamics,
        });
        Ok(handle)
    }
}
