//! Procedural layout engine for domino-run chain reactions.
//!
//! The library builds a tree of [`Component`]s: primitive blocks, generated
//! runs (straight lines, curvature-constrained curves, piles), and composite
//! mechanisms (triggers, branches, gates, a crossing). A component is pure
//! geometry until [`Component::create`] materializes it into a
//! [`PhysicsWorld`] implementation supplied by the caller; everything before
//! that point is deterministic and replayable.
//!
//! Components declare named planar [`Port`]s as attachment points.
//! [`Component::promote`] lifts a port into the parent frame and
//! [`Component::connect`] bridges two ports with a minimum-curvature Bezier
//! chain, which is how scenes are wired together.
//!
//! ```
//! use kurbo::Point;
//! use topple::{Component, LeanTrigger, Target};
//!
//! # fn main() -> topple::ToppleResult<()> {
//! let mut scene = Component::root();
//! scene.insert("trigger", LeanTrigger::new(Point::ZERO, 0.0)?)?;
//! scene.insert("target", Target::new(Point::new(0.6, 0.3), 1.0)?)?;
//! scene.connect("trigger", "out", "target", "in", None)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composition;
mod curve;
mod foundation;
mod geometry;
mod mechanisms;
mod physics;
mod runs;

pub use composition::component::{ChildKey, Component, Placement, Port, Resolved};
pub use curve::bezier::{
    control_points, discrete_curvature, sample, DEGENERATE_CURVATURE, SAMPLE_COUNT,
};
pub use curve::search::{search_min_curvature, CurveFit, BRACKET_TOLERANCE};
pub use foundation::error::{ToppleError, ToppleResult};
pub use foundation::units;
pub use geometry::pose::{Frame, Pose, Rpy};
pub use mechanisms::branches::{MultiBranch, SideBranch, UTurn};
pub use mechanisms::crossing::{crossing_contact_angle, Crossing};
pub use mechanisms::fast::FastPropagation;
pub use mechanisms::gates::{AndGate, ConditionGate, OrGate};
pub use mechanisms::triggers::{EdgeTrigger, LeanTrigger, TapButton};
pub use physics::{BlockDynamics, BodyHandle, PhysicsWorld, RecordedBody, RecordingWorld};
pub use runs::curve::Curve;
pub use runs::line::{Line, LineOptions};
pub use runs::pile::Pile;
pub use runs::single::{Block, Orientation, Target};
