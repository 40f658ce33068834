use std::collections::BTreeMap;
use std::fmt;

use glam::DVec3;
use kurbo::Vec2;

use crate::foundation::error::{ToppleError, ToppleResult};
use crate::foundation::units::{BLOCK_HALF_EXTENTS, BLOCK_MASS};
use crate::geometry::pose::{Frame, Pose};
use crate::physics::{BlockDynamics, BodyHandle, PhysicsWorld};

/// Key of a child within one component: a positional index for generated
/// sequences (lines, curves, piles) or a name for hand-assembled parts.
///
/// Indices order before names, so `all_ids` walks generated sequences in
/// placement order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum ChildKey {
    /// Positional key used by line/curve/pile sequences.
    Index(usize),
    /// Named key used by composite assemblies.
    Name(String),
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildKey::Index(i) => write!(f, "{i}"),
            ChildKey::Name(s) => f.write_str(s),
        }
    }
}

impl From<usize> for ChildKey {
    fn from(i: usize) -> Self {
        ChildKey::Index(i)
    }
}

impl From<&str> for ChildKey {
    fn from(s: &str) -> Self {
        ChildKey::Name(s.to_string())
    }
}

impl From<String> for ChildKey {
    fn from(s: String) -> Self {
        ChildKey::Name(s)
    }
}

/// A named attachment point, in the declaring component's local frame.
///
/// Ports are planar by contract: an xy offset plus an outward heading about
/// the vertical axis. Height is resolved per primitive block, never carried
/// through the port algebra.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Port {
    /// Attachment point offset from the local origin.
    pub offset: Vec2,
    /// Outward-facing heading, in radians.
    pub heading: f64,
}

impl Port {
    /// Build from an offset and heading.
    pub fn new(offset: Vec2, heading: f64) -> Self {
        Self { offset, heading }
    }

    /// Build from offset coordinates and a heading.
    pub fn at(x: f64, y: f64, heading: f64) -> Self {
        Self {
            offset: Vec2::new(x, y),
            heading,
        }
    }
}

/// Result of a single-name lookup, resolved by the caller based on the
/// expected use-site type.
#[derive(Clone, Copy, Debug)]
pub enum Resolved<'a> {
    /// The name matched a child component.
    Child(&'a Component),
    /// The name matched a port.
    Port(Port),
}

#[derive(Clone, Debug)]
enum Kind {
    Group,
    Block {
        dynamics: BlockDynamics,
        body: BodyHandle,
    },
}

/// World pose and physical parameters of one block, produced by the pure
/// placement pass ([`Component::placements`]).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Placement {
    /// World pose of the block.
    pub pose: Pose,
    /// Collider half extents.
    pub half_extents: DVec3,
    /// Body mass.
    pub mass: f64,
    /// Dynamics overrides.
    pub dynamics: BlockDynamics,
}

/// A node in the layout tree: either a primitive block or a container that
/// owns children and declares ports.
///
/// A component is pure geometry until [`Component::create`] materializes its
/// subtree into a [`PhysicsWorld`], exactly once. After creation the tree is
/// structurally frozen; only handle queries remain valid.
#[derive(Clone, Debug)]
pub struct Component {
    local: Frame,
    kind: Kind,
    children: BTreeMap<ChildKey, Component>,
    ports: BTreeMap<String, Port>,
    created: bool,
}

impl Component {
    /// A container at the identity frame, the usual top-level root.
    pub fn root() -> Self {
        Self::group(Frame::IDENTITY)
    }

    /// A container at an arbitrary local frame.
    pub fn group(local: Frame) -> Self {
        Self {
            local,
            kind: Kind::Group,
            children: BTreeMap::new(),
            ports: BTreeMap::new(),
            created: false,
        }
    }

    /// A container on the ground plane: xy position plus heading.
    pub fn planar(at: kurbo::Point, yaw: f64) -> Self {
        Self::group(Frame::planar(at, yaw))
    }

    pub(crate) fn leaf(local: Frame, dynamics: BlockDynamics) -> Self {
        Self {
            local,
            kind: Kind::Block {
                dynamics,
                body: BodyHandle::INVALID,
            },
            children: BTreeMap::new(),
            ports: BTreeMap::new(),
            created: false,
        }
    }

    /// This component's local frame relative to its parent.
    pub fn local_frame(&self) -> Frame {
        self.local
    }

    /// Whether this component is a primitive block.
    pub fn is_block(&self) -> bool {
        matches!(self.kind, Kind::Block { .. })
    }

    /// Whether [`Component::create`] has run on this subtree.
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Insert (or replace) a child under the given key.
    ///
    /// Fails on a primitive block (only containers nest) and once the
    /// subtree has been created: the tree is frozen after materialization.
    pub fn insert(
        &mut self,
        key: impl Into<ChildKey>,
        child: Component,
    ) -> ToppleResult<&mut Self> {
        if self.is_block() {
            return Err(ToppleError::validation(
                "cannot insert a child under a primitive block",
            ));
        }
        if self.created {
            return Err(ToppleError::validation(
                "cannot insert a child into an already-created component",
            ));
        }
        self.children.insert(key.into(), child);
        Ok(self)
    }

    /// Declare (or replace) a port under the given name.
    pub fn add_port(&mut self, name: impl Into<String>, port: Port) -> ToppleResult<&mut Self> {
        if self.created {
            return Err(ToppleError::validation(
                "cannot add a port to an already-created component",
            ));
        }
        self.ports.insert(name.into(), port);
        Ok(self)
    }

    /// Materialize this subtree at the world origin. See [`Component::create_at`].
    pub fn create(&mut self, world: &mut dyn PhysicsWorld) -> ToppleResult<()> {
        self.create_at(world, &Pose::IDENTITY)
    }

    /// Materialize this subtree, composing `base` with each local frame
    /// top-down and instantiating one box body per primitive block.
    ///
    /// Idempotent: a second call on an already-created subtree is a no-op and
    /// leaves every handle unchanged.
    #[tracing::instrument(level = "debug", skip(self, world, base))]
    pub fn create_at(&mut self, world: &mut dyn PhysicsWorld, base: &Pose) -> ToppleResult<()> {
        if self.created {
            return Ok(());
        }
        let pose = base.compose(&self.local.pose());
        if let Kind::Block { dynamics, body } = &mut self.kind {
            *body = world.create_box_body(BLOCK_HALF_EXTENTS, BLOCK_MASS, pose, *dynamics)?;
            tracing::trace!(handle = body.0, "created block body");
        }
        for child in self.children.values_mut() {
            child.create_at(world, &pose)?;
        }
        self.created = true;
        Ok(())
    }

    /// Compute the world pose of every block in this subtree without
    /// touching a physics world. Pure; may be called before or after
    /// creation, any number of times.
    pub fn placements(&self, base: &Pose) -> Vec<Placement> {
        let mut out = Vec::new();
        self.collect_placements(base, &mut out);
        out
    }

    fn collect_placements(&self, base: &Pose, out: &mut Vec<Placement>) {
        let pose = base.compose(&self.local.pose());
        if let Kind::Block { dynamics, .. } = &self.kind {
            out.push(Placement {
                pose,
                half_extents: BLOCK_HALF_EXTENTS,
                mass: BLOCK_MASS,
                dynamics: *dynamics,
            });
        }
        for child in self.children.values() {
            child.collect_placements(&pose, out);
        }
    }

    /// Resolve a name to a child or, failing that, a port.
    pub fn lookup(&self, name: &str) -> ToppleResult<Resolved<'_>> {
        if let Some(child) = self.children.get(&ChildKey::Name(name.to_string())) {
            return Ok(Resolved::Child(child));
        }
        if let Some(port) = self.ports.get(name) {
            return Ok(Resolved::Port(*port));
        }
        Err(ToppleError::key_not_found(name))
    }

    /// Child component by key.
    pub fn child(&self, key: impl Into<ChildKey>) -> ToppleResult<&Component> {
        let key = key.into();
        self.children
            .get(&key)
            .ok_or_else(|| ToppleError::key_not_found(key.to_string()))
    }

    /// Port descriptor by name, in this component's local frame.
    pub fn port(&self, name: &str) -> ToppleResult<Port> {
        self.ports
            .get(name)
            .copied()
            .ok_or_else(|| ToppleError::key_not_found(name))
    }

    /// Physics-body handle of this component.
    ///
    /// For a primitive block this is its own handle (the invalid sentinel
    /// before creation). For a container it delegates to its only child;
    /// anything other than exactly one child is an ambiguous default lookup.
    pub fn id(&self) -> ToppleResult<BodyHandle> {
        match &self.kind {
            Kind::Block { body, .. } => Ok(*body),
            Kind::Group => {
                if self.children.len() != 1 {
                    return Err(ToppleError::ambiguous(format!(
                        "id() without a key requires exactly one child, found {}",
                        self.children.len()
                    )));
                }
                self.children
                    .values()
                    .next()
                    .ok_or_else(|| ToppleError::ambiguous("id() on an empty component"))?
                    .id()
            }
        }
    }

    /// Physics-body handle of the child under `key`.
    pub fn id_of(&self, key: impl Into<ChildKey>) -> ToppleResult<BodyHandle> {
        self.child(key)?.id()
    }

    /// Handle of the first indexed child (start of a generated sequence).
    pub fn start_id(&self) -> ToppleResult<BodyHandle> {
        self.indexed_edge(true)
    }

    /// Handle of the last indexed child (end of a generated sequence).
    pub fn end_id(&self) -> ToppleResult<BodyHandle> {
        self.indexed_edge(false)
    }

    fn indexed_edge(&self, first: bool) -> ToppleResult<BodyHandle> {
        let mut indexed = self
            .children
            .iter()
            .filter(|(k, _)| matches!(k, ChildKey::Index(_)));
        let picked = if first {
            indexed.next()
        } else {
            indexed.next_back()
        };
        picked
            .map(|(_, c)| c.id())
            .ok_or_else(|| ToppleError::key_not_found("no indexed children"))?
    }

    /// Flattened handles of every block in this subtree, depth-first in
    /// child key order.
    pub fn all_ids(&self) -> Vec<BodyHandle> {
        match &self.kind {
            Kind::Block { body, .. } => vec![*body],
            Kind::Group => self
                .children
                .values()
                .flat_map(|c| c.all_ids())
                .collect(),
        }
    }

    /// Project a port declared on this component one level outward, into the
    /// parent's frame.
    ///
    /// The port's bearing from the local origin is rotated by this
    /// component's yaw and re-anchored at its xy offset; the heading picks up
    /// the yaw. Only yaw participates: ports are planar.
    pub fn promote(&self, name: &str) -> ToppleResult<Port> {
        let port = self.port(name)?;
        let distance = port.offset.hypot();
        let bearing = port.offset.y.atan2(port.offset.x);
        let yaw = self.local.rpy.yaw;
        let offset = Vec2::new(
            self.local.position.x + distance * (bearing + yaw).cos(),
            self.local.position.y + distance * (bearing + yaw).sin(),
        );
        Ok(Port {
            offset,
            heading: port.heading + yaw,
        })
    }

    /// A child's port promoted one level into this component's frame.
    ///
    /// Chaining this per ancestor level is how a deeply nested port is lifted
    /// to the frame where a connection is built.
    pub fn promoted(&self, child: impl Into<ChildKey>, port: &str) -> ToppleResult<Port> {
        self.child(child)?.promote(port)
    }

    /// Bridge two children's ports with a curvature-constrained chain,
    /// inserted as a new child auto-named `"{child1}_{port1}_to_{child2}_{port2}"`.
    ///
    /// Returns the key of the inserted bridge.
    pub fn connect(
        &mut self,
        child1: impl Into<ChildKey>,
        port1: &str,
        child2: impl Into<ChildKey>,
        port2: &str,
        spacing: Option<f64>,
    ) -> ToppleResult<ChildKey> {
        let (k1, k2) = (child1.into(), child2.into());
        let name = format!("{k1}_{port1}_to_{k2}_{port2}");
        self.connect_named(name, k1, port1, k2, port2, spacing)
    }

    /// [`Component::connect`] with an explicit name for the bridge child.
    pub fn connect_named(
        &mut self,
        name: impl Into<String>,
        child1: impl Into<ChildKey>,
        port1: &str,
        child2: impl Into<ChildKey>,
        port2: &str,
        spacing: Option<f64>,
    ) -> ToppleResult<ChildKey> {
        let start = self.promoted(child1, port1)?;
        let end = self.promoted(child2, port2)?;
        let bridge = crate::runs::curve::Curve::between(start, end, spacing)?;
        let key = ChildKey::Name(name.into());
        self.insert(key.clone(), bridge)?;
        Ok(key)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/component.rs"]
mod tests;
