use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;
use kurbo::{Point, Vec2};

use super::*;
use crate::foundation::units::{SX, SY, SZ};
use crate::geometry::pose::Rpy;
use crate::physics::RecordingWorld;
use crate::runs::single::{Block, Target};

fn block() -> Component {
    Block::new(DVec3::new(0.0, 0.0, SZ / 2.0), Rpy::ZERO)
}

#[test]
fn indexed_keys_order_before_named_keys() {
    let mut keys = vec![
        ChildKey::from("alpha"),
        ChildKey::from(2_usize),
        ChildKey::from("0"),
        ChildKey::from(0_usize),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            ChildKey::from(0_usize),
            ChildKey::from(2_usize),
            ChildKey::from("0"),
            ChildKey::from("alpha"),
        ]
    );
}

#[test]
fn lookup_prefers_children_over_ports() {
    let mut parent = Component::root();
    parent.insert("x", block()).unwrap();
    parent.add_port("x", Port::at(1.0, 0.0, 0.0)).unwrap();
    parent.add_port("p", Port::at(0.0, 1.0, 0.0)).unwrap();
    assert!(matches!(parent.lookup("x").unwrap(), Resolved::Child(_)));
    assert!(matches!(parent.lookup("p").unwrap(), Resolved::Port(_)));
    let err = parent.lookup("missing").unwrap_err();
    assert!(matches!(err, crate::foundation::error::ToppleError::KeyNotFound(_)));
}

#[test]
fn promote_through_an_identity_frame_is_the_identity() {
    let mut child = Component::root();
    let port = Port::at(0.3, -0.7, 1.2);
    child.add_port("out", port).unwrap();
    let promoted = child.promote("out").unwrap();
    assert_eq!(promoted, port);
}

#[test]
fn promote_rotates_and_translates_into_the_parent_frame() {
    let mut child = Component::planar(Point::new(1.0, 0.0), FRAC_PI_2);
    child.add_port("out", Port::at(1.0, 0.0, 0.0)).unwrap();
    let promoted = child.promote("out").unwrap();
    assert!((promoted.offset.x - 1.0).abs() < 1e-12);
    assert!((promoted.offset.y - 1.0).abs() < 1e-12);
    assert!((promoted.heading - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn promote_composes_across_two_levels() {
    let mut inner = Component::planar(Point::new(0.5, 0.0), PI);
    inner.add_port("out", Port::at(0.5, 0.0, 0.0)).unwrap();
    let mut outer = Component::planar(Point::new(0.0, 1.0), 0.0);
    outer.insert("inner", inner).unwrap();
    let once = outer.promoted("inner", "out").unwrap();
    assert!((once.offset.x - 0.0).abs() < 1e-12);
    assert!((once.heading - PI).abs() < 1e-12);
    // Lifting the intermediate port through the outer frame as well.
    outer.add_port("relay", once).unwrap();
    let twice = outer.promote("relay").unwrap();
    assert!((twice.offset.y - 1.0).abs() < 1e-12);
}

#[test]
fn id_on_a_multi_child_group_is_ambiguous() {
    let mut parent = Component::root();
    parent.insert("a", block()).unwrap();
    parent.insert("b", block()).unwrap();
    assert!(matches!(
        parent.id().unwrap_err(),
        crate::foundation::error::ToppleError::AmbiguousLookup(_)
    ));
    assert!(parent.id_of("a").is_ok());
}

#[test]
fn create_is_idempotent_and_keeps_handles_stable() {
    let mut parent = Component::planar(Point::new(0.2, 0.0), 0.0);
    for i in 0..3 {
        parent.insert(i, block()).unwrap();
    }
    let mut world = RecordingWorld::new();
    parent.create(&mut world).unwrap();
    assert_eq!(world.len(), 3);
    let first = parent.all_ids();

    parent.create(&mut world).unwrap();
    assert_eq!(world.len(), 3, "second create must not add bodies");
    assert_eq!(parent.all_ids(), first);
    assert!(parent.is_created());
}

#[test]
fn primitive_blocks_reject_children() {
    let mut leaf = block();
    assert!(matches!(
        leaf.insert("x", block()).unwrap_err(),
        crate::foundation::error::ToppleError::Validation(_)
    ));
    assert_eq!(leaf.child_count(), 0);
}

#[test]
fn created_trees_are_frozen() {
    let mut parent = Component::root();
    parent.insert("a", block()).unwrap();
    parent.create(&mut RecordingWorld::new()).unwrap();
    assert!(parent.insert("b", block()).is_err());
    assert!(parent.add_port("p", Port::at(0.0, 0.0, 0.0)).is_err());
}

#[test]
fn all_ids_follow_depth_first_key_order() {
    let mut inner = Component::root();
    inner.insert(0, block()).unwrap();
    inner.insert(1, block()).unwrap();
    let mut parent = Component::root();
    parent.insert(5, block()).unwrap();
    parent.insert("named", inner).unwrap();
    let mut world = RecordingWorld::new();
    parent.create(&mut world).unwrap();
    // Index 5 creates before the named subtree.
    let ids: Vec<u64> = parent.all_ids().iter().map(|h| h.0).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(parent.start_id().unwrap().0, 0);
    assert_eq!(parent.end_id().unwrap().0, 0, "only one indexed child");
}

#[test]
fn placements_compose_position_and_yaw() {
    let mut parent = Component::planar(Point::new(1.0, 2.0), FRAC_PI_2);
    parent.insert(0, block()).unwrap();
    let placements = parent.placements(&Pose::IDENTITY);
    assert_eq!(placements.len(), 1);
    let p = &placements[0].pose.position;
    assert!((p.x - 1.0).abs() < 1e-12);
    assert!((p.y - 2.0).abs() < 1e-12);
    assert!((p.z - SZ / 2.0).abs() < 1e-12);
}

#[test]
fn placements_match_created_poses() {
    let mut parent = Component::planar(Point::new(0.3, -0.1), 0.7);
    parent.insert("a", Block::new(DVec3::new(SX, SY, SZ), Rpy::yaw(0.2))).unwrap();
    let expected = parent.placements(&Pose::IDENTITY);
    let mut world = RecordingWorld::new();
    parent.create(&mut world).unwrap();
    assert_eq!(world.len(), expected.len());
    for (recorded, placement) in world.bodies().iter().zip(&expected) {
        assert!((recorded.pose.position - placement.pose.position).length() < 1e-12);
    }
}

#[test]
fn connect_names_the_bridge_after_its_endpoints() {
    let mut scene = Component::root();
    scene.insert("from", Target::new(Point::ZERO, PI).unwrap()).unwrap();
    scene.insert("to", Target::new(Point::new(0.8, 0.0), PI).unwrap()).unwrap();
    let key = scene.connect("from", "in", "to", "in", None).unwrap();
    assert_eq!(key, ChildKey::from("from_in_to_to_in"));
    let bridge = scene.child(key).unwrap();
    assert!(bridge.child_count() >= 2);
}

#[test]
fn connect_named_places_blocks_near_both_ports() {
    let mut scene = Component::root();
    scene.insert("from", Target::new(Point::ZERO, PI).unwrap()).unwrap();
    scene.insert("to", Target::new(Point::new(1.0, 0.4), PI).unwrap()).unwrap();
    let start = scene.promoted("from", "in").unwrap();
    let end = scene.promoted("to", "in").unwrap();
    scene.connect_named("bridge", "from", "in", "to", "in", None).unwrap();
    let placements = scene.child("bridge").unwrap().placements(&Pose::IDENTITY);
    let first = placements.first().unwrap().pose.position;
    let last = placements.last().unwrap().pose.position;
    assert!(Vec2::new(first.x - start.offset.x, first.y - start.offset.y).hypot() < 1e-9);
    assert!(Vec2::new(last.x - end.offset.x, last.y - end.offset.y).hypot() < SZ);
}
