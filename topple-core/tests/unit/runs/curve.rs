use std::f64::consts::{FRAC_PI_2, PI};

use super::*;
use crate::geometry::pose::Pose;

#[test]
fn straight_connection_spaces_blocks_evenly() {
    let curve = Curve::between(
        Port::at(0.0, 0.0, 0.0),
        Port::at(1.0, 0.0, 0.0),
        Some(0.1),
    )
    .unwrap();
    let placements = curve.placements(&Pose::IDENTITY);
    assert_eq!(placements.len(), 11);
    for (i, p) in placements.iter().enumerate() {
        assert!(
            (p.pose.position.x - i as f64 * 0.1).abs() < 1e-6,
            "block {i} at x={}",
            p.pose.position.x
        );
        assert!(p.pose.position.y.abs() < 1e-6);
        assert!((p.pose.position.z - SZ / 2.0).abs() < 1e-12);
    }
}

#[test]
fn straight_connection_keeps_headings_level() {
    let curve = Curve::between(Port::at(0.0, 0.0, 0.0), Port::at(1.0, 0.0, 0.0), None).unwrap();
    for i in 0..curve.child_count() {
        let yaw = curve.child(i).unwrap().local_frame().rpy.yaw;
        assert!(yaw.abs() < 1e-6, "block {i} yawed to {yaw}");
    }
}

#[test]
fn default_spacing_follows_the_interval_ratio() {
    let curve = Curve::between(Port::at(0.0, 0.0, 0.0), Port::at(1.0, 0.0, 0.0), None).unwrap();
    let expected = ((1.0 / (SZ / CURVE_INTERVAL_RATIO)).round() as usize + 1).max(2);
    assert_eq!(curve.child_count(), expected);
}

#[test]
fn first_block_sits_exactly_on_the_start_port() {
    let start = Port::at(0.3, -0.2, 1.1);
    let curve = Curve::between(start, Port::at(1.0, 0.5, 0.0), None).unwrap();
    let frame = curve.child(0_usize).unwrap().local_frame();
    assert!((frame.position.x - start.offset.x).abs() < 1e-9);
    assert!((frame.position.y - start.offset.y).abs() < 1e-9);
    // The first sampled segment leaves the start along its declared heading.
    assert!((frame.rpy.yaw - start.heading).abs() < 0.2);
}

#[test]
fn hairpin_return_ends_with_the_reversed_heading() {
    let curve = Curve::between(Port::at(0.0, 0.0, 0.0), Port::at(0.0, 0.3, PI), None).unwrap();
    let n = curve.child_count();
    assert!(n >= 4, "a hairpin needs room to turn, got {n} blocks");
    let last = curve.child(n - 1).unwrap().local_frame();
    // Modulo direction-insensitivity of a standing block.
    let deviation = (last.rpy.yaw - PI).abs().min((last.rpy.yaw + PI).abs());
    assert!(deviation < FRAC_PI_2);
}

#[test]
fn non_positive_spacing_is_rejected() {
    for bad in [0.0, -0.1] {
        let err = Curve::between(Port::at(0.0, 0.0, 0.0), Port::at(1.0, 0.0, 0.0), Some(bad))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::foundation::error::ToppleError::Validation(_)
        ));
    }
}

#[test]
fn opposite_heading_return_count_matches_arc_length() {
    // Same point, opposite headings: the path folds back on itself, and the
    // block count must still follow arc length over the default interval.
    let start = Port::at(0.0, 0.0, 0.0);
    let end = Port::at(0.0, 0.0, PI);
    let fit = search_min_curvature(start, end).unwrap();
    let total: f64 = fit
        .samples
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum();
    let spacing = SZ / CURVE_INTERVAL_RATIO;
    let expected = ((total / spacing).round() as usize + 1).max(2);

    let curve = Curve::between(start, end, None).unwrap();
    assert_eq!(curve.child_count(), expected);
}

#[test]
fn coincident_endpoints_degenerate_to_a_pair() {
    let at = Port::at(0.4, 0.4, 0.3);
    let curve = Curve::between(at, at, None).unwrap();
    assert_eq!(curve.child_count(), 2);
    for i in 0..2_usize {
        let frame = curve.child(i).unwrap().local_frame();
        assert!((frame.position.x - 0.4).abs() < 1e-9);
        assert!((frame.position.y - 0.4).abs() < 1e-9);
    }
}

#[test]
fn spacing_never_drifts_along_the_chain() {
    let curve = Curve::between(
        Port::at(0.0, 0.0, 0.0),
        Port::at(1.2, 0.8, FRAC_PI_2),
        None,
    )
    .unwrap();
    let placements = curve.placements(&Pose::IDENTITY);
    let gaps: Vec<f64> = placements
        .windows(2)
        .map(|pair| {
            let d = pair[1].pose.position - pair[0].pose.position;
            (d.x * d.x + d.y * d.y).sqrt()
        })
        .collect();
    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    for gap in &gaps {
        // Chord lengths vary slightly against arc length on tight bends.
        assert!((gap - mean).abs() < mean * 0.2, "gap {gap} vs mean {mean}");
    }
}
