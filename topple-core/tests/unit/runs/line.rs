use super::*;
use crate::geometry::pose::Pose;

use proptest::prelude::*;

#[test]
fn unit_span_with_tenth_spacing_places_eleven_blocks() {
    let line = Line::new(
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        LineOptions {
            spacing: Some(0.1),
            ..LineOptions::default()
        },
    )
    .unwrap();
    let placements = line.placements(&Pose::IDENTITY);
    assert_eq!(placements.len(), 11);
    for (i, p) in placements.iter().enumerate() {
        assert!((p.pose.position.x - i as f64 * 0.1).abs() < 1e-12);
        assert!((p.pose.position.z - SZ / 2.0).abs() < 1e-12);
    }
}

#[test]
fn excluded_endpoints_drop_the_flush_blocks() {
    let options = |contain| LineOptions {
        contain,
        spacing: Some(0.1),
        ..LineOptions::default()
    };
    let span = (Point::new(0.0, 0.0), Point::new(0.5, 0.0));

    let both = Line::new(span.0, span.1, options((true, true))).unwrap();
    assert_eq!(both.placements(&Pose::IDENTITY).len(), 6);

    let open_start = Line::new(span.0, span.1, options((false, true))).unwrap();
    let placements = open_start.placements(&Pose::IDENTITY);
    assert_eq!(placements.len(), 5);
    assert!((placements[0].pose.position.x - 0.1).abs() < 1e-12);

    let open_both = Line::new(span.0, span.1, options((false, false))).unwrap();
    assert_eq!(open_both.placements(&Pose::IDENTITY).len(), 4);
}

#[test]
fn spacing_snaps_to_divide_the_span_exactly() {
    // 1.0 / 0.3 rounds to 3 intervals of 1/3.
    let line = Line::new(
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        LineOptions {
            spacing: Some(0.3),
            ..LineOptions::default()
        },
    )
    .unwrap();
    let placements = line.placements(&Pose::IDENTITY);
    assert_eq!(placements.len(), 4);
    assert!((placements[3].pose.position.x - 1.0).abs() < 1e-12);
}

#[test]
fn side_lines_lie_low_and_respace_by_width() {
    let line = Line::new(
        Point::new(0.0, 0.0),
        Point::new(0.4, 0.0),
        LineOptions {
            side: true,
            ..LineOptions::default()
        },
    )
    .unwrap();
    for p in line.placements(&Pose::IDENTITY) {
        assert!((p.pose.position.z - SY / 2.0).abs() < 1e-12);
    }
}

#[test]
fn diagonal_lines_inherit_the_span_heading() {
    let line = Line::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), LineOptions::default())
        .unwrap();
    let yaw = line.local_frame().rpy.yaw;
    assert!((yaw - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
}

#[test]
fn degenerate_spans_are_rejected() {
    assert!(Line::new(Point::ZERO, Point::ZERO, LineOptions::default()).is_err());
    let zero_spacing = LineOptions {
        spacing: Some(0.0),
        ..LineOptions::default()
    };
    assert!(Line::new(Point::ZERO, Point::new(1.0, 0.0), zero_spacing).is_err());
}

#[test]
fn ports_sit_one_block_width_past_each_end() {
    let line = Line::new(
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        LineOptions {
            spacing: Some(0.1),
            ..LineOptions::default()
        },
    )
    .unwrap();
    assert_eq!(line.port("in").unwrap().offset.x, -SY);
    assert!((line.port("out").unwrap().offset.x - (1.0 + SY)).abs() < 1e-12);
}

proptest! {
    #[test]
    fn blocks_are_always_equally_spaced(
        length in 0.2_f64..5.0,
        spacing in 0.04_f64..0.2,
    ) {
        let line = Line::new(
            Point::new(0.0, 0.0),
            Point::new(length, 0.0),
            LineOptions { spacing: Some(spacing), ..LineOptions::default() },
        )
        .unwrap();
        let placements = line.placements(&Pose::IDENTITY);
        prop_assert!(placements.len() >= 2);
        let interval = placements[1].pose.position.x - placements[0].pose.position.x;
        for pair in placements.windows(2) {
            let step = pair[1].pose.position.x - pair[0].pose.position.x;
            prop_assert!((step - interval).abs() < 1e-9);
        }
        // The snapped interval never drifts far from the request.
        prop_assert!((interval - spacing).abs() <= spacing / 2.0 + 1e-9);
    }
}
