use kurbo::Point;

use crate::composition::component::Port;
use crate::geometry::planar::blend;

/// Number of interpolation steps when sampling a Bezier curve; the sampled
/// polyline has one more point than this.
pub const SAMPLE_COUNT: usize = 100;

/// Curvature assigned to a degenerate (zero-length) sample triple.
///
/// Effectively infinite: it loses the minimum-curvature search rather than
/// aborting it.
pub const DEGENERATE_CURVATURE: f64 = 1.0e100;

/// Control polygon of the cubic connecting two oriented endpoints, with both
/// inner control points pushed a shared `stretch` distance along the
/// endpoint tangents.
pub fn control_points(start: Port, end: Port, stretch: f64) -> [Point; 4] {
    let p0 = start.offset.to_point();
    let p3 = end.offset.to_point();
    let p1 = Point::new(
        p0.x + stretch * start.heading.cos(),
        p0.y + stretch * start.heading.sin(),
    );
    let p2 = Point::new(
        p3.x - stretch * end.heading.cos(),
        p3.y - stretch * end.heading.sin(),
    );
    [p0, p1, p2, p3]
}

/// Sample a Bezier curve of any order by repeated linear interpolation
/// (De Casteljau), producing a dense polyline from the first control point
/// to the last.
pub fn sample(control: &[Point]) -> Vec<Point> {
    (0..=SAMPLE_COUNT)
        .map(|i| {
            let t = 1.0 - i as f64 / SAMPLE_COUNT as f64;
            let mut points = control.to_vec();
            while points.len() > 1 {
                points = points
                    .windows(2)
                    .map(|pair| blend(pair[0], pair[1], t))
                    .collect();
            }
            points[0]
        })
        .collect()
}

/// Discrete curvature of three consecutive samples: four times the triangle
/// area over the product of the pairwise distances (Heron's formula).
pub fn discrete_curvature(a: Point, b: Point, c: Point) -> f64 {
    let d0 = a.distance(b);
    let d1 = b.distance(c);
    let d2 = c.distance(a);
    if d0 * d1 * d2 == 0.0 {
        return DEGENERATE_CURVATURE;
    }
    let s = (d0 + d1 + d2) / 2.0;
    let area = (s * (s - d0) * (s - d1) * (s - d2)).max(0.0).sqrt();
    4.0 * area / (d0 * d1 * d2)
}
