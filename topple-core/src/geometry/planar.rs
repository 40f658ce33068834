use kurbo::Point;

/// Affine blend weighting the *first* point by `t`: `p1 * t + p2 * (1 - t)`.
///
/// `t` outside `[0, 1]` extrapolates, which the curve generator uses to
/// extend a sampled polyline slightly past its endpoints.
pub(crate) fn blend(p1: Point, p2: Point, t: f64) -> Point {
    Point::new(p1.x * t + p2.x * (1.0 - t), p1.y * t + p2.y * (1.0 - t))
}

/// Heading of the segment from `from` to `to`, in radians.
pub(crate) fn heading(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}
