use crate::foundation::core::{BezPath, Point};

/// Smooths a closed polygon into quadratic segments through edge midpoints.
///
/// The path starts at the midpoint of the last and first points, then for every point emits a
/// quadratic with that point as control and the midpoint to its successor as end. The curve
/// passes near, not through, each point. Returns an empty path for no points.
pub fn midpoint_quad_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let n = points.len();
    if n == 0 {
        return path;
    }

    path.move_to(points[n - 1].midpoint(points[0]));
    for (i, &ctrl) in points.iter().enumerate() {
        let next = points[(i + 1) % n];
        path.quad_to(ctrl, ctrl.midpoint(next));
    }
    path.close_path();
    path
}

/// First anchor and last segment end of a path, if it has both.
pub fn path_endpoints(path: &BezPath) -> Option<(Point, Point)> {
    use kurbo::PathEl;

    let mut first = None;
    let mut last = None;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                if first.is_none() {
                    first = Some(p);
                }
                last = Some(p);
            }
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => last = Some(p),
            PathEl::ClosePath => {}
        }
    }
    Some((first?, last?))
}
