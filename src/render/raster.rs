use crate::foundation::{
    core::{BezPath, Canvas, Point},
    error::RevealResult,
};

/// Radius of the helper dot drawn at each oscillator.
pub const HELPER_DOT_RADIUS: f64 = 3.0;

/// Fills `path` with a solid straight-alpha color and returns premultiplied RGBA8 bytes.
pub fn fill_path_rgba8(path: &BezPath, canvas: Canvas, rgba: [u8; 4]) -> RevealResult<Vec<u8>> {
    let (w, h) = canvas.as_u16()?;
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        rgba[0], rgba[1], rgba[2], rgba[3],
    ));
    ctx.fill_path(&bezpath_to_cpu(path));
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}

/// Union of small circles at `points`, one subpath each.
pub fn helper_dots(points: impl IntoIterator<Item = Point>) -> BezPath {
    use kurbo::Shape as _;

    let mut path = BezPath::new();
    for p in points {
        let circle = kurbo::Circle::new(p, HELPER_DOT_RADIUS);
        path.extend(circle.path_elements(0.1));
    }
    path
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
