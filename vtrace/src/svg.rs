//! Path emission (§4.14 polygon mode, §4.15 SVG assembly), grounded on
//! `visioncortex::PathF64::to_svg_string`'s coordinate formatting and the
//! flat multi-`<path>` document `vtracer` assembles from emitted layers.

use std::fmt::Write as _;

use crate::bezier::CubicBezier;
use crate::color::Color;
use crate::geom::PointI32;

fn fmt_coord(v: f64, precision: usize) -> String {
    format!("{:.*}", precision, v)
}

/// `M`/`L`/`Z` path data for a decimated integer polygon (no curve fitting).
pub fn polygon_path_data(points: &[PointI32], precision: usize) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(
            d,
            "{} {},{} ",
            cmd,
            fmt_coord(p.x as f64, precision),
            fmt_coord(p.y as f64, precision)
        );
    }
    d.push_str("Z ");
    d
}

/// `M`/`C`/`Z` path data for a chain of cubic Beziers, one per splice segment.
pub fn spline_path_data(curves: &[CubicBezier], precision: usize) -> String {
    let mut d = String::new();
    let Some(first) = curves.first() else {
        return d;
    };
    let _ = write!(
        d,
        "M {},{} ",
        fmt_coord(first.p0.x, precision),
        fmt_coord(first.p0.y, precision)
    );
    for c in curves {
        let _ = write!(
            d,
            "C {},{} {},{} {},{} ",
            fmt_coord(c.p1.x, precision),
            fmt_coord(c.p1.y, precision),
            fmt_coord(c.p2.x, precision),
            fmt_coord(c.p2.y, precision),
            fmt_coord(c.p3.x, precision),
            fmt_coord(c.p3.y, precision)
        );
    }
    d.push_str("Z ");
    d
}

/// One emitted cluster's compound path, possibly covering several
/// subpaths (outer boundary plus holes).
pub struct PathLayer {
    pub color: Color,
    pub subpaths: Vec<String>,
}

/// Assembles the final SVG document: XML declaration, `<svg>` wrapper sized
/// to the source image, one `<path>` per emitted layer in emission order
/// (bottom layer first, so later layers paint over earlier ones). Outer
/// shells are wound clockwise and holes counter-clockwise, so the default
/// nonzero fill rule already punches holes correctly; no `fill-rule`
/// attribute is needed.
pub fn assemble_svg(width: u32, height: u32, layers: &[PathLayer]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<svg version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">"
    );
    for layer in layers {
        if layer.subpaths.is_empty() {
            continue;
        }
        let d = layer.subpaths.join(" ");
        let _ = writeln!(out, "<path d=\"{}\" fill=\"{}\"/>", d, layer.color.to_hex());
    }
    out.push_str("</svg>\n");
    out
}
