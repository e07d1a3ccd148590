//! Staircase removal (§4.10) and penalty-bounded decimation (§4.11),
//! grounded on `visioncortex`'s path-simplification pass over a traced
//! boundary polyline.

use crate::geom::PointI32;

fn manhattan(a: PointI32, b: PointI32) -> i64 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as i64
}

/// Twice the signed area of triangle (a, b, c); positive iff a->b->c turns
/// clockwise in image coordinates (y down).
fn signed_area2(a: PointI32, b: PointI32, c: PointI32) -> i64 {
    (b.x - a.x) as i64 * (c.y - a.y) as i64 - (c.x - a.x) as i64 * (b.y - a.y) as i64
}

/// Removes single-pixel rasterization zigzags from a closed polyline while
/// always preserving the endpoints and any vertex between two genuinely long
/// edges. Among the remaining (short-edge) vertices, only those that turn
/// the same way as the overall traversal direction survive — the opposite
/// ones are exactly the staircase notches this pass exists to drop.
pub fn remove_staircases(path: &[PointI32], clockwise: bool) -> Vec<PointI32> {
    let n = path.len();
    if n <= 2 {
        return path.to_vec();
    }

    let mut keep = vec![true; n];
    for i in 1..n - 1 {
        let h = path[i - 1];
        let j = path[i + 1];
        let both_long = manhattan(h, path[i]) > 1 && manhattan(path[i], j) > 1;
        if both_long {
            continue;
        }
        let area = signed_area2(h, path[i], j);
        let sign_matches = if clockwise { area > 0 } else { area < 0 };
        if !sign_matches {
            keep[i] = false;
        }
    }

    path.iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}

fn dist(a: PointI32, b: PointI32) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Triangle area via Heron's formula on the three side lengths.
fn triangle_area(a: PointI32, b: PointI32, c: PointI32) -> f64 {
    let (ab, bc, ca) = (dist(a, b), dist(b, c), dist(c, a));
    let s = (ab + bc + ca) / 2.0;
    let sq = s * (s - ab) * (s - bc) * (s - ca);
    if sq <= 0.0 {
        0.0
    } else {
        sq.sqrt()
    }
}

/// `(triangleArea(a,b,c))^2 / |ac|`, zero if `|ac| < 1e-10`.
fn penalty(a: PointI32, b: PointI32, c: PointI32) -> f64 {
    let ac = dist(a, c);
    if ac < 1e-10 {
        return 0.0;
    }
    let area = triangle_area(a, b, c);
    (area * area) / ac
}

/// Greedy penalty-bounded decimation with fixed tolerance 1.0: extends a
/// segment from the last fixed vertex as far as possible before the worst
/// interior deviation would exceed tolerance, then fixes the vertex just
/// before the break. Always keeps the first and last vertex of `path`.
pub fn limit_penalties(path: &[PointI32], tolerance: f64) -> Vec<PointI32> {
    let n = path.len();
    if n <= 2 {
        return path.to_vec();
    }

    let mut result = vec![path[0]];
    let mut last = 0usize;
    for i in 1..n {
        let mut past_delta = 0.0f64;
        for &pk in &path[(last + 1)..i] {
            let p = penalty(path[last], pk, path[i]);
            if p > past_delta {
                past_delta = p;
            }
        }
        if past_delta > tolerance {
            result.push(path[i - 1]);
            last = i - 1;
        }
    }
    result.push(path[n - 1]);
    result
}
