//! Path smoothing: 4-point subdivision with corner preservation (§4.12).
//! Grounded on `visioncortex::PathF64::smooth`'s per-pass subdivision loop,
//! adapted to this crate's explicit corner/length-threshold gating.

use crate::geom::PointF64;

pub(crate) fn turning_angle(prev: PointF64, cur: PointF64, next: PointF64) -> f64 {
    let v1 = cur.sub(prev).normalize();
    let v2 = next.sub(cur).normalize();
    let cross = v1.x * v2.y - v1.y * v2.x;
    let dot = v1.x * v2.x + v1.y * v2.y;
    cross.atan2(dot).abs()
}

fn mark_corners(path: &[PointF64], threshold_rad: f64) -> Vec<bool> {
    let n = path.len();
    (0..n)
        .map(|i| {
            let prev = path[(i + n - 1) % n];
            let cur = path[i];
            let next = path[(i + 1) % n];
            turning_angle(prev, cur, next) >= threshold_rad
        })
        .collect()
}

fn dist(a: PointF64, b: PointF64) -> f64 {
    a.sub(b).norm()
}

/// One subdivision pass over `path`. Returns the new (possibly longer) path
/// and whether every insertion this pass landed within `length_threshold` of
/// both its endpoints (the early-termination signal).
fn subdivide_pass(path: &[PointF64], corners: &[bool], length_threshold: f64) -> (Vec<PointF64>, bool) {
    let n = path.len();
    let mut out = Vec::with_capacity(n * 2);
    let mut can_terminate = true;

    for i in 0..n {
        let j = (i + 1) % n;
        let p_i = path[i];
        let p_j = path[j];
        out.push(p_i);

        let edge_len = dist(p_i, p_j);
        if edge_len <= length_threshold {
            continue;
        }

        let prev_idx = (i + n - 1) % n;
        let next_idx = (j + 1) % n;

        let prev_edge_len = dist(path[prev_idx], p_i);
        let next_edge_len = dist(p_j, path[next_idx]);
        if prev_edge_len >= 2.0 * edge_len || next_edge_len >= 2.0 * edge_len {
            continue;
        }

        let mut prev_i = prev_idx;
        let mut next_i = next_idx;
        if corners[i] {
            prev_i = i;
        }
        if corners[j] {
            next_i = j;
        }
        if prev_i == i && next_i == j {
            continue;
        }

        let mid_out = p_i.add(p_j).scale(0.5);
        let mid_in = path[prev_i].add(path[next_i]).scale(0.5);
        let vec = mid_out.sub(mid_in);
        let norm = vec.norm();
        let new_point = if norm < 1e-10 {
            mid_out
        } else {
            mid_out.add(vec.normalize().scale(norm / 8.0))
        };

        if dist(new_point, p_i) > length_threshold || dist(new_point, p_j) > length_threshold {
            can_terminate = false;
        }
        out.push(new_point);
    }

    (out, can_terminate)
}

/// Runs up to `max_iterations` subdivision passes over a closed float
/// polyline, halting early once a full pass inserts nothing farther than
/// `length_threshold` from its edge's endpoints.
pub fn smooth(
    path: &[PointF64],
    corner_threshold_rad: f64,
    length_threshold: f64,
    max_iterations: u32,
) -> Vec<PointF64> {
    if path.len() < 3 {
        return path.to_vec();
    }
    let mut cur = path.to_vec();
    for _ in 0..max_iterations {
        let corners = mark_corners(&cur, corner_threshold_rad);
        let (next, can_terminate) = subdivide_pass(&cur, &corners, length_threshold);
        cur = next;
        if can_terminate {
            break;
        }
    }
    cur
}
