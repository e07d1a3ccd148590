//! Cubic Bezier fitting and splicing (§4.13), grounded on the
//! chord-length-parameterized least-squares fit in
//! `visioncortex::PathF64::to_svg`'s spline mode, adapted to this crate's
//! inflection/cumulative-angle splice rule and explicit handle retraction.

use crate::geom::PointF64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: PointF64,
    pub p1: PointF64,
    pub p2: PointF64,
    pub p3: PointF64,
}

fn bernstein(u: f64) -> (f64, f64, f64, f64) {
    let mu = 1.0 - u;
    (mu * mu * mu, 3.0 * mu * mu * u, 3.0 * mu * u * u, u * u * u)
}

fn chord_length_params(points: &[PointF64]) -> Vec<f64> {
    let n = points.len();
    let mut cum = vec![0.0; n];
    for i in 1..n {
        cum[i] = cum[i - 1] + points[i].sub(points[i - 1]).norm();
    }
    let total = *cum.last().unwrap();
    if total < 1e-10 {
        return (0..n).map(|i| i as f64 / (n - 1).max(1) as f64).collect();
    }
    cum.iter().map(|&c| c / total).collect()
}

fn straight_fallback(p0: PointF64, p3: PointF64) -> CubicBezier {
    let chord = p3.sub(p0);
    CubicBezier {
        p0,
        p1: p0.add(chord.scale(1.0 / 3.0)),
        p2: p0.add(chord.scale(2.0 / 3.0)),
        p3,
    }
}

/// Least-squares fit of P1/P2 with P0/P3 held fixed at the segment endpoints.
/// Falls back to the straight-line control points (1/3, 2/3 along the chord)
/// when the normal-equations determinant is too small to invert reliably,
/// or when fewer than 2 points are given.
fn fit_cubic(points: &[PointF64]) -> CubicBezier {
    if points.len() < 2 {
        let p0 = points.first().copied().unwrap_or_default();
        let p3 = points.last().copied().unwrap_or(p0);
        return straight_fallback(p0, p3);
    }
    let p0 = points[0];
    let p3 = *points.last().unwrap();

    let us = chord_length_params(points);
    let (mut c00, mut c01, mut c11) = (0.0, 0.0, 0.0);
    let mut x0 = PointF64::default();
    let mut x1 = PointF64::default();
    for (i, &u) in us.iter().enumerate() {
        let (b0, b1, b2, b3) = bernstein(u);
        c00 += b1 * b1;
        c01 += b1 * b2;
        c11 += b2 * b2;
        let rhs = points[i].sub(p0.scale(b0)).sub(p3.scale(b3));
        x0 = x0.add(rhs.scale(b1));
        x1 = x1.add(rhs.scale(b2));
    }

    let det = c00 * c11 - c01 * c01;
    if det.abs() < 1e-10 {
        return straight_fallback(p0, p3);
    }

    let p1 = PointF64::new(
        (x0.x * c11 - x1.x * c01) / det,
        (x0.y * c11 - x1.y * c01) / det,
    );
    let p2 = PointF64::new(
        (x1.x * c00 - x0.x * c01) / det,
        (x1.y * c00 - x0.y * c01) / det,
    );
    CubicBezier { p0, p1, p2, p3 }
}

fn signed_angle(v1: PointF64, v2: PointF64) -> f64 {
    let v1 = v1.normalize();
    let v2 = v2.normalize();
    let cross = v1.x * v2.y - v1.y * v2.x;
    let dot = v1.x * v2.x + v1.y * v2.y;
    cross.atan2(dot)
}

/// Signed turn at vertex `k` of a circular `path`: the signed angle from
/// edge `(k-1,k)` to edge `(k,k+1)`.
fn signed_turn(path: &[PointF64], k: usize) -> f64 {
    let n = path.len();
    let prev = path[(k + n - 1) % n];
    let cur = path[k];
    let next = path[(k + 1) % n];
    signed_angle(cur.sub(prev), next.sub(cur))
}

/// A vertex is a splice iff the sign of the turn flips relative to the
/// previous vertex's turn (an inflection), or the signed turn accumulated
/// since the last splice reaches `splice_threshold_rad` in magnitude.
fn find_splice_points(path: &[PointF64], splice_threshold_rad: f64) -> Vec<usize> {
    let n = path.len();
    if n < 3 {
        return vec![0];
    }
    let turns: Vec<f64> = (0..n).map(|k| signed_turn(path, k)).collect();
    let mut splices = Vec::new();
    let mut cumulative = 0.0;
    for i in 0..n {
        let prev_turn = turns[(i + n - 1) % n];
        let this_turn = turns[i];
        let sign_flip = prev_turn != 0.0 && this_turn != 0.0 && prev_turn.signum() != this_turn.signum();
        cumulative += this_turn;
        if sign_flip || cumulative.abs() >= splice_threshold_rad {
            splices.push(i);
            cumulative = 0.0;
        }
    }
    splices
}

fn choose_cuts(mut splices: Vec<usize>, n: usize) -> Vec<usize> {
    if splices.is_empty() {
        splices.push(0);
    }
    if splices.len() == 1 {
        splices.push((splices[0] + n / 2) % n);
    }
    splices.sort_unstable();
    splices.dedup();
    splices
}

fn extract_circular_segment(path: &[PointF64], start: usize, end: usize) -> Vec<PointF64> {
    if start <= end {
        path[start..=end].to_vec()
    } else {
        let mut v = path[start..].to_vec();
        v.extend_from_slice(&path[..=end]);
        v
    }
}

fn line_intersection(p0: PointF64, d0: PointF64, p1: PointF64, d1: PointF64) -> Option<(f64, f64)> {
    let denom = d0.x * d1.y - d0.y * d1.x;
    if denom.abs() < 1e-10 {
        return None;
    }
    let diff = p1.sub(p0);
    let t = (diff.x * d1.y - diff.y * d1.x) / denom;
    let s = (diff.x * d0.y - diff.y * d0.x) / denom;
    Some((t, s))
}

/// An S-turn is when `angle(D->A, A->B)` and `angle(A->B, B->C)` disagree in
/// sign. Retracts both handles to where the tangent lines (P0,P1) and
/// (P3,P2) cross; falls back to the handle midpoint if the lines coincide,
/// or leaves the curve untouched if they're merely parallel.
fn retract_s_turn(bez: CubicBezier) -> CubicBezier {
    let (a, b, c, d) = (bez.p0, bez.p1, bez.p2, bez.p3);
    let angle1 = signed_angle(a.sub(d), b.sub(a));
    let angle2 = signed_angle(b.sub(a), c.sub(b));
    if angle1 == 0.0 || angle2 == 0.0 || angle1.signum() == angle2.signum() {
        return bez;
    }

    let d0 = b.sub(a);
    let d1 = c.sub(d);
    match line_intersection(a, d0, d, d1) {
        Some((t, s)) => CubicBezier {
            p0: a,
            p1: a.add(d0.scale(t)),
            p2: d.add(d1.scale(s)),
            p3: d,
        },
        None => {
            let cross = d.sub(a).x * d0.y - d.sub(a).y * d0.x;
            if cross.abs() < 1e-10 {
                let mid = b.add(c).scale(0.5);
                CubicBezier { p0: a, p1: mid, p2: mid, p3: d }
            } else {
                bez
            }
        }
    }
}

/// Fits a closed polyline (no duplicated closing vertex) with a chain of
/// cubic Beziers, one per cut segment, always closing since cuts partition
/// the ring into a cycle.
pub fn fit_path(closed_path: &[PointF64], splice_threshold_rad: f64) -> Vec<CubicBezier> {
    let n = closed_path.len();
    if n < 2 {
        return Vec::new();
    }
    let splices = find_splice_points(closed_path, splice_threshold_rad);
    let cuts = choose_cuts(splices, n);

    let mut curves = Vec::with_capacity(cuts.len());
    for w in 0..cuts.len() {
        let start = cuts[w];
        let end = cuts[(w + 1) % cuts.len()];
        let segment = extract_circular_segment(closed_path, start, end);
        curves.push(retract_s_turn(fit_cubic(&segment)));
    }
    curves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_point_segment_is_straight_fallback() {
        let p0 = PointF64::new(0.0, 0.0);
        let p3 = PointF64::new(9.0, 0.0);
        let bez = fit_cubic(&[p0, p3]);
        assert_eq!(bez.p1, PointF64::new(3.0, 0.0));
        assert_eq!(bez.p2, PointF64::new(6.0, 0.0));
    }

    #[test]
    fn collinear_points_fall_back_to_straight_line() {
        let points = vec![
            PointF64::new(0.0, 0.0),
            PointF64::new(3.0, 0.0),
            PointF64::new(6.0, 0.0),
            PointF64::new(9.0, 0.0),
        ];
        let bez = fit_cubic(&points);
        assert!(bez.p1.y.abs() < 1e-9);
        assert!(bez.p2.y.abs() < 1e-9);
    }

    #[test]
    fn fit_preserves_segment_endpoints() {
        let points = vec![
            PointF64::new(0.0, 0.0),
            PointF64::new(2.0, 3.0),
            PointF64::new(5.0, 4.0),
            PointF64::new(8.0, 0.0),
        ];
        let bez = fit_cubic(&points);
        assert_eq!(bez.p0, points[0]);
        assert_eq!(bez.p3, points[3]);
    }

    #[test]
    fn retract_s_turn_leaves_normal_curve_untouched() {
        let bez = straight_fallback(PointF64::new(0.0, 0.0), PointF64::new(9.0, 0.0));
        let out = retract_s_turn(bez);
        assert_eq!(out, bez);
    }

    #[test]
    fn retract_s_turn_fixes_crossing_handles() {
        // Handles that swing to opposite sides of the chord before meeting
        // their endpoints: an S-turn that should get retracted.
        let bez = CubicBezier {
            p0: PointF64::new(0.0, 0.0),
            p1: PointF64::new(2.0, 5.0),
            p2: PointF64::new(3.0, -5.0),
            p3: PointF64::new(5.0, 0.0),
        };
        let out = retract_s_turn(bez);
        assert_ne!(out.p1, bez.p1);
        assert_ne!(out.p2, bez.p2);
    }

    #[test]
    fn no_splices_falls_back_to_a_cut_plus_its_opposite() {
        let cuts = choose_cuts(Vec::new(), 8);
        assert_eq!(cuts, vec![0, 4]);
    }

    #[test]
    fn single_splice_gets_an_opposite_cut_added() {
        let cuts = choose_cuts(vec![2], 8);
        assert_eq!(cuts, vec![2, 6]);
    }

    #[test]
    fn fit_path_of_a_square_closes_into_a_cycle() {
        let path = vec![
            PointF64::new(0.0, 0.0),
            PointF64::new(10.0, 0.0),
            PointF64::new(10.0, 10.0),
            PointF64::new(0.0, 10.0),
        ];
        let curves = fit_path(&path, 45f64.to_radians());
        assert!(!curves.is_empty());
        // last curve's endpoint reconnects to the first curve's start
        assert_eq!(curves.last().unwrap().p3, curves[0].p0);
    }

    #[test]
    fn extract_circular_segment_wraps_around() {
        let path = vec![
            PointF64::new(0.0, 0.0),
            PointF64::new(1.0, 0.0),
            PointF64::new(2.0, 0.0),
            PointF64::new(3.0, 0.0),
        ];
        let seg = extract_circular_segment(&path, 3, 1);
        assert_eq!(seg, vec![path[3], path[0], path[1]]);
    }
}
