//! Corner-lattice boundary walking (§4.9), grounded on
//! `visioncortex::Cluster::to_compound_path`'s walker but rewritten against
//! this crate's own `BinaryImage`.
//!
//! Corners live one unit outside the pixel grid: corner `(x, y)` is the
//! top-left corner of pixel `(x, y)`. A boundary edge separates a filled
//! pixel from an unfilled (or out-of-bounds) one.

use crate::geom::PointI32;

use crate::binary::BinaryImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    N,
    E,
    S,
    W,
}

const CLOCKWISE: [Dir; 4] = [Dir::N, Dir::E, Dir::S, Dir::W];
const COUNTER_CLOCKWISE: [Dir; 4] = [Dir::W, Dir::S, Dir::E, Dir::N];

#[inline]
fn pixel(img: &BinaryImage, x: i32, y: i32) -> bool {
    if x < 0 || y < 0 {
        false
    } else {
        img.get(x as u32, y as u32)
    }
}

fn step(p: PointI32, d: Dir) -> PointI32 {
    match d {
        Dir::N => PointI32::new(p.x, p.y - 1),
        Dir::E => PointI32::new(p.x + 1, p.y),
        Dir::S => PointI32::new(p.x, p.y + 1),
        Dir::W => PointI32::new(p.x - 1, p.y),
    }
}

/// The edge leaving corner `p` in direction `d` is a boundary edge iff its
/// two flanking pixels differ.
fn is_boundary_edge(img: &BinaryImage, p: PointI32, d: Dir) -> bool {
    let (x, y) = (p.x, p.y);
    let (a, b) = match d {
        Dir::N => ((x - 1, y - 1), (x, y - 1)),
        Dir::E => ((x, y), (x, y - 1)),
        Dir::S => ((x - 1, y), (x, y)),
        Dir::W => ((x - 1, y), (x - 1, y - 1)),
    };
    pixel(img, a.0, a.1) != pixel(img, b.0, b.1)
}

/// Scans row-major for the first pixel `(x, y)` that is filled while the
/// pixel directly above it is not — the top-left corner of the top-most row
/// of the shape.
pub fn find_boundary_start(img: &BinaryImage) -> Option<PointI32> {
    for y in 0..img.height {
        for x in 0..img.width {
            if img.get(x, y) && !pixel(img, x as i32, y as i32 - 1) {
                return Some(PointI32::new(x as i32, y as i32));
            }
        }
    }
    None
}

const MAX_STEPS: usize = 10_000_000;

/// Walks the boundary starting at `start`, clockwise or counter-clockwise,
/// emitting a vertex only where the walk direction changes (collinear runs
/// of boundary edges are collapsed). Terminates when the walk returns to
/// `start`, or after `MAX_STEPS` corner steps as a safety cap.
pub fn walk_path(img: &BinaryImage, start: PointI32, clockwise: bool) -> Vec<PointI32> {
    let dirs = if clockwise { CLOCKWISE } else { COUNTER_CLOCKWISE };
    let sentinel = PointI32::new(i32::MIN, i32::MIN);

    let mut path = Vec::new();
    let mut cur = start;
    let mut prev = sentinel;
    let mut prev_prev = sentinel;
    let mut running_dir: Option<Dir> = None;

    for _ in 0..MAX_STEPS {
        let mut valid: Vec<(Dir, PointI32)> = Vec::new();
        for &d in dirs.iter() {
            if !is_boundary_edge(img, cur, d) {
                continue;
            }
            let next = step(cur, d);
            if next == prev || next == prev_prev {
                continue;
            }
            valid.push((d, next));
        }
        let Some(&(chosen_dir, chosen_next)) = valid.first() else {
            break; // dead end; should not happen for a well-formed component
        };

        let continuing_straight = running_dir == Some(chosen_dir) && valid.len() == 1;
        if !continuing_straight {
            path.push(cur);
            running_dir = Some(chosen_dir);
        }

        prev_prev = prev;
        prev = cur;
        cur = chosen_next;

        if cur == start && path.len() > 1 {
            break;
        }
    }

    path
}
