//! Compound-path extraction (§4.8): turns one emitted cluster's owning
//! pixels into the SVG subpath strings for its layer — one per 4-connected
//! component, each possibly carrying interior holes.
//!
//! Grounded on `visioncortex::Cluster::to_compound_path`'s per-component
//! walk, but built directly on this crate's `binary`/`boundary` modules
//! rather than a shared `Cluster` type: a `vtrace` layer's pixel set already
//! arrives as a flat `(x, y)` list from `owner::assign_pixels`.

use crate::bezier;
use crate::binary::{to_clusters, BinaryImage};
use crate::boundary::{find_boundary_start, walk_path};
use crate::config::{Config, PathSimplifyMode};
use crate::geom::{PointI32, Rect};
use crate::simplify;
use crate::smooth;
use crate::svg;

const MIN_COMPONENT_PIXELS: usize = 3;

fn count_set(img: &BinaryImage) -> usize {
    (0..img.height)
        .flat_map(|y| (0..img.width).map(move |x| (x, y)))
        .filter(|&(x, y)| img.get(x, y))
        .count()
}

fn translate(p: PointI32, dx: i32, dy: i32) -> PointI32 {
    PointI32::new(p.x + dx, p.y + dy)
}

/// Runs staircase removal, decimation, and (in spline mode) smoothing and
/// Bezier fitting over one traced contour, emitting its `d`-data subpath.
fn contour_to_subpath(contour: &[PointI32], clockwise: bool, config: &Config) -> Option<String> {
    if contour.len() < 2 {
        return None;
    }
    let staircased = simplify::remove_staircases(contour, clockwise);
    let decimated = simplify::limit_penalties(&staircased, 1.0);
    if decimated.len() < 2 {
        return None;
    }

    Some(match config.mode {
        PathSimplifyMode::Polygon => svg::polygon_path_data(&decimated, config.path_precision),
        PathSimplifyMode::Spline => {
            let floats: Vec<_> = decimated.iter().map(|p| p.to_f64()).collect();
            let smoothed = smooth::smooth(
                &floats,
                config.corner_threshold_rad(),
                config.length_threshold,
                config.max_iterations,
            );
            let curves = bezier::fit_path(&smoothed, config.splice_threshold_rad());
            svg::spline_path_data(&curves, config.path_precision)
        }
    })
}

/// Builds every subpath (outer shells and holes, in trace order) for one
/// emitted cluster's owning pixels. `rect` is the cluster's saved bounding
/// rect in whole-image coordinates; `owning_pixels` are whole-image (x, y)
/// pairs.
pub fn build_compound_path(owning_pixels: &[(u32, u32)], rect: Rect, config: &Config) -> Vec<String> {
    if owning_pixels.is_empty() || rect.is_empty() {
        return Vec::new();
    }

    let width = rect.width() as u32;
    let height = rect.height() as u32;
    let mut img = BinaryImage::new(width, height);
    for &(x, y) in owning_pixels {
        img.set((x as i32 - rect.left) as u32, (y as i32 - rect.top) as u32, true);
    }

    let mut subpaths = Vec::new();
    for component in to_clusters(&img) {
        if count_set(&component.image) < MIN_COMPONENT_PIXELS {
            continue;
        }
        let mut main_img = component.image.clone();

        let neg = main_img.negative();
        let holes: Vec<_> = to_clusters(&neg)
            .into_iter()
            .filter(|h| !main_img.rect_touches_edge(&h.rect))
            .collect();

        for hole in &holes {
            for y in 0..hole.image.height {
                for x in 0..hole.image.width {
                    if hole.image.get(x, y) {
                        main_img.set((hole.rect.left as u32) + x, (hole.rect.top as u32) + y, true);
                    }
                }
            }
        }

        let comp_dx = component.rect.left + rect.left;
        let comp_dy = component.rect.top + rect.top;

        if let Some(start) = find_boundary_start(&main_img) {
            let outer: Vec<_> = walk_path(&main_img, start, true)
                .into_iter()
                .map(|p| translate(p, comp_dx, comp_dy))
                .collect();
            if let Some(subpath) = contour_to_subpath(&outer, true, config) {
                subpaths.push(subpath);
            }
        }

        for hole in &holes {
            let Some(hole_start) = find_boundary_start(&hole.image) else {
                continue;
            };
            let hole_dx = comp_dx + hole.rect.left;
            let hole_dy = comp_dy + hole.rect.top;
            let hole_path: Vec<_> = walk_path(&hole.image, hole_start, false)
                .into_iter()
                .map(|p| translate(p, hole_dx, hole_dy))
                .collect();
            if let Some(subpath) = contour_to_subpath(&hole_path, false, config) {
                subpaths.push(subpath);
            }
        }
    }

    subpaths
}
