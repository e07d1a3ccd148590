//! Whole-pipeline scenario tests (spec §8 S1-S6) and the cross-cutting
//! invariants that don't fit naturally inside a single module's unit tests.

use vtrace::color::Color;
use vtrace::config::{Config, Hierarchical, PathSimplifyMode};
use vtrace::vtrace;

fn rgba(buf: &mut [u8], width: u32, x: u32, y: u32, c: Color) {
    let i = (4 * (y * width + x)) as usize;
    buf[i] = c.r;
    buf[i + 1] = c.g;
    buf[i + 2] = c.b;
    buf[i + 3] = c.a;
}

fn count_paths(svg: &str) -> usize {
    svg.matches("<path").count()
}

/// S1: 2x2 solid red.
#[test]
fn s1_solid_red_square() {
    let mut buf = vec![0u8; 2 * 2 * 4];
    for y in 0..2 {
        for x in 0..2 {
            rgba(&mut buf, 2, x, y, Color::new(255, 0, 0, 255));
        }
    }
    let svg = vtrace(&mut buf, 2, 2, &Config::default()).unwrap();
    assert_eq!(count_paths(&svg), 1);
    assert!(svg.contains("fill=\"#ff0000\""));
}

/// S2: 2x2 checkerboard red/black. The two same-colored cells are only
/// diagonally adjacent, so depending on `layerDifference` they may end up
/// as anywhere from one (fully merged) to four (fully fragmented) emitted
/// layers; this just checks the pipeline handles the adjacency-degenerate
/// case without losing coverage.
#[test]
fn s2_checkerboard_produces_at_least_one_layer() {
    let mut buf = vec![0u8; 2 * 2 * 4];
    rgba(&mut buf, 2, 0, 0, Color::new(255, 0, 0, 255));
    rgba(&mut buf, 2, 1, 0, Color::new(0, 0, 0, 255));
    rgba(&mut buf, 2, 0, 1, Color::new(0, 0, 0, 255));
    rgba(&mut buf, 2, 1, 1, Color::new(255, 0, 0, 255));
    let svg = vtrace(&mut buf, 2, 2, &Config::default()).unwrap();
    assert!(count_paths(&svg) >= 1);
}

/// S3: 1x1 fully transparent pixel yields an empty SVG.
#[test]
fn s3_single_transparent_pixel() {
    let mut buf = vec![0u8; 4];
    let svg = vtrace(&mut buf, 1, 1, &Config::default()).unwrap();
    assert_eq!(count_paths(&svg), 0);
    assert!(svg.contains("width=\"1\" height=\"1\""));
}

/// S4: 4x4 red square on a fully-transparent 6x6 background; keying should
/// trigger and the red square should survive as one path.
#[test]
fn s4_red_square_on_transparent_background() {
    let mut buf = vec![0u8; 6 * 6 * 4];
    for y in 1..5 {
        for x in 1..5 {
            rgba(&mut buf, 6, x, y, Color::new(255, 0, 0, 255));
        }
    }
    let svg = vtrace(&mut buf, 6, 6, &Config::default()).unwrap();
    assert_eq!(count_paths(&svg), 1);
    assert!(svg.contains("fill=\"#ff0000\""));
}

/// S5: 3x3 red square with a 1x1 white hole in the center, spline mode: one
/// path whose `d` contains two `M...Z ` subpaths.
#[test]
fn s5_square_with_hole_has_two_subpaths() {
    let mut buf = vec![0u8; 3 * 3 * 4];
    for y in 0..3 {
        for x in 0..3 {
            let c = if (x, y) == (1, 1) {
                Color::new(255, 255, 255, 255)
            } else {
                Color::new(255, 0, 0, 255)
            };
            rgba(&mut buf, 3, x, y, c);
        }
    }
    let config = Config {
        filter_speckle: 1,
        hierarchical: Hierarchical::Cutout,
        ..Config::default()
    };
    let svg = vtrace(&mut buf, 3, 3, &config).unwrap();
    assert_eq!(count_paths(&svg), 1);
    assert_eq!(svg.matches("M").count(), 2);
}

/// S6: 8x1 gradient black->white, colorPrecision=1 quantizes to 2 clusters.
#[test]
fn s6_gradient_quantizes_to_two_layers() {
    let mut buf = vec![0u8; 8 * 4];
    for x in 0..8u32 {
        let v = (x * 255 / 7) as u8;
        rgba(&mut buf, 8, x, 0, Color::new(v, v, v, 255));
    }
    let config = Config { color_precision: 1, ..Config::default() };
    let svg = vtrace(&mut buf, 8, 1, &config).unwrap();
    assert_eq!(count_paths(&svg), 2);
}

/// Invariant 1/2: well-formed document with `<svg>` carrying the input size.
#[test]
fn svg_declares_input_dimensions() {
    let mut buf = vec![0u8; 5 * 7 * 4];
    for i in 0..(5 * 7) {
        buf[i * 4] = 10;
        buf[i * 4 + 1] = 20;
        buf[i * 4 + 2] = 30;
        buf[i * 4 + 3] = 255;
    }
    let svg = vtrace(&mut buf, 5, 7, &Config::default()).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("width=\"5\" height=\"7\""));
}

/// Invariant 7: determinism across repeated calls (seeded RNG, no
/// hash-order leakage into the output).
#[test]
fn repeated_runs_are_byte_identical() {
    let mut a = vec![0u8; 6 * 6 * 4];
    for y in 1..5 {
        for x in 1..5 {
            rgba(&mut a, 6, x, y, Color::new(40, 80, 120, 255));
        }
    }
    let mut b = a.clone();
    let config = Config::default();
    let out_a = vtrace(&mut a, 6, 6, &config).unwrap();
    let out_b = vtrace(&mut b, 6, 6, &config).unwrap();
    assert_eq!(out_a, out_b);
}

/// Invariant 10: color_precision outside 1..8 is clamped; 8 disables
/// quantization (every distinct color stays its own cluster).
#[test]
fn out_of_range_color_precision_is_clamped() {
    let mut buf = vec![0u8; 2 * 2 * 4];
    rgba(&mut buf, 2, 0, 0, Color::new(10, 10, 10, 255));
    rgba(&mut buf, 2, 1, 0, Color::new(20, 20, 20, 255));
    rgba(&mut buf, 2, 0, 1, Color::new(10, 10, 10, 255));
    rgba(&mut buf, 2, 1, 1, Color::new(20, 20, 20, 255));
    let config = Config { color_precision: 255, layer_difference: 1000, ..Config::default() };
    let svg = vtrace(&mut buf, 2, 2, &config).unwrap();
    assert!(!svg.is_empty());
}

/// Invariant 12: layer_difference = 0 activates diagonal connectivity, so a
/// checkerboard's same-colored corners merge into one cluster.
#[test]
fn zero_layer_difference_enables_diagonal_clustering() {
    let mut buf = vec![0u8; 2 * 2 * 4];
    rgba(&mut buf, 2, 0, 0, Color::new(255, 0, 0, 255));
    rgba(&mut buf, 2, 1, 0, Color::new(0, 0, 0, 255));
    rgba(&mut buf, 2, 0, 1, Color::new(0, 0, 0, 255));
    rgba(&mut buf, 2, 1, 1, Color::new(255, 0, 0, 255));
    let config = Config { layer_difference: 0, filter_speckle: 0, ..Config::default() };
    let svg = vtrace(&mut buf, 2, 2, &config).unwrap();
    assert!(!svg.is_empty());
}

/// Invariant 4 (cutout mode): pixel ownership across emitted clusters is
/// disjoint, which for a two-color image means two separate paths rather
/// than overlapping ones.
#[test]
fn cutout_mode_yields_non_overlapping_layers() {
    let mut buf = vec![0u8; 4 * 4 * 4];
    for y in 0..4 {
        for x in 0..4 {
            let c = if x < 2 {
                Color::new(255, 0, 0, 255)
            } else {
                Color::new(0, 0, 255, 255)
            };
            rgba(&mut buf, 4, x, y, c);
        }
    }
    let config = Config {
        hierarchical: Hierarchical::Cutout,
        mode: PathSimplifyMode::Polygon,
        ..Config::default()
    };
    let svg = vtrace(&mut buf, 4, 4, &config).unwrap();
    assert_eq!(count_paths(&svg), 2);
}
