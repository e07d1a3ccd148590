//! Operations on the raw RGBA pixel buffer: transparency keying (§4.1),
//! binary-mode collapse (§4.2), and the quantized same-color predicate
//! (§4.3). All functions take the caller's buffer directly rather than
//! wrapping it, since `vtrace` mutates the caller's slice in place.

use crate::color::Color;

const KEY_COLOR_SEED: u64 = 42;
const NUM_RANDOM_COLOR_TRIES: usize = 6;
const FALLBACK_KEY_COLOR: Color = Color { r: 1, g: 2, b: 3, a: 255 };

#[inline]
pub fn get(pixels: &[u8], width: u32, x: u32, y: u32) -> Color {
    let i = 4 * (y * width + x) as usize;
    Color::new(pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3])
}

#[inline]
pub fn set(pixels: &mut [u8], width: u32, x: u32, y: u32, c: Color) {
    let i = 4 * (y * width + x) as usize;
    pixels[i] = c.r;
    pixels[i + 1] = c.g;
    pixels[i + 2] = c.b;
    pixels[i + 3] = c.a;
}

/// Scans rows `{0, h/4, h/2, 3h/4, h-1}`; transparent-dominant if the count
/// of alpha=0 pixels across those rows reaches `floor(0.4*w)`.
pub fn should_key(pixels: &[u8], width: u32, height: u32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    let threshold = (width as f64 * 0.4) as u32;
    let rows = [0, height / 4, height / 2, 3 * height / 4, height - 1];
    let mut transparent = 0u32;
    for &y in &rows {
        for x in 0..width {
            if get(pixels, width, x, y).a == 0 {
                transparent += 1;
            }
        }
    }
    transparent >= threshold
}

/// Six saturated primaries, then six seeded-pseudo-random opaque colors
/// (seed 42, for reproducibility); the first RGB triple absent from the
/// image (ignoring alpha) wins. Falls back to `(1,2,3,255)`.
pub fn find_unused_color(pixels: &[u8], width: u32, height: u32) -> Color {
    let candidates = [
        Color::new(255, 0, 0, 255),
        Color::new(0, 255, 0, 255),
        Color::new(0, 0, 255, 255),
        Color::new(255, 255, 0, 255),
        Color::new(0, 255, 255, 255),
        Color::new(255, 0, 255, 255),
    ];

    let rng = fastrand::Rng::with_seed(KEY_COLOR_SEED);
    let random_candidates: Vec<Color> = (0..NUM_RANDOM_COLOR_TRIES)
        .map(|_| Color::new(rng.u8(..), rng.u8(..), rng.u8(..), 255))
        .collect();

    for candidate in candidates.iter().chain(random_candidates.iter()) {
        if !rgb_present(pixels, width, height, *candidate) {
            return *candidate;
        }
    }
    FALLBACK_KEY_COLOR
}

fn rgb_present(pixels: &[u8], width: u32, height: u32, color: Color) -> bool {
    for y in 0..height {
        for x in 0..width {
            let p = get(pixels, width, x, y);
            if p.r == color.r && p.g == color.g && p.b == color.b {
                return true;
            }
        }
    }
    false
}

/// Overwrites every fully-transparent pixel with `key` at full opacity.
pub fn apply_key_color(pixels: &mut [u8], width: u32, height: u32, key: Color) {
    for y in 0..height {
        for x in 0..width {
            if get(pixels, width, x, y).a == 0 {
                set(pixels, width, x, y, Color::new(key.r, key.g, key.b, 255));
            }
        }
    }
}

/// Collapses each pixel to black or white by integer luminance threshold
/// 128, preserving alpha. Applied after keying, before clustering.
pub fn to_binary_mode(pixels: &mut [u8], width: u32, height: u32) {
    for y in 0..height {
        for x in 0..width {
            let c = get(pixels, width, x, y);
            let v = if c.luminance() < 128 { 0 } else { 255 };
            set(pixels, width, x, y, Color::new(v, v, v, c.a));
        }
    }
}

/// Two colors are "same-color" iff every RGB channel agrees after being
/// right-shifted by `shift` (derived from `Config::quantize_shift`).
#[inline]
pub fn same_color(a: Color, b: Color, shift: u32) -> bool {
    (a.r >> shift) == (b.r >> shift) && (a.g >> shift) == (b.g >> shift) && (a.b >> shift) == (b.b >> shift)
}
