//! Binary (single-bit) images and their 4-connected decomposition (§4.8
//! steps 1-2), grounded on `visioncortex::BinaryImage`/`to_clusters`.
//! Boundary walking and hole plotting (§4.8 steps d/e, §4.9) live in
//! `boundary.rs`; this module only owns the pixel grid and component split.

use crate::geom::Rect;

#[derive(Debug, Clone)]
pub struct BinaryImage {
    pub width: u32,
    pub height: u32,
    bits: Vec<bool>,
}

impl BinaryImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: bool) {
        let i = (y * self.width + x) as usize;
        self.bits[i] = v;
    }

    /// Bitwise-inverted copy, same dimensions.
    pub fn negative(&self) -> BinaryImage {
        BinaryImage {
            width: self.width,
            height: self.height,
            bits: self.bits.iter().map(|&b| !b).collect(),
        }
    }

    /// True iff `rect` (in this image's coordinate space) touches any edge
    /// of the image bounds — used to tell an exterior region apart from an
    /// interior hole when decomposing a negative image (§4.8 step b).
    pub fn rect_touches_edge(&self, rect: &Rect) -> bool {
        rect.left <= 0
            || rect.top <= 0
            || rect.right >= self.width as i32
            || rect.bottom >= self.height as i32
    }
}

/// One 4-connected component of `true` cells: its bounding rect in the
/// parent image's coordinates, and a component-local binary sub-image of
/// that rect's size containing only this component's pixels.
pub struct Component {
    pub rect: Rect,
    pub image: BinaryImage,
}

const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Decomposes `img` into its 4-connected `true` components, in row-major
/// first-appearance order.
pub fn to_clusters(img: &BinaryImage) -> Vec<Component> {
    let n = (img.width as usize) * (img.height as usize);
    let mut visited = vec![false; n];
    let mut out = Vec::new();

    for y in 0..img.height {
        for x in 0..img.width {
            let i = (y * img.width + x) as usize;
            if !img.get(x, y) || visited[i] {
                continue;
            }

            let mut stack = vec![(x, y)];
            visited[i] = true;
            let mut pixels = Vec::new();
            while let Some((cx, cy)) = stack.pop() {
                pixels.push((cx, cy));
                for (dx, dy) in NEIGHBOR_OFFSETS {
                    let nx = cx as i32 + dx;
                    let ny = cy as i32 + dy;
                    if nx < 0 || ny < 0 || nx >= img.width as i32 || ny >= img.height as i32 {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    let ni = (ny * img.width + nx) as usize;
                    if img.get(nx, ny) && !visited[ni] {
                        visited[ni] = true;
                        stack.push((nx, ny));
                    }
                }
            }

            let mut rect = Rect::default();
            for &(px, py) in &pixels {
                rect.add_xy(px as i32, py as i32);
            }
            let cw = rect.width() as u32;
            let ch = rect.height() as u32;
            let mut local = BinaryImage::new(cw, ch);
            for &(px, py) in &pixels {
                local.set((px as i32 - rect.left) as u32, (py as i32 - rect.top) as u32, true);
            }
            out.push(Component { rect, image: local });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_blob_is_one_component() {
        let mut img = BinaryImage::new(3, 3);
        for (x, y) in [(0, 0), (1, 0), (0, 1)] {
            img.set(x, y, true);
        }
        let comps = to_clusters(&img);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].rect, Rect { left: 0, top: 0, right: 2, bottom: 2 });
    }

    #[test]
    fn diagonal_only_touch_is_two_components() {
        let mut img = BinaryImage::new(2, 2);
        img.set(0, 0, true);
        img.set(1, 1, true);
        let comps = to_clusters(&img);
        assert_eq!(comps.len(), 2);
    }

    #[test]
    fn negative_inverts_bits() {
        let mut img = BinaryImage::new(2, 1);
        img.set(0, 0, true);
        let neg = img.negative();
        assert!(!neg.get(0, 0));
        assert!(neg.get(1, 0));
    }

    #[test]
    fn hole_rect_does_not_touch_edge() {
        // A 5x5 image; a 1x1 hole in the middle does not touch any edge.
        let img = BinaryImage::new(5, 5);
        let hole_rect = Rect { left: 2, top: 2, right: 3, bottom: 3 };
        assert!(!img.rect_touches_edge(&hole_rect));
        let edge_rect = Rect { left: 0, top: 2, right: 1, bottom: 3 };
        assert!(img.rect_touches_edge(&edge_rect));
    }

    #[test]
    fn out_of_bounds_get_is_false() {
        let img = BinaryImage::new(2, 2);
        assert!(!img.get(5, 5));
    }
}
