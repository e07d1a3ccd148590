//! Connected-component clustering (§4.4) and the 4-neighbour adjacency
//! graph (§4.5).
//!
//! Grounded on `visioncortex::color_clusters::builder`'s `stage_1` scan, but
//! restructured around a pixel-level union-find (`crate::unionfind`) instead
//! of eagerly rewriting every absorbed pixel's label. A cluster's identity is
//! a union-find equivalence class; `area`/`sum`/`rect` are aggregated in one
//! pass after the scan rather than maintained incrementally, so the table
//! never needs to store each cluster's member-pixel list (§5 memory budget).

use std::collections::{BTreeSet, HashMap};

use crate::color::{Color, ColorSum};
use crate::geom::Rect;
use crate::pixels::{get, same_color};
use crate::unionfind::UnionFind;

/// Sentinel index 0 means "unassigned / keyed-out"; clusters are otherwise
/// indexed 1..N.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    pub area: usize,
    pub sum: ColorSum,
    pub residue_sum: ColorSum,
    pub rect: Rect,
}

impl Cluster {
    pub fn color(&self) -> Color {
        self.sum.average()
    }

    pub fn residue_color(&self) -> Color {
        self.residue_sum.average()
    }
}

/// Clusters indexed 1..N; index 0 is the unassigned/keyed sentinel and is
/// never populated or emitted.
#[derive(Debug, Default)]
pub struct ClusterTable {
    pub(crate) clusters: Vec<Cluster>,
}

impl ClusterTable {
    /// Builds a table from clusters 1..N, prepending the index-0 sentinel.
    /// Used by the merge/binary-image stages' tests and by callers that
    /// assemble a table outside the clustering scan.
    #[cfg(test)]
    pub(crate) fn from_clusters(clusters: Vec<Cluster>) -> Self {
        let mut all = vec![Cluster::default()];
        all.extend(clusters);
        Self { clusters: all }
    }

    pub fn len(&self) -> usize {
        self.clusters.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, idx: u32) -> &Cluster {
        &self.clusters[idx as usize]
    }

    pub fn get_mut(&mut self, idx: u32) -> &mut Cluster {
        &mut self.clusters[idx as usize]
    }

    /// Indices 1..=len(), in ascending (first-appearance) order.
    pub fn indices(&self) -> impl Iterator<Item = u32> {
        1..self.clusters.len() as u32
    }
}

/// Result of the connected-component scan: the cluster table plus the
/// per-pixel owning cluster index (0 = keyed/unassigned).
pub struct ClusteringResult {
    pub clusters: ClusterTable,
    pub label: Vec<u32>,
}

/// Scan pixels left-to-right, top-to-bottom, grouping same-color
/// 4-(or, in `diagonal` mode, 8-)connected regions into clusters.
///
/// `key`, if present, is the keying RGB (§4.1): any pixel whose RGB
/// matches it exactly is keyed out (`label = 0`) rather than clustered.
pub fn build_clusters(
    pixels: &[u8],
    width: u32,
    height: u32,
    shift: u32,
    diagonal: bool,
    key: Option<Color>,
) -> ClusteringResult {
    let n = (width as usize) * (height as usize);
    let mut uf = UnionFind::new(n);
    let mut keyed = vec![false; n];

    if width > 0 && height > 0 {
        for y in 0..height {
            for x in 0..width {
                let i = (y * width + x) as usize;
                let color = get(pixels, width, x, y);

                if let Some(key) = key {
                    if color.r == key.r && color.g == key.g && color.b == key.b {
                        keyed[i] = true;
                        continue;
                    }
                }

                let up = if y > 0 && !keyed[i - width as usize] {
                    Some((i - width as usize) as u32)
                } else {
                    None
                };
                let left = if x > 0 && !keyed[i - 1] {
                    Some((i - 1) as u32)
                } else {
                    None
                };
                let up_left = if x > 0 && y > 0 && !keyed[i - width as usize - 1] {
                    Some((i - width as usize - 1) as u32)
                } else {
                    None
                };

                let up_match = up.is_some_and(|u| same_color(color, pixel_at(pixels, width, u), shift));
                let left_match =
                    left.is_some_and(|l| same_color(color, pixel_at(pixels, width, l), shift));
                let up_left_match = up_left
                    .is_some_and(|ul| same_color(color, pixel_at(pixels, width, ul), shift));

                let anchor = if up_match && left_match {
                    let (u, l) = (up.unwrap(), left.unwrap());
                    if uf.find(u) != uf.find(l) {
                        uf.union(u, l);
                    }
                    Some(u)
                } else if up_match && up_left_match {
                    up
                } else if left_match && up_left_match {
                    left
                } else if diagonal && up_left_match {
                    up_left
                } else if up_match {
                    up
                } else if left_match {
                    left
                } else {
                    None
                };

                if let Some(anchor) = anchor {
                    uf.union(i as u32, anchor);
                }
            }
        }
    }

    // Final aggregation pass: assign compact ascending cluster indices by
    // first appearance, and accumulate pre-quantization color sums.
    let mut clusters = vec![Cluster::default()]; // index 0: sentinel
    let mut root_to_index: HashMap<u32, u32> = HashMap::new();
    let mut label = vec![0u32; n];

    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) as usize;
            if keyed[i] {
                continue;
            }
            let root = uf.find(i as u32);
            let idx = *root_to_index.entry(root).or_insert_with(|| {
                clusters.push(Cluster::default());
                (clusters.len() - 1) as u32
            });
            label[i] = idx;
            let c = clusters.get_mut(idx as usize).unwrap();
            c.area += 1;
            c.sum.add(get(pixels, width, x, y));
            c.rect.add_xy(x as i32, y as i32);
        }
    }

    for c in clusters.iter_mut().skip(1) {
        c.residue_sum = c.sum;
    }

    ClusteringResult {
        clusters: ClusterTable { clusters },
        label,
    }
}

#[inline]
fn pixel_at(pixels: &[u8], width: u32, pixel_index: u32) -> Color {
    let x = pixel_index % width;
    let y = pixel_index / width;
    get(pixels, width, x, y)
}

/// Symmetric cluster-adjacency graph, indexed 1..N matching the cluster
/// table. Built from each pixel's right and down neighbour (§4.5).
pub fn build_adjacency(label: &[u32], width: u32, height: u32, num_clusters: usize) -> Vec<BTreeSet<u32>> {
    let mut adjacency = vec![BTreeSet::new(); num_clusters + 1];
    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) as usize;
            let a = label[i];
            if a == 0 {
                continue;
            }
            if x + 1 < width {
                let b = label[i + 1];
                if b != 0 && b != a {
                    adjacency[a as usize].insert(b);
                    adjacency[b as usize].insert(a);
                }
            }
            if y + 1 < height {
                let b = label[i + width as usize];
                if b != 0 && b != a {
                    adjacency[a as usize].insert(b);
                    adjacency[b as usize].insert(a);
                }
            }
        }
    }
    adjacency
}
