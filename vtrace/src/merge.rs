//! Hierarchical merge (§4.6): repeatedly folds the smallest remaining
//! cluster into its closest-color neighbor until every cluster has either
//! been emitted as an output layer or absorbed into one.
//!
//! Grounded on `visioncortex::color_clusters::builder::BuilderImpl::stage_2`
//! (`Area` buckets, `deepen`/`hollow` decision, `merge_cluster_into`), but
//! the area buckets here key off a plain `BTreeMap<usize, BTreeSet<u32>>`
//! rather than a bespoke priority queue, since ascending-key iteration is
//! all `stage_2` actually needs.

use std::collections::{BTreeMap, BTreeSet};

use crate::cluster::ClusterTable;

fn bucket_remove(buckets: &mut BTreeMap<usize, BTreeSet<u32>>, area: usize, idx: u32) {
    if let Some(set) = buckets.get_mut(&area) {
        set.remove(&idx);
        if set.is_empty() {
            buckets.remove(&area);
        }
    }
}

fn bucket_insert(buckets: &mut BTreeMap<usize, BTreeSet<u32>>, area: usize, idx: u32) {
    buckets.entry(area).or_default().insert(idx);
}

/// Result of the merge stage: emitted cluster indices in emission (bottom-up)
/// order, and the merge chain (`merged_into[c] != 0` iff `c` was absorbed).
pub struct MergeResult {
    pub emitted: Vec<u32>,
    pub merged_into: Vec<u32>,
}

/// Runs the merge to completion. `adjacency` is consumed/rewired in place;
/// callers that still need the pre-merge graph should clone it first.
pub fn hierarchical_merge(
    clusters: &mut ClusterTable,
    adjacency: &mut [BTreeSet<u32>],
    filter_area: u32,
    layer_difference: u32,
    width: u32,
    height: u32,
    has_key: bool,
) -> MergeResult {
    let total_area = (width as usize) * (height as usize);
    let mut merged_into = vec![0u32; adjacency.len()];
    let mut emitted = Vec::new();

    let mut buckets: BTreeMap<usize, BTreeSet<u32>> = BTreeMap::new();
    for idx in clusters.indices() {
        bucket_insert(&mut buckets, clusters.get(idx).area, idx);
    }

    while let Some((&area, _)) = buckets.iter().next() {
        let members = buckets.remove(&area).unwrap();
        for c in members {
            if clusters.get(c).area != area {
                continue; // stale: already absorbed or grown since bucketing
            }

            if clusters.get(c).area >= total_area {
                emitted.push(c);
                continue;
            }

            if adjacency[c as usize].is_empty() {
                if buckets.is_empty() || has_key {
                    emitted.push(c);
                }
                continue;
            }

            let c_color = clusters.get(c).color();
            let mut best: Option<(u32, u32)> = None;
            for &nb in adjacency[c as usize].iter() {
                let d = clusters.get(nb).color().rgb_distance(c_color);
                match best {
                    Some((_, bd)) if d >= bd => {}
                    _ => best = Some((nb, d)),
                }
            }
            let (n_star, color_diff) = best.expect("non-empty adjacency set");

            let is_large_enough = filter_area > 0 && clusters.get(c).area >= filter_area as usize;
            let should_deepen = color_diff > layer_difference;

            if is_large_enough && should_deepen {
                emitted.push(c);
            }

            let c_area = clusters.get(c).area;
            let c_rect = clusters.get(c).rect;
            let c_sum = clusters.get(c).sum;
            let c_residue = clusters.get(c).residue_sum;

            let old_nstar_area = clusters.get(n_star).area;
            bucket_remove(&mut buckets, old_nstar_area, n_star);

            let nstar = clusters.get_mut(n_star);
            nstar.area += c_area;
            nstar.sum.merge(&c_sum);
            nstar.rect.merge(&c_rect);
            if !(is_large_enough && should_deepen) {
                nstar.residue_sum.merge(&c_residue);
            }
            let new_nstar_area = nstar.area;
            bucket_insert(&mut buckets, new_nstar_area, n_star);

            merged_into[c as usize] = n_star;

            let c_neighbors: Vec<u32> = adjacency[c as usize].iter().copied().collect();
            for nb in c_neighbors {
                adjacency[nb as usize].remove(&c);
                if nb != n_star {
                    adjacency[nb as usize].insert(n_star);
                    adjacency[n_star as usize].insert(nb);
                }
            }
            adjacency[c as usize].clear();
            adjacency[n_star as usize].remove(&c);
        }
    }

    MergeResult { emitted, merged_into }
}

/// Follows `merged_into` from `start` to an emitted index, capped at 10000
/// hops (§4.7 safety cap). Returns `start` unchanged if it is itself emitted
/// or has no recorded merge.
pub fn resolve_owner(merged_into: &[u32], emitted: &BTreeSet<u32>, start: u32) -> u32 {
    let mut cur = start;
    for _ in 0..10_000 {
        if emitted.contains(&cur) {
            return cur;
        }
        let next = merged_into[cur as usize];
        if next == 0 {
            return cur;
        }
        cur = next;
    }
    cur
}
