//! Pixel reassignment (§4.7): resolves each pixel's final owning emitted
//! cluster(s) by walking the merge chain recorded during hierarchical merge.
//!
//! The two hierarchical modes (`Config::hierarchical`) diverge here:
//! - `Cutout`: a pixel belongs to exactly one emitted cluster, the nearest
//!   emitted ancestor reached by following `merged_into` from its original
//!   label (`merge::resolve_owner`). Shapes tile without overlap, so the
//!   "claim in reverse emission order" procedure from the spec collapses to
//!   this single resolution — claim order cannot matter once every pixel
//!   already maps to exactly one cluster.
//! - `Stacked`: a pixel contributes to *every* emitted ancestor along its
//!   full merge chain, not just the nearest, so a cluster that later absorbs
//!   a distinct emitted sub-region still claims the pixels beneath it —
//!   painter's-algorithm overlap, grounded on the `depth`/`merged_into`
//!   bookkeeping in `visioncortex`'s `Cluster`.

use std::collections::{BTreeSet, HashMap};

use crate::config::Hierarchical;
use crate::merge::resolve_owner;

const MAX_CHAIN_HOPS: usize = 10_000;

/// All emitted ancestors along `start`'s full merge chain, nearest first.
fn all_emitted_ancestors(merged_into: &[u32], emitted: &BTreeSet<u32>, start: u32) -> Vec<u32> {
    let mut out = Vec::new();
    let mut cur = start;
    for _ in 0..MAX_CHAIN_HOPS {
        if emitted.contains(&cur) {
            out.push(cur);
        }
        let next = merged_into[cur as usize];
        if next == 0 {
            break;
        }
        cur = next;
    }
    out
}

/// Per-cluster owning pixel coordinates, keyed by emitted cluster index.
/// Every emitted cluster gets an entry, even if empty.
pub fn assign_pixels(
    label: &[u32],
    width: u32,
    height: u32,
    merged_into: &[u32],
    emitted: &[u32],
    hierarchical: Hierarchical,
) -> HashMap<u32, Vec<(u32, u32)>> {
    let emitted_set: BTreeSet<u32> = emitted.iter().copied().collect();
    let mut out: HashMap<u32, Vec<(u32, u32)>> = HashMap::new();
    for &c in emitted {
        out.entry(c).or_default();
    }

    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) as usize;
            let l = label[i];
            if l == 0 {
                continue;
            }
            match hierarchical {
                Hierarchical::Cutout => {
                    let owner = resolve_owner(merged_into, &emitted_set, l);
                    out.entry(owner).or_default().push((x, y));
                }
                Hierarchical::Stacked => {
                    for owner in all_emitted_ancestors(merged_into, &emitted_set, l) {
                        out.entry(owner).or_default().push((x, y));
                    }
                }
            }
        }
    }

    out
}
