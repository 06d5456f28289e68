//! Set-union merging of coastline line fragments.
//!
//! Shapefile coastlines arrive as many short polylines, often sharing
//! endpoints and sometimes duplicating whole stretches where tiles overlap.
//! `merge_fragments` collapses duplicate segments and stitches touching
//! fragments back into maximal chains, while keeping disjoint fragments as
//! separate parts of the result. The operation is pure, deterministic for a
//! given input order, and idempotent: merging a merged result with itself
//! yields the identical point set.

use std::collections::{HashMap, HashSet, VecDeque};

use geo_types::{Coord, LineString, MultiLineString};

/// Hashable identity for a coordinate (exact bit pattern, no tolerance).
type PointKey = (u64, u64);

fn point_key(c: &Coord<f64>) -> PointKey {
    (c.x.to_bits(), c.y.to_bits())
}

/// Order a segment's endpoints so that reversed duplicates collapse to one key.
fn oriented(a: Coord<f64>, b: Coord<f64>) -> (Coord<f64>, Coord<f64>) {
    if (b.x, b.y) < (a.x, a.y) {
        (b, a)
    } else {
        (a, b)
    }
}

/// Merge a set of line fragments into one multi-part geometry with
/// set-union semantics.
///
/// Duplicate segments (in either direction) appear once in the output.
/// Fragments sharing an endpoint are stitched into a single chain; fragments
/// touching nothing stay separate parts.
pub fn merge_fragments(fragments: &[MultiLineString<f64>]) -> MultiLineString<f64> {
    // Explode every fragment into direction-normalized segments, dropping
    // exact duplicates. Insertion order is kept so the result is
    // deterministic for a given input order.
    let mut seen: HashSet<(PointKey, PointKey)> = HashSet::new();
    let mut segments: Vec<(Coord<f64>, Coord<f64>)> = Vec::new();

    for fragment in fragments {
        for line in &fragment.0 {
            for pair in line.0.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if point_key(&a) == point_key(&b) {
                    // Degenerate zero-length segment
                    continue;
                }
                let (p, q) = oriented(a, b);
                if seen.insert((point_key(&p), point_key(&q))) {
                    segments.push((p, q));
                }
            }
        }
    }

    // Endpoint adjacency for chain stitching.
    let mut incident: HashMap<PointKey, Vec<usize>> = HashMap::new();
    for (i, (a, b)) in segments.iter().enumerate() {
        incident.entry(point_key(a)).or_default().push(i);
        incident.entry(point_key(b)).or_default().push(i);
    }

    let next_unused = |used: &[bool], at: &Coord<f64>| -> Option<usize> {
        incident
            .get(&point_key(at))
            .and_then(|ids| ids.iter().copied().find(|&i| !used[i]))
    };
    let far_end = |seg: (Coord<f64>, Coord<f64>), near: &Coord<f64>| -> Coord<f64> {
        if point_key(&seg.0) == point_key(near) {
            seg.1
        } else {
            seg.0
        }
    };

    let mut used = vec![false; segments.len()];
    let mut parts: Vec<LineString<f64>> = Vec::new();

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (a, b) = segments[start];
        let mut chain: VecDeque<Coord<f64>> = VecDeque::from([a, b]);

        // Grow the chain from its tail, then from its head.
        let mut tail = b;
        while let Some(i) = next_unused(&used, &tail) {
            used[i] = true;
            tail = far_end(segments[i], &tail);
            chain.push_back(tail);
        }
        let mut head = a;
        while let Some(i) = next_unused(&used, &head) {
            used[i] = true;
            head = far_end(segments[i], &head);
            chain.push_front(head);
        }

        parts.push(LineString::from(chain.into_iter().collect::<Vec<_>>()));
    }

    MultiLineString(parts)
}

/// Total number of coordinates across all parts, handy for log output.
pub fn point_count(geometry: &MultiLineString<f64>) -> usize {
    geometry.0.iter().map(|line| line.0.len()).sum()
}
