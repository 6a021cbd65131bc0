//! Marker clustering: merges overlapping markers into aggregates.
//!
//! The adjacency predicate is caller-supplied and typically judges overlap in
//! screen space through a [`PlotTransform`]; the reducer turns a cluster's
//! members into one aggregate marker. Clustering is greedy and
//! order-dependent: pairs are tested in ascending `(i, j)` order and the
//! first merge wins, so results are deterministic for a given input order
//! but not globally optimal.

use crate::data_types::Marker;
use crate::transform::PlotTransform;

/// A transient cluster: member indices into the input slice plus the current
/// aggregate. Lives only within one [`aggregate_markers`] call.
struct Cluster {
    indices: Vec<usize>,
    aggregate: Marker,
    removed: bool,
}

impl Cluster {
    fn recompute<R: Fn(&[Marker]) -> Marker>(&mut self, markers: &[Marker], reduce: &R) {
        let members: Vec<Marker> = self.indices.iter().map(|&i| markers[i].clone()).collect();
        self.aggregate = reduce(&members);
    }
}

/// Clusters `markers` under `can_aggregate`, replacing each cluster with the
/// reducer's aggregate.
///
/// `can_aggregate` must be symmetric and deterministic; that is a caller
/// contract, not defended here. With `single_pass` false, aggregates are
/// re-tested against each other and against leftover singletons until no
/// merge applies, so large clusters keep absorbing nearby markers even when
/// their adjacency differs from their constituents'.
///
/// Every input marker ends up in the output exactly once, either unchanged
/// (singletons, in input order, first) or represented by exactly one
/// aggregate (in cluster creation order).
pub fn aggregate_markers<P, R>(
    markers: &[Marker],
    can_aggregate: P,
    aggregate: R,
    single_pass: bool,
) -> Vec<Marker>
where
    P: Fn(&Marker, &Marker) -> bool,
    R: Fn(&[Marker]) -> Marker,
{
    let n = markers.len();
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut member_of: Vec<Option<usize>> = vec![None; n];

    // Initial pass: union adjacent pairs in ascending (i, j) order.
    for i in 0..n {
        for j in (i + 1)..n {
            if !can_aggregate(&markers[i], &markers[j]) {
                continue;
            }
            match (member_of[i], member_of[j]) {
                (None, None) => {
                    clusters.push(Cluster {
                        indices: vec![i, j],
                        aggregate: markers[i].clone(),
                        removed: false,
                    });
                    member_of[i] = Some(clusters.len() - 1);
                    member_of[j] = Some(clusters.len() - 1);
                }
                (Some(c), None) => {
                    clusters[c].indices.push(j);
                    member_of[j] = Some(c);
                }
                (None, Some(c)) => {
                    clusters[c].indices.push(i);
                    member_of[i] = Some(c);
                }
                (Some(a), Some(b)) if a != b => {
                    // Fold the later cluster into the earlier one.
                    let (keep, drop) = if a < b { (a, b) } else { (b, a) };
                    let moved = std::mem::take(&mut clusters[drop].indices);
                    for &idx in &moved {
                        member_of[idx] = Some(keep);
                    }
                    clusters[keep].indices.extend(moved);
                    clusters[drop].removed = true;
                }
                (Some(_), Some(_)) => {}
            }
        }
    }

    clusters.retain(|c| !c.removed);
    for cluster in &mut clusters {
        cluster.recompute(markers, &aggregate);
    }
    let mut clustered: Vec<bool> = vec![false; n];
    for cluster in &clusters {
        for &idx in &cluster.indices {
            clustered[idx] = true;
        }
    }

    if !single_pass {
        loop {
            let prev_clusters = clusters.len();
            let prev_members: usize = clusters.iter().map(|c| c.indices.len()).sum();

            // Aggregates against each other: the earlier cluster folds into
            // the later one, matching the reference's sweep.
            for a in 0..clusters.len() {
                if clusters[a].removed {
                    continue;
                }
                for b in (a + 1)..clusters.len() {
                    if clusters[b].removed {
                        continue;
                    }
                    if can_aggregate(&clusters[a].aggregate, &clusters[b].aggregate) {
                        let moved = std::mem::take(&mut clusters[a].indices);
                        clusters[b].indices.extend(moved);
                        clusters[b].recompute(markers, &aggregate);
                        clusters[a].removed = true;
                        break;
                    }
                }
            }

            // Leftover singletons against the (possibly updated) aggregates.
            for idx in 0..n {
                if clustered[idx] {
                    continue;
                }
                for cluster in clusters.iter_mut() {
                    if cluster.removed {
                        continue;
                    }
                    if can_aggregate(&markers[idx], &cluster.aggregate) {
                        cluster.indices.push(idx);
                        cluster.recompute(markers, &aggregate);
                        clustered[idx] = true;
                        break;
                    }
                }
            }

            clusters.retain(|c| !c.removed);

            let members: usize = clusters.iter().map(|c| c.indices.len()).sum();
            if clusters.len() == prev_clusters && members == prev_members {
                break;
            }
        }
    }

    let mut out: Vec<Marker> = Vec::with_capacity(n);
    for (idx, marker) in markers.iter().enumerate() {
        if !clustered[idx] {
            out.push(marker.clone());
        }
    }
    for cluster in &clusters {
        out.push(cluster.aggregate.clone());
    }
    out
}

/// Builds a screen-space adjacency predicate: two markers aggregate when
/// their projected circles come within `threshold_px` of touching.
pub fn overlap_within(
    transform: &PlotTransform,
    threshold_px: f32,
) -> impl Fn(&Marker, &Marker) -> bool + '_ {
    move |a: &Marker, b: &Marker| {
        let (ax, ay) = transform.data_to_screen(a.x, a.y);
        let (bx, by) = transform.data_to_screen(b.x, b.y);
        let dist = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
        dist <= a.radius + b.radius + threshold_px
    }
}

/// Default reducer: weight-summing aggregate at the weighted centroid, with
/// an area-preserving radius and a member-count label. Color follows the
/// first member.
pub fn merge_markers(members: &[Marker]) -> Marker {
    let weight: usize = members.iter().map(|m| m.weight).sum();
    let weight = weight.max(1);
    let wsum = weight as f64;
    let x = members.iter().map(|m| m.x * m.weight as f64).sum::<f64>() / wsum;
    let y = members.iter().map(|m| m.y * m.weight as f64).sum::<f64>() / wsum;
    let radius = members
        .iter()
        .map(|m| m.radius * m.radius)
        .sum::<f32>()
        .sqrt();
    let color = members
        .first()
        .map(|m| m.color)
        .unwrap_or_default();

    Marker {
        x,
        y,
        radius,
        color,
        label: Some(weight.to_string()),
        weight,
    }
}
