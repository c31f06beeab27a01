//! Axis-aligned clipping of projected point features.

use std::sync::Arc;

use super::convert::ProjectedFeature;

/// Axis to clip along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    X = 0,
    Y = 1,
}

/// Keep the features (and vertices) whose coordinate on `axis` lies in `[k1, k2] / scale`.
///
/// `k1` and `k2` are expressed in tile units at the zoom level whose tile
/// count per axis is `scale`. `min_all`/`max_all` bound the whole input on
/// that axis and allow accepting or rejecting everything without looking at
/// individual features. Bounds are inclusive on both ends, so a point on a
/// shared edge ends up in both neighbours.
///
/// Returns `None` when nothing survives.
pub(crate) fn clip(
    features: &[Arc<ProjectedFeature>],
    scale: f64,
    k1: f64,
    k2: f64,
    axis: Axis,
    min_all: f64,
    max_all: f64,
) -> Option<Vec<Arc<ProjectedFeature>>> {
    let k1 = k1 / scale;
    let k2 = k2 / scale;

    if min_all >= k1 && max_all <= k2 {
        return Some(features.to_vec());
    }
    if max_all < k1 || min_all > k2 {
        return None;
    }

    let a = axis as usize;
    let mut clipped = Vec::new();
    for feature in features {
        let (min, max) = (feature.min[a], feature.max[a]);
        if min >= k1 && max <= k2 {
            clipped.push(Arc::clone(feature));
            continue;
        }
        if max < k1 || min > k2 {
            continue;
        }

        let inside: Vec<[f64; 2]> = feature
            .points
            .iter()
            .filter(|p| p[a] >= k1 && p[a] <= k2)
            .copied()
            .collect();
        if !inside.is_empty() {
            clipped.push(Arc::new(feature.with_points(inside)));
        }
    }

    if clipped.is_empty() {
        None
    } else {
        Some(clipped)
    }
}
