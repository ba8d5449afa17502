//! Detection-to-track association: pairwise center distances resolved by a
//! greedy minimum-cost matcher under a distance gate.

use nalgebra as na;
use ndarray::Array2;

use crate::detection::Detection;
use crate::track::Track;

/// Outcome of one frame's association pass.
///
/// `matched` holds (track index, detection index) pairs into the slices the
/// cost matrix was built from; every row and column index appears in exactly
/// one of the three buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    pub matched: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Pairwise Euclidean distance between every track's last known center and
/// every detection's center. Entry (t, d) is the cost of assigning detection
/// d to track t.
pub fn cost_matrix(tracks: &[Track], detections: &[Detection]) -> Array2<f32> {
    Array2::from_shape_fn((tracks.len(), detections.len()), |(t, d)| {
        na::distance(&tracks[t].last_center, &detections[d].center())
    })
}

/// Greedy minimum-cost matching.
///
/// Repeatedly commits the smallest remaining finite cost among rows and
/// columns not yet consumed, then drops both from consideration; stops when
/// nothing is left or the smallest remaining cost exceeds `max_cost`. Ties
/// keep the first entry in row-major order, so identical input always yields
/// identical output. An approximation of the optimal assignment, good enough
/// for the matrix sizes a single frame produces.
pub fn solve(costs: &Array2<f32>, max_cost: f32) -> Assignment {
    let (n_tracks, n_dets) = costs.dim();

    let mut track_used = vec![false; n_tracks];
    let mut det_used = vec![false; n_dets];
    let mut matched = Vec::with_capacity(n_tracks.min(n_dets));

    loop {
        let mut best = None;
        let mut best_cost = f32::INFINITY;

        for t in 0..n_tracks {
            if track_used[t] {
                continue;
            }

            for d in 0..n_dets {
                if det_used[d] {
                    continue;
                }

                let cost = costs[[t, d]];
                // non-finite entries never take part in a match
                if cost.is_finite() && cost < best_cost {
                    best_cost = cost;
                    best = Some((t, d));
                }
            }
        }

        match best {
            Some((t, d)) if best_cost <= max_cost => {
                matched.push((t, d));
                track_used[t] = true;
                det_used[d] = true;
            }
            _ => break,
        }
    }

    Assignment {
        matched,
        unmatched_tracks: (0..n_tracks).filter(|&t| !track_used[t]).collect(),
        unmatched_detections: (0..n_dets).filter(|&d| !det_used[d]).collect(),
    }
}
