//! Selective labelling for dense scatter plots.
//!
//! Each quadrant ranks its own points by what makes them notable there,
//! takes a share scaled by quadrant density, then the global limit is
//! topped up with the most variable leftovers.

use std::cmp::Ordering;

use portrisk_core::types::compare_codes;

use super::types::{DispersionPoint, Quadrant};

/// Quadrants above this size get two extra labels.
const DENSE_QUADRANT: usize = 15;
/// Quadrants below this size get two fewer labels (never below two).
const SPARSE_QUADRANT: usize = 5;

/// Indices into `points` to label, in selection order. At most `limit`.
pub fn select_labels(points: &[DispersionPoint], per_quadrant: usize, limit: usize) -> Vec<usize> {
    let mut selected: Vec<usize> = Vec::new();

    for quadrant in Quadrant::ALL {
        let mut members: Vec<usize> = (0..points.len())
            .filter(|&i| points[i].quadrant == quadrant)
            .collect();
        if members.is_empty() {
            continue;
        }
        members.sort_by(|&a, &b| rank_in_quadrant(quadrant, &points[a], &points[b]));

        let take = if members.len() > DENSE_QUADRANT {
            per_quadrant + 2
        } else if members.len() < SPARSE_QUADRANT {
            per_quadrant.saturating_sub(2).max(2)
        } else {
            per_quadrant
        };
        selected.extend(members.into_iter().take(take));
    }

    if selected.len() < limit {
        let mut rest: Vec<usize> = (0..points.len()).filter(|i| !selected.contains(i)).collect();
        rest.sort_by(|&a, &b| {
            let (pa, pb) = (&points[a], &points[b]);
            desc(pa.variability, pb.variability)
                .then_with(|| desc(pa.abs_delta, pb.abs_delta))
                .then_with(|| compare_codes(&pa.code, &pb.code))
        });
        let room = limit - selected.len();
        selected.extend(rest.into_iter().take(room));
    }

    selected.truncate(limit);
    selected
}

/// Most notable first; code order breaks ties.
fn rank_in_quadrant(quadrant: Quadrant, a: &DispersionPoint, b: &DispersionPoint) -> Ordering {
    let primary = match quadrant {
        Quadrant::Chronic => desc(a.combined_median, b.combined_median),
        Quadrant::Emerging => desc(a.delta, b.delta),
        Quadrant::Controlled => a.abs_delta.total_cmp(&b.abs_delta),
        Quadrant::Improving => a.delta.total_cmp(&b.delta),
    };
    primary
        .then_with(|| desc(a.variability, b.variability))
        .then_with(|| compare_codes(&a.code, &b.code))
}

fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
