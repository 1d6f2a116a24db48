//! Nearest-sample lookup for the map scrubber.

use super::shaper::MapSample;

/// Find the sample whose time is closest to `query_time`.
///
/// Linear scan: samples are not assumed to be sorted. On ties the earliest
/// sample in input order wins. Returns `None` for an empty slice or a NaN
/// query time.
pub fn nearest(samples: &[MapSample], query_time: f64) -> Option<&MapSample> {
    let mut best: Option<(&MapSample, f64)> = None;
    for sample in samples {
        let distance = (sample.time - query_time).abs();
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((sample, distance)),
        }
    }
    best.map(|(sample, _)| sample)
}
