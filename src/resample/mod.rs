//! Calendar resampling and extrema lookup.
//!
//! - bucket boundaries per frequency (`calendar`)
//! - mean-per-bucket aggregation (`resample_mean`)
//! - peak/low lookup on the aggregated series (`extrema`)

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Bucket, Frequency, Observation, ResampledSeries};

pub mod calendar;
pub mod extrema;

pub use extrema::find_extremes;

/// `(date, rate)` pairs for one target, in input order.
pub fn select_target(observations: &[Observation], target: &str) -> Vec<(NaiveDate, f64)> {
    observations
        .iter()
        .filter(|o| o.target == target)
        .map(|o| (o.date, o.rate))
        .collect()
}

/// Aggregate points into calendar buckets, taking the mean rate per bucket.
///
/// Every bucket between the first and last observed bucket is emitted; buckets
/// without observations carry `mean: None`. Non-finite values are ignored.
pub fn resample_mean(points: &[(NaiveDate, f64)], frequency: Frequency) -> ResampledSeries {
    let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for &(date, value) in points {
        if !value.is_finite() {
            continue;
        }
        let entry = sums.entry(frequency.bucket_end(date)).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    let (Some(&first), Some(&last)) = (sums.keys().next(), sums.keys().next_back()) else {
        return ResampledSeries {
            frequency,
            buckets: Vec::new(),
        };
    };

    let mut buckets = Vec::new();
    let mut end = first;
    while end <= last {
        let (mean, count) = match sums.get(&end) {
            Some(&(sum, n)) => (Some(sum / n as f64), n),
            None => (None, 0),
        };
        buckets.push(Bucket {
            start: frequency.bucket_start(end),
            end,
            mean,
            count,
        });
        end = frequency.next_bucket_end(end);
    }

    log::debug!(
        "resampled {} point(s) into {} {} bucket(s)",
        points.len(),
        buckets.len(),
        frequency.display_name().to_lowercase()
    );

    ResampledSeries { frequency, buckets }
}
