//! Peak/low lookup on a resampled series.

use crate::domain::{Extreme, Extremes, ResampledSeries};

/// Locate the buckets with the highest and lowest mean.
///
/// Empty buckets are skipped. Ties resolve to the earliest bucket.
pub fn find_extremes(series: &ResampledSeries) -> Option<Extremes> {
    let mut peak: Option<Extreme> = None;
    let mut low: Option<Extreme> = None;

    for bucket in &series.buckets {
        let Some(value) = bucket.mean else { continue };
        let candidate = Extreme { date: bucket.end, value };

        if peak.is_none_or(|p| value > p.value) {
            peak = Some(candidate);
        }
        if low.is_none_or(|l| value < l.value) {
            low = Some(candidate);
        }
    }

    Some(Extremes { peak: peak?, low: low? })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bucket, Frequency};
    use crate::resample::resample_mean;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn example_peak_is_second_week() {
        let series = resample_mean(&[(d(2023, 1, 1), 1.0), (d(2023, 1, 8), 1.1)], Frequency::Weekly);
        let ext = find_extremes(&series).unwrap();
        assert_eq!(ext.peak.date, d(2023, 1, 8));
        assert_eq!(ext.peak.value, 1.1);
        assert_eq!(ext.low.date, d(2023, 1, 1));
        assert_eq!(ext.low.value, 1.0);
    }

    #[test]
    fn extremes_match_true_max_and_min() {
        let points = vec![
            (d(2021, 3, 1), 0.91),
            (d(2021, 7, 9), 0.84),
            (d(2022, 1, 4), 0.88),
            (d(2022, 9, 30), 1.02),
            (d(2023, 6, 1), 0.93),
        ];
        let series = resample_mean(&points, Frequency::Quarterly);
        let ext = find_extremes(&series).unwrap();

        let means: Vec<f64> = series.buckets.iter().filter_map(|b| b.mean).collect();
        let max = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = means.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(ext.peak.value, max);
        assert_eq!(ext.low.value, min);
        assert_eq!(ext.peak.date, d(2022, 9, 30));
        assert_eq!(ext.low.date, d(2021, 9, 30));
    }

    #[test]
    fn ties_resolve_to_first_bucket() {
        let series = ResampledSeries {
            frequency: Frequency::Monthly,
            buckets: vec![
                Bucket { start: d(2023, 1, 1), end: d(2023, 1, 31), mean: Some(2.0), count: 1 },
                Bucket { start: d(2023, 2, 1), end: d(2023, 2, 28), mean: None, count: 0 },
                Bucket { start: d(2023, 3, 1), end: d(2023, 3, 31), mean: Some(2.0), count: 1 },
            ],
        };
        let ext = find_extremes(&series).unwrap();
        assert_eq!(ext.peak.date, d(2023, 1, 31));
        assert_eq!(ext.low.date, d(2023, 1, 31));
    }

    #[test]
    fn no_extremes_without_values() {
        let series = ResampledSeries {
            frequency: Frequency::Weekly,
            buckets: Vec::new(),
        };
        assert!(find_extremes(&series).is_none());
    }
}
