//! Export a resampled series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ResampledSeries;
use crate::error::AppError;

/// Write one row per bucket to a CSV file.
pub fn write_series_csv(path: &Path, target: &str, series: &ResampledSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_series(file, target, series)?;
    log::info!("wrote {} bucket(s) to {}", series.buckets.len(), path.display());
    Ok(())
}

fn write_series<W: Write>(out: W, target: &str, series: &ResampledSeries) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    writer
        .write_record(["bucket_start", "bucket_end", "frequency", "target", "mean_rate", "count"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for b in &series.buckets {
        writer
            .write_record([
                b.start.to_string(),
                b.end.to_string(),
                series.frequency.code().to_string(),
                target.to_string(),
                b.mean.map(|m| format!("{m:.10}")).unwrap_or_default(),
                b.count.to_string(),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bucket, Frequency};
    use chrono::NaiveDate;

    #[test]
    fn empty_buckets_have_blank_mean() {
        let d = |m, day| NaiveDate::from_ymd_opt(2023, m, day).unwrap();
        let series = ResampledSeries {
            frequency: Frequency::Monthly,
            buckets: vec![
                Bucket { start: d(1, 1), end: d(1, 31), mean: Some(1.25), count: 2 },
                Bucket { start: d(2, 1), end: d(2, 28), mean: None, count: 0 },
            ],
        };

        let mut buf = Vec::new();
        write_series(&mut buf, "EUR", &series).unwrap();
        let txt = String::from_utf8(buf).unwrap();
        assert_eq!(
            txt,
            "bucket_start,bucket_end,frequency,target,mean_rate,count\n\
             2023-01-01,2023-01-31,M,EUR,1.2500000000,2\n\
             2023-02-01,2023-02-28,M,EUR,,0\n"
        );
    }
}
