//! Calendar bucket boundaries for each `Frequency`.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::Frequency;

impl Frequency {
    /// Last day of the bucket containing `date` (the bucket label).
    pub fn bucket_end(self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Weekly => {
                let days_to_sunday = 6 - date.weekday().num_days_from_monday() as i64;
                date + Duration::days(days_to_sunday)
            }
            Frequency::Monthly => last_day_of_month(date.year(), date.month()),
            Frequency::Quarterly => {
                let quarter_end_month = ((date.month() - 1) / 3) * 3 + 3;
                last_day_of_month(date.year(), quarter_end_month)
            }
            Frequency::Yearly => last_day_of_month(date.year(), 12),
        }
    }

    /// First day of the bucket containing `date`.
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Weekly => self.bucket_end(date) - Duration::days(6),
            Frequency::Monthly => first_day_of_month(date.year(), date.month()),
            Frequency::Quarterly => {
                let quarter_start_month = ((date.month() - 1) / 3) * 3 + 1;
                first_day_of_month(date.year(), quarter_start_month)
            }
            Frequency::Yearly => first_day_of_month(date.year(), 1),
        }
    }

    /// Label of the bucket following the one labelled `end`.
    pub fn next_bucket_end(self, end: NaiveDate) -> NaiveDate {
        self.bucket_end(end + Duration::days(1))
    }
}

fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
