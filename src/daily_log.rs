use crate::errors::AppError;
use crate::models::DailyRecord;
use crate::storage::Storage;
use chrono::NaiveDate;

pub const COMPLETED_KEY: &str = "savedDays";

pub fn record_key(date: NaiveDate) -> String {
    format!("dailyLog_{}", date.format("%Y-%m-%d"))
}

/// Per-date records plus the registry of committed dates.
pub trait DailyLogStore {
    /// Stored record for `date`, or a fresh default one.
    fn load_day(&self, date: NaiveDate) -> DailyRecord;

    /// Returns `None` when nothing (readable) is stored for `date`.
    fn stored_day(&self, date: NaiveDate) -> Option<DailyRecord>;

    fn save_day(&mut self, date: NaiveDate, record: &DailyRecord) -> Result<(), AppError>;

    /// Adds `date` to the registry. Already-registered dates are left alone.
    fn mark_completed(&mut self, date: NaiveDate) -> Result<(), AppError>;

    fn is_completed(&self, date: NaiveDate) -> bool;

    fn completed_dates(&self) -> Vec<NaiveDate>;
}

impl DailyLogStore for Storage {
    fn load_day(&self, date: NaiveDate) -> DailyRecord {
        self.stored_day(date).unwrap_or_default()
    }

    fn stored_day(&self, date: NaiveDate) -> Option<DailyRecord> {
        self.get(&record_key(date))
    }

    fn save_day(&mut self, date: NaiveDate, record: &DailyRecord) -> Result<(), AppError> {
        self.set(&record_key(date), record)
    }

    fn mark_completed(&mut self, date: NaiveDate) -> Result<(), AppError> {
        let mut dates = self.completed_dates();
        if dates.contains(&date) {
            return Ok(());
        }
        dates.push(date);
        self.set(COMPLETED_KEY, &dates)
    }

    fn is_completed(&self, date: NaiveDate) -> bool {
        self.completed_dates().contains(&date)
    }

    fn completed_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.get(COMPLETED_KEY).unwrap_or_default();
        // older data files can carry the same day twice
        let mut seen = std::collections::HashSet::new();
        dates.retain(|date| seen.insert(*date));
        dates
    }
}
