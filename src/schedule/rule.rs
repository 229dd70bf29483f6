use chrono::{DateTime, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

fn default_interval() -> u32 {
    1
}

/// How often a recurring template fires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

/// A recurrence schedule: frequency plus optional anchors and bounds.
///
/// Dates are plain calendar days; a `NaiveDate` carries no time component, so
/// occurrences are midnight-normalized by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Multiplier on the frequency unit. Values below 1 behave as 1.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekly anchor. Ignored by other frequencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<Weekday>,
    /// Monthly/quarterly/yearly anchor, clamped to each destination month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    /// Daily mode only: count Monday through Friday, skip weekends.
    #[serde(default)]
    pub business_days_only: bool,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, start_date: NaiveDate) -> Self {
        Self {
            frequency,
            interval: 1,
            day_of_week: None,
            day_of_month: None,
            business_days_only: false,
            start_date,
            end_date: None,
        }
    }

    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_day_of_week(mut self, weekday: Weekday) -> Self {
        self.day_of_week = Some(weekday);
        self
    }

    pub fn with_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }

    pub fn with_business_days_only(mut self) -> Self {
        self.business_days_only = true;
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }

    /// Whether a candidate occurrence falls on or before the end bound.
    pub fn allows(&self, date: NaiveDate) -> bool {
        match self.end_date {
            Some(end) => date <= end,
            None => true,
        }
    }
}

/// Loose payload shape recurrence rules arrive in: string dates, raw numbers,
/// everything optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurrenceRuleInput {
    pub frequency: Frequency,
    pub interval: Option<i64>,
    /// 0 = Sunday through 6 = Saturday; other values are taken mod 7.
    pub day_of_week: Option<i64>,
    pub day_of_month: Option<i64>,
    pub business_days_only: Option<bool>,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl RecurrenceRuleInput {
    /// Collapses the loose payload into a typed rule.
    ///
    /// Missing or non-positive intervals become 1, out-of-range anchors are
    /// wrapped or clamped, and a bad end date is dropped. Only an unusable
    /// start date makes the whole rule unusable.
    pub fn normalize(&self) -> Option<RecurrenceRule> {
        let start_date = parse_date(&self.start_date)?;
        let interval = match self.interval {
            Some(value) if value >= 1 => u32::try_from(value).unwrap_or(u32::MAX),
            _ => 1,
        };
        let day_of_week = self.day_of_week.map(weekday_from_sunday_index);
        let day_of_month = self.day_of_month.map(|day| day.clamp(1, 31) as u32);
        let end_date = self.end_date.as_deref().and_then(parse_date);
        Some(RecurrenceRule {
            frequency: self.frequency,
            interval,
            day_of_week,
            day_of_month,
            business_days_only: self.business_days_only.unwrap_or(false),
            start_date,
            end_date,
        })
    }
}

fn weekday_from_sunday_index(index: i64) -> Weekday {
    match index.rem_euclid(7) {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// Accepts plain dates, RFC 3339 timestamps, and bare datetimes; timestamps
/// are truncated to their calendar date.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(stamp.date());
    }
    None
}
