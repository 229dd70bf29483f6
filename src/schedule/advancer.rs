use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use super::rule::{Frequency, RecurrenceRule};

pub const MAX_ADVANCE_STEPS: usize = 500;

/// Next occurrence of `rule` strictly after `as_of`, or `None` when the
/// schedule has ended or no occurrence lands within the step budget.
///
/// The seed is `start_date` itself: a start in the future is the first
/// occurrence. Past that, the cursor advances one period at a time until it
/// passes `as_of`, giving up past `end_date` or after `MAX_ADVANCE_STEPS`
/// transitions. Running out is an answer, not a failure.
pub fn next_occurrence(rule: &RecurrenceRule, as_of: NaiveDate) -> Option<NaiveDate> {
    let mut cursor = rule.start_date;
    if cursor > as_of {
        return rule.allows(cursor).then_some(cursor);
    }
    for _ in 0..MAX_ADVANCE_STEPS {
        cursor = advance(rule, cursor);
        if !rule.allows(cursor) {
            return None;
        }
        if cursor > as_of {
            return Some(cursor);
        }
    }
    tracing::debug!(
        frequency = ?rule.frequency,
        interval = rule.effective_interval(),
        steps = MAX_ADVANCE_STEPS,
        "no occurrence within step budget"
    );
    None
}

/// `next_occurrence` against the local calendar date.
pub fn next_occurrence_today(rule: &RecurrenceRule) -> Option<NaiveDate> {
    next_occurrence(rule, Local::now().date_naive())
}

/// Up to `limit` successive occurrences after `as_of`, in order.
pub fn upcoming(rule: &RecurrenceRule, as_of: NaiveDate, limit: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut reference = as_of;
    while dates.len() < limit {
        match next_occurrence(rule, reference) {
            Some(date) => {
                reference = date;
                dates.push(date);
            }
            None => break,
        }
    }
    dates
}

fn advance(rule: &RecurrenceRule, cursor: NaiveDate) -> NaiveDate {
    let interval = rule.effective_interval();
    match rule.frequency {
        Frequency::Daily => {
            if rule.business_days_only {
                advance_business_days(cursor, interval)
            } else {
                cursor + Duration::days(interval as i64)
            }
        }
        Frequency::Weekly => match rule.day_of_week {
            Some(target) => {
                next_weekday_after(cursor, target) + Duration::weeks(interval as i64 - 1)
            }
            None => cursor + Duration::weeks(interval as i64),
        },
        Frequency::Monthly => step_months(cursor, interval as i64, rule.day_of_month),
        Frequency::Quarterly => step_months(cursor, interval as i64 * 3, rule.day_of_month),
        Frequency::Yearly => step_years(cursor, interval as i64, rule.day_of_month),
    }
}

/// Walks forward one calendar day at a time, counting only Monday through
/// Friday against the interval.
fn advance_business_days(from: NaiveDate, count: u32) -> NaiveDate {
    let mut date = from;
    let mut remaining = count;
    while remaining > 0 {
        date += Duration::days(1);
        if is_business_day(date) {
            remaining -= 1;
        }
    }
    date
}

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The next `target` weekday strictly after `from`: 1 to 7 days ahead.
fn next_weekday_after(from: NaiveDate, target: Weekday) -> NaiveDate {
    let current = from.weekday().num_days_from_monday() as i64;
    let wanted = target.num_days_from_monday() as i64;
    let mut delta = (wanted - current).rem_euclid(7);
    if delta == 0 {
        delta = 7;
    }
    from + Duration::days(delta)
}

/// Steps whole months on a flat month index, so any interval stays within
/// i64 arithmetic. A destination outside the representable calendar leaves
/// the cursor where it is; the caller's step budget then runs it out.
fn step_months(from: NaiveDate, months: i64, target_day: Option<u32>) -> NaiveDate {
    let index = from.year() as i64 * 12 + from.month0() as i64 + months;
    let year = match i32::try_from(index.div_euclid(12)) {
        Ok(year) => year,
        Err(_) => return from,
    };
    let month = index.rem_euclid(12) as u32 + 1;
    let day = target_day.unwrap_or_else(|| from.day()).max(1);
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(from)
}

fn step_years(from: NaiveDate, years: i64, target_day: Option<u32>) -> NaiveDate {
    let year = match i32::try_from(from.year() as i64 + years) {
        Ok(year) => year,
        Err(_) => return from,
    };
    let month = from.month();
    let day = target_day.unwrap_or_else(|| from.day()).max(1);
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(from)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}
