use chrono::{Datelike, NaiveDate, Weekday};
use invoice_core::schedule::{
    next_occurrence, upcoming, Frequency, RecurrenceRule, RecurrenceRuleInput,
};

#[test]
fn test_future_start_is_the_first_occurrence() {
    let rule = RecurrenceRule::new(
        Frequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    );
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
        NaiveDate::from_ymd_opt(2024, 6, 1)
    );

    let bounded = rule.with_end_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    assert_eq!(
        next_occurrence(&bounded, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
        None
    );
}

#[test]
fn test_daily_advances_by_interval_days() {
    let rule = RecurrenceRule::new(
        Frequency::Daily,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    )
    .with_interval(3);
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        NaiveDate::from_ymd_opt(2025, 1, 4)
    );
}

#[test]
fn test_business_daily_lands_on_monday_after_friday() {
    let friday = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    let rule = RecurrenceRule::new(Frequency::Daily, friday).with_business_days_only();

    let next = next_occurrence(&rule, friday).unwrap();
    assert_eq!(next, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    assert_eq!(next.weekday(), Weekday::Mon);
}

#[test]
fn test_weekly_anchor_two_mondays_out() {
    let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let rule = RecurrenceRule::new(Frequency::Weekly, monday)
        .with_interval(2)
        .with_day_of_week(Weekday::Mon);
    assert_eq!(
        next_occurrence(&rule, monday),
        NaiveDate::from_ymd_opt(2024, 1, 15)
    );
}

#[test]
fn test_weekly_without_anchor_adds_whole_weeks() {
    let rule = RecurrenceRule::new(
        Frequency::Weekly,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    );
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        NaiveDate::from_ymd_opt(2025, 1, 8)
    );
}

#[test]
fn test_monthly_day_31_clamps_to_short_month() {
    let rule = RecurrenceRule::new(
        Frequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    )
    .with_day_of_month(31);

    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()),
        NaiveDate::from_ymd_opt(2024, 4, 30)
    );
    // The anchor pulls the cursor back to the 31st in longer months.
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()),
        NaiveDate::from_ymd_opt(2024, 5, 31)
    );
}

#[test]
fn test_monthly_without_anchor_follows_the_cursor_day() {
    let rule = RecurrenceRule::new(
        Frequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    );

    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
        NaiveDate::from_ymd_opt(2024, 2, 29)
    );
    // Without an anchor the clamped day sticks: the cursor day is now 29.
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
        NaiveDate::from_ymd_opt(2024, 3, 29)
    );
}

#[test]
fn test_quarterly_steps_three_months_per_interval() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let as_of = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

    let quarterly = RecurrenceRule::new(Frequency::Quarterly, start);
    assert_eq!(
        next_occurrence(&quarterly, as_of),
        NaiveDate::from_ymd_opt(2024, 4, 15)
    );

    let semi_annual = quarterly.with_interval(2);
    assert_eq!(
        next_occurrence(&semi_annual, as_of),
        NaiveDate::from_ymd_opt(2024, 7, 15)
    );
}

#[test]
fn test_yearly_clamps_leap_day() {
    let rule = RecurrenceRule::new(
        Frequency::Yearly,
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
    );
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
        NaiveDate::from_ymd_opt(2025, 2, 28)
    );
}

#[test]
fn test_end_date_bounds_occurrences() {
    let rule = RecurrenceRule::new(
        Frequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .with_end_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()),
        NaiveDate::from_ymd_opt(2024, 3, 1)
    );
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
        None
    );
}

#[test]
fn test_occurrence_on_the_end_date_itself_counts() {
    let rule = RecurrenceRule::new(
        Frequency::Daily,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .with_end_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        NaiveDate::from_ymd_opt(2024, 1, 2)
    );
}

#[test]
fn test_step_budget_gives_up_on_distant_references() {
    let rule = RecurrenceRule::new(
        Frequency::Daily,
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    );
    // 731 daily steps would be needed, past the 500-step budget.
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()),
        None
    );
}

#[test]
fn test_huge_quarterly_interval_runs_out_cleanly() {
    // 800M quarters leave the representable calendar entirely; the advancer
    // answers with None instead of failing.
    let rule = RecurrenceRule::new(
        Frequency::Quarterly,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    )
    .with_interval(800_000_000);
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
        None
    );
}

#[test]
fn test_huge_yearly_interval_runs_out_cleanly() {
    let rule = RecurrenceRule::new(
        Frequency::Yearly,
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
    )
    .with_interval(500_000);
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
        None
    );
}

#[test]
fn test_huge_monthly_interval_within_the_calendar_still_lands() {
    // 3M months is ~250k years, still inside the calendar: one step clears
    // the reference date.
    let rule = RecurrenceRule::new(
        Frequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    )
    .with_interval(3_000_000);
    let next = next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()).unwrap();
    assert_eq!(next.day(), 15);
    assert_eq!(next.year(), 2024 + 250_000);
}

#[test]
fn test_zero_interval_behaves_as_one() {
    let rule = RecurrenceRule::new(
        Frequency::Daily,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .with_interval(0);
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        NaiveDate::from_ymd_opt(2024, 1, 2)
    );
}

#[test]
fn test_upcoming_lists_successive_runs() {
    let rule = RecurrenceRule::new(
        Frequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    )
    .with_day_of_month(31);

    let runs = upcoming(&rule, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(), 4);
    assert_eq!(
        runs,
        vec![
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        ]
    );
}

#[test]
fn test_upcoming_stops_at_the_end_date() {
    let rule = RecurrenceRule::new(
        Frequency::Weekly,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .with_end_date(NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());

    let runs = upcoming(&rule, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10);
    assert_eq!(
        runs,
        vec![
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        ]
    );
}

#[test]
fn test_loose_payload_normalizes_and_advances() {
    let raw = r#"{
        "frequency": "weekly",
        "interval": 2,
        "dayOfWeek": 1,
        "startDate": "2024-01-01"
    }"#;
    let input: RecurrenceRuleInput = serde_json::from_str(raw).expect("parse rule payload");
    let rule = input.normalize().expect("usable rule");

    assert_eq!(rule.day_of_week, Some(Weekday::Mon));
    assert_eq!(
        next_occurrence(&rule, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        NaiveDate::from_ymd_opt(2024, 1, 15)
    );
}

#[test]
fn test_unusable_start_date_means_no_next_run() {
    let raw = r#"{ "frequency": "monthly", "startDate": "not a date" }"#;
    let input: RecurrenceRuleInput = serde_json::from_str(raw).expect("parse rule payload");
    assert!(input.normalize().is_none());
}
