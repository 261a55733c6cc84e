use chrono::{Datelike, Duration, NaiveDate, Weekday};
use gan_parser::calendar::{
    Calendar, CalendarEvent, CalendarEventType, DayTypeConfiguration, DefaultWeek, WeekendDays,
};
use gan_parser::{BaselineTask, CalendarError, Task};
use proptest::prelude::*;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn calendar_with(weekend_days: WeekendDays, runnable_on_weekends: bool) -> Calendar {
    Calendar {
        base_id: None,
        day_type_config: DayTypeConfiguration {
            type_ids: vec!["0".into(), "1".into()],
            default_week: DefaultWeek {
                id: "1".into(),
                name: "default".into(),
                weekend_days,
            },
            is_task_runnable_on_weekends: runnable_on_weekends,
        },
        events: Vec::new(),
    }
}

fn weekend_calendar() -> Calendar {
    calendar_with(WeekendDays::saturday_sunday(), false)
}

fn event(year: Option<i32>, month: u32, day: u32, event_type: CalendarEventType) -> CalendarEvent {
    CalendarEvent {
        year,
        month,
        day,
        event_type,
        color: None,
        description: None,
    }
}

#[test]
fn weekend_flags_follow_the_default_week() {
    let cal = weekend_calendar();
    // 2024-01-06 is a Saturday, 2024-01-07 a Sunday
    assert!(cal.is_weekend(d(2024, 1, 6)));
    assert!(cal.is_weekend(d(2024, 1, 7)));
    assert!(!cal.is_weekend(d(2024, 1, 8)));

    let mut fridays_off = WeekendDays::default();
    fridays_off.friday = true;
    let cal = calendar_with(fridays_off, false);
    assert!(cal.is_weekend(d(2024, 1, 5)));
    assert!(!cal.is_weekend(d(2024, 1, 6)));
}

#[test]
fn recurring_holiday_matches_every_year() {
    let mut cal = weekend_calendar();
    cal.events.push(event(None, 1, 1, CalendarEventType::Holiday));
    assert!(cal.is_holiday(d(2024, 1, 1)));
    assert!(cal.is_holiday(d(2031, 1, 1)));
    assert!(!cal.is_holiday(d(2024, 1, 2)));
}

#[test]
fn one_off_holiday_matches_its_year_only() {
    let mut cal = weekend_calendar();
    cal.events.push(event(Some(2024), 5, 10, CalendarEventType::Holiday));
    assert!(cal.is_holiday(d(2024, 5, 10)));
    assert!(!cal.is_holiday(d(2025, 5, 10)));
}

#[test]
fn only_holiday_events_are_holidays() {
    let mut cal = weekend_calendar();
    cal.events.push(event(None, 3, 1, CalendarEventType::WorkingDay));
    cal.events.push(event(None, 3, 4, CalendarEventType::Neutral));
    assert!(!cal.is_holiday(d(2024, 3, 1)));
    assert!(!cal.is_holiday(d(2024, 3, 4)));
}

#[test]
fn two_day_task_from_thursday_ends_on_friday() {
    let cal = weekend_calendar();
    // 2024-01-04 is a Thursday
    assert_eq!(cal.add_workdays(d(2024, 1, 4), 2 - 1).unwrap(), d(2024, 1, 5));
}

#[test]
fn advancing_skips_weekends() {
    let cal = weekend_calendar();
    let friday = d(2024, 1, 5);
    let next = cal.add_workdays(friday, 1).unwrap();
    assert_eq!(next.weekday(), Weekday::Mon);
    assert_eq!(next, d(2024, 1, 8));
}

#[test]
fn advancing_skips_holidays() {
    let mut cal = weekend_calendar();
    cal.events.push(event(Some(2024), 5, 10, CalendarEventType::Holiday));
    // Thursday + 1 workday: Friday is a holiday, so the following Monday
    assert_eq!(cal.add_workdays(d(2024, 5, 9), 1).unwrap(), d(2024, 5, 13));
}

#[test]
fn weekends_count_when_tasks_run_on_weekends() {
    let cal = calendar_with(WeekendDays::saturday_sunday(), true);
    assert_eq!(cal.add_workdays(d(2024, 1, 5), 1).unwrap(), d(2024, 1, 6));
    assert!(cal.is_workday(d(2024, 1, 7)));
}

#[test]
fn holidays_still_count_when_tasks_run_on_weekends() {
    let mut cal = calendar_with(WeekendDays::saturday_sunday(), true);
    cal.events.push(event(None, 1, 6, CalendarEventType::Holiday));
    assert!(!cal.is_workday(d(2024, 1, 6)));
    assert_eq!(cal.add_workdays(d(2024, 1, 5), 1).unwrap(), d(2024, 1, 7));
}

#[test]
fn non_positive_days_return_the_start() {
    let cal = weekend_calendar();
    let saturday = d(2024, 1, 6);
    assert_eq!(cal.add_workdays(saturday, 0).unwrap(), saturday);
    assert_eq!(cal.add_workdays(saturday, -3).unwrap(), saturday);
}

#[test]
fn calendar_without_workdays_fails_instead_of_looping() {
    let all_off = WeekendDays {
        sunday: true,
        monday: true,
        tuesday: true,
        wednesday: true,
        thursday: true,
        friday: true,
        saturday: true,
    };
    let cal = calendar_with(all_off, false);
    let err = cal.add_workdays_capped(d(2024, 1, 8), 1, 40).unwrap_err();
    assert_eq!(
        err,
        CalendarError::NoWorkdayFound {
            start: d(2024, 1, 8),
            searched_days: 40
        }
    );
    assert!(matches!(
        cal.add_workdays(d(2024, 1, 8), 1),
        Err(CalendarError::NoWorkdayFound { .. })
    ));
}

#[test]
fn long_holiday_runs_below_the_cap_are_crossed() {
    let mut cal = weekend_calendar();
    for day in 1..=31 {
        cal.events.push(event(Some(2024), 8, day, CalendarEventType::Holiday));
    }
    // 2024-07-31 is a Wednesday; August is off, 2024-09-02 is a Monday
    assert_eq!(
        cal.add_workdays_capped(d(2024, 7, 31), 1, 40).unwrap(),
        d(2024, 9, 2)
    );
}

#[test]
fn advancing_past_the_last_date_is_an_error() {
    let cal = calendar_with(WeekendDays::default(), false);
    let err = cal.add_workdays(NaiveDate::MAX, 1).unwrap_err();
    assert_eq!(err, CalendarError::DateOutOfRange { start: NaiveDate::MAX });
}

#[test]
fn task_end_date_is_derived_from_the_calendar() {
    let cal = weekend_calendar();
    let task = Task::new(7, "Write report", d(2024, 1, 4), 3, &cal).unwrap();
    assert_eq!(task.start_date(), d(2024, 1, 4));
    assert_eq!(task.end_date(), d(2024, 1, 8));
    assert_eq!(task.duration_in_days(), 3);
    assert!(task.is_expanded);
    assert!(!task.is_summary());
}

#[test]
fn baseline_task_end_date_is_derived_from_the_calendar() {
    let cal = weekend_calendar();
    let task = BaselineTask::new(0, d(2024, 1, 5), 4, &cal).unwrap();
    assert_eq!(task.end_date(), d(2024, 1, 10));
    assert!(!task.is_summary);
    assert!(!task.is_milestone);
}

#[test]
fn most_negative_duration_ends_on_the_start_date() {
    let cal = weekend_calendar();
    let task = Task::new(1, "Backwards", d(2024, 1, 4), i64::MIN, &cal).unwrap();
    assert_eq!(task.end_date(), d(2024, 1, 4));

    let baseline = BaselineTask::new(1, d(2024, 1, 4), i64::MIN, &cal).unwrap();
    assert_eq!(baseline.end_date(), d(2024, 1, 4));
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..20_000).prop_map(|offset| d(1990, 1, 1) + Duration::days(offset))
}

proptest! {
    #[test]
    fn unrestricted_calendar_counts_calendar_days(start in any_date(), duration in 1i64..400) {
        let cal = calendar_with(WeekendDays::default(), false);
        prop_assert_eq!(
            cal.add_workdays(start, duration - 1).unwrap(),
            start + Duration::days(duration - 1)
        );
    }

    #[test]
    fn non_positive_days_never_move(start in any_date(), days in -400i64..=0) {
        prop_assert_eq!(weekend_calendar().add_workdays(start, days).unwrap(), start);
    }

    #[test]
    fn result_is_never_a_weekend_or_holiday(
        start in any_date(),
        days in 1i64..200,
        runnable_on_weekends in any::<bool>(),
    ) {
        let mut cal = calendar_with(WeekendDays::saturday_sunday(), runnable_on_weekends);
        cal.events.push(event(None, 12, 25, CalendarEventType::Holiday));
        cal.events.push(event(None, 1, 1, CalendarEventType::Holiday));
        cal.events.push(event(Some(2000), 6, 15, CalendarEventType::Holiday));

        let end = cal.add_workdays(start, days).unwrap();
        prop_assert!(end > start);
        prop_assert!(!cal.is_holiday(end));
        prop_assert!(runnable_on_weekends || !cal.is_weekend(end));
    }
}
