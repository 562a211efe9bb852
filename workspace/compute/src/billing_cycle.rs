//! Billing cycle arithmetic for credit card statements.
//!
//! A card statement closes on its cutoff day. The cycle containing a reference
//! date starts the day after the previous cutoff and ends on the last instant
//! of the next cutoff, so cycles of consecutive months tile the calendar.
//! Cutoff days that do not exist in a month (31 in April, 30 in February)
//! close on that month's last day instead.

use chrono::{DateTime, Datelike, Days, LocalResult, Months, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use common::BillingCycleDto;

/// Spanish month abbreviations used in cycle labels.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// The statement window of a card around a reference date.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingCycle<Tz: TimeZone> {
    /// 00:00 of the day after the previous cutoff
    pub start: DateTime<Tz>,
    /// 23:59:59.999999999 of the closing cutoff day
    pub end: DateTime<Tz>,
    /// e.g. "Dic 16 - Ene 15"
    pub label: String,
}

impl<Tz: TimeZone> BillingCycle<Tz> {
    /// Ledger dates whose midnight falls in `[start, end)`.
    pub fn ledger_window(&self) -> LedgerWindow {
        LedgerWindow::from_instants(&self.start, &self.end)
    }

    pub fn to_dto(&self) -> BillingCycleDto {
        BillingCycleDto {
            start_date: self.start.fixed_offset(),
            end_date: self.end.fixed_offset(),
            label: self.label.clone(),
        }
    }
}

/// A closed-open range of ledger dates, `start <= date < end_exclusive`.
///
/// Ledger rows carry calendar dates, so instant windows are translated to the
/// dates whose first local instant lies inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerWindow {
    pub start: NaiveDate,
    pub end_exclusive: NaiveDate,
}

impl LedgerWindow {
    pub fn from_instants<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Self {
        let tz = start.timezone();
        let start_date = start.date_naive();
        let end_date = end.date_naive();

        let start = if *start == start_of_day(&tz, start_date) {
            start_date
        } else {
            start_date + Days::new(1)
        };
        let end_exclusive = if *end == start_of_day(&tz, end_date) {
            end_date
        } else {
            end_date + Days::new(1)
        };

        Self { start, end_exclusive }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end_exclusive
    }
}

/// Returns the number of days in the month of `date`.
pub fn last_day_of_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    let last = (first + Months::new(1)) - Days::new(1);
    last.day()
}

/// The day a statement closes in the month of `month`: the configured cutoff
/// when the month has that day, the month's last day otherwise.
pub fn effective_cutoff(month: NaiveDate, cutoff_day: Option<u32>) -> NaiveDate {
    let last_day = last_day_of_month(month);
    let day = cutoff_day
        .filter(|day| (1..=last_day).contains(day))
        .unwrap_or(last_day);
    first_of_month(month) + Days::new(u64::from(day - 1))
}

/// Computes the billing cycle containing `reference` for a card closing on
/// `cutoff_day` (`None` closes on the last day of each month).
///
/// Both boundaries are expressed in the time zone of `reference`.
pub fn compute_cycle<Tz: TimeZone>(reference: &DateTime<Tz>, cutoff_day: Option<u32>) -> BillingCycle<Tz> {
    let tz = reference.timezone();
    let today = reference.date_naive();
    let this_month = first_of_month(today);
    let this_cutoff = effective_cutoff(this_month, cutoff_day);

    let (first_day, closing_day) = if today > this_cutoff {
        let next_cutoff = effective_cutoff(this_month + Months::new(1), cutoff_day);
        (this_cutoff + Days::new(1), next_cutoff)
    } else {
        let previous_cutoff = effective_cutoff(this_month - Months::new(1), cutoff_day);
        (previous_cutoff + Days::new(1), this_cutoff)
    };

    let start = start_of_day(&tz, first_day);
    let end = start_of_day(&tz, closing_day + Days::new(1)) - TimeDelta::nanoseconds(1);

    BillingCycle {
        start,
        end,
        label: cycle_label(first_day, closing_day),
    }
}

/// The calendar month of `reference`: `[first of month 00:00, first of next month 00:00)`.
pub fn calendar_month_window<Tz: TimeZone>(reference: &DateTime<Tz>) -> (DateTime<Tz>, DateTime<Tz>) {
    let tz = reference.timezone();
    let first = first_of_month(reference.date_naive());
    (start_of_day(&tz, first), start_of_day(&tz, first + Months::new(1)))
}

/// Formats a cycle label such as "Dic 16 - Ene 15".
pub fn cycle_label(first_day: NaiveDate, closing_day: NaiveDate) -> String {
    format!(
        "{} {} - {} {}",
        MONTH_ABBREVIATIONS[first_day.month0() as usize],
        first_day.day(),
        MONTH_ABBREVIATIONS[closing_day.month0() as usize],
        closing_day.day()
    )
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Local midnight of `date` in `tz`.
///
/// Ambiguous local times resolve to the earlier instant. A midnight skipped by
/// a DST transition resolves to the first local minute after the gap.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(first, second) => first.min(second),
        LocalResult::None => (1..=24 * 60)
            .find_map(|minutes| tz.from_local_datetime(&(midnight + TimeDelta::minutes(minutes))).earliest())
            .unwrap_or_else(|| tz.from_utc_datetime(&midnight)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use chrono_tz::America::{Havana, Sao_Paulo};

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn end_of(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        date(year, month, day)
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap()
            .and_utc()
    }

    fn start_of(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        date(year, month, day).and_hms_opt(0, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn test_no_cutoff_uses_calendar_month() {
        let cycle = compute_cycle(&utc(2026, 1, 15), None);
        assert_eq!(cycle.start, start_of(2026, 1, 1));
        assert_eq!(cycle.end, end_of(2026, 1, 31));
        assert_eq!(cycle.label, "Ene 1 - Ene 31");
    }

    #[test]
    fn test_before_cutoff_crosses_year() {
        let cycle = compute_cycle(&utc(2026, 1, 10), Some(15));
        assert_eq!(cycle.start, start_of(2025, 12, 16));
        assert_eq!(cycle.end, end_of(2026, 1, 15));
        assert_eq!(cycle.label, "Dic 16 - Ene 15");
    }

    #[test]
    fn test_after_cutoff_rolls_to_next_month() {
        let cycle = compute_cycle(&utc(2026, 1, 20), Some(15));
        assert_eq!(cycle.start, start_of(2026, 1, 16));
        assert_eq!(cycle.end, end_of(2026, 2, 15));
        assert_eq!(cycle.label, "Ene 16 - Feb 15");
    }

    #[test]
    fn test_after_cutoff_in_december() {
        let cycle = compute_cycle(&utc(2025, 12, 25), Some(20));
        assert_eq!(cycle.start, start_of(2025, 12, 21));
        assert_eq!(cycle.end, end_of(2026, 1, 20));
    }

    #[test]
    fn test_cutoff_clamped_in_february() {
        let cycle = compute_cycle(&utc(2026, 2, 15), Some(30));
        assert_eq!(cycle.start, start_of(2026, 1, 31));
        assert_eq!(cycle.end, end_of(2026, 2, 28));
        assert_eq!(cycle.label, "Ene 31 - Feb 28");
    }

    #[test]
    fn test_cutoff_clamped_in_leap_february() {
        let cycle = compute_cycle(&utc(2028, 2, 10), Some(30));
        assert_eq!(cycle.end, end_of(2028, 2, 29));

        let cycle = compute_cycle(&utc(2028, 3, 1), Some(31));
        assert_eq!(cycle.start, start_of(2028, 3, 1));
        assert_eq!(cycle.end, end_of(2028, 3, 31));
    }

    #[test]
    fn test_reference_on_cutoff_day_closes_that_day() {
        let cycle = compute_cycle(&utc(2026, 3, 15), Some(15));
        assert_eq!(cycle.start, start_of(2026, 2, 16));
        assert_eq!(cycle.end, end_of(2026, 3, 15));
    }

    #[test]
    fn test_reference_day_after_cutoff_opens_new_cycle() {
        let cycle = compute_cycle(&utc(2026, 3, 16), Some(15));
        assert_eq!(cycle.start, start_of(2026, 3, 16));
        assert_eq!(cycle.end, end_of(2026, 4, 15));
    }

    #[test]
    fn test_nil_cutoff_matches_month_boundaries() {
        for month in 1..=12 {
            let reference = utc(2024, month, 10);
            let cycle = compute_cycle(&reference, None);
            let (month_start, next_month) = calendar_month_window(&reference);
            assert_eq!(cycle.start, month_start);
            assert_eq!(cycle.end, next_month - TimeDelta::nanoseconds(1));
        }
    }

    #[test]
    fn test_reference_inside_cycle_for_every_day() {
        let cutoffs = [Some(1), Some(15), Some(28), Some(30), Some(31), None];
        for year in [2025, 2028] {
            for month in 1..=12 {
                let days = last_day_of_month(date(year, month, 1));
                for day in 1..=days {
                    for cutoff in cutoffs {
                        let reference = utc(year, month, day);
                        let cycle = compute_cycle(&reference, cutoff);
                        assert!(
                            cycle.start <= reference && reference <= cycle.end,
                            "{reference} outside {cycle:?} for cutoff {cutoff:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_consecutive_cycles_tile_the_calendar() {
        let mut cycle = compute_cycle(&utc(2025, 1, 5), Some(30));
        for _ in 0..24 {
            let next = compute_cycle(&(cycle.end + TimeDelta::nanoseconds(1)), Some(30));
            assert_eq!(next.start, cycle.end + TimeDelta::nanoseconds(1));
            cycle = next;
        }
    }

    #[test]
    fn test_compute_cycle_is_idempotent() {
        let reference = utc(2026, 5, 31);
        assert_eq!(compute_cycle(&reference, Some(31)), compute_cycle(&reference, Some(31)));
    }

    #[test]
    fn test_out_of_range_cutoff_uses_last_day() {
        assert_eq!(effective_cutoff(date(2026, 4, 1), Some(31)), date(2026, 4, 30));
        assert_eq!(effective_cutoff(date(2026, 4, 1), Some(0)), date(2026, 4, 30));
        assert_eq!(effective_cutoff(date(2026, 4, 1), None), date(2026, 4, 30));
        assert_eq!(effective_cutoff(date(2026, 4, 1), Some(10)), date(2026, 4, 10));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(date(2026, 1, 20)), 31);
        assert_eq!(last_day_of_month(date(2026, 2, 1)), 28);
        assert_eq!(last_day_of_month(date(2024, 2, 29)), 29);
        assert_eq!(last_day_of_month(date(2100, 2, 1)), 28);
        assert_eq!(last_day_of_month(date(2026, 12, 31)), 31);
    }

    #[test]
    fn test_zone_is_preserved() {
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let reference = bogota.with_ymd_and_hms(2026, 1, 31, 22, 0, 0).unwrap();
        let cycle = compute_cycle(&reference, Some(15));

        assert_eq!(cycle.start.offset(), &bogota);
        assert_eq!(cycle.start.naive_local(), date(2026, 1, 16).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            cycle.end.naive_local(),
            date(2026, 2, 15).and_hms_nano_opt(23, 59, 59, 999_999_999).unwrap()
        );

        let dto = cycle.to_dto();
        assert_eq!(dto.start_date.to_rfc3339(), "2026-01-16T00:00:00-05:00");
        assert_eq!(dto.label, "Ene 16 - Feb 15");
    }

    #[test]
    fn test_calendar_month_window() {
        let (start, end) = calendar_month_window(&utc(2025, 12, 31));
        assert_eq!(start, start_of(2025, 12, 1));
        assert_eq!(end, start_of(2026, 1, 1));
    }

    #[test]
    fn test_ledger_window_includes_cutoff_day() {
        let cycle = compute_cycle(&utc(2026, 1, 10), Some(15));
        let window = cycle.ledger_window();

        assert_eq!(window.start, date(2025, 12, 16));
        assert_eq!(window.end_exclusive, date(2026, 1, 16));
        assert!(window.contains(date(2026, 1, 15)));
        assert!(window.contains(date(2025, 12, 16)));
        assert!(!window.contains(date(2025, 12, 15)));
        assert!(!window.contains(date(2026, 1, 16)));
    }

    #[test]
    fn test_ledger_window_from_month_excludes_next_first() {
        let (start, end) = calendar_month_window(&utc(2026, 2, 3));
        let window = LedgerWindow::from_instants(&start, &end);

        assert_eq!(window.start, date(2026, 2, 1));
        assert_eq!(window.end_exclusive, date(2026, 3, 1));
        assert!(window.contains(date(2026, 2, 28)));
        assert!(!window.contains(date(2026, 3, 1)));
    }

    #[test]
    fn test_ledger_window_rounds_partial_start_up() {
        let start = Utc.with_ymd_and_hms(2026, 1, 10, 8, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap();
        let window = LedgerWindow::from_instants(&start, &end);

        assert_eq!(window.start, date(2026, 1, 11));
        assert_eq!(window.end_exclusive, date(2026, 1, 12));
    }

    #[test]
    fn test_cycle_starting_in_dst_gap_begins_after_the_gap() {
        // Sao Paulo skipped 2018-11-04 00:00..01:00
        let reference = Sao_Paulo.with_ymd_and_hms(2018, 11, 10, 12, 0, 0).unwrap();
        let cycle = compute_cycle(&reference, Some(3));

        assert_eq!(cycle.start.to_rfc3339(), "2018-11-04T01:00:00-02:00");
        assert_eq!(cycle.start.with_timezone(&Utc), Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).unwrap());
        assert_eq!(cycle.label, "Nov 4 - Dic 3");

        let window = cycle.ledger_window();
        assert_eq!(window.start, date(2018, 11, 4));
        assert_eq!(window.end_exclusive, date(2018, 12, 4));
    }

    #[test]
    fn test_cycle_ending_before_dst_gap() {
        let reference = Sao_Paulo.with_ymd_and_hms(2018, 11, 2, 12, 0, 0).unwrap();
        let cycle = compute_cycle(&reference, Some(3));

        assert_eq!(
            cycle.end.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2018, 11, 4, 2, 59, 59).unwrap() + TimeDelta::nanoseconds(999_999_999)
        );
        assert_eq!(cycle.ledger_window().end_exclusive, date(2018, 11, 4));
    }

    #[test]
    fn test_cycle_starting_on_repeated_midnight_takes_first_instant() {
        // Havana fell back from 01:00 to 00:00 on 2015-11-01
        let reference = Havana.with_ymd_and_hms(2015, 11, 10, 12, 0, 0).unwrap();
        let cycle = compute_cycle(&reference, None);

        assert_eq!(cycle.start.with_timezone(&Utc), Utc.with_ymd_and_hms(2015, 11, 1, 4, 0, 0).unwrap());
        assert_eq!(cycle.ledger_window().start, date(2015, 11, 1));
    }

    #[test]
    fn test_calendar_month_window_spanning_dst_change() {
        let reference = Sao_Paulo.with_ymd_and_hms(2018, 11, 20, 12, 0, 0).unwrap();
        let (start, end) = calendar_month_window(&reference);

        assert_eq!(start.to_rfc3339(), "2018-11-01T00:00:00-03:00");
        assert_eq!(end.to_rfc3339(), "2018-12-01T00:00:00-02:00");

        let window = LedgerWindow::from_instants(&start, &end);
        assert_eq!(window.start, date(2018, 11, 1));
        assert_eq!(window.end_exclusive, date(2018, 12, 1));
    }
}
