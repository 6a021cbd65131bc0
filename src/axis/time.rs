//! Calendar-time axis tick planning.
//!
//! A static band table maps the visible domain width (milliseconds) to a step
//! unit, a step multiple, a label format and a human unit suffix. The first
//! tick is the domain start floored to the top of the next-coarser unit in
//! the display timezone, then advanced by the step until it reaches the
//! start; stepping continues until the domain end is passed.
//!
//! There is no week unit: weekly and biweekly cadences are day multiples
//! (`Day × 7` / `Day × 14`). They start from the first of the month the
//! domain begins in and then advance by whole days, so ticks fall on the
//! 1st, 8th, 15th... rather than on a fixed weekday.

use super::{Tick, TickPlan};
use chrono::{DateTime, Datelike, Days, Duration, LocalResult, TimeZone, Timelike};
use chrono_tz::Tz;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.25 * DAY;

/// Hard cap on generated ticks, guarding against degenerate domains.
const MAX_TICKS: usize = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeStepUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// One row of the step table: domains at least `min_width_ms` wide (and
/// narrower than the previous row) step by `multiple × unit`.
struct TimeBand {
    min_width_ms: f64,
    unit: TimeStepUnit,
    multiple: u32,
    format: &'static str,
    suffix: &'static str,
}

const fn band(
    min_width_ms: f64,
    unit: TimeStepUnit,
    multiple: u32,
    format: &'static str,
    suffix: &'static str,
) -> TimeBand {
    TimeBand {
        min_width_ms,
        unit,
        multiple,
        format,
        suffix,
    }
}

/// Ordered widest-first; selection walks top to bottom.
static TIME_BANDS: &[TimeBand] = &[
    band(70.0 * YEAR, TimeStepUnit::Year, 10, "%Y", "(year)"),
    band(35.0 * YEAR, TimeStepUnit::Year, 5, "%Y", "(year)"),
    band(14.0 * YEAR, TimeStepUnit::Year, 2, "%Y", "(year)"),
    band(7.0 * YEAR, TimeStepUnit::Year, 1, "%Y", "(year)"),
    band(3.0 * YEAR, TimeStepUnit::Month, 6, "%m/%Y", "(month)"),
    band(1.5 * YEAR, TimeStepUnit::Month, 3, "%m/%Y", "(month)"),
    band(8.0 * MONTH, TimeStepUnit::Month, 1, "%m/%Y", "(month)"),
    band(60.0 * DAY, TimeStepUnit::Day, 14, "%m/%d", "(month/day)"),
    band(25.0 * DAY, TimeStepUnit::Day, 7, "%m/%d", "(month/day)"),
    band(12.0 * DAY, TimeStepUnit::Day, 2, "%m/%d", "(month/day)"),
    band(5.0 * DAY, TimeStepUnit::Day, 1, "%m/%d", "(month/day)"),
    band(2.0 * DAY, TimeStepUnit::Hour, 12, "%m/%d %H:%M", "(hour)"),
    band(1.0 * DAY, TimeStepUnit::Hour, 6, "%H:%M", "(hour:min)"),
    band(12.0 * HOUR, TimeStepUnit::Hour, 3, "%H:%M", "(hour:min)"),
    band(6.0 * HOUR, TimeStepUnit::Hour, 1, "%H:%M", "(hour:min)"),
    band(3.0 * HOUR, TimeStepUnit::Minute, 30, "%H:%M", "(hour:min)"),
    band(90.0 * MINUTE, TimeStepUnit::Minute, 15, "%H:%M", "(hour:min)"),
    band(50.0 * MINUTE, TimeStepUnit::Minute, 10, "%H:%M", "(hour:min)"),
    band(25.0 * MINUTE, TimeStepUnit::Minute, 5, "%H:%M", "(hour:min)"),
    band(10.0 * MINUTE, TimeStepUnit::Minute, 2, "%H:%M", "(hour:min)"),
    band(5.0 * MINUTE, TimeStepUnit::Minute, 1, "%H:%M", "(hour:min)"),
    band(150.0 * SECOND, TimeStepUnit::Second, 30, "%H:%M:%S", "(min:sec)"),
    band(75.0 * SECOND, TimeStepUnit::Second, 15, "%H:%M:%S", "(min:sec)"),
    band(30.0 * SECOND, TimeStepUnit::Second, 5, "%H:%M:%S", "(min:sec)"),
    band(10.0 * SECOND, TimeStepUnit::Second, 2, "%H:%M:%S", "(min:sec)"),
    band(5.0 * SECOND, TimeStepUnit::Second, 1, "%H:%M:%S", "(min:sec)"),
    band(2.0 * SECOND, TimeStepUnit::Millisecond, 500, "%S%.3f", "(sec.ms)"),
    band(1.0 * SECOND, TimeStepUnit::Millisecond, 250, "%S%.3f", "(sec.ms)"),
    band(0.5 * SECOND, TimeStepUnit::Millisecond, 100, "%S%.3f", "(sec.ms)"),
    band(0.2 * SECOND, TimeStepUnit::Millisecond, 50, "%S%.3f", "(sec.ms)"),
    band(0.05 * SECOND, TimeStepUnit::Millisecond, 10, "%S%.3f", "(sec.ms)"),
    band(0.0, TimeStepUnit::Millisecond, 1, "%S%.3f", "(sec.ms)"),
];

fn select_band(width_ms: f64) -> &'static TimeBand {
    TIME_BANDS
        .iter()
        .find(|b| width_ms >= b.min_width_ms)
        .unwrap_or(&TIME_BANDS[TIME_BANDS.len() - 1])
}

/// Step unit and multiple chosen for a domain of `width_ms`.
pub fn step_for_width(width_ms: f64) -> (TimeStepUnit, u32) {
    let band = select_band(width_ms);
    (band.unit, band.multiple)
}

/// Plans calendar ticks over a `[start_ms, end_ms]` domain (milliseconds
/// since the Unix epoch), snapped in the display timezone `tz`.
pub fn plan(domain: (f64, f64), tz: Tz) -> TickPlan {
    let (d0, d1) = if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    };
    let start_ms = d0.floor() as i64;
    let end_ms = d1.ceil() as i64;
    let band = select_band(d1 - d0);

    let Some(start) = resolve_ms(tz, start_ms) else {
        return TickPlan {
            ticks: Vec::new(),
            axis_suffix: Some(band.suffix.to_string()),
            display_factor: 1.0,
            required_thickness: 0.0,
        };
    };

    let mut cursor = floor_to_step_base(&start, band.unit, band.multiple);
    let mut guard = 0usize;
    while cursor.timestamp_millis() < start_ms && guard < MAX_TICKS {
        let next = advance(cursor, band.unit, band.multiple);
        if next.timestamp_millis() <= cursor.timestamp_millis() {
            break;
        }
        cursor = next;
        guard += 1;
    }

    let mut ticks = Vec::new();
    while cursor.timestamp_millis() <= end_ms && ticks.len() < MAX_TICKS {
        ticks.push(Tick {
            value: cursor.timestamp_millis() as f64,
            label: cursor.format(band.format).to_string(),
        });
        let next = advance(cursor, band.unit, band.multiple);
        if next.timestamp_millis() <= cursor.timestamp_millis() {
            break;
        }
        cursor = next;
    }

    TickPlan {
        ticks,
        axis_suffix: Some(band.suffix.to_string()),
        display_factor: 1.0,
        required_thickness: 0.0,
    }
}

fn resolve_ms(tz: Tz, ms: i64) -> Option<DateTime<Tz>> {
    match tz.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => None,
    }
}

/// Builds a local datetime, resolving DST ambiguity to the earlier instant
/// and skipping gapped (spring-forward) wall times forward by an hour.
fn make_local(tz: &Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Tz> {
    match tz.with_ymd_and_hms(y, mo, d, h, mi, s) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => match tz.with_ymd_and_hms(y, mo, d, h + 1, mi, s) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(dt, _) => dt,
            LocalResult::None => match tz.timestamp_millis_opt(0) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
                LocalResult::None => unreachable!("epoch resolves in every timezone"),
            },
        },
    }
}

/// Floors `dt` to the top of the next-coarser unit, so stepping starts from a
/// round wall-clock value (top of the hour before minute steps, first of the
/// month before day steps, a year aligned to the multiple for year steps).
fn floor_to_step_base(dt: &DateTime<Tz>, unit: TimeStepUnit, multiple: u32) -> DateTime<Tz> {
    let tz = dt.timezone();
    match unit {
        TimeStepUnit::Year => {
            let aligned = dt.year() - dt.year().rem_euclid(multiple.max(1) as i32);
            make_local(&tz, aligned, 1, 1, 0, 0, 0)
        }
        TimeStepUnit::Month => make_local(&tz, dt.year(), 1, 1, 0, 0, 0),
        TimeStepUnit::Day => make_local(&tz, dt.year(), dt.month(), 1, 0, 0, 0),
        TimeStepUnit::Hour => make_local(&tz, dt.year(), dt.month(), dt.day(), 0, 0, 0),
        TimeStepUnit::Minute => {
            make_local(&tz, dt.year(), dt.month(), dt.day(), dt.hour(), 0, 0)
        }
        TimeStepUnit::Second => make_local(
            &tz,
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            0,
        ),
        TimeStepUnit::Millisecond => {
            let ms = dt.timestamp_millis();
            resolve_ms(tz, ms - ms.rem_euclid(1000)).unwrap_or_else(|| *dt)
        }
    }
}

/// Advances by `multiple × unit`. Years and months step through the calendar;
/// days honor the local calendar (so DST days keep midnight ticks); finer
/// units step by absolute duration.
fn advance(dt: DateTime<Tz>, unit: TimeStepUnit, multiple: u32) -> DateTime<Tz> {
    match unit {
        TimeStepUnit::Year => {
            let tz = dt.timezone();
            make_local(&tz, dt.year() + multiple as i32, dt.month(), 1, 0, 0, 0)
        }
        TimeStepUnit::Month => {
            let tz = dt.timezone();
            let months0 = dt.month0() + multiple;
            let year = dt.year() + (months0 / 12) as i32;
            let month = months0 % 12 + 1;
            make_local(&tz, year, month, 1, 0, 0, 0)
        }
        TimeStepUnit::Day => dt
            .checked_add_days(Days::new(multiple as u64))
            .unwrap_or(dt),
        TimeStepUnit::Hour => dt + Duration::hours(multiple as i64),
        TimeStepUnit::Minute => dt + Duration::minutes(multiple as i64),
        TimeStepUnit::Second => dt + Duration::seconds(multiple as i64),
        TimeStepUnit::Millisecond => dt + Duration::milliseconds(multiple as i64),
    }
}
