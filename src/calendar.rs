//! Proleptic Gregorian calendar arithmetic.
//!
//! Days are counted from the Unix epoch, 1970-01-01.  The conversions
//! are Howard Hinnant's `days_from_civil` / `civil_from_days`, which
//! work in 400 year eras so that negative years need no special
//! casing.

const DAYS_IN_ERA: i64 = 146_097;
// days from 0000-03-01 to 1970-01-01
const EPOCH_SHIFT: i64 = 719_468;

/// Returns true if `year` has a February 29th.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-indexed) of `year`, or `None` if
/// `month` isn't in `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

pub(crate) fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = i64::from((month + 9) % 12);
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_IN_ERA + doe - EPOCH_SHIFT
}

pub(crate) fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + EPOCH_SHIFT;
    let era = if z >= 0 { z } else { z - (DAYS_IN_ERA - 1) } / DAYS_IN_ERA;
    let doe = z - era * DAYS_IN_ERA;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month, day)
}
