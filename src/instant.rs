use crate::calendar::{self, civil_from_days, days_from_civil, days_in_month};
use crate::error::{InvalidInstant, ParseInstantErr};
use crate::timespan::Timespan;
use derive_more::Into;
use std::fmt;
use std::str::FromStr;

pub(crate) const MILLIS_IN_SECOND: i64 = 1_000;
pub(crate) const MILLIS_IN_MINUTE: i64 = 60 * MILLIS_IN_SECOND;
pub(crate) const MILLIS_IN_HOUR: i64 = 60 * MILLIS_IN_MINUTE;
const MILLIS_IN_DAY: i64 = 24 * MILLIS_IN_HOUR;

/// A point in time, stored as milliseconds since 1970-01-01T00:00:00Z.
///
/// Every calendar accessor answers in UTC; there is no notion of a
/// local zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Into)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Instant(i64);

impl Instant {
    pub const UNIX_EPOCH: Instant = Instant(0);

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, InvalidInstant> {
        Self::from_ymd_hms_milli(year, month, day, hour, minute, second, 0)
    }

    /// Builds an instant from UTC calendar fields.  `month` and `day`
    /// are 1-indexed.
    pub fn from_ymd_hms_milli(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Result<Self, InvalidInstant> {
        let last_day = days_in_month(year, month).ok_or(InvalidInstant::Month(month))?;
        if day == 0 || day > last_day {
            return Err(InvalidInstant::Day { year, month, day });
        }
        if hour > 23 {
            return Err(InvalidInstant::Hour(hour));
        }
        if minute > 59 {
            return Err(InvalidInstant::Minute(minute));
        }
        if second > 59 {
            return Err(InvalidInstant::Second(second));
        }
        if milli > 999 {
            return Err(InvalidInstant::Millisecond(milli));
        }

        let time_of_day = i64::from(hour) * MILLIS_IN_HOUR
            + i64::from(minute) * MILLIS_IN_MINUTE
            + i64::from(second) * MILLIS_IN_SECOND
            + i64::from(milli);
        days_from_civil(year, month, day)
            .checked_mul(MILLIS_IN_DAY)
            .and_then(|millis| millis.checked_add(time_of_day))
            .map(Self)
            .ok_or(InvalidInstant::Year(year))
    }

    /// Converts a wall-clock reading taken `offset_minutes` east of UTC
    /// into the UTC instant it denotes.
    pub(crate) fn to_utc(self, offset_minutes: i32) -> Result<Self, InvalidInstant> {
        if offset_minutes.unsigned_abs() >= 24 * 60 {
            return Err(InvalidInstant::Offset(offset_minutes));
        }
        self.0
            .checked_sub(i64::from(offset_minutes) * MILLIS_IN_MINUTE)
            .map(Self)
            .ok_or(InvalidInstant::Offset(offset_minutes))
    }

    fn days(self) -> i64 {
        self.0.div_euclid(MILLIS_IN_DAY)
    }

    fn millis_of_day(self) -> i64 {
        self.0.rem_euclid(MILLIS_IN_DAY)
    }

    pub fn ymd(self) -> (i32, u32, u32) {
        civil_from_days(self.days())
    }

    pub fn year(self) -> i32 {
        self.ymd().0
    }

    pub fn month(self) -> u32 {
        self.ymd().1
    }

    pub fn day(self) -> u32 {
        self.ymd().2
    }

    pub fn hour(self) -> u32 {
        (self.millis_of_day() / MILLIS_IN_HOUR) as u32
    }

    pub fn minute(self) -> u32 {
        (self.millis_of_day() % MILLIS_IN_HOUR / MILLIS_IN_MINUTE) as u32
    }

    pub fn second(self) -> u32 {
        (self.millis_of_day() % MILLIS_IN_MINUTE / MILLIS_IN_SECOND) as u32
    }

    pub fn millisecond(self) -> u32 {
        (self.millis_of_day() % MILLIS_IN_SECOND) as u32
    }

    pub fn is_leap_year(self) -> bool {
        calendar::is_leap_year(self.year())
    }

    /// The time elapsed from `earlier` to `self`.
    ///
    /// Like `std::time::SystemTime::duration_since`, if `earlier` is
    /// actually later than `self` the magnitude of the difference is
    /// returned as the `Err` value.
    pub fn duration_since(self, earlier: Instant) -> Result<Timespan, Timespan> {
        let span = Timespan::from_millis(self.0.abs_diff(earlier.0));
        if self >= earlier {
            Ok(span)
        } else {
            Err(span)
        }
    }

    pub fn checked_add(self, span: Timespan) -> Option<Self> {
        i64::try_from(span.as_millis())
            .ok()
            .and_then(|millis| self.0.checked_add(millis))
            .map(Self)
    }

    pub fn checked_sub(self, span: Timespan) -> Option<Self> {
        i64::try_from(span.as_millis())
            .ok()
            .and_then(|millis| self.0.checked_sub(millis))
            .map(Self)
    }
}

impl std::ops::Add<Timespan> for Instant {
    type Output = Self;

    fn add(self, rhs: Timespan) -> Self {
        self.checked_add(rhs)
            .expect("overflow when adding timespan to instant")
    }
}

impl std::ops::Sub<Timespan> for Instant {
    type Output = Self;

    fn sub(self, rhs: Timespan) -> Self {
        self.checked_sub(rhs)
            .expect("overflow when subtracting timespan from instant")
    }
}

/// Same shape as JavaScript's `Date.prototype.toISOString`.  Years
/// outside 0000-9999 use the six digit expanded form (`+010000`,
/// `-000001`), which the parsers in this crate don't read back.
impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (year, month, day) = self.ymd();
        if (0..=9999).contains(&year) {
            write!(f, "{:04}", year)?;
        } else {
            write!(f, "{:+07}", year)?;
        }
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            month,
            day,
            self.hour(),
            self.minute(),
            self.second(),
            self.millisecond()
        )
    }
}

impl FromStr for Instant {
    type Err = ParseInstantErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_instant(s)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Instant {
    fn from(date_time: chrono::DateTime<chrono::Utc>) -> Self {
        Self(date_time.timestamp_millis())
    }
}
