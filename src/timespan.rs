use crate::error::ParseTimespanErr;
use crate::instant::Instant;
use derive_more::{Add, AddAssign, Deref, Into};
use nom::{
    bytes::complete::tag,
    character::complete::{digit1, one_of},
    combinator::{map, map_opt},
    sequence::{preceded, terminated},
    IResult, Parser,
};
use std::fmt;
use std::str::FromStr;

const SECONDS_IN_MINUTE: u64 = 60;
const MINUTES_IN_HOUR: u64 = 60;
const SECONDS_IN_HOUR: u64 = MINUTES_IN_HOUR * SECONDS_IN_MINUTE;
const MILLIS_IN_SECOND: u128 = 1_000;
const MILLIS_IN_MINUTE: u128 = SECONDS_IN_MINUTE as u128 * MILLIS_IN_SECOND;
const MILLIS_IN_HOUR: u128 = SECONDS_IN_HOUR as u128 * MILLIS_IN_SECOND;

/// Elapsed time between two instants.
///
/// Displays as `HH:MM:SS.mmm`.  Hours are never folded into days, so
/// a long enough span simply grows more hour digits.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Add, AddAssign, Deref, Into,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timespan(std::time::Duration);

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let all_millis = self.as_millis();
        let hours = all_millis / MILLIS_IN_HOUR;
        let minutes = all_millis % MILLIS_IN_HOUR / MILLIS_IN_MINUTE;
        let seconds = all_millis % MILLIS_IN_MINUTE / MILLIS_IN_SECOND;
        let millis = all_millis % MILLIS_IN_SECOND;

        let result = format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis);
        f.pad_integral(true, "", &result)
    }
}

impl Timespan {
    pub const fn from_secs(secs: u64) -> Self {
        Self(std::time::Duration::from_secs(secs))
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(std::time::Duration::from_millis(millis))
    }

    pub fn new_hour_min_sec_milli(hours: u64, mins: u8, secs: u8, millis: u16) -> Self {
        Self::from_secs(hours * SECONDS_IN_HOUR + u64::from(mins) * SECONDS_IN_MINUTE)
            + Self::from_secs(u64::from(secs))
            + Self::from_millis(u64::from(millis))
    }
}

impl From<std::time::Duration> for Timespan {
    fn from(duration: std::time::Duration) -> Self {
        Self(duration)
    }
}

impl<'a> std::iter::Sum<&'a Timespan> for Timespan {
    fn sum<I: Iterator<Item = &'a Timespan>>(iter: I) -> Timespan {
        Timespan(iter.map(|span| span.0).sum())
    }
}

/// Formats the time from `start` to `end` as `HH:MM:SS.mmm`.
///
/// If `end` comes before `start` the magnitude is formatted with a
/// leading `-`.
pub fn format_duration(start: Instant, end: Instant) -> String {
    match end.duration_since(start) {
        Ok(span) => span.to_string(),
        Err(span) => format!("-{}", span),
    }
}

//     00:00:00.000
//     05:20:10.453
//    100:00:00.000

fn hour_prefix(input: &str) -> IResult<&str, Timespan> {
    map_opt(terminated(digit1, tag(":")), |digits: &str| {
        digits
            .parse::<u64>()
            .ok()?
            .checked_mul(SECONDS_IN_HOUR)
            .map(Timespan::from_secs)
    })
    .parse(input)
}

fn zero_through_five(input: &str) -> IResult<&str, u8> {
    map(one_of("012345"), |digit| digit as u8 - b'0').parse(input)
}

fn single_digit(input: &str) -> IResult<&str, u8> {
    map(one_of("0123456789"), |digit| digit as u8 - b'0').parse(input)
}

fn sexagesimal(input: &str) -> IResult<&str, u64> {
    map((zero_through_five, single_digit), |(tens, ones)| {
        u64::from(tens) * 10 + u64::from(ones)
    })
    .parse(input)
}

fn minute_prefix(input: &str) -> IResult<&str, Timespan> {
    map(terminated(sexagesimal, tag(":")), |minutes| {
        Timespan::from_secs(minutes * SECONDS_IN_MINUTE)
    })
    .parse(input)
}

fn seconds(input: &str) -> IResult<&str, Timespan> {
    map(sexagesimal, Timespan::from_secs).parse(input)
}

fn millis(input: &str) -> IResult<&str, Timespan> {
    map(
        preceded(tag("."), (single_digit, single_digit, single_digit)),
        |(hundreds, tens, ones)| {
            Timespan::from_millis(u64::from(hundreds) * 100 + u64::from(tens) * 10 + u64::from(ones))
        },
    )
    .parse(input)
}

pub fn timespan_parser(input: &str) -> IResult<&str, Timespan> {
    map_opt(
        (hour_prefix, minute_prefix, seconds, millis),
        |(hours, minutes, seconds, millis)| {
            [minutes, seconds, millis]
                .iter()
                .try_fold(hours.0, |total, part| total.checked_add(part.0))
                .map(Timespan)
        },
    )
    .parse(input)
}

impl FromStr for Timespan {
    type Err = ParseTimespanErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match timespan_parser(s) {
            Ok((remaining, span)) => {
                if remaining.is_empty() {
                    Ok(span)
                } else {
                    Err(ParseTimespanErr::LeftoverCharacters)
                }
            }
            Err(_) => Err(ParseTimespanErr::Malformed),
        }
    }
}
