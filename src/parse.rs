//! nom parsers for the two textual date formats most commonly
//! exchanged: ISO 8601 (`2016-01-19T16:07:37+00:00`) and RFC 2822
//! (`Tue, 26 Jan 2016 13:48:02 GMT`).
//!
//! Dates without a zone are taken to be UTC.

use crate::error::{InvalidInstant, ParseInstantErr};
use crate::instant::Instant;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{alpha1, char, digit1, one_of, space0, space1},
    combinator::{map, map_opt, map_res, opt, recognize, value, verify},
    sequence::{preceded, terminated},
    IResult, Parser,
};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Fields as written, before range checks and before the zone offset
/// is taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocalDateTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    milli: u32,
    offset_minutes: i32,
}

impl LocalDateTime {
    fn to_instant(self) -> Result<Instant, InvalidInstant> {
        Instant::from_ymd_hms_milli(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.milli,
        )?
        .to_utc(self.offset_minutes)
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn year(input: &str) -> IResult<&str, i32> {
    map_res(take_while_m_n(4, 4, is_digit), str::parse).parse(input)
}

fn two_digits(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(2, 2, is_digit), str::parse).parse(input)
}

fn one_or_two_digits(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(1, 2, is_digit), str::parse).parse(input)
}

// Anything past milliseconds is dropped, not rounded.
fn fraction_millis(input: &str) -> IResult<&str, u32> {
    map(preceded(one_of(".,"), digit1), |digits: &str| {
        digits
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(3)
            .fold(0, |millis, digit| millis * 10 + u32::from(digit - b'0'))
    })
    .parse(input)
}

fn sign(input: &str) -> IResult<&str, i32> {
    alt((value(1, char('+')), value(-1, char('-')))).parse(input)
}

/// `+HH:MM`, `+HHMM` or `+HH`, in minutes east of UTC.
fn numeric_offset(input: &str) -> IResult<&str, i32> {
    map(
        (
            sign,
            two_digits,
            opt(preceded(opt(char(':')), verify(two_digits, |minutes: &u32| *minutes < 60))),
        ),
        |(sign, hours, minutes)| sign * (hours * 60 + minutes.unwrap_or(0)) as i32,
    )
    .parse(input)
}

//    2016-01-19
//    2016-01-19T16:07
//    2016-01-19T16:07:37Z
//    2016-01-19T16:07:37.250+05:30
//    2016-01-19 16:07:37,5-0800

fn iso_date(input: &str) -> IResult<&str, (i32, u32, u32)> {
    (
        year,
        preceded(char('-'), two_digits),
        preceded(char('-'), two_digits),
    )
        .parse(input)
}

fn iso_time(input: &str) -> IResult<&str, (u32, u32, u32, u32)> {
    map(
        (
            two_digits,
            preceded(char(':'), two_digits),
            opt((preceded(char(':'), two_digits), opt(fraction_millis))),
        ),
        |(hour, minute, seconds)| {
            let (second, milli) = seconds.map_or((0, 0), |(second, milli)| {
                (second, milli.unwrap_or(0))
            });
            (hour, minute, second, milli)
        },
    )
    .parse(input)
}

fn iso_offset(input: &str) -> IResult<&str, i32> {
    alt((value(0, one_of("Zz")), numeric_offset)).parse(input)
}

fn iso8601(input: &str) -> IResult<&str, LocalDateTime> {
    map(
        (
            iso_date,
            opt((preceded(one_of("Tt "), iso_time), opt(iso_offset))),
        ),
        |((year, month, day), time)| {
            let ((hour, minute, second, milli), offset) =
                time.unwrap_or(((0, 0, 0, 0), None));
            LocalDateTime {
                year,
                month,
                day,
                hour,
                minute,
                second,
                milli,
                offset_minutes: offset.unwrap_or(0),
            }
        },
    )
    .parse(input)
}

//    Tue, 26 Jan 2016 13:48:02 GMT
//    Sun, 17 May 1998 03:00:00 GMT+01
//    17 May 1998 03:00 EDT
//    December 17, 1995 03:24:00

// The three letter abbreviation or the full name, in any case.
fn name_index(names: &[&str], word: &str) -> Option<usize> {
    let word = word.to_ascii_lowercase();
    names
        .iter()
        .position(|name| word == name[..3] || word == **name)
}

fn month_name(input: &str) -> IResult<&str, u32> {
    map_opt(alpha1, |word: &str| {
        name_index(&MONTHS, word).map(|index| index as u32 + 1)
    })
    .parse(input)
}

// Accepted but not checked against the date.
fn weekday(input: &str) -> IResult<&str, usize> {
    terminated(
        map_opt(alpha1, |word: &str| name_index(&WEEKDAYS, word)),
        (opt(char(',')), space1),
    )
    .parse(input)
}

fn day_month_year(input: &str) -> IResult<&str, (u32, u32, i32)> {
    (
        one_or_two_digits,
        preceded(space1, month_name),
        preceded(space1, year),
    )
        .parse(input)
}

fn month_day_year(input: &str) -> IResult<&str, (u32, u32, i32)> {
    map(
        (
            month_name,
            preceded(space1, one_or_two_digits),
            preceded(alt((recognize((char(','), space0)), space1)), year),
        ),
        |(month, day, year)| (day, month, year),
    )
    .parse(input)
}

fn rfc_time(input: &str) -> IResult<&str, (u32, u32, u32)> {
    map(
        (
            two_digits,
            preceded(char(':'), two_digits),
            opt(preceded(char(':'), two_digits)),
        ),
        |(hour, minute, second)| (hour, minute, second.unwrap_or(0)),
    )
    .parse(input)
}

fn universal_zone(input: &str) -> IResult<&str, i32> {
    map(
        (
            alt((
                tag_no_case("UTC"),
                tag_no_case("UT"),
                tag_no_case("GMT"),
                tag_no_case("Z"),
            )),
            opt(numeric_offset),
        ),
        |(_, offset)| offset.unwrap_or(0),
    )
    .parse(input)
}

fn north_american_zone(input: &str) -> IResult<&str, i32> {
    alt((
        value(-5 * 60, tag_no_case("EST")),
        value(-4 * 60, tag_no_case("EDT")),
        value(-6 * 60, tag_no_case("CST")),
        value(-5 * 60, tag_no_case("CDT")),
        value(-7 * 60, tag_no_case("MST")),
        value(-6 * 60, tag_no_case("MDT")),
        value(-8 * 60, tag_no_case("PST")),
        value(-7 * 60, tag_no_case("PDT")),
    ))
    .parse(input)
}

fn rfc_zone(input: &str) -> IResult<&str, i32> {
    alt((numeric_offset, universal_zone, north_american_zone)).parse(input)
}

fn rfc2822(input: &str) -> IResult<&str, LocalDateTime> {
    map(
        (
            preceded(opt(weekday), alt((day_month_year, month_day_year))),
            preceded(space1, rfc_time),
            opt(preceded(space1, rfc_zone)),
        ),
        |((day, month, year), (hour, minute, second), offset)| LocalDateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
            milli: 0,
            offset_minutes: offset.unwrap_or(0),
        },
    )
    .parse(input)
}

fn run(
    parser: fn(&str) -> IResult<&str, LocalDateTime>,
    s: &str,
) -> Result<Instant, ParseInstantErr> {
    match parser(s.trim()) {
        Ok((remaining, fields)) => {
            if remaining.is_empty() {
                Ok(fields.to_instant()?)
            } else {
                Err(ParseInstantErr::LeftoverCharacters(remaining.to_string()))
            }
        }
        Err(_) => Err(ParseInstantErr::Unrecognized(s.to_string())),
    }
}

pub fn parse_iso8601(s: &str) -> Result<Instant, ParseInstantErr> {
    run(iso8601, s)
}

pub fn parse_rfc2822(s: &str) -> Result<Instant, ParseInstantErr> {
    run(rfc2822, s)
}

/// Tries ISO 8601 first, then RFC 2822.
pub fn parse_instant(s: &str) -> Result<Instant, ParseInstantErr> {
    match parse_iso8601(s) {
        Err(ParseInstantErr::Unrecognized(_)) => {
            log::trace!("{:?} is not ISO 8601, trying RFC 2822", s);
            parse_rfc2822(s).inspect_err(|e| log::debug!("can't parse date: {}", e))
        }
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Instant {
        Instant::from_ymd_hms(year, month, day, hour, minute, second).unwrap()
    }

    #[test]
    fn test_fraction_millis() {
        assert_eq!(500, fraction_millis(".5").unwrap().1);
        assert_eq!(250, fraction_millis(",25").unwrap().1);
        assert_eq!(123, fraction_millis(".123456").unwrap().1);
        assert!(fraction_millis(".").is_err());
    }

    #[test]
    fn test_numeric_offset() {
        assert_eq!(0, numeric_offset("+00:00").unwrap().1);
        assert_eq!(330, numeric_offset("+05:30").unwrap().1);
        assert_eq!(-480, numeric_offset("-0800").unwrap().1);
        assert_eq!(60, numeric_offset("+01").unwrap().1);
        assert_eq!(("75", 60), numeric_offset("+0175").unwrap());
    }

    #[test]
    fn test_month_name() {
        assert_eq!(1, month_name("Jan").unwrap().1);
        assert_eq!(9, month_name("SEPTEMBER").unwrap().1);
        assert_eq!(12, month_name("december").unwrap().1);
        assert!(month_name("Sept").is_err());
        assert!(month_name("Tue").is_err());
    }

    #[test]
    fn test_rfc_zone() {
        assert_eq!(0, rfc_zone("GMT").unwrap().1);
        assert_eq!(0, rfc_zone("UT").unwrap().1);
        assert_eq!(0, rfc_zone("UTC").unwrap().1);
        assert_eq!(60, rfc_zone("GMT+01").unwrap().1);
        assert_eq!(-150, rfc_zone("GMT-0230").unwrap().1);
        assert_eq!(100, rfc_zone("+0140").unwrap().1);
        assert_eq!(-240, rfc_zone("EDT").unwrap().1);
        assert_eq!(-480, rfc_zone("pst").unwrap().1);
    }

    #[test]
    fn test_parse_iso8601() {
        assert_eq!(
            Ok(utc(2016, 1, 19, 16, 7, 37)),
            parse_iso8601("2016-01-19T16:07:37+00:00")
        );
        assert_eq!(
            Ok(utc(2016, 1, 19, 8, 7, 37)),
            parse_iso8601("2016-01-19T08:07:37Z")
        );
        assert_eq!(
            Ok(Instant::from_ymd_hms_milli(2016, 1, 19, 10, 37, 37, 250).unwrap()),
            parse_iso8601("2016-01-19T16:07:37.250+05:30")
        );
        assert_eq!(
            Ok(Instant::from_ymd_hms_milli(2016, 1, 20, 0, 7, 37, 500).unwrap()),
            parse_iso8601("2016-01-19 16:07:37,5-0800")
        );
        assert_eq!(Ok(utc(2016, 1, 19, 16, 7, 0)), parse_iso8601("2016-01-19T16:07"));
        assert_eq!(Ok(utc(2016, 1, 19, 0, 0, 0)), parse_iso8601("2016-01-19"));
        assert_eq!(Ok(utc(2016, 1, 19, 0, 0, 0)), parse_iso8601("  2016-01-19\n"));
    }

    #[test]
    fn test_parse_iso8601_errors() {
        assert_eq!(
            Err(ParseInstantErr::Invalid(InvalidInstant::Day {
                year: 2015,
                month: 2,
                day: 29
            })),
            parse_iso8601("2015-02-29")
        );
        assert_eq!(
            Err(ParseInstantErr::Invalid(InvalidInstant::Hour(24))),
            parse_iso8601("2016-01-19T24:00:00Z")
        );
        assert_eq!(
            Err(ParseInstantErr::Invalid(InvalidInstant::Offset(1440))),
            parse_iso8601("2016-01-19T16:07:37+24:00")
        );
        assert_eq!(
            Err(ParseInstantErr::LeftoverCharacters(" junk".to_string())),
            parse_iso8601("2016-01-19T16:07:37Z junk")
        );
        assert_eq!(
            Err(ParseInstantErr::Unrecognized("16-01-19".to_string())),
            parse_iso8601("16-01-19")
        );
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(
            Ok(utc(2016, 1, 26, 13, 48, 2)),
            parse_rfc2822("Tue, 26 Jan 2016 13:48:02 GMT")
        );
        assert_eq!(
            Ok(utc(1998, 5, 17, 2, 0, 0)),
            parse_rfc2822("Sun, 17 May 1998 03:00:00 GMT+01")
        );
        assert_eq!(
            Ok(utc(1995, 12, 17, 3, 24, 0)),
            parse_rfc2822("December 17, 1995 03:24:00")
        );
        assert_eq!(
            Ok(utc(1998, 5, 17, 7, 0, 0)),
            parse_rfc2822("17 May 1998 03:00 EDT")
        );
        assert_eq!(
            Ok(utc(1970, 1, 1, 5, 0, 0)),
            parse_rfc2822("Thu, 1 Jan 1970 00:00:00 -0500")
        );
        assert_eq!(
            Ok(utc(1995, 12, 17, 2, 24, 0)),
            parse_rfc2822("Sun Dec 17 1995 03:24:00 GMT+0100")
        );
    }

    #[test]
    fn test_parse_rfc2822_errors() {
        assert_eq!(
            Err(ParseInstantErr::Invalid(InvalidInstant::Day {
                year: 2016,
                month: 4,
                day: 31
            })),
            parse_rfc2822("31 Apr 2016 00:00:00 GMT")
        );
        assert_eq!(
            Err(ParseInstantErr::LeftoverCharacters(" (CET)".to_string())),
            parse_rfc2822("Sun, 17 May 1998 03:00:00 +0100 (CET)")
        );
        assert_eq!(
            Err(ParseInstantErr::Unrecognized("Dec 171995 03:24:00".to_string())),
            parse_rfc2822("Dec 171995 03:24:00")
        );
        assert_eq!(
            Err(ParseInstantErr::Unrecognized("Tue, 26 Jan".to_string())),
            parse_rfc2822("Tue, 26 Jan")
        );
    }

    #[test]
    fn test_parse_instant() {
        assert_eq!(
            Ok(utc(2016, 1, 19, 8, 7, 37)),
            "2016-01-19T08:07:37Z".parse::<Instant>()
        );
        assert_eq!(
            Ok(utc(2016, 1, 26, 13, 48, 2)),
            "Tue, 26 Jan 2016 13:48:02 GMT".parse::<Instant>()
        );
        assert_eq!(
            Err(ParseInstantErr::Unrecognized("yesterday".to_string())),
            "yesterday".parse::<Instant>()
        );
    }
}
