//! # digital-timespan-nom
//!
//! digital-timespan-nom provides an `Instant` type (a UTC point in
//! time with millisecond resolution) and a `Timespan` type that wraps
//! `std::time::Duration`, along with a handful of calculations on
//! them:
//!
//! * the elapsed time between two instants in "digital" form
//!   (`05:20:10.453`), see [`timespan::format_duration`];
//! * the angle between the hands of an analog clock, see
//!   [`clock::angle_between_hands`];
//! * leap years, see [`calendar::is_leap_year`];
//! * ISO 8601 and RFC 2822 date parsing, see [`parse`].
//!
//! ## Example
//!
//! ```
//! use digital_timespan_nom::{clock, instant::Instant, timespan};
//!
//! let start: Instant = "2000-01-01T10:00:00Z".parse().unwrap();
//! let end: Instant = "Sat, 01 Jan 2000 15:20:10 GMT".parse().unwrap();
//! assert_eq!("05:20:10.000", timespan::format_duration(start, end));
//!
//! let three_oclock = Instant::from_ymd_hms(2016, 4, 5, 3, 0, 0).unwrap();
//! let angle = clock::angle_between_hands(three_oclock);
//! assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
//! ```
//!
//! ## Features
//!
//! * `serde`: `Serialize`/`Deserialize` for `Instant` and `Timespan`.
//! * `chrono`: `From<chrono::DateTime<Utc>>` for `Instant`.

pub mod calendar;
pub mod clock;
pub mod error;
pub mod instant;
pub mod parse;
pub mod timespan;
