use thiserror::Error;

/// A calendar field that is out of range for the instant being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInstant {
    #[error("year {0} can't be represented in milliseconds since the epoch")]
    Year(i32),
    #[error("month {0} is not in 1..=12")]
    Month(u32),
    #[error("day {day} does not exist in {year}-{month:02}")]
    Day { year: i32, month: u32, day: u32 },
    #[error("hour {0} is not in 0..=23")]
    Hour(u32),
    #[error("minute {0} is not in 0..=59")]
    Minute(u32),
    #[error("second {0} is not in 0..=59")]
    Second(u32),
    #[error("millisecond {0} is not in 0..=999")]
    Millisecond(u32),
    #[error("offset of {0} minutes is not less than a day")]
    Offset(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseInstantErr {
    #[error("{0:?} is neither an ISO 8601 nor an RFC 2822 date")]
    Unrecognized(String),
    #[error("unexpected {0:?} after date")]
    LeftoverCharacters(String),
    #[error(transparent)]
    Invalid(#[from] InvalidInstant),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseTimespanErr {
    #[error("expected HH:MM:SS.mmm")]
    Malformed,
    #[error("unexpected characters after timespan")]
    LeftoverCharacters,
}
