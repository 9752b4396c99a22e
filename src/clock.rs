use crate::instant::Instant;
use std::f64::consts::PI;

const DEGREES_PER_HOUR: f64 = 30.0;
const HOUR_HAND_DEGREES_PER_MINUTE: f64 = 0.5;
const MINUTE_HAND_DEGREES_PER_MINUTE: f64 = 6.0;

/// The smaller angle, in radians, between the hour and minute hands of
/// an analog clock showing the UTC time of `instant`.
///
/// Seconds are ignored.  The result is always in `[0, π]`.
pub fn angle_between_hands(instant: Instant) -> f64 {
    angle_in_degrees(instant.hour(), instant.minute()) * PI / 180.0
}

// Degrees only; the caller converts to radians once.
fn angle_in_degrees(hour: u32, minute: u32) -> f64 {
    let hour = if hour > 12 { hour - 12 } else { hour };
    let minute = f64::from(minute);

    let hour_hand = DEGREES_PER_HOUR * f64::from(hour) + HOUR_HAND_DEGREES_PER_MINUTE * minute;
    let minute_hand = MINUTE_HAND_DEGREES_PER_MINUTE * minute;

    let difference = (hour_hand - minute_hand).abs();
    if difference > 180.0 {
        360.0 - difference
    } else {
        difference
    }
}
