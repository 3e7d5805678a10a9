use crate::clock::local_now;
use regex::Regex;
use std::sync::LazyLock;
use time::macros::time;
use time::{Duration, OffsetDateTime, Time};

const EVENING: Time = time!(18:00);

static TIME_OF_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"at\s+([0-9]{1,2})(?::([0-9]{2}))?\s*(am|pm)?")
        .expect("time-of-day pattern is valid")
});

/// Extract a due time from free text, relative to the local clock.
pub fn parse_time(text: &str) -> Option<OffsetDateTime> {
    parse_time_at(text, local_now())
}

/// Extract a due time from free text, relative to `now`.
///
/// "tomorrow" wins over any "at H" phrase and lands at 18:00 the next day.
/// An "at H[:MM][ am|pm]" phrase resolves to today even when that time has
/// already passed. Anything else, including hours that do not form a valid
/// time of day, yields `None`.
///
/// Results keep the offset of `now`, so a "tomorrow" that crosses a DST
/// change lands at 18:00 in today's offset, an hour off local wall-clock time.
pub fn parse_time_at(text: &str, now: OffsetDateTime) -> Option<OffsetDateTime> {
    let text = text.to_lowercase();

    if text.contains("tomorrow") {
        let next_day = now.checked_add(Duration::days(1))?;
        return Some(next_day.replace_time(EVENING));
    }

    let captures = TIME_OF_DAY.captures(&text)?;
    let mut hour: u8 = captures[1].parse().ok()?;
    let minute: u8 = match captures.get(2) {
        Some(value) => value.as_str().parse().ok()?,
        None => 0,
    };

    match captures.get(3).map(|value| value.as_str()) {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    let time_of_day = Time::from_hms(hour, minute, 0).ok()?;
    Some(now.replace_time(time_of_day))
}
