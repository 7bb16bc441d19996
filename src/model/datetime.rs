// File: ./src/model/datetime.rs
// Free-text date/time parsing for deadline and event fragments.
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use thiserror::Error;

pub const ACCEPTED_FORMATS: &str =
    "2024-12-02 1800, 2024-12-02 18:00, 2/12/2024 1800, 2024-12-02, tomorrow 6pm, friday 09:30";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("I don't understand the date/time '{input}'. Try one of: {formats}", formats = ACCEPTED_FORMATS)]
pub struct DateTimeParseError {
    pub input: String,
}

impl DateTimeParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Turns a free-text fragment into a timestamp.
pub trait DateTimeParser {
    fn parse(&self, input: &str) -> Result<NaiveDateTime, DateTimeParseError>;
}

/// Resolves relative words ("today", "friday") against the local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDateParser;

impl DateTimeParser for LocalDateParser {
    fn parse(&self, input: &str) -> Result<NaiveDateTime, DateTimeParseError> {
        parse_datetime(input)
    }
}

/// Resolves relative words against a pinned date.
#[derive(Debug, Clone, Copy)]
pub struct FixedDateParser {
    today: NaiveDate,
}

impl FixedDateParser {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl DateTimeParser for FixedDateParser {
    fn parse(&self, input: &str) -> Result<NaiveDateTime, DateTimeParseError> {
        parse_datetime_from(input, self.today)
    }
}

/// Parses a date/time fragment relative to the local current date.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, DateTimeParseError> {
    parse_datetime_from(input, Local::now().date_naive())
}

/// Deterministic core of [`parse_datetime`]: relative words resolve against `today`.
///
/// A date given without a time means the end of that day (23:59).
pub fn parse_datetime_from(
    input: &str,
    today: NaiveDate,
) -> Result<NaiveDateTime, DateTimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateTimeParseError::new(input));
    }
    let lower = trimmed.to_lowercase();

    // 2024-12-02T18:00
    if let Ok(dt) = NaiveDateTime::parse_from_str(&lower, "%Y-%m-%dt%H:%M") {
        return Ok(dt);
    }

    let mut words = lower.split_whitespace();
    let (Some(date_word), time_word, None) = (words.next(), words.next(), words.next()) else {
        return Err(DateTimeParseError::new(input));
    };

    let date = parse_date_word(date_word, today).ok_or_else(|| DateTimeParseError::new(input))?;
    let time = match time_word {
        Some(t) => parse_time_string(t).ok_or_else(|| DateTimeParseError::new(input))?,
        None => end_of_day(),
    };
    Ok(date.and_time(time))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

fn parse_date_word(word: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(word, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(word, "%d/%m/%Y") {
        return Some(d);
    }
    match word {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }
    parse_weekday(word).map(|wd| next_weekday(today, wd))
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Next occurrence strictly after `from`.
fn next_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
    let mut d = from + Duration::days(1);
    while d.weekday() != target {
        d += Duration::days(1);
    }
    d
}

fn parse_time_string(s: &str) -> Option<NaiveTime> {
    let parse_12h = |s: &str, is_pm: bool| -> Option<NaiveTime> {
        let (h, m) = if let Some((h_str, m_str)) = s.split_once(':') {
            (h_str.parse::<u32>().ok()?, m_str.parse::<u32>().ok()?)
        } else {
            (s.parse::<u32>().ok()?, 0)
        };
        if !(1..=12).contains(&h) || m > 59 {
            return None;
        }
        let h_24 = if h == 12 {
            if is_pm { 12 } else { 0 }
        } else if is_pm {
            h + 12
        } else {
            h
        };
        NaiveTime::from_hms_opt(h_24, m, 0)
    };

    if let Some(stripped) = s.strip_suffix("am") {
        return parse_12h(stripped, false);
    }
    if let Some(stripped) = s.strip_suffix("pm") {
        return parse_12h(stripped, true);
    }

    if let Some((h_str, m_str)) = s.split_once(':') {
        let h = h_str.parse::<u32>().ok()?;
        let m = m_str.parse::<u32>().ok()?;
        return NaiveTime::from_hms_opt(h, m, 0);
    }

    // Military style: 1800, 0930
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let h = s[..2].parse::<u32>().ok()?;
        let m = s[2..].parse::<u32>().ok()?;
        return NaiveTime::from_hms_opt(h, m, 0);
    }

    None
}
