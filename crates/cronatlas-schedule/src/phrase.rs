//! Human-readable schedule phrases ("daily 3:30pm", "weekly mon 9am").
//!
//! Matching is case-insensitive and priority-ordered; the first matching
//! frequency keyword wins. The raw phrase is always kept as `display`.

use once_cell::sync::Lazy;
use regex::Regex;

use cronatlas_types::{Frequency, Schedule};

static HOURLY_MINUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\d+)").unwrap());
static CLOCK_FULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+):(\d+)(am|pm)").unwrap());
static CLOCK_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)(am|pm)").unwrap());
static DAY_CLOCK_FULL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\s+(\d+):(\d+)(am|pm)").unwrap());
static DAY_CLOCK_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\s+(\d+)(am|pm)").unwrap());

/// Normalize a schedule phrase. Unmatched phrases come back as
/// `unknown` with empty `times`, never as an error.
pub fn parse_schedule(text: &str) -> Schedule {
    let mut schedule = Schedule {
        display: text.to_string(),
        frequency: Frequency::Unknown,
        times: Vec::new(),
        day: None,
    };
    let s = text.to_lowercase();

    if s.contains("every 5 min") {
        schedule.frequency = Frequency::EveryMin(5);
        schedule.times = vec!["recurring".into()];
    } else if s.contains("every 10 min") {
        schedule.frequency = Frequency::EveryMin(10);
        schedule.times = vec!["recurring".into()];
    } else if s.contains("every 15 min") {
        schedule.frequency = Frequency::EveryMin(15);
        schedule.times = vec!["recurring".into()];
    } else if s.contains("hourly") {
        schedule.frequency = Frequency::Hourly;
        schedule.times = vec![
            HOURLY_MINUTES
                .captures(&s)
                .map(|c| format!(":{}", &c[1]))
                .unwrap_or_else(|| ":00".into()),
        ];
    } else if s.contains("daily") {
        schedule.frequency = Frequency::Daily;
        schedule.times = clock_times(&s);
    } else if s.contains("weekly") {
        schedule.frequency = Frequency::Weekly;
        if let Some((day, time)) = day_and_time(&s) {
            schedule.day = Some(day);
            schedule.times = vec![time];
        }
    } else if s.contains("monthly") {
        schedule.frequency = Frequency::Monthly;
        schedule.times = clock_times(&s);
    }

    schedule
}

/// Extract an "H:MMam/pm" or "Ham/pm" token as a 24-hour time.
/// The with-minutes pattern is tried first; minutes are kept verbatim.
fn clock_times(s: &str) -> Vec<String> {
    if let Some(c) = CLOCK_FULL.captures(s) {
        if let Ok(hour) = c[1].parse::<u32>() {
            return vec![format!("{:02}:{}", to_24_hour(hour, &c[3]), &c[2])];
        }
    }
    if let Some(c) = CLOCK_BARE.captures(s) {
        if let Ok(hour) = c[1].parse::<u32>() {
            return vec![format!("{:02}:00", to_24_hour(hour, &c[2]))];
        }
    }
    Vec::new()
}

/// Extract a "day H:MMam/pm" or "day Ham/pm" pair for weekly phrases.
fn day_and_time(s: &str) -> Option<(String, String)> {
    if let Some(c) = DAY_CLOCK_FULL.captures(s) {
        if let Ok(hour) = c[2].parse::<u32>() {
            let time = format!("{:02}:{}", to_24_hour(hour, &c[4]), &c[3]);
            return Some((capitalize(&c[1]), time));
        }
    }
    if let Some(c) = DAY_CLOCK_BARE.captures(s) {
        if let Ok(hour) = c[2].parse::<u32>() {
            let time = format!("{:02}:00", to_24_hour(hour, &c[3]));
            return Some((capitalize(&c[1]), time));
        }
    }
    None
}

fn to_24_hour(hour: u32, meridiem: &str) -> u32 {
    match meridiem {
        "pm" if hour != 12 => hour + 12,
        "am" if hour == 12 => 0,
        _ => hour,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
