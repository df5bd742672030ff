//! 5-field cron expressions (minute hour dom month dow).
//!
//! Only the shapes the dashboard can render get decoded: step minutes,
//! fixed-minute hourly, and fixed-time daily. Day-of-week or day-of-month
//! constrained expressions fall through to `custom` with the raw
//! expression as display.

use once_cell::sync::Lazy;
use regex::Regex;

use cronatlas_types::{Frequency, Schedule};

static STEP_MINUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*/(\d+)$").unwrap());

/// Normalize a cron expression. Anything that is not exactly 5 fields,
/// or not one of the decodable shapes, comes back as `custom` with the
/// raw text as display. Never errors.
pub fn parse_cron_expression(expr: &str) -> Schedule {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    let &[minute, hour, dom, month, dow] = fields.as_slice() else {
        return custom(expr);
    };

    // Step minutes win over everything else in the expression.
    if let Some(c) = STEP_MINUTE.captures(minute) {
        if let Ok(step) = c[1].parse::<u32>() {
            return Schedule {
                display: format!("every {step} min"),
                frequency: Frequency::EveryMin(step),
                times: vec!["recurring".into()],
                day: None,
            };
        }
        return custom(expr);
    }

    let wild = |field: &str| field == "*";

    if wild(hour) && wild(dom) && wild(month) && wild(dow) {
        if let Ok(m) = minute.parse::<u32>() {
            return Schedule {
                display: format!("hourly at :{m:02}"),
                frequency: Frequency::Hourly,
                times: vec![format!(":{m:02}")],
                day: None,
            };
        }
    }

    if wild(dom) && wild(month) && wild(dow) {
        let h = hour.parse::<u32>().ok();
        let m = minute.parse::<u32>().ok();
        if h.is_some() || m.is_some() {
            let h = h.unwrap_or(0);
            let m = m.unwrap_or(0);
            return Schedule {
                display: format!("daily at {}", twelve_hour(h, m)),
                frequency: Frequency::Daily,
                times: vec![format!("{h:02}:{m:02}")],
                day: None,
            };
        }
    }

    custom(expr)
}

fn custom(expr: &str) -> Schedule {
    Schedule {
        display: expr.to_string(),
        frequency: Frequency::Custom,
        times: Vec::new(),
        day: None,
    }
}

/// 12-hour rendering for display strings; noon and midnight come out as
/// 12pm/12am, not 0.
fn twelve_hour(hour: u32, minute: u32) -> String {
    let meridiem = if hour >= 12 { "pm" } else { "am" };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h12}:{minute:02}{meridiem}")
}
