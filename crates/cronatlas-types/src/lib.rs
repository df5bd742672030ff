//! cronatlas-types: shared data model for the cron-events document.
//!
//! Everything here is built once per run, serialized, and discarded;
//! nothing is mutated after construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ──────────────────── Frequency ────────────────────

/// How often an event recurs, in the fixed vocabulary the dashboard
/// understands plus the open `every-{N}-min` family produced by cron
/// step expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    /// `every-{N}-min` (N from `*/N` cron minutes or the 5/10/15 phrases).
    EveryMin(u32),
    Hourly,
    Daily,
    Weekly,
    Monthly,
    /// Recognized as a cron expression but not decodable further.
    Custom,
    /// A systemd timer unit; the unit itself owns the recurrence.
    Timer,
    /// Schedule phrase matched none of the known patterns.
    Unknown,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::EveryMin(n) => write!(f, "every-{n}-min"),
            Frequency::Hourly => write!(f, "hourly"),
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Custom => write!(f, "custom"),
            Frequency::Timer => write!(f, "timer"),
            Frequency::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => return Ok(Frequency::Hourly),
            "daily" => return Ok(Frequency::Daily),
            "weekly" => return Ok(Frequency::Weekly),
            "monthly" => return Ok(Frequency::Monthly),
            "custom" => return Ok(Frequency::Custom),
            "timer" => return Ok(Frequency::Timer),
            "unknown" => return Ok(Frequency::Unknown),
            _ => {}
        }
        s.strip_prefix("every-")
            .and_then(|rest| rest.strip_suffix("-min"))
            .and_then(|n| n.parse().ok())
            .map(Frequency::EveryMin)
            .ok_or_else(|| format!("unrecognized frequency: {s}"))
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ──────────────────── Schedule & Event ────────────────────

/// Normalized recurrence description attached to every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Human-readable rendering (raw phrase, raw cron expr, or computed).
    pub display: String,
    pub frequency: Frequency,
    /// Wall-clock times ("02:00", ":30") or the literal "recurring".
    pub times: Vec<String>,
    /// Day of week for weekly schedules (e.g. "Mon").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
}

/// One scheduled thing, tagged with the source it was discovered in.
/// Ids are not deduplicated across sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub schedule: Schedule,
    /// Source tag (e.g. "system cron", "openclaw cron", "systemd timer").
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logfile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ──────────────────── Output document ────────────────────

/// Per-source event counts reported alongside the merged list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCounts {
    pub system_cron: usize,
    pub openclaw: usize,
    pub systemd: usize,
    pub total: usize,
}

/// The whole output file: one fresh document per run, fully overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDocument {
    /// Local ISO-8601 timestamp of this run.
    pub generated: String,
    pub sources: SourceCounts,
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_display_round_trip() {
        for freq in [
            Frequency::EveryMin(5),
            Frequency::EveryMin(30),
            Frequency::Hourly,
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Custom,
            Frequency::Timer,
            Frequency::Unknown,
        ] {
            let parsed: Frequency = freq.to_string().parse().unwrap();
            assert_eq!(parsed, freq);
        }
    }

    #[test]
    fn test_frequency_serde_as_string() {
        let json = serde_json::to_string(&Frequency::EveryMin(15)).unwrap();
        assert_eq!(json, "\"every-15-min\"");
        let parsed: Frequency = serde_json::from_str("\"every-30-min\"").unwrap();
        assert_eq!(parsed, Frequency::EveryMin(30));
    }

    #[test]
    fn test_frequency_rejects_garbage() {
        assert!("every-x-min".parse::<Frequency>().is_err());
        assert!("fortnightly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_schedule_skips_absent_day() {
        let schedule = Schedule {
            display: "daily 2am".into(),
            frequency: Frequency::Daily,
            times: vec!["02:00".into()],
            day: None,
        };
        let json = serde_json::to_string(&schedule).unwrap();
        assert!(!json.contains("\"day\""));
    }

    #[test]
    fn test_event_skips_absent_optionals() {
        let event = Event {
            id: "systemd-logrotate".into(),
            name: "Logrotate".into(),
            schedule: Schedule {
                display: "systemd timer".into(),
                frequency: Frequency::Timer,
                times: vec![],
                day: None,
            },
            source: "systemd timer".into(),
            logfile: None,
            script: None,
            description: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("logfile"));
        assert!(!json.contains("script"));
        assert!(!json.contains("description"));
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, "systemd-logrotate");
    }

    #[test]
    fn test_output_document_shape() {
        let doc = OutputDocument {
            generated: "2026-08-06T12:00:00+00:00".into(),
            sources: SourceCounts {
                system_cron: 1,
                openclaw: 0,
                systemd: 0,
                total: 1,
            },
            events: vec![],
        };
        let value: serde_json::Value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["sources"]["system_cron"], 1);
        assert_eq!(value["sources"]["total"], 1);
        assert!(value["events"].as_array().unwrap().is_empty());
    }
}
