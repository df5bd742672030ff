//! systemd timer loader.
//!
//! Scrapes the human-oriented table printed by `systemctl list-timers`.
//! The invocation sits behind the [`TimerSource`] trait so tests can
//! substitute canned text for the real command.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use cronatlas_types::{Event, Frequency, Schedule};

use crate::{Result, SourceError, SourceReport};

pub const SOURCE_TAG: &str = "systemd timer";

const TIMER_SUFFIX: &str = ".timer";
/// Snap refresh timers are distro plumbing, not jobs anyone configured.
const SNAP_PREFIX: &str = "snap.";

/// Anything that can produce the tabular timer listing.
#[async_trait]
pub trait TimerSource {
    async fn list_timers(&self) -> Result<String>;
}

/// Runs `systemctl list-timers --no-pager` with a bounded wait.
pub struct SystemctlTimers {
    pub timeout: Duration,
}

impl Default for SystemctlTimers {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

#[async_trait]
impl TimerSource for SystemctlTimers {
    async fn list_timers(&self) -> Result<String> {
        let mut cmd = tokio::process::Command::new("systemctl");
        cmd.arg("list-timers").arg("--no-pager");
        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::null());

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| SourceError::Timeout(self.timeout.as_secs()))??;

        if !output.status.success() {
            // No systemd or no session bus; report zero timers.
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Load timer events. Fail-soft like the file-backed sources.
pub async fn load(source: &dyn TimerSource) -> SourceReport {
    match source.list_timers().await {
        Ok(listing) => SourceReport::ok(parse_listing(&listing)),
        Err(e) => {
            let warning = format!("Failed to list systemd timers: {e}");
            warn!("{warning}");
            SourceReport::failed(warning)
        }
    }
}

/// Parse the listing: header row first, two summary lines (blank +
/// "N timers listed.") last, unit name in the second-to-last column.
fn parse_listing(listing: &str) -> Vec<Event> {
    let lines: Vec<&str> = listing.lines().collect();
    if lines.len() < 3 {
        return Vec::new();
    }

    let mut events = Vec::new();
    for line in &lines[1..lines.len() - 2] {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            continue;
        }
        let unit = fields[fields.len() - 2];
        let Some(stem) = unit.strip_suffix(TIMER_SUFFIX) else {
            continue;
        };
        if unit.starts_with(SNAP_PREFIX) {
            continue;
        }
        events.push(Event {
            id: format!("systemd-{stem}"),
            name: humanize(stem),
            schedule: Schedule {
                display: "systemd timer".to_string(),
                frequency: Frequency::Timer,
                times: Vec::new(),
                day: None,
            },
            source: SOURCE_TAG.to_string(),
            logfile: None,
            script: None,
            description: None,
        });
    }
    events
}

/// "logrotate" → "Logrotate", "man-db_update" → "Man Db Update".
fn humanize(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(&'static str);

    #[async_trait]
    impl TimerSource for Canned {
        async fn list_timers(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl TimerSource for Broken {
        async fn list_timers(&self) -> Result<String> {
            Err(SourceError::Timeout(5))
        }
    }

    const LISTING: &str = "\
NEXT                        LEFT     LAST                        PASSED   UNIT                      ACTIVATES
Tue 2026-08-04 00:00:00 UTC 5h left  Mon 2026-08-03 00:00:00 UTC 18h ago  logrotate.timer           logrotate.service
Tue 2026-08-04 03:10:00 UTC 8h left  n/a                         n/a      man-db.timer              man-db.service
Tue 2026-08-04 06:00:00 UTC 11h left Mon 2026-08-03 06:00:00 UTC 12h ago  snap.lxd.activate.timer   snap.lxd.activate.service
Tue 2026-08-04 09:00:00 UTC 14h left Mon 2026-08-03 09:00:00 UTC 9h ago   apt-daily.service         apt-daily.service

4 timers listed.
";

    #[tokio::test]
    async fn test_parses_units_and_filters() {
        let report = load(&Canned(LISTING)).await;
        assert!(report.warning.is_none());

        // snap.* excluded, non-.timer unit excluded.
        let ids: Vec<&str> = report.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["systemd-logrotate", "systemd-man-db"]);

        let event = &report.events[1];
        assert_eq!(event.name, "Man Db");
        assert_eq!(event.source, SOURCE_TAG);
        assert_eq!(event.schedule.frequency, Frequency::Timer);
        assert_eq!(event.schedule.display, "systemd timer");
        assert!(event.schedule.times.is_empty());
    }

    #[tokio::test]
    async fn test_empty_output_is_zero_timers() {
        let report = load(&Canned("")).await;
        assert!(report.events.is_empty());
        assert!(report.warning.is_none());
    }

    #[tokio::test]
    async fn test_short_line_skipped() {
        let listing = "HEADER\nodd line\n\n1 timers listed.\n";
        let report = load(&Canned(listing)).await;
        assert!(report.events.is_empty());
    }

    #[tokio::test]
    async fn test_source_error_fails_soft() {
        let report = load(&Broken).await;
        assert!(report.events.is_empty());
        assert!(report.warning.unwrap().contains("timed out"));
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("logrotate"), "Logrotate");
        assert_eq!(humanize("man-db_update"), "Man Db Update");
        assert_eq!(humanize("APT-daily"), "Apt Daily");
    }
}
