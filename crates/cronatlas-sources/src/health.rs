//! Health-monitor config loader.
//!
//! The config groups monitored components; scheduled jobs live in the
//! `scheduled-jobs` group, and other groups may still carry cron-backed
//! components marked with `"type": "system_cron"`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use cronatlas_schedule::parse_schedule;
use cronatlas_types::Event;

use crate::{Result, SourceReport};

pub const SOURCE_TAG: &str = "system cron";

const SCHEDULED_JOBS_GROUP: &str = "scheduled-jobs";
const SYSTEM_CRON_TYPE: &str = "system_cron";

#[derive(Debug, Deserialize)]
struct MonitorConfig {
    #[serde(default)]
    groups: BTreeMap<String, Group>,
}

#[derive(Debug, Deserialize)]
struct Group {
    #[serde(default)]
    components: Vec<Component>,
}

#[derive(Debug, Deserialize)]
struct Component {
    id: String,
    name: String,
    #[serde(default)]
    schedule: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    logfile: Option<String>,
    #[serde(default)]
    script: Option<String>,
}

/// Load scheduled-job events from the monitor config. Missing file or
/// malformed content degrades to zero events plus a warning.
pub fn load(path: &Path) -> SourceReport {
    match read_config(path) {
        Ok(events) => SourceReport::ok(events),
        Err(e) => {
            let warning = format!("Failed to load monitor config {}: {e}", path.display());
            warn!("{warning}");
            SourceReport::failed(warning)
        }
    }
}

fn read_config(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)?;
    let config: MonitorConfig = serde_json::from_str(&content)?;

    let mut events = Vec::new();

    if let Some(group) = config.groups.get(SCHEDULED_JOBS_GROUP) {
        for component in &group.components {
            if let Some(schedule) = &component.schedule {
                events.push(to_event(component, schedule));
            }
        }
    }

    // Other groups contribute only components explicitly marked as
    // system-level cron jobs.
    for (group_id, group) in &config.groups {
        if group_id == SCHEDULED_JOBS_GROUP {
            continue;
        }
        for component in &group.components {
            if component.kind.as_deref() == Some(SYSTEM_CRON_TYPE) {
                if let Some(schedule) = &component.schedule {
                    events.push(to_event(component, schedule));
                }
            }
        }
    }

    Ok(events)
}

fn to_event(component: &Component, schedule: &str) -> Event {
    Event {
        id: component.id.clone(),
        name: component.name.clone(),
        schedule: parse_schedule(schedule),
        source: SOURCE_TAG.to_string(),
        logfile: component.logfile.clone(),
        script: component.script.clone(),
        description: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cronatlas_types::Frequency;

    fn write_config(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
        let path = dir.path().join("health-monitor-config.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_scheduled_jobs_group() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "groups": {
                    "scheduled-jobs": {
                        "components": [
                            {"id": "backup", "name": "Backup", "schedule": "daily 2am",
                             "logfile": "/var/log/backup.log", "script": "backup.sh"},
                            {"id": "web", "name": "Web UI"}
                        ]
                    }
                }
            }"#,
        );

        let report = load(&path);
        assert!(report.warning.is_none());
        assert_eq!(report.events.len(), 1);

        let event = &report.events[0];
        assert_eq!(event.id, "backup");
        assert_eq!(event.source, SOURCE_TAG);
        assert_eq!(event.schedule.frequency, Frequency::Daily);
        assert_eq!(event.schedule.times, vec!["02:00".to_string()]);
        assert_eq!(event.logfile.as_deref(), Some("/var/log/backup.log"));
        assert_eq!(event.script.as_deref(), Some("backup.sh"));
    }

    #[test]
    fn test_other_groups_need_system_cron_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "groups": {
                    "services": {
                        "components": [
                            {"id": "rotate", "name": "Log rotation",
                             "type": "system_cron", "schedule": "daily 4am"},
                            {"id": "api", "name": "API", "type": "service",
                             "schedule": "hourly"},
                            {"id": "cleanup", "name": "Cleanup", "type": "system_cron"}
                        ]
                    }
                }
            }"#,
        );

        let report = load(&path);
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].id, "rotate");
    }

    #[test]
    fn test_missing_file_fails_soft() {
        let dir = tempfile::tempdir().unwrap();
        let report = load(&dir.path().join("nope.json"));
        assert!(report.events.is_empty());
        assert!(report.warning.is_some());
    }

    #[test]
    fn test_malformed_json_fails_soft() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "{ not json");
        let report = load(&path);
        assert!(report.events.is_empty());
        assert!(report.warning.unwrap().contains("JSON parse error"));
    }
}
