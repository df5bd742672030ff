//! OpenClaw cron-jobs loader.
//!
//! Reads the job list OpenClaw keeps under `~/.openclaw/cron/`. Only
//! cron-kind schedules are surfaced; interval ("every") and one-shot
//! ("at") schedules carry no cron expression to normalize.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use cronatlas_schedule::parse_cron_expression;
use cronatlas_types::Event;

use crate::{Result, SourceReport};

pub const SOURCE_TAG: &str = "openclaw cron";

/// Job ids are long UUID-ish strings; events keep a short head under a
/// fixed prefix.
const ID_PREFIX: &str = "openclaw-";
const ID_HEAD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
struct JobsFile {
    #[serde(default)]
    jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
struct Job {
    id: String,
    name: String,
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default)]
    schedule: Option<JobSchedule>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JobSchedule {
    kind: String,
    #[serde(default)]
    expr: String,
}

fn default_true() -> bool {
    true
}

/// Load events from the OpenClaw jobs file. Fail-soft.
pub fn load(path: &Path) -> SourceReport {
    match read_jobs(path) {
        Ok(events) => SourceReport::ok(events),
        Err(e) => {
            let warning = format!("Failed to load OpenClaw jobs {}: {e}", path.display());
            warn!("{warning}");
            SourceReport::failed(warning)
        }
    }
}

fn read_jobs(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)?;
    let file: JobsFile = serde_json::from_str(&content)?;

    let mut events = Vec::new();
    for job in &file.jobs {
        if !job.enabled {
            continue;
        }
        let Some(schedule) = &job.schedule else {
            continue;
        };
        if schedule.kind != "cron" {
            debug!(
                "Skipping OpenClaw job {} with schedule kind {}",
                job.id, schedule.kind
            );
            continue;
        }
        let head: String = job.id.chars().take(ID_HEAD_LEN).collect();
        events.push(Event {
            id: format!("{ID_PREFIX}{head}"),
            name: job.name.clone(),
            schedule: parse_cron_expression(&schedule.expr),
            source: SOURCE_TAG.to_string(),
            logfile: None,
            script: None,
            description: job.description.clone(),
        });
    }
    Ok(events)
}
