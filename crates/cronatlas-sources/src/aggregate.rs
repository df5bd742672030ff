//! One-shot aggregation: run the three loaders, merge, stamp, write.

use std::path::Path;

use chrono::Local;
use tracing::info;

use cronatlas_types::{OutputDocument, SourceCounts};

use crate::timers::TimerSource;
use crate::{GeneratorPaths, Result, health, openclaw, timers};

/// A generated document plus the per-source warnings collected on the way.
#[derive(Debug)]
pub struct Generated {
    pub document: OutputDocument,
    pub warnings: Vec<String>,
}

/// Run all three loaders unconditionally and assemble the document.
/// Loader failures have already been downgraded to warnings, so this
/// cannot fail; a run with every source broken yields an empty document.
pub async fn generate(paths: &GeneratorPaths, timer_source: &dyn TimerSource) -> Generated {
    let monitor = health::load(&paths.monitor_config);
    let claw = openclaw::load(&paths.openclaw_jobs);
    let timer = timers::load(timer_source).await;

    let openclaw_count = claw.events.len();
    let systemd_count = timer.events.len();

    let mut events = monitor.events;
    events.extend(claw.events);
    events.extend(timer.events);

    // Monitor-config events can come from two passes over the groups, so
    // their count is taken off the merged list by source tag.
    let system_cron_count = events
        .iter()
        .filter(|e| e.source == health::SOURCE_TAG)
        .count();

    let warnings: Vec<String> = [monitor.warning, claw.warning, timer.warning]
        .into_iter()
        .flatten()
        .collect();

    info!(
        "Collected {} events ({} system cron, {} openclaw, {} systemd)",
        events.len(),
        system_cron_count,
        openclaw_count,
        systemd_count
    );

    let document = OutputDocument {
        generated: Local::now().to_rfc3339(),
        sources: SourceCounts {
            system_cron: system_cron_count,
            openclaw: openclaw_count,
            systemd: systemd_count,
            total: events.len(),
        },
        events,
    };

    Generated { document, warnings }
}

/// Serialize the document as 2-space-indented JSON, creating parent
/// directories as needed. This is the one error worth surfacing to the
/// operator with a non-zero exit.
pub fn write_document(document: &OutputDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json)?;
    Ok(())
}
