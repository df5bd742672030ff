//! cronatlas-sources: the three schedule sources and their aggregation.
//!
//! Every loader is fail-soft: a missing file, malformed JSON, or a dead
//! external command becomes a [`SourceReport`] carrying zero events and
//! the warning that was logged, never an abort. The only fatal path in
//! the whole program is writing the output document.

pub mod aggregate;
pub mod health;
pub mod openclaw;
pub mod timers;

use std::path::PathBuf;

use cronatlas_types::Event;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Home directory could not be resolved")]
    NoHomeDir,
    #[error("Timer command timed out after {0}s")]
    Timeout(u64),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Outcome of one source load: the events it contributed plus, when the
/// load failed, the recorded warning. Loader entry points never error.
#[derive(Debug, Clone, Default)]
pub struct SourceReport {
    pub events: Vec<Event>,
    pub warning: Option<String>,
}

impl SourceReport {
    pub fn ok(events: Vec<Event>) -> Self {
        Self {
            events,
            warning: None,
        }
    }

    pub fn failed(warning: String) -> Self {
        Self {
            events: Vec::new(),
            warning: Some(warning),
        }
    }
}

/// Where to read from and write to. Constructed by the caller so tests
/// (and operators) can point the generator at alternate files.
#[derive(Debug, Clone)]
pub struct GeneratorPaths {
    pub monitor_config: PathBuf,
    pub openclaw_jobs: PathBuf,
    pub output: PathBuf,
}

impl GeneratorPaths {
    /// Default locations under the invoking user's home directory.
    pub fn resolve() -> Result<Self> {
        let home = dirs::home_dir().ok_or(SourceError::NoHomeDir)?;
        Ok(Self {
            monitor_config: home.join("aurora/health-monitor-config.json"),
            openclaw_jobs: home.join(".openclaw/cron/jobs.json"),
            output: home.join("projects/aurora-health/dist/cron-events.json"),
        })
    }
}
