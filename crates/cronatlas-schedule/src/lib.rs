//! cronatlas-schedule: normalizes schedule descriptions into [`Schedule`] records.
//!
//! Two pure entry points: [`parse_schedule`] for human-readable phrases
//! ("daily 3am", "every 5 min") and [`parse_cron_expression`] for 5-field
//! cron expressions. Both are total functions over strings: unrecognized
//! input degrades to an `unknown`/`custom` record instead of erroring.
//!
//! [`Schedule`]: cronatlas_types::Schedule

pub mod cron;
pub mod phrase;

pub use cron::parse_cron_expression;
pub use phrase::parse_schedule;
