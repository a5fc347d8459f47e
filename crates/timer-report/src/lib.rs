//! Reporting sink for accumulated task timers.
//!
//! The timer core only measures; this crate is the collaborator that reads
//! `component`, `subcomponent`, and the accumulated total once the caller is
//! done accumulating, and turns them into something presentable: an aligned
//! text breakdown with each task's share of the grand total, a JSON
//! document, or a set of structured log events.
//!
//! Building a report never mutates the timers it reads. A timer that is
//! still running contributes only its banked total; the report does not
//! implicitly stop it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use timer_core::{Clock, Label, TaskTimer, format_duration};

/// Errors produced while emitting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be serialized to JSON.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Ordering of report entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Longest accumulated time first.
    #[default]
    Duration,
    /// Alphabetical by component, then subcomponent.
    Label,
}

/// Configuration for report construction.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// How entries are ordered. Default: longest first.
    pub sort: SortOrder,

    /// Whether timers with zero accumulated time appear in the report.
    /// Default: true.
    pub include_idle: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sort: SortOrder::default(),
            include_idle: true,
        }
    }
}

/// One row of a report: a single timer's labels, total, and share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// The timer's component label.
    pub component: Label,

    /// The timer's subcomponent label; empty when none was given.
    pub subcomponent: Label,

    /// Accumulated time in milliseconds.
    pub total_ms: f64,

    /// Fraction of the report's grand total in `[0, 1]`; 0 when the grand
    /// total itself is zero.
    pub share: f64,
}

impl ReportEntry {
    /// `component/subcomponent`, or just the component when the
    /// subcomponent is empty.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.subcomponent.is_empty() {
            self.component.to_string()
        } else {
            format!("{}/{}", self.component, self.subcomponent)
        }
    }
}

/// An aggregated snapshot of a set of timers.
#[derive(Debug, Clone, Serialize)]
pub struct TimerReport {
    /// One entry per reported timer, ordered per [`ReportConfig::sort`].
    pub entries: Vec<ReportEntry>,

    /// Grand total across all entries, in milliseconds.
    pub total_ms: f64,

    /// Wall-clock time the report was built.
    pub generated_at: DateTime<Utc>,
}

impl TimerReport {
    /// Builds a report from the timers' current accumulated totals.
    pub fn new<'a, C, I>(timers: I, config: &ReportConfig) -> Self
    where
        C: Clock + 'a,
        I: IntoIterator<Item = &'a TaskTimer<C>>,
    {
        let mut entries: Vec<ReportEntry> = timers
            .into_iter()
            .filter(|timer| config.include_idle || timer.total_time() > Duration::ZERO)
            .map(|timer| ReportEntry {
                component: timer.component().clone(),
                subcomponent: timer.subcomponent().clone(),
                total_ms: timer.total_time_ms(),
                share: 0.0,
            })
            .collect();

        let total_ms: f64 = entries.iter().map(|entry| entry.total_ms).sum();
        if total_ms > 0.0 {
            for entry in &mut entries {
                entry.share = entry.total_ms / total_ms;
            }
        }

        match config.sort {
            SortOrder::Duration => {
                entries.sort_by(|a, b| b.total_ms.total_cmp(&a.total_ms));
            }
            SortOrder::Label => entries.sort_by(|a, b| {
                (a.component.as_str(), a.subcomponent.as_str())
                    .cmp(&(b.component.as_str(), b.subcomponent.as_str()))
            }),
        }

        Self {
            entries,
            total_ms,
            generated_at: Utc::now(),
        }
    }

    /// Renders the report as a plain-text breakdown, one line per entry
    /// plus a grand-total line. No trailing newline.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                format!(
                    "{}: {} ({:.1}%)",
                    entry.qualified_name(),
                    format_duration(ms_to_duration(entry.total_ms)),
                    entry.share * 100.0
                )
            })
            .collect();
        lines.push(format!(
            "total: {}",
            format_duration(ms_to_duration(self.total_ms))
        ));
        lines.join("\n")
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Emits the report through the logging layer: one info event per entry
    /// and one for the grand total.
    pub fn log_summary(&self) {
        for entry in &self.entries {
            info!(
                component = %entry.component,
                subcomponent = %entry.subcomponent,
                total_ms = entry.total_ms,
                share = entry.share,
                "task time"
            );
        }
        info!(
            total_ms = self.total_ms,
            entries = self.entries.len(),
            "task time total"
        );
    }
}

fn ms_to_duration(ms: f64) -> Duration {
    Duration::from_secs_f64(ms / 1000.0)
}
