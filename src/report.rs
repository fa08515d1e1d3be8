//! Run reports exported as JSON for CI and session summaries.

use anyhow::Result;
use orbiter_core::{EulerDegrees, SimTick};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Summary of one headless run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier.
    pub name: String,

    /// When the report was built (RFC 3339).
    pub timestamp: String,

    /// Overall outcome.
    pub result: RunResult,

    /// Ticks executed.
    pub ticks: u64,

    /// Orientation of the tracked entity when the run ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_orientation: Option<EulerDegrees>,

    /// Navigation target requested, if the run ended by navigating away.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<String>,

    /// Behaviour faults seen during the run.
    pub faults: usize,
}

/// Overall run outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunResult {
    /// Ran to the tick limit.
    Completed,
    /// A behaviour navigated away and the session ended early.
    Navigated,
    /// Every behaviour faulted.
    Faulted,
}

/// Builder for [`RunReport`].
pub struct RunReportBuilder {
    report: RunReport,
}

impl RunReportBuilder {
    /// Start a report named `name`, stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            report: RunReport {
                name: name.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                result: RunResult::Completed,
                ticks: 0,
                final_orientation: None,
                navigation: None,
                faults: 0,
            },
        }
    }

    /// Set the outcome.
    pub fn result(mut self, result: RunResult) -> Self {
        self.report.result = result;
        self
    }

    /// Set the last tick reached.
    pub fn ticks(mut self, tick: SimTick) -> Self {
        self.report.ticks = tick.0;
        self
    }

    /// Set the final orientation.
    pub fn final_orientation(mut self, euler: EulerDegrees) -> Self {
        self.report.final_orientation = Some(euler);
        self
    }

    /// Set the navigation target.
    pub fn navigation(mut self, target: impl Into<String>) -> Self {
        self.report.navigation = Some(target.into());
        self
    }

    /// Set the fault count.
    pub fn faults(mut self, faults: usize) -> Self {
        self.report.faults = faults;
        self
    }

    /// Build the report.
    pub fn build(self) -> RunReport {
        self.report
    }
}

/// Writes run reports as pretty JSON.
pub struct ReportSink {
    path: PathBuf,
}

impl ReportSink {
    /// Sink targeting `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Write `report`, replacing any previous file.
    pub fn write(&self, report: &RunReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
