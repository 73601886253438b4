//! Run log and validated-output writing.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use ogv_core::{Document, DocumentReport, Severity};
use thiserror::Error;

/// Errors writing validation results. Any of these is process-fatal:
/// a run whose log cannot be written has no record of what it checked.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The run log could not be created or appended to.
    #[error("cannot write log '{path}': {source}")]
    Log {
        /// Log path.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The validated-output directory could not be created.
    #[error("cannot create output directory '{path}': {source}")]
    OutputDir {
        /// Directory path.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A validated document could not be written.
    #[error("cannot write validated document '{path}': {source}")]
    Output {
        /// Output file path.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A corrected document failed to serialize.
    #[error("cannot serialize document '{id}': {source}")]
    Serialize {
        /// Document id.
        id: String,
        /// Underlying YAML error.
        source: ogv_core::OgvError,
    },
}

/// Totals for one validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents processed.
    pub read: usize,
    /// Documents written to the validated output.
    pub written: usize,
    /// PASS outcomes across the run.
    pub passes: usize,
    /// WARNING outcomes across the run.
    pub warnings: usize,
    /// RECOMMENDATION outcomes across the run.
    pub recommendations: usize,
    /// FAIL outcomes across the run.
    pub fails: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read {} documents, wrote {} (pass: {}, warning: {}, recommendation: {}, fail: {})",
            self.read, self.written, self.passes, self.warnings, self.recommendations, self.fails
        )
    }
}

/// Writer for one validation run: the log artifact plus the
/// validated-output directory.
#[derive(Debug)]
pub struct ReportWriter {
    log: BufWriter<File>,
    log_path: PathBuf,
    output_dir: PathBuf,
    summary: RunSummary,
}

impl ReportWriter {
    /// Create the output directory, truncate the run log, and stamp the
    /// log header.
    pub fn create(log_path: &Path, output_dir: &Path) -> Result<Self, ReportError> {
        fs::create_dir_all(output_dir).map_err(|source| ReportError::OutputDir {
            path: output_dir.display().to_string(),
            source,
        })?;
        let file = File::create(log_path).map_err(|source| ReportError::Log {
            path: log_path.display().to_string(),
            source,
        })?;
        let mut writer = Self {
            log: BufWriter::new(file),
            log_path: log_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            summary: RunSummary::default(),
        };
        writer.log_line(&format!("START vocabulary check, output {}", output_dir.display()))?;
        Ok(writer)
    }

    /// Append one document's outcomes to the log, without writing any
    /// output file. Used for documents that failed to load at all.
    pub fn record(&mut self, report: &DocumentReport) -> Result<(), ReportError> {
        self.summary.read += 1;
        self.log_line(&format!("check {}", report.document_id()))?;
        for outcome in report.outcomes() {
            match outcome.severity {
                Severity::Pass => self.summary.passes += 1,
                Severity::Warning => self.summary.warnings += 1,
                Severity::Recommendation => self.summary.recommendations += 1,
                Severity::Fail => self.summary.fails += 1,
            }
            self.log_line(&format!(
                "  {:<14} {}: {}",
                outcome.severity, outcome.field, outcome.message
            ))?;
            let text = format!("{}: {}: {}", report.document_id(), outcome.field, outcome.message);
            match outcome.severity {
                Severity::Fail => tracing::error!("{text}"),
                Severity::Warning => tracing::warn!("{text}"),
                Severity::Recommendation => tracing::info!("{text}"),
                Severity::Pass => tracing::debug!("{text}"),
            }
        }
        self.flush()
    }

    /// Record one document's outcomes and, when no outcome blocks it,
    /// write the corrected document to the validated output. Returns
    /// whether the document was written.
    pub fn write(
        &mut self,
        corrected: &Document,
        report: &DocumentReport,
    ) -> Result<bool, ReportError> {
        self.record(report)?;
        if !report.passed() {
            self.log_line(&format!(
                "  {} not written: document has FAIL outcomes",
                report.document_id()
            ))?;
            return Ok(false);
        }
        let yaml = corrected
            .to_yaml_string()
            .map_err(|source| ReportError::Serialize {
                id: report.document_id().to_string(),
                source,
            })?;
        let path = self.output_dir.join(format!("{}.yaml", report.document_id()));
        fs::write(&path, yaml).map_err(|source| ReportError::Output {
            path: path.display().to_string(),
            source,
        })?;
        self.summary.written += 1;
        self.flush()?;
        Ok(true)
    }

    /// Append the closing summary and flush. Consumes the writer.
    pub fn finish(mut self) -> Result<RunSummary, ReportError> {
        let summary = self.summary;
        self.log_line(&format!("COMPLETE check all documents: {summary}"))?;
        self.flush()?;
        tracing::info!("COMPLETE check all documents: {summary}");
        Ok(summary)
    }

    /// Totals so far.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    fn log_line(&mut self, message: &str) -> Result<(), ReportError> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.log, "{stamp} {message}").map_err(|source| ReportError::Log {
            path: self.log_path.display().to_string(),
            source,
        })
    }

    // The log must survive a run that dies mid-way.
    fn flush(&mut self) -> Result<(), ReportError> {
        self.log.flush().map_err(|source| ReportError::Log {
            path: self.log_path.display().to_string(),
            source,
        })
    }
}
