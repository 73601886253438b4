//! # Validate Subcommand
//!
//! Discovers `*.yaml`/`*.yml` files in the input directory (sorted), runs
//! each through the document validator, and hands results to the report
//! writer. One document's failure — unreadable file, bad YAML, FAIL
//! outcomes — never aborts the run; the only fatal conditions are an
//! unreadable input directory and an unwritable log or output.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use ogv_check::{CheckContext, Collections, Validator};
use ogv_core::{Document, DocumentId, DocumentReport};
use ogv_report::ReportWriter;
use ogv_vocab::{MatchPolicy, NvsClient, NvsConfig};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Directory of draft deployment documents (*.yaml).
    #[arg(long)]
    pub input: PathBuf,

    /// Directory receiving validated documents.
    #[arg(long)]
    pub output: PathBuf,

    /// Run log path.
    #[arg(long, default_value = "vocab.log")]
    pub log: PathBuf,

    /// Base URL of the vocabulary server.
    #[arg(long, default_value = ogv_vocab::http::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Close-match policy: exact, case-insensitive or normalized.
    #[arg(long, default_value = "normalized")]
    pub match_policy: MatchPolicy,
}

/// Run the validation pipeline over the input directory.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let documents = discover(&args.input)
        .with_context(|| format!("cannot read input directory '{}'", args.input.display()))?;

    let collections = Collections::og1()?;
    let vocab = NvsClient::new(NvsConfig {
        base_url: args.base_url,
        timeout_secs: args.timeout_secs,
        policy: args.match_policy,
    })?;
    let ctx = CheckContext {
        vocab: &vocab,
        collections: &collections,
    };
    let validator = Validator::standard()?;
    let mut writer = ReportWriter::create(&args.log, &args.output)
        .context("cannot prepare log and output locations")?;

    tracing::info!(count = documents.len(), "START check documents");
    for path in documents {
        let id = match DocumentId::from_path(&path) {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("skipping '{}': {e}", path.display());
                continue;
            }
        };
        match load(&path, id.clone()) {
            Ok(doc) => {
                let (corrected, report) = validator.validate(&ctx, &doc);
                writer
                    .write(&corrected, &report)
                    .context("cannot write validation results")?;
            }
            Err(e) => {
                // Isolated to this document; the run continues.
                let mut report = DocumentReport::new(id);
                report.fail("(document)", format!("cannot load document: {e}"));
                writer
                    .record(&report)
                    .context("cannot write validation results")?;
            }
        }
    }

    let summary = writer.finish().context("cannot finalize the run log")?;
    println!("{summary}");
    Ok(())
}

/// The input documents, in sorted order.
fn discover(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if path.is_file() && is_yaml {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

fn load(path: &Path, id: DocumentId) -> anyhow::Result<Document> {
    let content = std::fs::read_to_string(path)?;
    Ok(Document::parse(id, &content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_filters_and_sorts_yaml_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.yaml", "a.yml", "notes.txt", "c.YAML"] {
            std::fs::write(dir.path().join(name), "x: 1\n").unwrap();
        }
        let found = discover(dir.path()).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.yml", "b.yaml", "c.YAML"]);
    }

    #[test]
    fn discover_missing_directory_errors() {
        assert!(discover(Path::new("/no/such/dir")).is_err());
    }
}
