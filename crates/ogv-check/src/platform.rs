//! # Platform Checker
//!
//! Confirms the platform model against the platform-model collection.
//! The model name is mandatory; the vocabulary URI is optional — when
//! absent, the model name is looked up by label and the URI filled in.

use ogv_core::{ConceptUri, Document, DocumentReport};
use serde_yaml::Value;

use crate::context::CheckContext;
use crate::fields::{correct, get_str};
use crate::plan::Check;

/// Platform section rules.
pub struct PlatformCheck;

impl Check for PlatformCheck {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn run(&self, ctx: &CheckContext<'_>, doc: &mut Document, report: &mut DocumentReport) {
        let before = report.len();
        let Some(Value::Mapping(platform)) = doc.section_mut("platform") else {
            // The structural gate guarantees the section; nothing to do.
            return;
        };

        let model = get_str(platform, "platform_model").unwrap_or("").trim().to_string();
        if model.is_empty() {
            report.fail("platform/platform_model", "mandatory field is missing");
            return;
        }

        let uri_raw = get_str(platform, "platform_model_vocabulary")
            .unwrap_or("")
            .trim()
            .to_string();

        if uri_raw.is_empty() {
            report.warning("platform/platform_model_vocabulary", "optional field is missing");
            match ctx.vocab.lookup(&model, &ctx.collections.platform_models) {
                Err(e) => {
                    report.warning("platform/platform_model", format!("could not verify: {e}"));
                }
                Ok(None) => {
                    report.fail(
                        "platform/platform_model",
                        format!(
                            "'{model}' not found in {}; check the name or log a request to add it",
                            ctx.collections.platform_models
                        ),
                    );
                }
                Ok(Some(matched)) => {
                    correct(
                        platform,
                        report,
                        "platform/platform_model_vocabulary",
                        "platform_model_vocabulary",
                        matched.concept.uri.as_str(),
                        "resolved from the platform model name",
                    );
                    if matched.needs_correction() {
                        correct(
                            platform,
                            report,
                            "platform/platform_model",
                            "platform_model",
                            &matched.concept.pref_label,
                            "from the vocabulary record",
                        );
                    }
                }
            }
        } else {
            let uri = match ConceptUri::parse(&uri_raw) {
                Ok(uri) => uri,
                Err(e) => {
                    report.fail(
                        "platform/platform_model_vocabulary",
                        format!("not a usable concept URI: {e}"),
                    );
                    return;
                }
            };
            match ctx.vocab.concept(&uri) {
                Err(e) => {
                    report.warning(
                        "platform/platform_model_vocabulary",
                        format!("could not verify: {e}"),
                    );
                }
                Ok(None) => {
                    report.fail(
                        "platform/platform_model_vocabulary",
                        format!("URI {uri} not found on the vocabulary server; check the URI or log a request to add it"),
                    );
                }
                Ok(Some(concept)) => {
                    correct(
                        platform,
                        report,
                        "platform/platform_model_vocabulary",
                        "platform_model_vocabulary",
                        concept.uri.as_str(),
                        "normalized to the canonical concept URI",
                    );
                    correct(
                        platform,
                        report,
                        "platform/platform_model",
                        "platform_model",
                        &concept.pref_label,
                        "from the vocabulary record",
                    );
                }
            }
        }

        if report.len() == before {
            report.pass("platform", "platform model confirmed against the vocabulary");
        }
    }
}
