//! # Deployment Checker
//!
//! Sanity rules for the optional deployment section: timestamps must be
//! RFC3339 in UTC, an ongoing deployment may omit the end, and the end
//! must not precede the start. No vocabulary lookups here.

use chrono::{DateTime, FixedOffset};
use ogv_core::{Document, DocumentReport};
use serde_yaml::Value;

use crate::context::CheckContext;
use crate::fields::get_str;
use crate::plan::Check;

/// Deployment section rules.
pub struct DeploymentCheck;

impl Check for DeploymentCheck {
    fn name(&self) -> &'static str {
        "deployment"
    }

    fn run(&self, _ctx: &CheckContext<'_>, doc: &mut Document, report: &mut DocumentReport) {
        let before = report.len();
        let Some(Value::Mapping(deployment)) = doc.section("deployment") else {
            report.warning("deployment", "optional section is missing");
            return;
        };

        let start = match get_str(deployment, "start_datetime") {
            None => {
                report.fail("deployment/start_datetime", "mandatory field is missing");
                None
            }
            Some(raw) => parse_utc(raw).map_or_else(
                |reason| {
                    report.fail("deployment/start_datetime", reason);
                    None
                },
                Some,
            ),
        };

        match get_str(deployment, "end_datetime") {
            None => {
                report.warning("deployment/end_datetime", "missing; deployment treated as ongoing");
            }
            Some(raw) => match parse_utc(raw) {
                Err(reason) => report.fail("deployment/end_datetime", reason),
                Ok(end) => {
                    if let Some(start) = start {
                        if end < start {
                            report.fail(
                                "deployment/end_datetime",
                                format!("deployment ends before it starts ({end} < {start})"),
                            );
                        }
                    }
                }
            },
        }

        if get_str(deployment, "glider_serial").map_or(true, |s| s.trim().is_empty()) {
            report.warning("deployment/glider_serial", "optional field is missing");
        }

        if report.len() == before {
            report.pass("deployment", "deployment record is consistent");
        }
    }
}

/// Parse an RFC3339 timestamp, rejecting non-UTC offsets. Local offsets
/// would make deployment windows ambiguous across the fleet.
fn parse_utc(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|e| format!("'{raw}' is not an RFC3339 timestamp: {e}"))?;
    if parsed.offset().local_minus_utc() != 0 {
        return Err(format!("'{raw}' must be UTC (Z or +00:00 offset)"));
    }
    Ok(parsed)
}
