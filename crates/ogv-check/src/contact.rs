//! # Contact Checker
//!
//! Rules for the optional contacts section: every contact needs a name,
//! roles are confirmed against the contributor-role collection (with
//! close-match correction), and an email without an `@` is flagged.

use ogv_core::{Document, DocumentReport};
use serde_yaml::Value;

use crate::context::CheckContext;
use crate::fields::{correct, get_str};
use crate::plan::Check;

/// Contacts section rules.
pub struct ContactCheck;

impl Check for ContactCheck {
    fn name(&self) -> &'static str {
        "contacts"
    }

    fn run(&self, ctx: &CheckContext<'_>, doc: &mut Document, report: &mut DocumentReport) {
        let before = report.len();
        let Some(Value::Sequence(contacts)) = doc.section_mut("contacts") else {
            report.warning("contacts", "optional section is missing");
            return;
        };

        for (position, entry) in contacts.iter_mut().enumerate() {
            let Value::Mapping(contact) = entry else {
                // The structural gate guarantees mapping entries.
                continue;
            };
            let field = |key: &str| format!("contacts/{position}/{key}");

            if get_str(contact, "name").map_or(true, |n| n.trim().is_empty()) {
                report.fail(field("name"), "mandatory field is missing");
            }

            match get_str(contact, "role").map(str::to_owned) {
                None => report.warning(field("role"), "optional field is missing"),
                Some(role) => {
                    match ctx.vocab.lookup(&role, &ctx.collections.contributor_roles) {
                        Err(e) => {
                            report.warning(field("role"), format!("could not verify: {e}"));
                        }
                        Ok(None) => {
                            report.fail(
                                field("role"),
                                format!(
                                    "role '{role}' not found in {}",
                                    ctx.collections.contributor_roles
                                ),
                            );
                        }
                        Ok(Some(matched)) => {
                            if matched.needs_correction() {
                                correct(
                                    contact,
                                    report,
                                    &field("role"),
                                    "role",
                                    &matched.concept.pref_label,
                                    "from the contributor-role vocabulary",
                                );
                            }
                        }
                    }
                }
            }

            if let Some(email) = get_str(contact, "email") {
                if !email.contains('@') {
                    report.warning(field("email"), format!("'{email}' does not look like an email address"));
                }
            }
        }

        if report.len() == before {
            report.pass("contacts", "all contacts confirmed against the vocabulary");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Collections;
    use ogv_core::{CollectionId, DocumentId, Severity};
    use ogv_vocab::{Concept, MatchPolicy, MemoryVocab, VocabLookup};
    use serde_json::json;

    fn vocab() -> MemoryVocab {
        let pi = Concept::from_graph_node(&json!({
            "@id": "http://vocab.nerc.ac.uk/collection/W08/current/ROLE001/",
            "skos:prefLabel": "Principal Investigator",
        }))
        .unwrap();
        MemoryVocab::new(MatchPolicy::Normalized)
            .with_collection(CollectionId::new("W08").unwrap(), vec![pi])
    }

    fn run(yaml: &str, vocab: &dyn VocabLookup) -> (Document, DocumentReport) {
        let collections = Collections::og1().unwrap();
        let ctx = CheckContext { vocab, collections: &collections };
        let mut doc = Document::parse(DocumentId::new("test").unwrap(), yaml).unwrap();
        let mut report = DocumentReport::new(DocumentId::new("test").unwrap());
        ContactCheck.run(&ctx, &mut doc, &mut report);
        (doc, report)
    }

    #[test]
    fn complete_contact_passes() {
        let vocab = vocab();
        let (_, report) = run(
            "contacts:\n  - name: C. Darwin\n    role: Principal Investigator\n    email: darwin@beagle.org\n",
            &vocab,
        );
        assert!(report.passed());
        assert_eq!(report.count(Severity::Pass), 1);
    }

    #[test]
    fn missing_section_is_a_warning() {
        let vocab = vocab();
        let (_, report) = run("platform: {}\n", &vocab);
        assert!(report.passed());
        assert_eq!(report.count(Severity::Warning), 1);
    }

    #[test]
    fn case_variant_role_is_corrected() {
        let vocab = vocab();
        let (doc, report) = run(
            "contacts:\n  - name: C. Darwin\n    role: principal investigator\n",
            &vocab,
        );
        assert!(report.passed());
        assert_eq!(report.count(Severity::Recommendation), 1);
        assert!(doc.to_yaml_string().unwrap().contains("Principal Investigator"));
    }

    #[test]
    fn unknown_role_fails() {
        let vocab = vocab();
        let (_, report) = run("contacts:\n  - name: C. Darwin\n    role: Ship's Cat\n", &vocab);
        assert!(!report.passed());
    }

    #[test]
    fn nameless_contact_fails_and_bad_email_warns() {
        let vocab = vocab();
        let (_, report) = run(
            "contacts:\n  - role: Principal Investigator\n    email: not-an-address\n",
            &vocab,
        );
        assert!(!report.passed());
        assert_eq!(report.count(Severity::Warning), 1);
    }
}
