//! # Sensor Checker
//!
//! Validates each sensor record against the sensor-model collection and
//! the model's SKOS linkages:
//!
//! 1. All mandatory fields are present.
//! 2. `sensor_model_vocabulary` resolves to a model concept (or, when
//!    the field is empty, the model name resolves by label and the URI
//!    is filled in).
//! 3. The model concept links `broader` into the sensor-type collection
//!    and `related` into the maker collection; the linked records give
//!    the expected type and maker fields.
//! 4. Every divergence between the record and the expected values is
//!    corrected with a RECOMMENDATION; a missing linkage is a WARNING
//!    asking for the link to be added upstream.
//! 5. A model outside the OceanGliders sensor scheme is flagged.

use ogv_core::{ConceptUri, Document, DocumentReport};
use serde_yaml::Value;

use crate::context::CheckContext;
use crate::fields::{correct, get_str, has_key, set_str};
use crate::plan::Check;

/// Scheme marker for sensors adopted by the OceanGliders program.
const OG_SENSORS_SCHEME: &str = "OG_SENSORS";

/// Fields every sensor record must carry.
const MANDATORY_KEYS: [&str; 7] = [
    "long_name",
    "sensor_maker",
    "sensor_maker_vocabulary",
    "sensor_model",
    "sensor_model_vocabulary",
    "sensor_type",
    "sensor_type_vocabulary",
];

/// Sensor section rules.
pub struct SensorCheck;

impl Check for SensorCheck {
    fn name(&self) -> &'static str {
        "sensors"
    }

    fn run(&self, ctx: &CheckContext<'_>, doc: &mut Document, report: &mut DocumentReport) {
        let before = report.len();
        let names: Vec<String> = match doc.section("sensors") {
            Some(Value::Mapping(sensors)) => sensors
                .keys()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            _ => return,
        };
        let Some(Value::Mapping(sensors)) = doc.section_mut("sensors") else {
            return;
        };
        for name in names {
            tracing::debug!(sensor = %name, "validating sensor");
            let Some(Value::Mapping(sensor)) = sensors.get_mut(name.as_str()) else {
                continue;
            };
            check_sensor(ctx, &name, sensor, report);
        }
        if report.len() == before {
            report.pass("sensors", "all sensors confirmed against the vocabulary");
        }
    }
}

fn check_sensor(
    ctx: &CheckContext<'_>,
    name: &str,
    sensor: &mut serde_yaml::Mapping,
    report: &mut DocumentReport,
) {
    let field = |key: &str| format!("sensors/{name}/{key}");

    let missing: Vec<&str> = MANDATORY_KEYS
        .iter()
        .copied()
        .filter(|key| !has_key(sensor, key))
        .collect();
    if !missing.is_empty() {
        for key in missing {
            report.fail(field(key), "mandatory field is missing");
        }
        return;
    }

    let uri_raw = get_str(sensor, "sensor_model_vocabulary")
        .unwrap_or("")
        .trim()
        .to_string();

    let model_concept = if uri_raw.is_empty() {
        let model = get_str(sensor, "sensor_model").unwrap_or("").trim().to_string();
        if model.is_empty() {
            report.fail(field("sensor_model"), "mandatory field is empty");
            return;
        }
        match ctx.vocab.lookup(&model, &ctx.collections.sensor_models) {
            Err(e) => {
                report.warning(field("sensor_model"), format!("could not verify: {e}"));
                return;
            }
            Ok(None) => {
                report.fail(
                    field("sensor_model"),
                    format!(
                        "'{model}' not found in {}; check the name or log a request to add it",
                        ctx.collections.sensor_models
                    ),
                );
                return;
            }
            Ok(Some(matched)) => {
                report.recommendation(
                    field("sensor_model_vocabulary"),
                    format!(
                        "filled with '{}' resolved from the sensor model name",
                        matched.concept.uri
                    ),
                );
                set_str(sensor, "sensor_model_vocabulary", matched.concept.uri.as_str());
                matched.concept
            }
        }
    } else {
        let uri = match ConceptUri::parse(&uri_raw) {
            Ok(uri) => uri,
            Err(e) => {
                report.fail(
                    field("sensor_model_vocabulary"),
                    format!("not a usable concept URI: {e}"),
                );
                return;
            }
        };
        match ctx.vocab.concept(&uri) {
            Err(e) => {
                report.warning(field("sensor_model_vocabulary"), format!("could not verify: {e}"));
                return;
            }
            Ok(None) => {
                report.fail(
                    field("sensor_model_vocabulary"),
                    format!("URI {uri} not found on the vocabulary server; check the URI or log a request to add it"),
                );
                return;
            }
            Ok(Some(concept)) => concept,
        }
    };

    if !model_concept
        .schemes
        .iter()
        .any(|s| s.contains(OG_SENSORS_SCHEME))
    {
        report.warning(
            field("sensor_model"),
            format!(
                "{} {} is not in the {OG_SENSORS_SCHEME} scheme",
                model_concept.pref_label, model_concept.uri
            ),
        );
    }

    // Expected record derived from the model concept and its linkages.
    let mut expected: Vec<(&str, String, &str)> = vec![
        (
            "sensor_model_vocabulary",
            model_concept.uri.to_string(),
            "normalized to the canonical concept URI",
        ),
        (
            "sensor_model",
            model_concept.pref_label.clone(),
            "from the vocabulary record",
        ),
        (
            "long_name",
            model_concept.pref_label.clone(),
            "from the vocabulary record",
        ),
    ];

    // Sensor type from broader links; prefer one the record already names.
    let type_links = model_concept.broader_in(&ctx.collections.sensor_types);
    let declared_type = get_str(sensor, "sensor_type_vocabulary")
        .and_then(|s| ConceptUri::parse(s).ok());
    let chosen_type = match (&declared_type, type_links.as_slice()) {
        (Some(declared), links) if links.iter().any(|l| *l == declared) => Some(declared),
        (_, links) => links.last().copied(),
    };
    match chosen_type {
        None => {
            report.warning(
                field("sensor_type_vocabulary"),
                format!(
                    "missing linkage in the vocabulary; request a link from {} {} into {}",
                    model_concept.pref_label, model_concept.uri, ctx.collections.sensor_types
                ),
            );
        }
        Some(type_uri) => match ctx.vocab.concept(type_uri) {
            Err(e) => report.warning(field("sensor_type"), format!("could not verify: {e}")),
            Ok(None) => report.warning(
                field("sensor_type"),
                format!(
                    "linked term {type_uri} not found in {}",
                    ctx.collections.sensor_types
                ),
            ),
            Ok(Some(type_concept)) => {
                expected.push((
                    "sensor_type_vocabulary",
                    type_concept.uri.to_string(),
                    "from the sensor model's type linkage",
                ));
                expected.push((
                    "sensor_type",
                    type_concept.pref_label,
                    "from the sensor model's type linkage",
                ));
            }
        },
    }

    // Maker from the first related link into the maker collection.
    match model_concept.related_in(&ctx.collections.sensor_makers) {
        None => {
            report.warning(
                field("sensor_maker_vocabulary"),
                format!(
                    "missing linkage in the vocabulary; request a link from {} {} into {}",
                    model_concept.pref_label, model_concept.uri, ctx.collections.sensor_makers
                ),
            );
        }
        Some(maker_uri) => match ctx.vocab.concept(maker_uri) {
            Err(e) => report.warning(field("sensor_maker"), format!("could not verify: {e}")),
            Ok(None) => report.warning(
                field("sensor_maker"),
                format!(
                    "linked term {maker_uri} not found in {}",
                    ctx.collections.sensor_makers
                ),
            ),
            Ok(Some(maker_concept)) => {
                expected.push((
                    "sensor_maker_vocabulary",
                    maker_concept.uri.to_string(),
                    "inferred from the sensor model record",
                ));
                expected.push((
                    "sensor_maker",
                    maker_concept.pref_label,
                    "inferred from the sensor model record",
                ));
            }
        },
    }

    for (key, value, source) in expected {
        correct(sensor, report, &field(key), key, &value, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Collections;
    use ogv_core::{CollectionId, DocumentId, Severity};
    use ogv_vocab::{Concept, LookupError, MatchPolicy, MemoryVocab, TermMatch, VocabLookup};
    use serde_json::json;

    fn vocab() -> MemoryVocab {
        let sbe37 = Concept::from_graph_node(&json!({
            "@id": "http://vocab.nerc.ac.uk/collection/L22/current/TOOL1457/",
            "skos:prefLabel": "SBE37",
            "skos:broader": {"@id": "http://vocab.nerc.ac.uk/collection/L05/current/130/"},
            "skos:related": {"@id": "http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/"},
            "skos:inScheme": {"@id": "http://vocab.nerc.ac.uk/scheme/OG_SENSORS/current/"}
        }))
        .unwrap();
        let ctd = Concept::from_graph_node(&json!({
            "@id": "http://vocab.nerc.ac.uk/collection/L05/current/130/",
            "skos:prefLabel": "CTD",
        }))
        .unwrap();
        let seabird = Concept::from_graph_node(&json!({
            "@id": "http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/",
            "skos:prefLabel": "Sea-Bird Scientific",
        }))
        .unwrap();
        MemoryVocab::new(MatchPolicy::Normalized)
            .with_collection(CollectionId::new("L22").unwrap(), vec![sbe37])
            .with_collection(CollectionId::new("L05").unwrap(), vec![ctd])
            .with_collection(CollectionId::new("L35").unwrap(), vec![seabird])
    }

    const CORRECT_SENSOR: &str = r#"
sensors:
  sensor_ctd:
    long_name: SBE37
    sensor_maker: Sea-Bird Scientific
    sensor_maker_vocabulary: http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/
    sensor_model: SBE37
    sensor_model_vocabulary: http://vocab.nerc.ac.uk/collection/L22/current/TOOL1457/
    sensor_type: CTD
    sensor_type_vocabulary: http://vocab.nerc.ac.uk/collection/L05/current/130/
"#;

    fn run(yaml: &str, vocab: &dyn VocabLookup) -> (Document, DocumentReport) {
        let collections = Collections::og1().unwrap();
        let ctx = CheckContext { vocab, collections: &collections };
        let mut doc = Document::parse(DocumentId::new("test").unwrap(), yaml).unwrap();
        let mut report = DocumentReport::new(DocumentId::new("test").unwrap());
        SensorCheck.run(&ctx, &mut doc, &mut report);
        (doc, report)
    }

    #[test]
    fn fully_correct_sensor_passes_unchanged() {
        let vocab = vocab();
        let original = Document::parse(DocumentId::new("test").unwrap(), CORRECT_SENSOR).unwrap();
        let (doc, report) = run(CORRECT_SENSOR, &vocab);
        assert!(report.passed(), "outcomes: {:?}", report.outcomes());
        assert_eq!(report.count(Severity::Pass), 1);
        assert_eq!(report.len(), 1);
        assert_eq!(doc, original);
    }

    #[test]
    fn empty_maker_is_inferred_from_model() {
        let vocab = vocab();
        let yaml = CORRECT_SENSOR.replace("sensor_maker: Sea-Bird Scientific", "sensor_maker: ''");
        let (doc, report) = run(&yaml, &vocab);
        assert!(report.passed());
        assert_eq!(report.count(Severity::Recommendation), 1);
        let outcome = &report.outcomes()[0];
        assert_eq!(outcome.field, "sensors/sensor_ctd/sensor_maker");
        assert!(outcome.message.contains("inferred from the sensor model record"));
        assert!(doc.to_yaml_string().unwrap().contains("sensor_maker: Sea-Bird Scientific"));
    }

    #[test]
    fn missing_mandatory_fields_fail() {
        let vocab = vocab();
        let (_, report) = run("sensors:\n  sensor_ctd:\n    sensor_model: SBE37\n", &vocab);
        assert!(!report.passed());
        assert_eq!(report.count(Severity::Fail), MANDATORY_KEYS.len() - 1);
    }

    #[test]
    fn unknown_model_uri_fails() {
        let vocab = vocab();
        let yaml = CORRECT_SENSOR.replace("TOOL1457", "TOOL9999");
        let (_, report) = run(&yaml, &vocab);
        assert!(!report.passed());
    }

    #[test]
    fn empty_uri_is_resolved_from_model_name() {
        let vocab = vocab();
        let yaml = CORRECT_SENSOR.replace(
            "sensor_model_vocabulary: http://vocab.nerc.ac.uk/collection/L22/current/TOOL1457/",
            "sensor_model_vocabulary: ''",
        );
        let (doc, report) = run(&yaml, &vocab);
        assert!(report.passed());
        assert!(doc.to_yaml_string().unwrap().contains("TOOL1457"));
        assert!(report
            .outcomes()
            .iter()
            .any(|o| o.message.contains("resolved from the sensor model name")));
    }

    #[test]
    fn model_outside_og_scheme_warns() {
        let rbr = Concept::from_graph_node(&json!({
            "@id": "http://vocab.nerc.ac.uk/collection/L22/current/TOOL0022/",
            "skos:prefLabel": "RBRconcerto",
            "skos:broader": {"@id": "http://vocab.nerc.ac.uk/collection/L05/current/130/"},
            "skos:related": {"@id": "http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/"},
        }))
        .unwrap();
        let ctd = Concept::from_graph_node(&json!({
            "@id": "http://vocab.nerc.ac.uk/collection/L05/current/130/",
            "skos:prefLabel": "CTD",
        }))
        .unwrap();
        let seabird = Concept::from_graph_node(&json!({
            "@id": "http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/",
            "skos:prefLabel": "Sea-Bird Scientific",
        }))
        .unwrap();
        let vocab = MemoryVocab::new(MatchPolicy::Normalized)
            .with_collection(CollectionId::new("L22").unwrap(), vec![rbr])
            .with_collection(CollectionId::new("L05").unwrap(), vec![ctd])
            .with_collection(CollectionId::new("L35").unwrap(), vec![seabird]);
        let yaml = r#"
sensors:
  sensor_ctd:
    long_name: RBRconcerto
    sensor_maker: Sea-Bird Scientific
    sensor_maker_vocabulary: http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/
    sensor_model: RBRconcerto
    sensor_model_vocabulary: http://vocab.nerc.ac.uk/collection/L22/current/TOOL0022/
    sensor_type: CTD
    sensor_type_vocabulary: http://vocab.nerc.ac.uk/collection/L05/current/130/
"#;
        let (_, report) = run(yaml, &vocab);
        assert!(report.passed());
        assert_eq!(report.count(Severity::Warning), 1);
        assert!(report.outcomes()[0].message.contains("OG_SENSORS"));
    }

    struct FailingVocab;

    impl VocabLookup for FailingVocab {
        fn lookup(
            &self,
            _: &str,
            _: &CollectionId,
        ) -> Result<Option<TermMatch>, LookupError> {
            Err(LookupError::Service {
                endpoint: "http://vocab.test/".to_string(),
                status: 503,
                body: "down".to_string(),
            })
        }

        fn concept(&self, _: &ogv_core::ConceptUri) -> Result<Option<Concept>, LookupError> {
            Err(LookupError::Service {
                endpoint: "http://vocab.test/".to_string(),
                status: 503,
                body: "down".to_string(),
            })
        }
    }

    #[test]
    fn lookup_error_downgrades_to_warning() {
        let (_, report) = run(CORRECT_SENSOR, &FailingVocab);
        assert!(report.passed(), "a lookup error must not fail the document");
        assert_eq!(report.count(Severity::Warning), 1);
        assert!(report.outcomes()[0].message.contains("could not verify"));
    }
}
