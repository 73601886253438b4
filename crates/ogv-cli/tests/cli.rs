//! CLI surface tests: argument parsing, fatal-error behavior, and an
//! end-to-end run against a mock vocabulary server.

use assert_cmd::Command;
use predicates::str::contains;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cmd() -> Command {
    Command::cargo_bin("ogv").unwrap()
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("validate"))
        .stdout(contains("lookup"));
}

#[test]
fn missing_input_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args([
            "validate",
            "--input",
            "/no/such/input",
            "--output",
            dir.path().join("validated").to_str().unwrap(),
            "--log",
            dir.path().join("vocab.log").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("cannot read input directory"));
}

#[test]
fn bad_match_policy_is_rejected() {
    cmd()
        .args(["lookup", "SBE37", "--collection", "L22", "--match-policy", "fuzzy"])
        .assert()
        .failure()
        .stderr(contains("not a match policy"));
}

const GOOD_DOCUMENT: &str = r#"
platform:
  platform_model: SeaExplorer
  platform_model_vocabulary: http://vocab.nerc.ac.uk/collection/B76/current/B7600002/
sensors:
  sensor_ctd:
    long_name: SBE37
    sensor_maker: ''
    sensor_maker_vocabulary: http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/
    sensor_model: SBE37
    sensor_model_vocabulary: http://vocab.nerc.ac.uk/collection/L22/current/TOOL1457/
    sensor_type: CTD
    sensor_type_vocabulary: http://vocab.nerc.ac.uk/collection/L05/current/130/
variables:
  TEMP:
    standard_name: sea_water_temperature
    vocabulary: http://vocab.nerc.ac.uk/collection/P02/current/TEMP/
    units: degC
    long_name: Temperature of the water column
    coordinates: TIME, LONGITUDE, LATITUDE, DEPTH
    _FillValue: NaNf
    sensor: sensor_ctd
deployment:
  start_datetime: "2023-01-01T00:00:00Z"
  end_datetime: "2023-02-01T12:00:00Z"
  glider_serial: SEA045
contacts:
  - name: C. Darwin
    role: Principal Investigator
    email: darwin@beagle.org
"#;

/// Structurally broken: no sensors or variables sections.
const BAD_DOCUMENT: &str = "platform:\n  platform_model: SeaExplorer\n";

fn graph(concepts: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "@graph": concepts })
}

async fn mount_collections(server: &MockServer) {
    let collections = [
        (
            "B76",
            graph(serde_json::json!([{
                "@id": "http://vocab.nerc.ac.uk/collection/B76/current/B7600002/",
                "skos:prefLabel": "SeaExplorer",
            }])),
        ),
        (
            "L22",
            graph(serde_json::json!([{
                "@id": "http://vocab.nerc.ac.uk/collection/L22/current/TOOL1457/",
                "skos:prefLabel": "SBE37",
                "skos:broader": {"@id": "http://vocab.nerc.ac.uk/collection/L05/current/130/"},
                "skos:related": {"@id": "http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/"},
                "skos:inScheme": {"@id": "http://vocab.nerc.ac.uk/scheme/OG_SENSORS/current/"}
            }])),
        ),
        (
            "L05",
            graph(serde_json::json!([{
                "@id": "http://vocab.nerc.ac.uk/collection/L05/current/130/",
                "skos:prefLabel": "CTD",
            }])),
        ),
        (
            "L35",
            graph(serde_json::json!([{
                "@id": "http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/",
                "skos:prefLabel": "Sea-Bird Scientific",
            }])),
        ),
        (
            "P02",
            graph(serde_json::json!([{
                "@id": "http://vocab.nerc.ac.uk/collection/P02/current/TEMP/",
                "skos:prefLabel": "Temperature of the water column",
                "skos:related": {"@id": "http://vocab.nerc.ac.uk/collection/P06/current/UPAA/"}
            }])),
        ),
        (
            "P07",
            graph(serde_json::json!([{
                "@id": "http://vocab.nerc.ac.uk/collection/P07/current/CFSN0335/",
                "skos:prefLabel": "sea_water_temperature",
            }])),
        ),
        (
            "P06",
            graph(serde_json::json!([{
                "@id": "http://vocab.nerc.ac.uk/collection/P06/current/UPAA/",
                "skos:prefLabel": "Degrees Celsius",
                "skos:altLabel": "degC"
            }])),
        ),
        (
            "W08",
            graph(serde_json::json!([{
                "@id": "http://vocab.nerc.ac.uk/collection/W08/current/ROLE001/",
                "skos:prefLabel": "Principal Investigator",
            }])),
        ),
    ];
    for (id, payload) in collections {
        Mock::given(method("GET"))
            .and(path(format!("/collection/{id}/current/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(server)
            .await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn end_to_end_run_writes_passing_documents_and_log() {
    let server = MockServer::start().await;
    mount_collections(&server).await;
    let base_url = server.uri();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("draft");
    let output = dir.path().join("validated");
    let log = dir.path().join("vocab.log");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::write(input.join("sea045_good.yaml"), GOOD_DOCUMENT).unwrap();
    std::fs::write(input.join("sea046_bad.yaml"), BAD_DOCUMENT).unwrap();

    let input_arg = input.to_str().unwrap().to_string();
    let output_arg = output.to_str().unwrap().to_string();
    let log_arg = log.to_str().unwrap().to_string();
    tokio::task::spawn_blocking(move || {
        cmd()
            .args([
                "validate",
                "--input",
                &input_arg,
                "--output",
                &output_arg,
                "--log",
                &log_arg,
                "--base-url",
                &base_url,
            ])
            .assert()
            .success()
            .stdout(contains("read 2 documents, wrote 1"));
    })
    .await
    .expect("task");

    // The passing document is written, with the maker inferred from the
    // sensor model's vocabulary record; the structural failure is not.
    let written = std::fs::read_to_string(output.join("sea045_good.yaml")).unwrap();
    assert!(written.contains("sensor_maker: Sea-Bird Scientific"));
    assert!(!output.join("sea046_bad.yaml").exists());

    let log_text = std::fs::read_to_string(&log).unwrap();
    assert!(log_text.contains("check sea045_good"));
    assert!(log_text.contains("RECOMMENDATION"));
    assert!(log_text.contains("check sea046_bad"));
    assert!(log_text.contains("FAIL"));
    assert!(log_text.contains("COMPLETE check all documents"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lookup_prints_the_matched_concept() {
    let server = MockServer::start().await;
    mount_collections(&server).await;
    let base_url = server.uri();

    tokio::task::spawn_blocking(move || {
        cmd()
            .args(["lookup", "sbe37", "--collection", "L22", "--base-url", &base_url])
            .assert()
            .success()
            .stdout(contains("matched as 'SBE37'"))
            .stdout(contains("/collection/L22/current/TOOL1457/"));
    })
    .await
    .expect("task");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lookup_reports_absent_terms() {
    let server = MockServer::start().await;
    mount_collections(&server).await;
    let base_url = server.uri();

    tokio::task::spawn_blocking(move || {
        cmd()
            .args(["lookup", "Flying Carpet", "--collection", "L22", "--base-url", &base_url])
            .assert()
            .success()
            .stdout(contains("not found in L22"));
    })
    .await
    .expect("task");
}
