//! End-to-end REPL sessions with scripted input and a wiremock API.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use transport_cli::api::{ArtifactStore, ClientConfig, TransportClient};
use transport_cli::repl::{Dispatcher, INTRO, PROMPT, Repl, ScriptedInput};

fn fixed_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(8, 5, 0)
        .unwrap()
}

fn dispatcher_for(server: &MockServer, dir: &TempDir) -> Dispatcher {
    let config = ClientConfig::new("test-key")
        .with_base_url(server.uri())
        .with_timeout(5)
        .with_artifacts(ArtifactStore::new(dir.path()));
    Dispatcher::new(TransportClient::new(config).unwrap()).with_clock(fixed_clock)
}

async fn run_session(dispatcher: Dispatcher, lines: &[&str]) -> (ScriptedInput, String) {
    let mut repl = Repl::new(
        dispatcher,
        ScriptedInput::new(lines.iter().copied()),
        Vec::new(),
    );
    repl.run().await.unwrap();
    let (input, out) = repl.into_parts();
    (input, String::from_utf8(out).unwrap())
}

fn artifact_count(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).map_or(0, |entries| entries.count())
}

fn alerts_json() -> Value {
    json!({
        "infos": {
            "current": [
                {
                    "subtitle": "Buses replace trains between Central and Hornsby",
                    "properties": {"speechText": "Trackwork this weekend."},
                    "affected": {
                        "lines": [
                            {"operator": {"name": "Sydney Trains"}},
                            {"operator": {"name": "Sydney Trains"}}
                        ],
                        "stops": [{"id": "1"}, {"id": "2"}, {"id": "3"}]
                    }
                },
                {
                    "subtitle": "Route 333 diverted",
                    "properties": {"speechText": "Route 333 is diverted via Oxford Street."},
                    "affected": {
                        "lines": [{"operator": {"name": "Transit Systems NSW"}}],
                        "stops": [{"id": "9"}]
                    }
                },
                {
                    "subtitle": "Route 333 diverted",
                    "properties": {"speechText": "Duplicate notice."},
                    "affected": {"lines": [{"operator": {"name": "Busways R1"}}]}
                }
            ]
        }
    })
}

#[tokio::test]
async fn intro_help_and_quit() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (input, out) = run_session(
        dispatcher_for(&server, &dir),
        &["help", "test", "quit", "test"],
    )
    .await;

    assert!(out.starts_with(INTRO));
    assert!(out.contains("stopfinder"));
    assert_eq!(out.matches("Hello, World!").count(), 1);
    // nothing read after quit
    assert_eq!(input.prompts(), [PROMPT, PROMPT, PROMPT]);
    assert_eq!(artifact_count(&dir), 0);
}

#[tokio::test]
async fn unknown_command_keeps_session_alive() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (_, out) = run_session(
        dispatcher_for(&server, &dir),
        &["stopfind", "Test", "", "test", "exit"],
    )
    .await;

    assert!(out.contains("unknown command: stopfind"));
    assert!(out.contains("unknown command: Test"));
    assert!(out.contains("Hello, World!"));
}

#[tokio::test]
async fn end_of_input_ends_session() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (input, out) = run_session(dispatcher_for(&server, &dir), &["test"]).await;

    assert!(out.contains("Hello, World!"));
    assert_eq!(input.prompts().len(), 2);
}

#[tokio::test]
async fn stopfinder_prints_payload() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/stop_finder"))
        .and(query_param("outputFormat", "rapidJSON"))
        .and(query_param("type_sf", "any"))
        .and(query_param("name_sf", "Circular Quay"))
        .and(query_param("coordOutputFormat", "EPSG:4326"))
        .and(query_param("anyMaxSizeHitList", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"locations": [{"name": "Circular Quay, Sydney"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (_, out) = run_session(dispatcher_for(&server, &dir), &["stopfinder", "quit"]).await;

    assert!(out.contains("\"Circular Quay, Sydney\""));
    assert_eq!(artifact_count(&dir), 1);
}

#[tokio::test]
async fn alert_filters_by_mode() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/add_info"))
        .and(query_param("filterDateValid", "19-10-2026"))
        .and(query_param("filterPublicationStatus", "current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alerts_json()))
        .mount(&server)
        .await;

    let (_, out) = run_session(
        dispatcher_for(&server, &dir),
        &["alert bus", "alert", "alert tram", "quit"],
    )
    .await;

    let expected_bus = "Route 333 diverted\n\
                        Route 333 is diverted via Oxford Street.\n\
                        Affected Lines: 1\n\
                        Affected Stops: 1\n";
    assert!(out.contains(expected_bus));
    assert_eq!(out.matches("Route 333 diverted\n").count(), 1);
    assert!(!out.contains("Duplicate notice."));

    let expected_train = "Buses replace trains between Central and Hornsby\n\
                          Trackwork this weekend.\n\
                          Affected Lines: 2\n\
                          Affected Stops: 3\n";
    assert!(out.contains(expected_train));

    // tram has no allow-list
    assert!(out.contains("No current alerts."));
    assert_eq!(artifact_count(&dir), 3);
}

#[tokio::test]
async fn alert_without_heading_prints_placeholder() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let feed = json!({
        "infos": {
            "current": [{
                "properties": {"speechText": "Lifts out of service at Redfern."},
                "affected": {"lines": [{"operator": {"name": "Sydney Trains"}}]}
            }]
        }
    });
    Mock::given(method("GET"))
        .and(path("/add_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed))
        .mount(&server)
        .await;

    let (_, out) = run_session(dispatcher_for(&server, &dir), &["alert train", "quit"]).await;

    let expected = "(no heading)\n\
                    Lifts out of service at Redfern.\n\
                    Affected Lines: 1\n\
                    Affected Stops: 0\n";
    assert!(out.contains(expected));
}

#[tokio::test]
async fn alert_missing_infos_aborts_command_only() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/add_info"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"ErrorDetails": {"Message": "Invalid key"}})),
        )
        .mount(&server)
        .await;

    let (_, out) = run_session(
        dispatcher_for(&server, &dir),
        &["alert train", "test", "quit"],
    )
    .await;

    assert!(out.contains("Error: missing field in response: infos"));
    assert!(out.contains("Hello, World!"));
    assert_eq!(artifact_count(&dir), 1);
}

#[tokio::test]
async fn trip_counts_journeys() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/trip"))
        .and(query_param("depArrMacro", "dep"))
        .and(query_param("itdDate", "20261019"))
        .and(query_param("itdTime", "0805"))
        .and(query_param("type_origin", "stop"))
        .and(query_param("name_origin", "Central Station"))
        .and(query_param("type_destination", "stop"))
        .and(query_param("name_destination", "Town Hall Station"))
        .and(query_param("TfNSWTR", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"journeys": [{"legs": []}, {"legs": []}, {"legs": []}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (input, out) = run_session(
        dispatcher_for(&server, &dir),
        &["trip", "Central Station", "Town Hall Station", "quit"],
    )
    .await;

    assert!(out.contains("Central Station => Town Hall Station\n3 journey option(s)\n"));
    assert_eq!(
        input.prompts(),
        [PROMPT, "Enter origin: ", "Enter destination: ", PROMPT]
    );
}

#[tokio::test]
async fn trip_without_journeys_is_missing_field() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/trip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"systemMessages": []})))
        .mount(&server)
        .await;

    let (_, out) = run_session(
        dispatcher_for(&server, &dir),
        &["trip", "Central Station", "Nowhere", "quit"],
    )
    .await;

    assert!(out.contains("Central Station => Nowhere"));
    assert!(out.contains("Error: missing field in response: journeys"));
}

#[tokio::test]
async fn trip_cancelled_when_input_ends() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let (_, out) = run_session(dispatcher_for(&server, &dir), &["trip", "Central Station"]).await;

    assert!(out.contains("Error: trip cancelled"));
    assert_eq!(artifact_count(&dir), 0);
}

#[tokio::test]
async fn network_failure_aborts_command_only() {
    let dir = tempdir().unwrap();
    let config = ClientConfig::new("test-key")
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(2)
        .with_artifacts(ArtifactStore::new(dir.path()));
    let dispatcher =
        Dispatcher::new(TransportClient::new(config).unwrap()).with_clock(fixed_clock);

    let (_, out) = run_session(dispatcher, &["stopfinder", "test", "quit"]).await;

    assert!(out.contains("Error: network error"));
    assert!(out.contains("Hello, World!"));
}
