mod common;

use std::io::Write;

use camino::Utf8Path;
use eph::shortcuts::raw_from_config;
use eph::{EphError, JplRequest};

use common::{read_data, CannedTransport};

#[test]
fn test_request_to_table() {
    let transport = CannedTransport::new().with("399", "vectors_csv.txt");

    let mut req = JplRequest::new();
    req.set([
        ("COMMAND", "'earth'"),
        ("START_TIME", "2020-01-01"),
        ("STOP_TIME", "2020-01-02"),
    ])
    .unwrap()
    .set([("CSV_FORMAT", true)])
    .unwrap();

    let response = req.execute(&transport).unwrap();
    let urls = transport.requested();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].starts_with("https://ssd.jpl.nasa.gov/horizons_batch.cgi?batch=1&"));
    assert!(urls[0].contains("COMMAND=399"));
    assert!(urls[0].contains("START_TIME=2020-01-01"));
    assert!(urls[0].contains("CSV_FORMAT=YES"));

    let table = response.parse().unwrap();
    let body = read_data("vectors_csv.txt");
    let data_lines = body
        .lines()
        .skip_while(|l| !l.starts_with("$$SOE"))
        .skip(1)
        .take_while(|l| !l.starts_with("$$EOE"))
        .count();
    let header_names = response
        .header()
        .unwrap()
        .lines()
        .last()
        .unwrap()
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .count();
    assert_eq!(table.n_rows(), data_lines);
    assert_eq!(table.n_cols(), header_names);
}

#[test]
fn test_incomplete_request_is_not_sent() {
    let transport = CannedTransport::new().with("399", "vectors_csv.txt");
    let mut req = JplRequest::new();
    req.set([("target", "earth"), ("start", "2020-01-01")]).unwrap();

    match req.execute(&transport) {
        Err(EphError::BadRequest { message, .. }) => assert!(message.contains("STOP_TIME")),
        other => panic!("expected a bad request, got {other:?}"),
    }
    assert!(transport.requested().is_empty());
}

#[test]
fn test_unknown_parameter() {
    let mut req = JplRequest::new();
    assert_eq!(
        req.set([("color", "blue")]).map(|_| ()),
        Err(EphError::UnknownParameter("COLOR".into()))
    );
    assert!(req.is_empty());
}

#[test]
fn test_raw_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[default]
CSV_FORMAT = true
OBJ_DATA = false

[mars]
target = "mars"
start = "2020-01-01"
stop = "2020-01-02"
table-type = "E"
"#,
    )
    .unwrap();
    let path = Utf8Path::from_path(file.path()).unwrap();
    let transport = CannedTransport::new().with("499", "elements_csv.txt");

    let body = raw_from_config(&transport, Some(path), "mars").unwrap();
    assert_eq!(body, read_data("elements_csv.txt"));

    let url = &transport.requested()[0];
    for expected in ["COMMAND=499", "TABLE_TYPE=E", "CSV_FORMAT=YES", "OBJ_DATA=NO"] {
        assert!(url.contains(expected), "{expected} missing from {url}");
    }

    assert_eq!(
        raw_from_config(&transport, Some(path), "venus"),
        Err(EphError::ConfigSectionNotFound("venus".into()))
    );
}

#[test]
fn test_rejection_through_transport() {
    let transport = CannedTransport::new().with("399", "rejected.txt");
    let mut req = JplRequest::new();
    req.set([
        ("COMMAND", "399"),
        ("CENTER", "@nowhere"),
        ("START_TIME", "2020-01-01"),
        ("STOP_TIME", "2020-01-02"),
    ])
    .unwrap();

    let err = req.execute(&transport).unwrap().parse().unwrap_err();
    assert!(matches!(err, EphError::BadRequest { .. }));
}

#[test]
#[ignore = "queries the live Horizons service"]
fn test_live_horizons() {
    let env = eph::env_state::EphEnv::new();
    let mut req = JplRequest::new();
    req.set([
        ("COMMAND", "mars"),
        ("START_TIME", "2020-01-01"),
        ("STOP_TIME", "2020-01-03"),
        ("TABLE_TYPE", "V"),
        ("CSV_FORMAT", "YES"),
    ])
    .unwrap();
    let table = req.execute(&env).unwrap().parse().unwrap();
    assert_eq!(table.n_rows(), 3);
}
