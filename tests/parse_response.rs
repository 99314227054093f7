mod common;

use approx::assert_relative_eq;
use eph::constants::AU;
use eph::table::writer::OutputFormat;
use eph::table::Cell;
use eph::units::BaseUnit;
use eph::{EphError, JplResponse};

use common::read_data;

#[test]
fn test_parse_vectors() {
    let response = JplResponse::new(200, read_data("vectors_csv.txt"));
    let table = response.parse().unwrap();

    let data_lines = response.data().unwrap().lines().count();
    assert_eq!(table.n_rows(), data_lines);
    assert_eq!(table.n_rows(), 3);
    assert_eq!(
        table.colnames(),
        vec!["JDTDB", "Calendar Date (TDB)", "X", "Y", "Z", "VX", "VY", "VZ", "LT", "RG", "RR"]
    );

    assert_eq!(table.meta()["Target body name"], "earth");
    assert_eq!(table.meta()["Center body name"], "solar");
    assert_eq!(table.meta()["Output units"], "KM-S");
    assert_eq!(table.meta()["Reference frame"], "ICRF");

    let km_s = BaseUnit::Kilometer / BaseUnit::Second;
    assert_eq!(table.unit("JDTDB"), Some(BaseUnit::Day.into()));
    assert_eq!(table.unit("X"), Some(BaseUnit::Kilometer.into()));
    assert_eq!(table.unit("RG"), Some(BaseUnit::Kilometer.into()));
    assert_eq!(table.unit("VX"), Some(km_s));
    assert_eq!(table.unit("RR"), Some(km_s));
    assert_eq!(table.unit("LT"), Some(BaseUnit::Second.into()));
    assert_eq!(table.unit("Calendar Date (TDB)"), None);

    assert_eq!(table.values("JDTDB").unwrap(), vec![2458849.5, 2458850.5, 2458851.5]);
    assert_eq!(
        table.row(0).unwrap()[1],
        &Cell::Text("A.D. 2020-Jan-01 00:00:00.0000".into())
    );
}

#[test]
fn test_state_vectors_and_conversion() {
    let mut table = JplResponse::new(200, read_data("vectors_csv.txt"))
        .parse()
        .unwrap();

    let pos = table.position_vectors().unwrap();
    let range = table.values("RG").unwrap();
    for (p, rg) in pos.iter().zip(&range) {
        assert_relative_eq!(p.norm(), *rg, max_relative = 1e-9);
    }
    let vel = table.velocity_vectors().unwrap();
    assert_eq!(vel.len(), 3);

    table.convert_column("X", BaseUnit::AstronomicalUnit.into()).unwrap();
    assert_relative_eq!(
        table.values("X").unwrap()[0],
        -2.521092863852298E+07 / AU,
        max_relative = 1e-12
    );
}

#[test]
fn test_parse_elements() {
    let table = JplResponse::new(200, read_data("elements_csv.txt"))
        .parse()
        .unwrap();
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.n_cols(), 14);
    assert_eq!(table.meta()["Target body name"], "mars");

    assert_eq!(table.unit("A"), Some(BaseUnit::AstronomicalUnit.into()));
    assert_eq!(table.unit("IN"), Some(BaseUnit::Degree.into()));
    assert_eq!(table.unit("N"), Some(BaseUnit::Degree / BaseUnit::Day));
    assert_eq!(table.unit("Tp"), Some(BaseUnit::Day.into()));
    assert_eq!(table.unit("EC"), None);
    assert_eq!(table.unit("PR"), None);
    assert_relative_eq!(table.values("EC").unwrap()[0], 9.251263710930305E-02);
}

#[test]
fn test_parse_observer_csv() {
    let table = JplResponse::new(200, read_data("observer_csv.txt"))
        .parse()
        .unwrap();
    assert_eq!(table.n_rows(), 2);
    assert_eq!(
        table.colnames(),
        vec!["Date__(UT)__HR:MN", "", "", "R.A._(ICRF)", "DEC__(ICRF)"]
    );
    assert_eq!(
        table.row(1).unwrap(),
        vec![
            &Cell::Text("2020-Jan-02 00:00".into()),
            &Cell::Text("*".into()),
            &Cell::Text("m".into()),
            &Cell::Text("15 53 35.71".into()),
            &Cell::Text("-20 22 11.0".into()),
        ]
    );
    // no output units: dimensionless
    assert!(table.columns().iter().all(|c| c.unit.is_none()));
    assert_eq!(table.meta()["Center body name"], "earth");
}

#[test]
fn test_parse_vectors_whitespace() {
    let table = JplResponse::new(200, read_data("vectors_text.txt"))
        .parse()
        .unwrap();
    assert_eq!(table.n_rows(), 3);
    assert_eq!(
        table.colnames(),
        vec!["JDTDB", "X", "Y", "Z", "VX", "VY", "VZ", "LT", "RG", "RR"]
    );
    assert_eq!(table.values("JDTDB").unwrap(), vec![2458849.5, 2458850.5, 2458851.5]);
    assert_relative_eq!(table.values("X").unwrap()[2], -3.034596564914283E+07);
    assert_eq!(table.unit("VX"), Some(BaseUnit::Kilometer / BaseUnit::Second));

    // same numbers as the comma-separated response
    let csv = JplResponse::new(200, read_data("vectors_csv.txt"))
        .parse()
        .unwrap();
    assert_eq!(table.values("RG").unwrap(), csv.values("RG").unwrap());
}

#[test]
fn test_quoted_csv_format_echo() {
    for echo in ["CSV_FORMAT = 'yes'", "CSV_FORMAT = \"YES\"", "CSV_FORMAT = Y"] {
        let body = read_data("vectors_csv.txt").replace("CSV_FORMAT = YES", echo);
        let table = JplResponse::new(200, body).parse().unwrap();
        assert_eq!(table.n_cols(), 11, "{echo}");
        assert_eq!(table.unit("X"), Some(BaseUnit::Kilometer.into()), "{echo}");
        assert_relative_eq!(table.values("X").unwrap()[0], -2.521092863852298E+07);
    }

    let body = read_data("vectors_csv.txt").replace("CSV_FORMAT = YES", "CSV_FORMAT = maybe");
    let err = JplResponse::new(200, body).parse().unwrap_err();
    assert!(matches!(err, EphError::ParseError(_)), "{err:?}");
}

#[test]
fn test_whitespace_observer_is_a_parse_error() {
    let err = JplResponse::new(200, read_data("observer_text.txt"))
        .parse()
        .unwrap_err();
    assert!(matches!(err, EphError::ParseError(_)), "{err:?}");
}

#[test]
fn test_rejected_request() {
    let response = JplResponse::new(200, read_data("rejected.txt"));
    assert_eq!(response.data(), None);
    match response.parse() {
        Err(EphError::BadRequest {
            message,
            echoed_params,
        }) => {
            assert_eq!(
                message,
                "No site matches. Use \"*@body\" to list, \"c@body\" to enter coords, ?! for help."
            );
            assert_eq!(echoed_params["CENTER"], "@nowhere");
            assert_eq!(echoed_params.len(), 7);
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[test]
fn test_write_table() {
    let table = JplResponse::new(200, read_data("elements_csv.txt"))
        .parse()
        .unwrap()
        .head(1);
    let csv = table.to_text(OutputFormat::Csv).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "JDTDB,Calendar Date (TDB),EC,QR,IN,OM,W,Tp,N,MA,TA,A,AD,PR"
    );
    assert!(lines
        .next()
        .unwrap()
        .starts_with("2458849.5,A.D. 2020-Jan-01 00:00:00.0000,0.09251263710930305,"));
    assert_eq!(lines.next(), None);
}
