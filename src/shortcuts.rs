//! # Shortcuts
//!
//! One-call access to common Horizons tables. Each function builds one request per target
//! object from a base [`JplRequest`], parses every response and, for several objects, joins the
//! tables on their epoch columns:
//!
//! | function  | forced parameters                                   |
//! |-----------|-----------------------------------------------------|
//! | [`get`]   | `OBJ_DATA=NO`, `CSV_FORMAT=YES`, time span          |
//! | [`vec`]   | `TABLE_TYPE=V`, `VEC_LABELS=NO`, `CENTER=@0` if unset |
//! | [`pos`]   | as [`vec`], `VEC_TABLE=1`                           |
//! | [`vel`]   | as [`vec`], `VEC_TABLE=5`                           |
//! | [`elem`]  | `CENTER=@0`, `TABLE_TYPE=E`                         |
//! | [`obs`]   | `CENTER=coord`, `COORD_TYPE=GEODETIC`, `TABLE_TYPE=O` |
//! | [`radec`] | as [`obs`], `QUANTITIES=1`                          |
//! | [`altaz`] | as [`obs`], `QUANTITIES=4`, `SITE_COORD=0,0,0` if unset |
//!
//! With several objects, every non-epoch column is prefixed with `<object>_`.
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8Path;
use hifitime::{Duration, Epoch};
use regex::Regex;
use tracing::debug;

use crate::env_state::HttpTransport;
use crate::eph_errors::EphError;
use crate::horizons::param_value::{format_time, ParamValue};
use crate::jpl_request::JplRequest;
use crate::table::EphemTable;

/// Epoch columns of vector and element tables, used to join several objects.
pub const JOIN_KEYS: [&str; 2] = ["JDTDB", "Calendar Date (TDB)"];

/// Epoch column of observer tables, the join fallback.
pub const OBSERVER_KEY: &str = "Date__(UT)__HR:MN";

static CALENDAR_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?: (\d{1,2}):(\d{2}))?$")
        .expect("calendar date regex is valid")
});

/// Time span of a shortcut request.
#[derive(Debug, Clone, PartialEq)]
pub enum Dates {
    /// One day from this start; only the first row is kept.
    Single(ParamValue),
    /// Explicit start and stop.
    Span(ParamValue, ParamValue),
}

impl Dates {
    /// A single date at the current time.
    pub fn now() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |elapsed| elapsed.as_secs_f64());
        Dates::Single(Epoch::from_unix_seconds(seconds).into())
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Dates::Single(_))
    }

    /// `START_TIME` and `STOP_TIME` of the request.
    ///
    /// A single `YYYY-MM-DD[ HH:MM]` start stops on the following calendar day.
    ///
    /// Return
    /// ------
    /// * [`EphError::UninterpretableValue`] when a single start is not a calendar date.
    pub fn bounds(&self) -> Result<(String, String), EphError> {
        match self {
            Dates::Span(start, stop) => Ok((format_time(start), format_time(stop))),
            Dates::Single(start) => {
                let start = format_time(start);
                let stop = next_day(&start).ok_or_else(|| EphError::UninterpretableValue {
                    param: "START_TIME".into(),
                    value: start.clone(),
                })?;
                Ok((start, stop))
            }
        }
    }
}

impl From<&str> for Dates {
    fn from(date: &str) -> Self {
        Dates::Single(date.into())
    }
}

impl From<(&str, &str)> for Dates {
    fn from((start, stop): (&str, &str)) -> Self {
        Dates::Span(start.into(), stop.into())
    }
}

impl From<Epoch> for Dates {
    fn from(epoch: Epoch) -> Self {
        Dates::Single(epoch.into())
    }
}

fn next_day(start: &str) -> Option<String> {
    let caps = CALENDAR_START.captures(start)?;
    let field = |i: usize| caps.get(i).map_or(Some(0), |m| m.as_str().parse::<u8>().ok());
    let year = caps[1].parse::<i32>().ok()?;
    let epoch = Epoch::maybe_from_gregorian_utc(year, field(2)?, field(3)?, field(4)?, field(5)?, 0, 0)
        .ok()?;
    let (y, m, d, _, _, _, _) = (epoch + Duration::from_days(1.0)).to_gregorian_utc();
    Some(format!("{y:04}-{m:02}-{d:02}"))
}

fn is_epoch_column(name: &str) -> bool {
    JOIN_KEYS.contains(&name) || name == OBSERVER_KEY
}

fn join_objects(acc: EphemTable, table: &EphemTable, obj: &str) -> Result<EphemTable, EphError> {
    let mut joined = match acc.join(table, &JOIN_KEYS) {
        Err(EphError::MissingColumn(_)) => acc.join(table, &[OBSERVER_KEY])?,
        other => other?,
    };
    // header facts differing between objects stay available per object
    for (label, value) in table.meta() {
        if joined.meta().get(label) != Some(value) {
            joined.meta_mut().insert(format!("{obj}_{label}"), value.clone());
        }
    }
    Ok(joined)
}

/// Ephemerides of `objs` over `dates`, with the parameters of `base`.
///
/// Arguments
/// ---------
/// * `transport`: where requests are sent
/// * `objs`: target objects, names or codes
/// * `dates`: time span
/// * `base`: other request parameters; the target and time span are overwritten
///
/// Return
/// ------
/// * one table for all objects, or the first error met. No object is a
///   [`EphError::BadRequest`].
pub fn get<T: HttpTransport + ?Sized>(
    transport: &T,
    objs: &[&str],
    dates: &Dates,
    base: &JplRequest,
) -> Result<EphemTable, EphError> {
    if objs.is_empty() {
        return Err(EphError::bad_request("no target object given"));
    }
    let (start, stop) = dates.bounds()?;
    let mut req = base.clone();
    req.set([("START_TIME", start), ("STOP_TIME", stop)])?
        .set([("OBJ_DATA", false), ("CSV_FORMAT", true)])?;

    let mut data: Option<EphemTable> = None;
    for obj in objs {
        req.insert("COMMAND", *obj)?;
        let mut table = req.execute(transport)?.parse()?;
        debug!(obj, rows = table.n_rows(), "ephemeris received");

        if objs.len() > 1 {
            let names: Vec<String> = table
                .colnames()
                .into_iter()
                .filter(|name| !is_epoch_column(name))
                .map(str::to_string)
                .collect();
            for name in names {
                table.rename_column(&name, format!("{obj}_{name}"))?;
            }
        }

        data = Some(match data {
            None => table,
            Some(acc) => join_objects(acc, &table, obj)?,
        });
    }

    let data = data.unwrap_or_default();
    Ok(if dates.is_single() { data.head(1) } else { data })
}

fn preset(
    base: &JplRequest,
    forced: &[(&str, &str)],
    defaults: &[(&str, &str)],
) -> Result<JplRequest, EphError> {
    let mut req = base.clone();
    for (key, value) in defaults {
        if req.get(key)?.is_none() {
            req.insert(key, *value)?;
        }
    }
    req.set(forced.iter().copied())?;
    Ok(req)
}

/// State vectors, centered on the solar system barycenter unless `base` sets a center.
pub fn vec<T: HttpTransport + ?Sized>(
    transport: &T,
    objs: &[&str],
    dates: &Dates,
    base: &JplRequest,
) -> Result<EphemTable, EphError> {
    let req = preset(
        base,
        &[("TABLE_TYPE", "V"), ("VEC_LABELS", "NO")],
        &[("CENTER", "@0")],
    )?;
    get(transport, objs, dates, &req)
}

/// Position-only state vectors.
pub fn pos<T: HttpTransport + ?Sized>(
    transport: &T,
    objs: &[&str],
    dates: &Dates,
    base: &JplRequest,
) -> Result<EphemTable, EphError> {
    vec(transport, objs, dates, &preset(base, &[("VEC_TABLE", "1")], &[])?)
}

/// Velocity-only state vectors.
pub fn vel<T: HttpTransport + ?Sized>(
    transport: &T,
    objs: &[&str],
    dates: &Dates,
    base: &JplRequest,
) -> Result<EphemTable, EphError> {
    vec(transport, objs, dates, &preset(base, &[("VEC_TABLE", "5")], &[])?)
}

/// Osculating orbital elements around the solar system barycenter.
pub fn elem<T: HttpTransport + ?Sized>(
    transport: &T,
    objs: &[&str],
    dates: &Dates,
    base: &JplRequest,
) -> Result<EphemTable, EphError> {
    let req = preset(base, &[("CENTER", "@0"), ("TABLE_TYPE", "E")], &[])?;
    get(transport, objs, dates, &req)
}

/// Observer table from a geodetic site.
pub fn obs<T: HttpTransport + ?Sized>(
    transport: &T,
    objs: &[&str],
    dates: &Dates,
    base: &JplRequest,
) -> Result<EphemTable, EphError> {
    let req = preset(
        base,
        &[
            ("CENTER", "coord"),
            ("COORD_TYPE", "GEODETIC"),
            ("TABLE_TYPE", "O"),
        ],
        &[],
    )?;
    get(transport, objs, dates, &req)
}

/// Astrometric right ascension and declination.
pub fn radec<T: HttpTransport + ?Sized>(
    transport: &T,
    objs: &[&str],
    dates: &Dates,
    base: &JplRequest,
) -> Result<EphemTable, EphError> {
    obs(transport, objs, dates, &preset(base, &[("QUANTITIES", "1")], &[])?)
}

/// Azimuth and elevation seen from `SITE_COORD` (`0,0,0` unless `base` sets it).
pub fn altaz<T: HttpTransport + ?Sized>(
    transport: &T,
    objs: &[&str],
    dates: &Dates,
    base: &JplRequest,
) -> Result<EphemTable, EphError> {
    let req = preset(base, &[("QUANTITIES", "4")], &[("SITE_COORD", "0,0,0")])?;
    obs(transport, objs, dates, &req)
}

/// Send the request stored in a configuration section and return the service text as is.
pub fn raw_from_config<T: HttpTransport + ?Sized>(
    transport: &T,
    path: Option<&Utf8Path>,
    section: &str,
) -> Result<String, EphError> {
    let mut req = JplRequest::new();
    req.read_config(path, section)?;
    Ok(req.execute(transport)?.body)
}

#[cfg(test)]
mod shortcuts_test {
    use std::cell::RefCell;

    use super::*;
    use crate::constants::JPL_ENDPOINT;
    use crate::jpl_response::JplResponse;

    /// Answers every request with a two-row vector table for the requested target.
    struct FakeHorizons {
        urls: RefCell<Vec<String>>,
    }

    impl FakeHorizons {
        fn new() -> Self {
            FakeHorizons {
                urls: RefCell::new(Vec::new()),
            }
        }
    }

    impl HttpTransport for FakeHorizons {
        fn endpoint(&self) -> &str {
            JPL_ENDPOINT
        }

        fn get(&self, url: &str) -> Result<JplResponse, EphError> {
            self.urls.borrow_mut().push(url.to_string());
            let x = if url.contains("COMMAND=399") { 1.0 } else { 2.0 };
            let body = format!(
                "Target body name: T\nOutput units    : KM-S\n*******\nJDTDB, Calendar Date (TDB), X,\n*******\n\
                 $$SOE\n2458849.5, A.D. 2020-Jan-01 00:00:00.0000, {x},\n2458850.5, A.D. 2020-Jan-02 00:00:00.0000, {},\n$$EOE\n\
                 !$$SOF\nCSV_FORMAT = YES\n",
                x * 10.0
            );
            Ok(JplResponse::new(200, body))
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            Dates::from("2020-01-01").bounds().unwrap(),
            ("2020-01-01".into(), "2020-01-02".into())
        );
        assert_eq!(
            Dates::from("2020-02-28 12:30").bounds().unwrap(),
            ("2020-02-28 12:30".into(), "2020-02-29".into())
        );
        assert_eq!(
            Dates::from("2020-12-31").bounds().unwrap().1,
            "2021-01-01"
        );
        assert_eq!(
            Dates::from(("2020-01-01", "2020-03-01")).bounds().unwrap(),
            ("2020-01-01".into(), "2020-03-01".into())
        );
        assert!(matches!(
            Dates::from("JD2451545.0").bounds(),
            Err(EphError::UninterpretableValue { .. })
        ));
        assert!(Dates::now().bounds().is_ok());
    }

    #[test]
    fn test_get_single_object() {
        let fake = FakeHorizons::new();
        let table = get(&fake, &["earth"], &Dates::from("2020-01-01"), &JplRequest::new()).unwrap();
        assert_eq!(table.n_rows(), 1);
        assert_eq!(table.colnames(), vec!["JDTDB", "Calendar Date (TDB)", "X"]);

        let url = &fake.urls.borrow()[0];
        assert!(url.contains("COMMAND=399"));
        assert!(url.contains("OBJ_DATA=NO"));
        assert!(url.contains("CSV_FORMAT=YES"));
        assert!(url.contains("STOP_TIME=2020-01-02"));
    }

    #[test]
    fn test_get_several_objects() {
        let fake = FakeHorizons::new();
        let dates = Dates::from(("2020-01-01", "2020-01-02"));
        let table = vec(&fake, &["earth", "mars"], &dates, &JplRequest::new()).unwrap();
        assert_eq!(
            table.colnames(),
            vec!["JDTDB", "Calendar Date (TDB)", "earth_X", "mars_X"]
        );
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.values("earth_X").unwrap(), vec![1.0, 10.0]);
        assert_eq!(table.values("mars_X").unwrap(), vec![2.0, 20.0]);

        let urls = fake.urls.borrow();
        assert_eq!(urls.len(), 2);
        assert!(urls[1].contains("COMMAND=499"));
        assert!(urls[1].contains("TABLE_TYPE=V"));
        assert!(urls[1].contains("CENTER=%400"));
    }

    #[test]
    fn test_presets() {
        let fake = FakeHorizons::new();
        let mut base = JplRequest::new();
        base.insert("CENTER", "sun").unwrap();
        let dates = Dates::from("2020-01-01");

        pos(&fake, &["earth"], &dates, &base).unwrap();
        altaz(&fake, &["earth"], &dates, &base).unwrap();
        elem(&fake, &["earth"], &dates, &base).unwrap();

        let urls = fake.urls.borrow();
        assert!(urls[0].contains("VEC_TABLE=1"));
        assert!(urls[0].contains("CENTER=%4010"));
        assert!(urls[1].contains("CENTER=coord"));
        assert!(urls[1].contains("QUANTITIES=4"));
        assert!(urls[1].contains("SITE_COORD=0%2C0%2C0"));
        assert!(urls[2].contains("CENTER=%400"));
        assert!(urls[2].contains("TABLE_TYPE=E"));
    }

    #[test]
    fn test_no_object() {
        let fake = FakeHorizons::new();
        assert!(matches!(
            get(&fake, &[], &Dates::from("2020-01-01"), &JplRequest::new()),
            Err(EphError::BadRequest { .. })
        ));
        assert!(fake.urls.borrow().is_empty());
    }
}
