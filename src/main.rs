use std::fs::File;
use std::io::{self, Write};
use std::process;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use tracing::{error, info, warn};

use eph::config::DEFAULT_SECTION;
use eph::constants::{DEFAULT_TIMEOUT_SECS, JPL_ENDPOINT};
use eph::env_state::EphEnv;
use eph::eph_errors::EphError;
use eph::jpl_request::JplRequest;
use eph::shortcuts::{self, Dates};
use eph::table::writer::OutputFormat;

/// Retrieve, parse and format JPL Horizons ephemerides.
#[derive(Parser, Debug)]
#[command(name = "eph", version, about)]
struct Args {
    /// Target objects: names (earth, mars, ...) or Horizons codes
    #[arg(required = true, value_name = "OBJECTS")]
    objs: Vec<String>,

    /// Start and optional stop time (YYYY-MM-DD [HH:MM]); a single date gives one row, now by default
    #[arg(long, num_args = 1..=2, value_name = "DATE")]
    dates: Vec<String>,

    /// Coordinate origin: site name, ID, 'coord' (uses SITE_COORD and COORD_TYPE) or 'geo'
    #[arg(short, long)]
    center: Option<String>,

    /// Type of user coordinates in SITE_COORD (GEODETIC or CYLINDRICAL)
    #[arg(long, value_parser = ["GEODETIC", "CYLINDRICAL"])]
    coord_type: Option<String>,

    /// Site coordinates of type COORD_TYPE
    #[arg(long)]
    site_coord: Option<String>,

    /// Output step: integer# {units} {mode}
    #[arg(short, long, value_name = "STEP_SIZE")]
    step: Option<String>,

    /// Date output of observer tables
    #[arg(long, value_parser = ["CAL", "JD", "BOTH"])]
    cal_format: Option<String>,

    /// Reference plane: ECLIPTIC (E), FRAME (F) or BODY EQUATOR (B)
    #[arg(long, value_parser = ["E", "F", "B"])]
    ref_plane: Option<String>,

    /// Reference frame of geometric and astrometric quantities
    #[arg(long, value_parser = ["J2000", "B1950"])]
    ref_system: Option<String>,

    /// Toggle ephemeris generation
    #[arg(long, value_parser = ["YES", "NO"])]
    make_ephem: Option<String>,

    /// Table type: OBSERVER (O), ELEMENTS (E), VECTORS (V), APPROACH (A)
    #[arg(short, long, value_parser = ["O", "V", "E", "A"])]
    table_type: Option<String>,

    /// Observer quantity codes, comma separated (observer tables only)
    #[arg(short, long)]
    quantities: Option<String>,

    /// Vector table format, 1 to 6 (vector tables only)
    #[arg(long, value_parser = ["1", "2", "3", "4", "5", "6"])]
    vec_table: Option<String>,

    /// Output time precision
    #[arg(long, value_parser = ["MINUTES", "SECONDS", "FRACSECONDS"])]
    time_digits: Option<String>,

    /// Local civil time offset relative to UT, {s}HH{:MM}
    #[arg(long)]
    time_zone: Option<String>,

    /// Correction applied to output vectors
    #[arg(long, value_parser = ["NONE", "LT", "LT+S"])]
    vec_corr: Option<String>,

    /// Distance and time units of vector and element tables
    #[arg(short = 'u', long, value_parser = ["KM-S", "AU-D", "KM-D"])]
    out_units: Option<String>,

    /// Units of range quantities in observer tables
    #[arg(long, value_parser = ["AU", "KM"])]
    range_units: Option<String>,

    /// Turn off range-rate output in observer tables
    #[arg(long, value_parser = ["YES", "NO"])]
    suppress_range_rate: Option<String>,

    /// RA/DEC output of observer tables
    #[arg(long, value_parser = ["HMS", "DEG"])]
    ang_format: Option<String>,

    /// Comma-separated output from Horizons
    #[arg(long, value_parser = ["YES", "NO"])]
    csv: Option<String>,

    /// Label each vector component (ignored with CSV output)
    #[arg(short = 'l', long, value_parser = ["YES", "NO"])]
    vec_labels: Option<String>,

    /// Return the object summary
    #[arg(long, value_parser = ["YES", "NO"])]
    obj_data: Option<String>,

    /// Refraction correction of apparent coordinates
    #[arg(long, value_parser = ["AIRLESS", "REFRACTED"])]
    apparent: Option<String>,

    /// Configuration file, ~/.ephrc and ./.ephrc by default
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Configuration section to read
    #[arg(long, default_value = DEFAULT_SECTION)]
    section: String,

    /// Output file, standard output by default
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Table layout: csv or ascii
    #[arg(long, default_value = "ascii")]
    format: OutputFormat,

    /// Write the Horizons text as is instead of a table
    #[arg(long)]
    raw: bool,

    /// Request timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// More logs (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Errors only
    #[arg(long)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Horizons parameters given on the command line.
    fn params(&self) -> Vec<(&'static str, &str)> {
        [
            ("CENTER", &self.center),
            ("COORD_TYPE", &self.coord_type),
            ("SITE_COORD", &self.site_coord),
            ("STEP_SIZE", &self.step),
            ("CAL_FORMAT", &self.cal_format),
            ("REF_PLANE", &self.ref_plane),
            ("REF_SYSTEM", &self.ref_system),
            ("MAKE_EPHEM", &self.make_ephem),
            ("TABLE_TYPE", &self.table_type),
            ("QUANTITIES", &self.quantities),
            ("VEC_TABLE", &self.vec_table),
            ("TIME_DIGITS", &self.time_digits),
            ("TIME_ZONE", &self.time_zone),
            ("VEC_CORR", &self.vec_corr),
            ("OUT_UNITS", &self.out_units),
            ("RANGE_UNITS", &self.range_units),
            ("SUPPRESS_RANGE_RATE", &self.suppress_range_rate),
            ("ANG_FORMAT", &self.ang_format),
            ("CSV_FORMAT", &self.csv),
            ("VEC_LABELS", &self.vec_labels),
            ("OBJ_DATA", &self.obj_data),
            ("APPARENT", &self.apparent),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    fn dates(&self) -> Dates {
        match self.dates.as_slice() {
            [start, stop] => Dates::from((start.as_str(), stop.as_str())),
            [start] => Dates::from(start.as_str()),
            _ => Dates::now(),
        }
    }
}

fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("eph={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

fn base_request(args: &Args) -> Result<JplRequest, EphError> {
    let mut req = JplRequest::new();
    match req.read_config(args.config.as_deref(), &args.section) {
        Ok(_) => info!(section = %args.section, "configuration loaded"),
        Err(EphError::ConfigNotFound(files)) if args.config.is_none() => {
            warn!("Configuration file not found (searched {})", files.join(", "));
        }
        Err(err) => return Err(err),
    }
    req.set(args.params())?;
    Ok(req)
}

fn output(args: &Args) -> Result<Box<dyn Write>, EphError> {
    Ok(match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    })
}

fn run(args: &Args) -> Result<(), EphError> {
    let env = EphEnv::with_settings(JPL_ENDPOINT, Duration::from_secs(args.timeout));
    let dates = args.dates();
    let req = base_request(args)?;
    let objs: Vec<&str> = args.objs.iter().map(String::as_str).collect();

    if args.raw {
        let (start, stop) = dates.bounds()?;
        let mut req = req;
        req.set([("START_TIME", start), ("STOP_TIME", stop)])?;
        let mut out = output(args)?;
        for obj in objs {
            req.insert("COMMAND", obj)?;
            out.write_all(req.execute(&env)?.raw().as_bytes())?;
        }
        out.flush()?;
        return Ok(());
    }

    let table = shortcuts::get(&env, &objs, &dates, &req)?;
    info!(rows = table.n_rows(), columns = table.n_cols(), "ephemeris parsed");
    table.write(output(args)?, args.format)
}

fn report(err: &EphError) {
    match err {
        EphError::ConnectionFailure(reason) => error!("Connection error: {reason}"),
        EphError::BadRequest { message, .. } => error!("Horizons says:\n\t{message}"),
        EphError::ParseError(reason) => {
            error!("eph cannot parse this format ({reason}). Try passing --csv YES or --raw.")
        }
        EphError::ConfigNotFound(_)
        | EphError::ConfigParse(_)
        | EphError::ConfigSectionNotFound(_) => {
            error!("Problems encountered with the configuration file: {err}")
        }
        EphError::IoError(_) | EphError::CsvError(_) => {
            error!("Problems trying to write data: {err}")
        }
        _ => error!("{err}"),
    }
}

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    if let Err(err) = run(&args) {
        report(&err);
        process::exit(1);
    }
}
