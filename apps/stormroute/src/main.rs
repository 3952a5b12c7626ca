//! stormroute — maximum-survival routes through a forecast storm field.
//!
//! Reads an hourly hazard forecast (`xid,yid,date_id,hour,wind`), a city list
//! (`cid,xid,yid`, city 0 is the origin), and a risk table, then writes one
//! route per destination to `paths.csv` plus summaries in the output
//! directory.
//!
//! ```text
//! stormroute --weather forecast.csv --cities cities.csv --probs risk.csv \
//!            --output out/ [--config run.toml] [--block-ratio 3 --block-mode max] \
//!            [--truth observed.csv] [--store sparse] [--json]
//! ```

mod config;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use sr_core::{City, Coordinate, SolveConfig, StepClock};
use sr_hazard::{
    Accumulation, HazardField, RiskModel, downsample, load_cities_csv, load_field_csv,
    load_risk_csv, scan_dimensions_csv,
};
use sr_output::{CsvWriter, OutputWriter, SolverOutputObserver, write_routes};
use sr_solver::{
    DenseStore, Route, SolverBuilder, SparseStore, StateStore, StoreKind, verify_path,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::AppConfig;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "stormroute")]
#[command(about = "Risk-aware routing through a time-varying hazard field", long_about = None)]
#[command(version)]
struct Cli {
    /// Hazard forecast CSV (`xid,yid,date_id,hour,wind`)
    #[arg(long, env = "STORMROUTE_WEATHER")]
    weather: PathBuf,

    /// City list CSV (`cid,xid,yid`); cid 0 is the origin
    #[arg(long, env = "STORMROUTE_CITIES")]
    cities: PathBuf,

    /// Risk table: `#` comments, then one line of probabilities
    #[arg(long, env = "STORMROUTE_PROBS")]
    probs: PathBuf,

    /// Output directory
    #[arg(short, long, env = "STORMROUTE_OUTPUT", default_value = "output")]
    output: PathBuf,

    /// TOML run configuration
    #[arg(short, long, env = "STORMROUTE_CONFIG")]
    config: Option<PathBuf>,

    /// Day id written to `paths.csv` (defaults to the forecast's date_id)
    #[arg(long)]
    day_id: Option<u32>,

    /// Aggregate the grid into blocks of this many cells per side
    #[arg(long, default_value_t = 1)]
    block_ratio: u32,

    /// How cells of a block combine: mean or max
    #[arg(long, default_value = "mean")]
    block_mode: Accumulation,

    /// Observed hazard CSV to replay each route against
    #[arg(long, env = "STORMROUTE_TRUTH")]
    truth: Option<PathBuf>,

    /// State store: dense or sparse
    #[arg(long, default_value = "dense")]
    store: StoreKind,

    /// Log level
    #[arg(long, env = "STORMROUTE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "STORMROUTE_LOG_JSON")]
    json: bool,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let app = AppConfig::load(cli.config.as_deref())?;
    run(&cli, &app)?;
    Ok(())
}

/// What one invocation produced.
#[derive(Debug)]
struct RunSummary {
    routes:      Vec<Route>,
    /// Total observed-hazard hits, when a replay ran.
    replay_hits: Option<usize>,
}

fn run(cli: &Cli, app: &AppConfig) -> Result<RunSummary> {
    let started = Instant::now();

    // 1. Hazard field, optionally aggregated into blocks.
    let grid = scan_dimensions_csv(&cli.weather)
        .with_context(|| format!("scanning {}", cli.weather.display()))?;
    let field = load_field_csv(&cli.weather, &grid)
        .with_context(|| format!("loading {}", cli.weather.display()))?;
    let field = coarsen(field, cli.block_ratio, cli.block_mode)?;
    info!(
        xsize = field.xsize(),
        ysize = field.ysize(),
        hours = field.hour_count(),
        first_hour = grid.first_hour,
        "hazard field ready"
    );

    // 2. Cities and risk table.
    let cities = load_cities_csv(&cli.cities)
        .with_context(|| format!("loading {}", cli.cities.display()))?;
    let cities = scale_cities(cities, cli.block_ratio);
    let risk = load_risk_csv(&cli.probs, &app.risk)
        .with_context(|| format!("loading {}", cli.probs.display()))?;

    // Labels start at the forecast's first hour.
    let solve = SolveConfig { first_hour: grid.first_hour, ..app.solve.clone() };
    let day = cli.day_id.or(field.day());

    // 3. Solve and write.
    let inputs = RunInputs {
        solve:  solve.clone(),
        field:  &field,
        risk:   &risk,
        cities,
        output: &cli.output,
        day,
    };
    let routes = match cli.store {
        StoreKind::Dense => inputs.execute::<DenseStore>()?,
        StoreKind::Sparse => inputs.execute::<SparseStore>()?,
    };
    let reached = routes.iter().filter(|r| r.is_reachable()).count();
    info!(
        destinations = routes.len(),
        reached,
        elapsed_ms = started.elapsed().as_millis() as u64,
        output = %cli.output.display(),
        "routes written"
    );

    // 4. Optional replay against observed data.
    let mut replay_hits = None;
    if let Some(truth_path) = &cli.truth {
        let truth_grid = scan_dimensions_csv(truth_path)
            .with_context(|| format!("scanning {}", truth_path.display()))?;
        let truth = load_field_csv(truth_path, &truth_grid)
            .with_context(|| format!("loading {}", truth_path.display()))?;
        let truth = coarsen(truth, cli.block_ratio, cli.block_mode)?;
        let clock = solve.make_clock(field.hour_count())?;
        replay_hits =
            verify_routes(&routes, &truth, truth_grid.first_hour, &clock, solve.hard_ceiling)?;
    }

    Ok(RunSummary { routes, replay_hits })
}

// ── Pipeline helpers ──────────────────────────────────────────────────────────

struct RunInputs<'a> {
    solve:  SolveConfig,
    field:  &'a HazardField,
    risk:   &'a RiskModel,
    cities: Vec<City>,
    output: &'a Path,
    day:    Option<u32>,
}

impl RunInputs<'_> {
    fn execute<S: StateStore>(self) -> Result<Vec<Route>> {
        let mut solver = SolverBuilder::new(self.solve, self.field, self.risk)
            .cities(self.cities)
            .build::<S>()?;

        let mut obs = SolverOutputObserver::new(CsvWriter::new(self.output)?);
        solver.run(&mut obs)?;
        if let Some(e) = obs.take_error() {
            return Err(e.into());
        }

        let routes = solver.routes()?;
        let mut writer = obs.into_writer();
        write_routes(&mut writer, &routes, &solver.clock, self.day)?;
        writer.finish()?;
        Ok(routes)
    }
}

fn coarsen(field: HazardField, ratio: u32, mode: Accumulation) -> Result<HazardField> {
    match ratio {
        0 => bail!("--block-ratio must be at least 1"),
        1 => Ok(field),
        _ => {
            let coarse = downsample(&field, ratio, mode)?;
            info!(ratio, ?mode, xsize = coarse.xsize(), ysize = coarse.ysize(), "grid aggregated");
            Ok(coarse)
        }
    }
}

/// Move cities into the block grid produced by [`coarsen`].
fn scale_cities(cities: Vec<City>, ratio: u32) -> Vec<City> {
    if ratio <= 1 {
        return cities;
    }
    cities
        .into_iter()
        .map(|c| City::new(c.id, Coordinate::new(c.coord.x / ratio, c.coord.y / ratio)))
        .collect()
}

/// Replay every found route against `truth`; returns the total hit count, or
/// `None` when no hard ceiling defines a hit.
fn verify_routes(
    routes:           &[Route],
    truth:            &HazardField,
    truth_first_hour: u32,
    clock:            &StepClock,
    limit:            Option<f64>,
) -> Result<Option<usize>> {
    let Some(limit) = limit else {
        warn!("no hard ceiling configured; skipping ground-truth replay");
        return Ok(None);
    };
    let mut total = 0;
    for route in routes {
        let Some(path) = route.path() else { continue };
        let report = verify_path(path, truth, truth_first_hour, clock, limit)?;
        if report.is_clean() {
            info!(city = route.city.id, ok = report.ok_steps, "route clear of observed hazard");
        } else {
            for hit in &report.hits {
                warn!(
                    city = route.city.id,
                    coord = %hit.coord,
                    time = %clock.label(hit.step),
                    intensity = hit.intensity,
                    "route crosses observed hazard"
                );
            }
        }
        total += report.hits.len();
    }
    Ok(Some(total))
}
