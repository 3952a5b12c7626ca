//! CSV loaders for the three solver inputs.
//!
//! # Hazard records
//!
//! One row per cell per hour; `xid`/`yid` are 1-based, `hour` is the
//! wall-clock hour.  Every row must carry the same `date_id`.
//!
//! ```csv
//! xid,yid,date_id,hour,wind
//! 1,1,1,3,4.5
//! 1,2,1,3,16.1
//! ```
//!
//! Loading is two-pass: [`scan_dimensions_reader`] derives the [`GridSpec`]
//! (largest ids, first and last hour), then [`load_field_reader`] fills a
//! [`HazardField`] against it.  A caller with known extents can skip the scan.
//!
//! # Cities
//!
//! ```csv
//! cid,xid,yid
//! 0,142,328
//! 1,84,203
//! ```
//!
//! City 0 is the origin.  The returned list is sorted by `cid`.
//!
//! # Risk table
//!
//! Lines starting with `#` are comments.  The first remaining line is a
//! comma-separated list of probabilities, one per bucket.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use sr_core::{City, Coordinate, HourLayer};

use crate::{HazardError, HazardField, HazardFieldBuilder, HazardResult, RiskConfig, RiskModel};

const HAZARD_HEADER: [&str; 5] = ["xid", "yid", "date_id", "hour", "wind"];
const CITY_HEADER: [&str; 3] = ["cid", "xid", "yid"];

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct HazardRecord {
    xid:     u32,
    yid:     u32,
    date_id: u32,
    hour:    u32,
    wind:    f64,
}

#[derive(Deserialize)]
struct CityRecord {
    cid: u32,
    xid: u32,
    yid: u32,
}

// ── GridSpec ──────────────────────────────────────────────────────────────────

/// Declared extents of a hazard file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridSpec {
    pub xsize:      u32,
    pub ysize:      u32,
    /// Wall-clock hour stored in hour layer 0.
    pub first_hour: u32,
    pub hour_count: u32,
}

impl GridSpec {
    /// Hour layer for a wall-clock hour, if inside the declared range.
    pub fn layer_of(&self, hour: u32) -> Option<HourLayer> {
        let layer = hour.checked_sub(self.first_hour)?;
        (layer < self.hour_count).then_some(HourLayer(layer))
    }
}

// ── Hazard records ────────────────────────────────────────────────────────────

/// First pass over a hazard file: derive its extents.
pub fn scan_dimensions_csv(path: &Path) -> HazardResult<GridSpec> {
    let file = std::fs::File::open(path).map_err(HazardError::Io)?;
    scan_dimensions_reader(file)
}

/// Like [`scan_dimensions_csv`] but accepts any `Read` source.
pub fn scan_dimensions_reader<R: Read>(reader: R) -> HazardResult<GridSpec> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    check_header(&mut csv_reader, &HAZARD_HEADER)?;

    let (mut max_x, mut max_y) = (0u32, 0u32);
    let (mut min_h, mut max_h) = (u32::MAX, 0u32);
    let mut rows = 0usize;

    for result in csv_reader.deserialize::<HazardRecord>() {
        let row = result.map_err(|e| HazardError::Parse(e.to_string()))?;
        max_x = max_x.max(row.xid);
        max_y = max_y.max(row.yid);
        min_h = min_h.min(row.hour);
        max_h = max_h.max(row.hour);
        rows += 1;
    }

    if rows == 0 {
        return Err(HazardError::Parse("hazard file contains no records".into()));
    }
    let grid = GridSpec {
        xsize:      max_x,
        ysize:      max_y,
        first_hour: min_h,
        hour_count: max_h - min_h + 1,
    };
    debug!(rows, ?grid, "scanned hazard dimensions");
    Ok(grid)
}

/// Load a hazard file into a [`HazardField`] with the extents of `grid`.
pub fn load_field_csv(path: &Path, grid: &GridSpec) -> HazardResult<HazardField> {
    let file = std::fs::File::open(path).map_err(HazardError::Io)?;
    load_field_reader(file, grid)
}

/// Like [`load_field_csv`] but accepts any `Read` source.
///
/// # Errors
///
/// - [`HazardError::Parse`] for a malformed header or row, an id of 0, an
///   hour outside the grid span, or a `date_id` differing from the first row's.
/// - `CoreError::OutOfBounds` (wrapped) for a coordinate outside the grid extents.
/// - [`HazardError::InvalidIntensity`] for a negative or non-finite value.
pub fn load_field_reader<R: Read>(reader: R, grid: &GridSpec) -> HazardResult<HazardField> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    check_header(&mut csv_reader, &HAZARD_HEADER)?;

    let mut builder = HazardFieldBuilder::new(grid.xsize, grid.ysize, grid.hour_count)?;
    let mut day: Option<u32> = None;
    let mut rows = 0usize;

    for result in csv_reader.deserialize::<HazardRecord>() {
        let row = result.map_err(|e| HazardError::Parse(e.to_string()))?;

        // Guard against silently mixing scenarios.
        match day {
            None => day = Some(row.date_id),
            Some(d) if d != row.date_id => {
                return Err(HazardError::Parse(format!(
                    "hazard records span more than one day: {d} and {}",
                    row.date_id
                )));
            }
            Some(_) => {}
        }

        let coord = Coordinate::from_one_based(row.xid, row.yid).ok_or_else(|| {
            HazardError::Parse(format!("ids are 1-based, got xid={} yid={}", row.xid, row.yid))
        })?;
        let layer = grid.layer_of(row.hour).ok_or_else(|| {
            HazardError::Parse(format!(
                "hour {} outside {}..{}",
                row.hour,
                grid.first_hour,
                grid.first_hour + grid.hour_count
            ))
        })?;
        builder.set(layer, coord, row.wind)?;
        rows += 1;
    }

    let builder = match day {
        Some(d) => builder.day(d),
        None => builder,
    };
    let field = builder.build();
    info!(
        rows,
        xsize = field.xsize(),
        ysize = field.ysize(),
        hours = field.hour_count(),
        day = ?field.day(),
        "loaded hazard field"
    );
    Ok(field)
}

// ── Cities ────────────────────────────────────────────────────────────────────

/// Load the city list; element 0 is the origin.
pub fn load_cities_csv(path: &Path) -> HazardResult<Vec<City>> {
    let file = std::fs::File::open(path).map_err(HazardError::Io)?;
    load_cities_reader(file)
}

/// Like [`load_cities_csv`] but accepts any `Read` source.
pub fn load_cities_reader<R: Read>(reader: R) -> HazardResult<Vec<City>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    check_header(&mut csv_reader, &CITY_HEADER)?;

    let mut cities = Vec::new();
    let mut seen = HashSet::new();
    for result in csv_reader.deserialize::<CityRecord>() {
        let row = result.map_err(|e| HazardError::Parse(e.to_string()))?;
        if !seen.insert(row.cid) {
            return Err(HazardError::Parse(format!("duplicate city id {}", row.cid)));
        }
        let coord = Coordinate::from_one_based(row.xid, row.yid).ok_or_else(|| {
            HazardError::Parse(format!(
                "city {}: ids are 1-based, got xid={} yid={}",
                row.cid, row.xid, row.yid
            ))
        })?;
        cities.push(City::new(row.cid, coord));
    }

    cities.sort_by_key(|c| c.id);
    match cities.first() {
        Some(origin) if origin.id == 0 => Ok(cities),
        _ => Err(HazardError::Parse("city file has no origin (cid 0)".into())),
    }
}

// ── Risk table ────────────────────────────────────────────────────────────────

/// Load a risk table and validate it against `config`.
pub fn load_risk_csv(path: &Path, config: &RiskConfig) -> HazardResult<RiskModel> {
    let file = std::fs::File::open(path).map_err(HazardError::Io)?;
    load_risk_reader(file, config)
}

/// Like [`load_risk_csv`] but accepts any `Read` source.
pub fn load_risk_reader<R: Read>(reader: R, config: &RiskConfig) -> HazardResult<RiskModel> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let record = csv_reader
        .records()
        .next()
        .ok_or_else(|| HazardError::Parse("risk table has no data line".into()))?
        .map_err(|e| HazardError::Parse(e.to_string()))?;

    let probabilities = record
        .iter()
        .enumerate()
        .map(|(i, field)| {
            field.trim().parse::<f64>().map_err(|_| {
                HazardError::Parse(format!("risk bucket {i}: {field:?} is not a number"))
            })
        })
        .collect::<HazardResult<Vec<f64>>>()?;

    RiskModel::new(probabilities, config)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check_header<R: Read>(csv_reader: &mut csv::Reader<R>, expected: &[&str]) -> HazardResult<()> {
    let headers = csv_reader
        .headers()
        .map_err(|e| HazardError::Parse(e.to_string()))?;
    if headers.iter().map(str::trim).eq(expected.iter().copied()) {
        Ok(())
    } else {
        Err(HazardError::Parse(format!(
            "unexpected header {:?}: expected {}",
            headers.iter().collect::<Vec<_>>(),
            expected.join(",")
        )))
    }
}
