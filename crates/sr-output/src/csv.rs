//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `paths.csv`
//! - `route_summaries.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RouteSummaryRow, StepSummaryRow, WaypointRow};

/// Writes solver output to three CSV files.
pub struct CsvWriter {
    paths:     Writer<File>,
    routes:    Writer<File>,
    steps:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut paths = Writer::from_path(dir.join("paths.csv"))?;
        paths.write_record(["cid", "date_id", "time", "xid", "yid"])?;

        let mut routes = Writer::from_path(dir.join("route_summaries.csv"))?;
        routes.write_record(["cid", "xid", "yid", "reachable", "confidence", "arrival_step"])?;

        let mut steps = Writer::from_path(dir.join("step_summaries.csv"))?;
        steps.write_record(["step", "sources", "candidates", "accepted", "pruned", "lethal"])?;

        Ok(Self {
            paths,
            routes,
            steps,
            finished: false,
        })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_waypoints(&mut self, rows: &[WaypointRow]) -> OutputResult<()> {
        for row in rows {
            self.paths.write_record(&[
                row.cid.to_string(),
                opt(row.date_id),
                row.time.clone(),
                row.xid.to_string(),
                row.yid.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_route_summary(&mut self, row: &RouteSummaryRow) -> OutputResult<()> {
        self.routes.write_record(&[
            row.cid.to_string(),
            row.xid.to_string(),
            row.yid.to_string(),
            (row.reachable as u8).to_string(),
            opt(row.confidence),
            opt(row.arrival_step),
        ])?;
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.step.to_string(),
            row.sources.to_string(),
            row.candidates.to_string(),
            row.accepted.to_string(),
            row.pruned.to_string(),
            row.lethal.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.paths.flush()?;
        self.routes.flush()?;
        self.steps.flush()?;
        Ok(())
    }
}
