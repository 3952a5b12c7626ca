//! Plain data row types written by output backends.

use sr_core::StepClock;
use sr_solver::{Route, StepStats};

/// One waypoint of a found route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointRow {
    pub cid:     u32,
    /// Scenario/day id; written as an empty cell when unknown.
    pub date_id: Option<u32>,
    /// `HH:MM` wall-clock label of the waypoint's step.
    pub time:    String,
    /// 1-based grid column.
    pub xid:     u32,
    /// 1-based grid row.
    pub yid:     u32,
}

/// Outcome for one destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummaryRow {
    pub cid:          u32,
    pub xid:          u32,
    pub yid:          u32,
    pub reachable:    bool,
    /// `None` when unreachable.
    pub confidence:   Option<f64>,
    /// Step of the chosen arrival; `None` when unreachable.
    pub arrival_step: Option<u32>,
}

/// Counters for one relaxation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummaryRow {
    pub step:       u32,
    pub sources:    u64,
    pub candidates: u64,
    pub accepted:   u64,
    pub pruned:     u64,
    pub lethal:     u64,
}

impl From<&StepStats> for StepSummaryRow {
    fn from(s: &StepStats) -> Self {
        Self {
            step:       s.step.0,
            sources:    s.sources as u64,
            candidates: s.candidates as u64,
            accepted:   s.accepted as u64,
            pruned:     s.pruned as u64,
            lethal:     s.lethal as u64,
        }
    }
}

impl RouteSummaryRow {
    pub fn from_route(route: &Route) -> Self {
        let (xid, yid) = route.city.coord.one_based();
        Self {
            cid: route.city.id,
            xid,
            yid,
            reachable:    route.is_reachable(),
            confidence:   route.confidence(),
            arrival_step: route.path().map(|p| p.arrival_step().0),
        }
    }
}

/// Waypoint rows of `route` in start → destination order.
///
/// Empty for an unreachable destination.
pub fn waypoint_rows(route: &Route, clock: &StepClock, date_id: Option<u32>) -> Vec<WaypointRow> {
    let Some(path) = route.path() else {
        return Vec::new();
    };
    path.iter()
        .map(|wp| {
            let (xid, yid) = wp.coord.one_based();
            WaypointRow {
                cid: route.city.id,
                date_id,
                time: clock.label(wp.step),
                xid,
                yid,
            }
        })
        .collect()
}
