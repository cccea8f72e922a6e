use crate::outlet::Outlet;
use crate::parser::Record;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashSet;

/// Outcome of filtering one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    /// First record after the end of the window for its outlet.
    AcceptCarryOver,
    RejectOutlet,
    RejectBeforeStart,
    RejectAfterEnd,
}

impl Decision {
    pub fn is_accepted(self) -> bool {
        matches!(self, Decision::Accept | Decision::AcceptCarryOver)
    }
}

/// Outlets that already kept their one post-window record. Fresh per dataset build.
#[derive(Debug, Clone, Default)]
pub struct BoundaryState {
    carried: HashSet<Outlet>,
}

impl BoundaryState {
    pub fn new() -> Self { Self::default() }

    pub fn has_carried(&self, outlet: Outlet) -> bool {
        self.carried.contains(&outlet)
    }
}

#[derive(Debug, Clone)]
pub struct RecordFilter {
    outlets: Vec<Outlet>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl RecordFilter {
    /// Dates are inclusive whole days: the window opens at `start 00:00`
    /// and closes at `end 23:59`.
    pub fn new(outlets: &[Outlet], start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
        Self {
            outlets: outlets.to_vec(),
            start: start.map(|d| d.and_time(NaiveTime::MIN)),
            end: end.map(|d| d.and_time(end_of_day)),
        }
    }

    pub fn outlets(&self) -> &[Outlet] {
        &self.outlets
    }

    pub fn decide(&self, record: &Record, state: &mut BoundaryState) -> Decision {
        if !self.outlets.contains(&record.outlet) {
            return Decision::RejectOutlet;
        }
        if let Some(start) = self.start {
            if record.timestamp < start {
                return Decision::RejectBeforeStart;
            }
        }
        if let Some(end) = self.end {
            if record.timestamp > end {
                if !state.carried.insert(record.outlet) {
                    return Decision::RejectAfterEnd;
                }
                return Decision::AcceptCarryOver;
            }
        }
        Decision::Accept
    }

    pub fn accept(&self, record: &Record, state: &mut BoundaryState) -> bool {
        self.decide(record, state).is_accepted()
    }
}
