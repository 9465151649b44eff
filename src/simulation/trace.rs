use serde::{Deserialize, Serialize};

use crate::domain::Trip;

/// Trips of one simulated day. `day` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDay {
    pub day: u32,
    pub trips: Vec<Trip>,
}

/// Complete multi-day trace in day order.
///
/// Only the simulation appends to a trace; callers get read-only access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    days: Vec<TraceDay>,
}

impl Trace {
    pub(crate) fn with_capacity(days: usize) -> Self {
        Self {
            days: Vec::with_capacity(days),
        }
    }

    pub(crate) fn push(&mut self, day: u32, trips: Vec<Trip>) {
        self.days.push(TraceDay { day, trips });
    }

    pub fn days(&self) -> &[TraceDay] {
        &self.days
    }

    /// Number of simulated days
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Every trip record, paired with its 1-based day.
    pub fn trips(&self) -> impl Iterator<Item = (u32, &Trip)> + '_ {
        self.days
            .iter()
            .flat_map(|day| day.trips.iter().map(move |trip| (day.day, trip)))
    }

    pub fn into_days(self) -> Vec<TraceDay> {
        self.days
    }
}
