//! The availability engine: filtered reservation snapshots and
//! conflict checks.
//!
//! A [`ReservationLedger`] holds the blocking reservations known at the
//! last fetch. It is immutable between refreshes; callers replace the
//! whole ledger rather than patching it. Availability checks dispatch on
//! resource semantics: the function hall blocks exact start days, the
//! guest house (a single unit) blocks inclusive date ranges.

use tracing::{debug, warn};

use super::types::{DayStamp, RawReservation, Reservation, ReservationStatus, Resource};

/// An immutable snapshot of blocking reservations.
#[derive(Debug, Clone, Default)]
pub struct ReservationLedger {
    reservations: Vec<Reservation>,
}

impl ReservationLedger {
    /// An empty ledger: everything is available.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a ledger from raw store records.
    ///
    /// This is a pure filter over untrusted input. Records are dropped,
    /// never errored on, when they are missing a resource or start date,
    /// name an unknown resource, carry a non-blocking status, or have an
    /// unparsable start date. A missing or unparsable end date falls back
    /// to the start date (single-day reservation). Drops are logged and
    /// the source list is left untouched; identical input always yields
    /// an identical ledger.
    pub fn from_raw(raw: &[RawReservation]) -> Self {
        let mut reservations = Vec::with_capacity(raw.len());

        for record in raw {
            let (Some(resource_str), Some(start_str)) = (&record.resource, &record.start_date)
            else {
                warn!(?record, "Dropping reservation with missing fields");
                continue;
            };

            let Some(resource) = Resource::parse(resource_str) else {
                warn!(resource = %resource_str, "Dropping reservation with unknown resource");
                continue;
            };

            let status = record
                .status
                .as_deref()
                .map(ReservationStatus::parse)
                .unwrap_or(ReservationStatus::Unknown);
            if !status.is_blocking() {
                debug!(?status, resource = %resource, "Skipping non-blocking reservation");
                continue;
            }

            let Some(start_day) = DayStamp::parse(start_str) else {
                warn!(start_date = %start_str, "Dropping reservation with invalid start date");
                continue;
            };

            let end_day = record
                .end_date
                .as_deref()
                .and_then(DayStamp::parse)
                .unwrap_or(start_day);

            debug!(
                resource = %resource,
                start = %start_day,
                end = %end_day,
                ?status,
                "Blocking reservation loaded"
            );
            reservations.push(Reservation {
                resource,
                status,
                start_day,
                end_day,
            });
        }

        debug!(count = reservations.len(), "Reservation ledger built");
        Self { reservations }
    }

    /// The blocking reservations in this snapshot.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Number of blocking reservations.
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    /// Whether the snapshot holds no blocking reservations.
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Find the reservation that blocks the candidate, if any.
    ///
    /// The function hall is booked per exact day: a candidate conflicts
    /// iff some hall reservation starts on the same day, and `end` is
    /// ignored. The guest house is a single unit booked for inclusive
    /// ranges: a candidate `[start, end]` (end defaulting to start)
    /// conflicts iff `start <= r.end && r.start <= end`. A candidate
    /// starting on an existing reservation's end day still conflicts;
    /// there is no same-day turnover at this venue.
    pub fn conflict(
        &self,
        resource: Resource,
        start: DayStamp,
        end: Option<DayStamp>,
    ) -> Option<&Reservation> {
        let end = end.unwrap_or(start);
        self.reservations
            .iter()
            .filter(|r| r.resource == resource)
            .find(|r| match resource {
                Resource::FunctionHall => r.start_day == start,
                Resource::GuestHouse => start <= r.end_day && r.start_day <= end,
            })
    }

    /// Whether the candidate dates are free for `resource`.
    pub fn is_available(&self, resource: Resource, start: DayStamp, end: Option<DayStamp>) -> bool {
        match self.conflict(resource, start, end) {
            Some(blocking) => {
                debug!(
                    resource = %resource,
                    candidate_start = %start,
                    blocked_by_start = %blocking.start_day,
                    blocked_by_end = %blocking.end_day,
                    "Candidate conflicts with existing reservation"
                );
                false
            }
            None => true,
        }
    }

    /// Availability from raw date strings, as they arrive from a form.
    ///
    /// Unparsable candidate dates yield `false` (not available) instead of
    /// an error, so callers render a rejection without special-casing
    /// parse failure. This is the opposite polarity from stored records,
    /// where bad data is excluded from blocking.
    pub fn is_available_str(&self, resource: Resource, start: &str, end: Option<&str>) -> bool {
        let Some(start) = DayStamp::parse(start) else {
            warn!(start, "Invalid candidate start date");
            return false;
        };
        let end = match end {
            Some(s) => match DayStamp::parse(s) {
                Some(day) => Some(day),
                None => {
                    warn!(end = s, "Invalid candidate end date");
                    return false;
                }
            },
            None => None,
        };
        self.is_available(resource, start, end)
    }

    /// Enumerate the days a date picker must disable for `resource`,
    /// starting at `from` for `horizon_days` days.
    ///
    /// Mirrors the per-day check a calendar widget performs: exact start
    /// days for the hall, any day inside a booked range for the guest
    /// house.
    pub fn blocked_days(&self, resource: Resource, from: DayStamp, horizon_days: i64) -> Vec<DayStamp> {
        (0..horizon_days)
            .map(|offset| from.plus_days(offset))
            .filter(|day| !self.is_available(resource, *day, None))
            .collect()
    }
}
