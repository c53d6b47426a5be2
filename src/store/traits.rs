//! Store trait definitions and submission outcome types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::booking::{RawReservation, SubmittedBooking};
use crate::error::Result;

/// Outcome of a booking submission.
///
/// The sheet endpoint gives no readable response body, so `Sent` means
/// the transport accepted the request, not that the booking was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The request left this client successfully.
    Sent,
}

/// A remote reservation store: one endpoint serving both the full
/// reservation list (read) and booking submissions (write).
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Fetch the complete raw reservation list. No filtering happens
    /// here; callers run the result through
    /// [`ReservationLedger::from_raw`](crate::booking::ReservationLedger::from_raw).
    async fn fetch_raw(&self) -> Result<Vec<RawReservation>>;

    /// Submit a booking. Fire-and-forget: a `Sent` outcome only means
    /// the write request was accepted by the transport.
    async fn submit(&self, booking: &SubmittedBooking) -> Result<SubmitOutcome>;
}
