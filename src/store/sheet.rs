//! Sheet-backed reservation store over HTTP.
//!
//! The venue keeps its reservations in a spreadsheet fronted by a single
//! web-app endpoint: a GET returns the full reservation list as JSON, a
//! POST appends a booking row. There are no query parameters and the
//! POST response carries no readable body, so writes are fire-and-forget.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::booking::{RawReservation, SubmittedBooking};
use crate::error::{Result, StoreError};

use super::traits::{ReservationStore, SubmitOutcome};

/// HTTP client for the sheet endpoint.
#[derive(Debug, Clone)]
pub struct SheetStore {
    client: Client,
    url: String,
}

impl SheetStore {
    /// Create a store for the given endpoint URL.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    fn map_transport_error(e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout
        } else if e.is_connect() {
            StoreError::Connect(e.to_string())
        } else {
            StoreError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl ReservationStore for SheetStore {
    async fn fetch_raw(&self) -> Result<Vec<RawReservation>> {
        debug!(url = %self.url, "Fetching reservation list");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        // The endpoint is supposed to return an array; anything else is
        // treated as an empty list rather than an error.
        let entries = match payload {
            serde_json::Value::Array(entries) => entries,
            other => {
                warn!(got = %other, "Reservation list was not an array");
                Vec::new()
            }
        };

        let mut raw = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<RawReservation>(entry) {
                Ok(record) => raw.push(record),
                Err(e) => warn!(error = %e, "Dropping non-record reservation entry"),
            }
        }

        debug!(count = raw.len(), "Reservation list fetched");
        Ok(raw)
    }

    async fn submit(&self, booking: &SubmittedBooking) -> Result<SubmitOutcome> {
        debug!(resource = %booking.resource, start = %booking.start_date, "Submitting booking");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(booking)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        // The web-app endpoint answers writes with an opaque redirect;
        // the status is logged but not interpreted.
        debug!(status = %response.status(), "Booking submission accepted by transport");
        Ok(SubmitOutcome::Sent)
    }
}
