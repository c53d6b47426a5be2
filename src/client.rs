//! Booking client: orchestrates fetch, availability checks, and the
//! submission flow.
//!
//! The client owns a [`ReservationLedger`] snapshot and replaces it
//! wholesale on every refresh; checks between refreshes run against the
//! previous snapshot. A submit cooldown guards against accidental
//! double-submission.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::booking::{BookingRequest, DayStamp, Reservation, ReservationLedger, Resource, SubmittedBooking};
use crate::config::Config;
use crate::error::{Result, ValidationError};
use crate::notify::{self, OwnerContact};
use crate::store::{ReservationStore, SheetStore, SubmitOutcome};

/// Everything the caller gets back from a successful booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    /// The sanitized record that was posted to the sheet.
    pub booking: SubmittedBooking,
    /// Transport outcome of the write.
    pub outcome: SubmitOutcome,
    /// Pre-filled WhatsApp link for the owner, if it fit the length cap.
    pub notify_link: Option<String>,
}

/// Client over a reservation store.
pub struct BookingClient<S> {
    store: S,
    ledger: ReservationLedger,
    owner: OwnerContact,
    cooldown: Duration,
    last_submit: Option<Instant>,
}

impl BookingClient<SheetStore> {
    /// Build a client for the configured sheet endpoint.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = SheetStore::new(&config.sheet.url, config.sheet.timeout_secs)?;
        Ok(Self::new(
            store,
            config.owner_contact(),
            Duration::from_secs(config.booking.submit_cooldown_secs),
        ))
    }
}

impl<S: ReservationStore> BookingClient<S> {
    /// Create a client with an empty ledger; call [`refresh`](Self::refresh)
    /// to load reservations.
    pub fn new(store: S, owner: OwnerContact, cooldown: Duration) -> Self {
        Self {
            store,
            ledger: ReservationLedger::empty(),
            owner,
            cooldown,
            last_submit: None,
        }
    }

    /// Fetch the reservation list and rebuild the ledger.
    ///
    /// A read failure is not fatal: the ledger is reset to empty and the
    /// calendar stays usable with nothing blocked. Stale or missing data
    /// gets caught by the venue on review, a broken page would not.
    pub async fn refresh(&mut self) {
        match self.store.fetch_raw().await {
            Ok(raw) => {
                self.ledger = ReservationLedger::from_raw(&raw);
                info!(blocking = self.ledger.len(), "Reservation ledger refreshed");
            }
            Err(e) => {
                warn!(error = %e, "Could not load reservations; proceeding with none");
                self.ledger = ReservationLedger::empty();
            }
        }
    }

    /// The current snapshot.
    pub fn ledger(&self) -> &ReservationLedger {
        &self.ledger
    }

    /// Check availability against the current snapshot.
    pub fn is_available(&self, resource: Resource, start: DayStamp, end: Option<DayStamp>) -> bool {
        self.ledger.is_available(resource, start, end)
    }

    /// The reservation blocking the candidate, if any.
    pub fn conflict(
        &self,
        resource: Resource,
        start: DayStamp,
        end: Option<DayStamp>,
    ) -> Option<&Reservation> {
        self.ledger.conflict(resource, start, end)
    }

    /// Validate and submit a booking, then refresh the ledger.
    ///
    /// The request is checked against the current snapshot immediately
    /// before the write (including availability). The WhatsApp link is
    /// constructed but not opened; if it exceeds the length cap the
    /// notification is dropped while the submission stands. Nothing is
    /// retried automatically.
    pub async fn book(&mut self, request: BookingRequest) -> Result<BookingReceipt> {
        if let Some(last) = self.last_submit {
            if last.elapsed() < self.cooldown {
                return Err(ValidationError::SubmitCooldown.into());
            }
        }
        self.last_submit = Some(Instant::now());

        let booking = request.validate(&self.ledger, DayStamp::today())?;
        let outcome = self.store.submit(&booking).await?;
        info!(
            resource = %booking.resource,
            start = %booking.start_date,
            end = %booking.end_date,
            "Booking submitted"
        );

        let notify_link = match notify::whatsapp_link(&self.owner, &booking) {
            Ok(link) => Some(link),
            Err(e) => {
                warn!(error = %e, "Skipping owner notification");
                None
            }
        };

        // Pick up the row we just wrote (and anything else new).
        self.refresh().await;

        Ok(BookingReceipt {
            booking,
            outcome,
            notify_link,
        })
    }
}
