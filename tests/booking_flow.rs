//! End-to-end tests for the booking flow against an in-memory store.
//!
//! These exercise the public API the way the venue's booking page does:
//! fetch the reservation list, check availability, submit a booking, and
//! verify the re-fetched snapshot blocks the new dates.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use pavilion::{
    BookingClient, BookingRequest, DayStamp, OwnerContact, PavilionError, RawReservation,
    ReservationStore, Resource, Result, StoreError, SubmitOutcome, SubmittedBooking,
    ValidationError,
};

/// Store double that serves a fixed raw list and records appended rows,
/// reflecting them in subsequent fetches like the real sheet does.
/// Cloning shares the row list, so a test can hold a handle to the rows
/// while the client owns its own copy of the store.
#[derive(Clone)]
struct FakeSheet {
    rows: Arc<Mutex<Vec<RawReservation>>>,
    fail_fetch: bool,
}

impl FakeSheet {
    fn seeded(rows: Vec<RawReservation>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            fail_fetch: false,
        }
    }

    fn unreachable() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            fail_fetch: true,
        }
    }
}

#[async_trait]
impl ReservationStore for FakeSheet {
    async fn fetch_raw(&self) -> Result<Vec<RawReservation>> {
        if self.fail_fetch {
            return Err(StoreError::Timeout.into());
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn submit(&self, booking: &SubmittedBooking) -> Result<SubmitOutcome> {
        // New submissions land as PENDING rows, exactly as the sheet
        // records them before the owner confirms.
        self.rows.lock().unwrap().push(RawReservation {
            resource: Some(booking.resource.as_str().to_string()),
            status: Some("PENDING".to_string()),
            start_date: Some(booking.start_date.to_string()),
            end_date: Some(booking.end_date.to_string()),
        });
        Ok(SubmitOutcome::Sent)
    }
}

fn row(resource: &str, status: &str, start: &str, end: Option<&str>) -> RawReservation {
    RawReservation {
        resource: Some(resource.to_string()),
        status: Some(status.to_string()),
        start_date: Some(start.to_string()),
        end_date: end.map(str::to_string),
    }
}

fn owner() -> OwnerContact {
    OwnerContact {
        whatsapp: "919384376599".to_string(),
        contact_phone: "9384376599".to_string(),
        venue_name: "Banana Mahal".to_string(),
    }
}

fn client_with(rows: Vec<RawReservation>) -> BookingClient<FakeSheet> {
    BookingClient::new(FakeSheet::seeded(rows), owner(), Duration::ZERO)
}

fn day(s: &str) -> DayStamp {
    DayStamp::parse(s).unwrap()
}

#[tokio::test]
async fn guest_house_boundary_days_conflict() {
    let mut client = client_with(vec![row(
        "Guest House",
        "CONFIRMED",
        "2026-02-17",
        Some("2026-02-19"),
    )]);
    client.refresh().await;

    // Strictly after the existing stay: free.
    assert!(client.is_available(
        Resource::GuestHouse,
        day("2026-02-20"),
        Some(day("2026-02-22"))
    ));

    // Starting on the existing checkout day: blocked, no same-day turnover.
    assert!(!client.is_available(
        Resource::GuestHouse,
        day("2026-02-19"),
        Some(day("2026-02-20"))
    ));
}

#[tokio::test]
async fn hall_blocks_only_exact_days_with_blocking_status() {
    let mut client = client_with(vec![
        row("Function Hall", "CONFIRMED", "2026-03-01", None),
        row("Function Hall", "PENDING", "2026-03-02", None),
    ]);
    client.refresh().await;

    assert!(!client.is_available(Resource::FunctionHall, day("2026-03-01"), None));
    assert!(client.is_available(Resource::FunctionHall, day("2026-03-02"), None));
}

#[tokio::test]
async fn malformed_rows_never_block() {
    let mut client = client_with(vec![
        RawReservation::default(),
        row("Function Hall", "CONFIRMED", "sometime soon", None),
        RawReservation {
            resource: Some("Function Hall".to_string()),
            status: Some("CONFIRMED".to_string()),
            start_date: None,
            end_date: Some("2026-03-01".to_string()),
        },
    ]);
    client.refresh().await;

    assert!(client.ledger().is_empty());
    assert!(client.is_available(Resource::FunctionHall, day("2026-03-01"), None));
}

#[tokio::test]
async fn unreachable_store_leaves_calendar_open() {
    let mut client = BookingClient::new(FakeSheet::unreachable(), owner(), Duration::ZERO);
    client.refresh().await;

    assert!(client.ledger().is_empty());
    assert!(client.is_available(Resource::GuestHouse, day("2026-02-18"), None));
}

#[tokio::test]
async fn booking_flow_blocks_resubmission_of_same_dates() {
    let sheet = FakeSheet::seeded(Vec::new());
    let mut client = BookingClient::new(sheet.clone(), owner(), Duration::ZERO);
    client.refresh().await;

    let request = BookingRequest {
        resource: "Guest House".to_string(),
        event_type: "Stay".to_string(),
        start_date: "2099-05-10".to_string(),
        end_date: Some("2099-05-12".to_string()),
        slot: None,
        name: "Meena".to_string(),
        phone: "7654321098".to_string(),
        guests: 3,
        message: "Late arrival".to_string(),
    };

    let receipt = client.book(request.clone()).await.unwrap();
    assert_eq!(receipt.outcome, SubmitOutcome::Sent);
    assert!(receipt.notify_link.unwrap().contains("wa.me"));

    // The new row is PENDING, so it does not block yet.
    assert!(client.is_available(
        Resource::GuestHouse,
        day("2099-05-10"),
        Some(day("2099-05-12"))
    ));

    // Once the owner confirms it, the same dates conflict.
    for r in sheet.rows.lock().unwrap().iter_mut() {
        r.status = Some("CONFIRMED".to_string());
    }
    client.refresh().await;
    let err = client.book(request).await.unwrap_err();
    assert!(matches!(
        err,
        PavilionError::Validation(ValidationError::NotAvailable)
    ));
}
