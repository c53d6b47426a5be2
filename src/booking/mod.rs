//! Booking domain: reservation model, availability engine, and form
//! validation.
//!
//! The flow mirrors the venue's booking page: fetch the reservation list,
//! build a [`ReservationLedger`] snapshot, check candidate dates against
//! it, and validate a [`BookingRequest`] into a [`SubmittedBooking`]
//! ready for the sheet and the owner notification.

pub mod availability;
pub mod types;
pub mod validation;

pub use availability::ReservationLedger;
pub use types::{
    BookingRequest, DayStamp, RawReservation, Reservation, ReservationStatus, Resource,
    SubmittedBooking, TimeSlot,
};
pub use validation::{sanitize_phone, sanitize_text};
