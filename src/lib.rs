//! Pavilion: availability checking and booking client for a small venue
//! (a function hall and a guest house).
//!
//! The reservation list lives in a remote sheet behind a single web-app
//! endpoint. This crate fetches that list, filters it into a
//! [`ReservationLedger`] of blocking reservations, answers availability
//! queries (exact-day semantics for the hall, inclusive-range semantics
//! for the single guest house unit), validates and sanitizes booking
//! requests, submits them back to the sheet, and builds the pre-filled
//! WhatsApp notification link for the owner.

pub mod booking;
pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod store;

pub use booking::{
    BookingRequest, DayStamp, RawReservation, Reservation, ReservationLedger, ReservationStatus,
    Resource, SubmittedBooking, TimeSlot,
};
pub use client::{BookingClient, BookingReceipt};
pub use config::Config;
pub use error::{ConfigError, NotifyError, PavilionError, Result, StoreError, ValidationError};
pub use notify::OwnerContact;
pub use store::{ReservationStore, SheetStore, SubmitOutcome};
