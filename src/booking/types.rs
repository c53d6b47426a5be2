//! Domain types for venue reservations and booking requests.
//!
//! This module defines the core types shared by the availability engine,
//! the form validation layer, and the sheet store: the two bookable
//! resources, reservation statuses, day-precision date stamps, and the
//! raw/validated reservation records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Resources
// ============================================================================

/// A bookable venue resource.
///
/// The function hall is booked per calendar day (with a time slot); the
/// guest house is a single unit booked for an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    #[serde(rename = "Function Hall")]
    FunctionHall,
    #[serde(rename = "Guest House")]
    GuestHouse,
}

impl Resource {
    /// Parse a resource from its wire/display string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Function Hall" => Some(Self::FunctionHall),
            "Guest House" => Some(Self::GuestHouse),
            _ => None,
        }
    }

    /// Get the resource as its wire/display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FunctionHall => "Function Hall",
            Self::GuestHouse => "Guest House",
        }
    }

    /// The event types bookable for this resource.
    pub fn event_types(&self) -> &'static [&'static str] {
        match self {
            Self::FunctionHall => &[
                "Marriage",
                "Reception",
                "Engagement",
                "Showering",
                "Birthday Party",
                "Meeting",
                "Conference",
                "Corporate Event",
                "Anniversary",
                "Other",
            ],
            Self::GuestHouse => &["Stay", "Family Stay", "Guest Accommodation"],
        }
    }

    /// Whether `event_type` is a valid booking purpose for this resource.
    pub fn is_valid_event_type(&self, event_type: &str) -> bool {
        self.event_types().contains(&event_type)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Reservation Status
// ============================================================================

/// Status of a stored reservation.
///
/// Only a fixed subset of statuses occupies the calendar; see
/// [`ReservationStatus::is_blocking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Confirmed,
    Blocked,
    Cancelled,
    Pending,
    Enquiry,
    /// Any status string the store may grow that this client does not know.
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    /// Parse a status from its wire string. Unrecognized strings map to
    /// [`ReservationStatus::Unknown`] rather than failing.
    pub fn parse(s: &str) -> Self {
        match s {
            "CONFIRMED" => Self::Confirmed,
            "BLOCKED" => Self::Blocked,
            "CANCELLED" => Self::Cancelled,
            "PENDING" => Self::Pending,
            "ENQUIRY" => Self::Enquiry,
            _ => Self::Unknown,
        }
    }

    /// Whether a reservation in this status occupies the calendar.
    ///
    /// Cancelled reservations still block: the venue keeps cancelled slots
    /// closed pending manual release. Pending and unknown statuses never
    /// block.
    pub fn is_blocking(&self) -> bool {
        match self {
            Self::Confirmed | Self::Blocked | Self::Cancelled => true,
            Self::Pending | Self::Enquiry | Self::Unknown => false,
        }
    }
}

// ============================================================================
// Time Slots
// ============================================================================

/// Time slot for a function hall booking. Unused by the guest house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSlot {
    #[default]
    FullDay,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeSlot {
    /// Parse a slot from its wire string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FULL_DAY" => Some(Self::FullDay),
            "MORNING" => Some(Self::Morning),
            "AFTERNOON" => Some(Self::Afternoon),
            "EVENING" => Some(Self::Evening),
            "NIGHT" => Some(Self::Night),
            _ => None,
        }
    }

    /// Get the slot as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullDay => "FULL_DAY",
            Self::Morning => "MORNING",
            Self::Afternoon => "AFTERNOON",
            Self::Evening => "EVENING",
            Self::Night => "NIGHT",
        }
    }

    /// Human-readable form for notification text ("FULL_DAY" -> "FULL DAY").
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

// ============================================================================
// Day Stamps
// ============================================================================

/// A calendar date at day precision, time-of-day discarded.
///
/// All availability comparisons happen on `DayStamp`s so that time
/// components in upstream data can never affect overlap decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayStamp(NaiveDate);

impl DayStamp {
    /// Wrap a date as a day stamp.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a date-like string to day precision.
    ///
    /// Accepts plain `yyyy-MM-dd` dates and RFC 3339 datetimes (the sheet
    /// stores both); any time component is dropped. Returns `None` for
    /// anything unparsable.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.date_naive()));
        }
        None
    }

    /// Today's day stamp in UTC.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// The underlying date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The stamp `days` days after this one.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + chrono::Duration::days(days))
    }

    /// Number of days from `self` to `other` (negative if `other` is earlier).
    pub fn days_until(&self, other: DayStamp) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl fmt::Display for DayStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

// ============================================================================
// Reservation Records
// ============================================================================

/// A reservation record exactly as fetched from the sheet, untrusted.
///
/// Every field is optional; the availability engine filters these down to
/// valid [`Reservation`]s and silently drops the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReservation {
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// A validated reservation that occupies the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub resource: Resource,
    pub status: ReservationStatus,
    /// First occupied day.
    pub start_day: DayStamp,
    /// Last occupied day, inclusive. Equals `start_day` for single-day
    /// reservations.
    pub end_day: DayStamp,
}

// ============================================================================
// Booking Requests
// ============================================================================

/// User-supplied booking form data, before sanitization and validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub resource: String,
    pub event_type: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub slot: Option<String>,
    pub name: String,
    pub phone: String,
    pub guests: i64,
    #[serde(default)]
    pub message: String,
}

/// A sanitized, validated booking as posted to the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedBooking {
    pub resource: Resource,
    pub event_type: String,
    pub start_date: DayStamp,
    pub end_date: DayStamp,
    pub slot: TimeSlot,
    pub name: String,
    pub phone: String,
    pub guests: u32,
    pub message: String,
    /// Submission time, ISO 8601.
    pub timestamp: DateTime<Utc>,
}
