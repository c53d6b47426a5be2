//! Input sanitization and booking form validation.
//!
//! Free-text fields are stripped of markup and script fragments before
//! they reach the sheet or the notification text. Validation walks the
//! same chain of checks the booking form enforces, ending with an
//! availability re-check against the current ledger so a stale form
//! cannot submit a conflicting booking unchecked.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use tracing::debug;

use crate::error::ValidationError;

use super::availability::ReservationLedger;
use super::types::{BookingRequest, DayStamp, Resource, SubmittedBooking, TimeSlot};

/// Maximum name length after sanitization.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum free-text message length.
pub const MAX_MESSAGE_LEN: usize = 500;
/// Maximum guest count.
pub const MAX_GUESTS: i64 = 10_000;
/// Longest permitted guest house stay, in days.
pub const MAX_STAY_DAYS: i64 = 365;

static ANGLE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>]").expect("Invalid regex"));

static JS_PROTOCOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("Invalid regex"));

static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+\s*=").expect("Invalid regex"));

static ESCAPED_ANGLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&lt;|&gt;").expect("Invalid regex"));

static STRICT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid regex"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("Invalid regex"));

/// Strip markup and script fragments from free text.
///
/// Removes angle brackets, `javascript:` protocol prefixes, inline
/// event-handler fragments (`onclick=` and friends) and pre-escaped
/// angle brackets, then trims. Length limits are enforced separately by
/// [`BookingRequest::validate`].
pub fn sanitize_text(input: &str) -> String {
    let cleaned = ANGLE_BRACKETS.replace_all(input, "");
    let cleaned = JS_PROTOCOL.replace_all(&cleaned, "");
    let cleaned = EVENT_HANDLER.replace_all(&cleaned, "");
    let cleaned = ESCAPED_ANGLES.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

/// Keep only digits, capped at 10 characters.
pub fn sanitize_phone(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).take(10).collect()
}

/// Strict `yyyy-MM-dd` form parse: shape check first, then calendar
/// validity.
fn parse_form_date(s: &str) -> Option<DayStamp> {
    if !STRICT_DATE.is_match(s) {
        return None;
    }
    DayStamp::parse(s)
}

impl BookingRequest {
    /// Validate and sanitize this request into a [`SubmittedBooking`].
    ///
    /// Checks run in form order: resource, event type, dates, slot, then
    /// contact fields, then the resource-specific range rules, and
    /// finally a fresh availability check against `ledger`. The first
    /// failing rule is returned; nothing is mutated on failure.
    pub fn validate(
        &self,
        ledger: &ReservationLedger,
        today: DayStamp,
    ) -> Result<SubmittedBooking, ValidationError> {
        let resource =
            Resource::parse(&self.resource).ok_or(ValidationError::InvalidResource)?;

        if !resource.is_valid_event_type(&self.event_type) {
            return Err(ValidationError::InvalidEventType);
        }

        let start_date =
            parse_form_date(&self.start_date).ok_or(ValidationError::InvalidStartDate)?;

        // End date defaults to the start for single-day bookings; the
        // guest house requires an explicit, well-formed one.
        let end_date = match (&resource, self.end_date.as_deref()) {
            (Resource::GuestHouse, Some(s)) => {
                parse_form_date(s).ok_or(ValidationError::InvalidEndDate)?
            }
            (Resource::GuestHouse, None) => start_date,
            (Resource::FunctionHall, _) => start_date,
        };

        let slot = match resource {
            Resource::FunctionHall => match self.slot.as_deref() {
                Some(s) => TimeSlot::parse(s).ok_or(ValidationError::InvalidSlot)?,
                None => TimeSlot::FullDay,
            },
            // Slots do not apply to the guest house.
            Resource::GuestHouse => TimeSlot::FullDay,
        };

        let name = sanitize_text(&self.name);
        if name.chars().count() < 2 || name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::InvalidName);
        }

        let phone = sanitize_phone(&self.phone);
        if !PHONE.is_match(&phone) {
            return Err(ValidationError::InvalidPhone);
        }

        if self.guests < 1 || self.guests > MAX_GUESTS {
            return Err(ValidationError::InvalidGuests);
        }

        let message = sanitize_text(&self.message);
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(ValidationError::MessageTooLong);
        }

        if start_date < today {
            return Err(ValidationError::DateInPast);
        }

        if resource == Resource::GuestHouse {
            if end_date <= start_date {
                return Err(ValidationError::CheckOutNotAfterCheckIn);
            }
            if start_date.days_until(end_date) > MAX_STAY_DAYS {
                return Err(ValidationError::StayTooLong(MAX_STAY_DAYS));
            }
        }

        // Availability is re-verified here, immediately before submission,
        // against whatever snapshot the caller holds. This narrows but
        // cannot eliminate the double-booking race of a client-only check.
        let end_for_check = (resource == Resource::GuestHouse).then_some(end_date);
        if !ledger.is_available(resource, start_date, end_for_check) {
            return Err(ValidationError::NotAvailable);
        }

        debug!(resource = %resource, start = %start_date, end = %end_date, "Booking request validated");
        Ok(SubmittedBooking {
            resource,
            event_type: self.event_type.clone(),
            start_date,
            end_date,
            slot,
            name,
            phone,
            guests: self.guests as u32,
            message,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::types::RawReservation;

    fn day(s: &str) -> DayStamp {
        DayStamp::parse(s).unwrap()
    }

    fn hall_request() -> BookingRequest {
        BookingRequest {
            resource: "Function Hall".to_string(),
            event_type: "Marriage".to_string(),
            start_date: "2026-03-01".to_string(),
            end_date: None,
            slot: Some("FULL_DAY".to_string()),
            name: "Asha Kumar".to_string(),
            phone: "9384376599".to_string(),
            guests: 250,
            message: "Evening ceremony".to_string(),
        }
    }

    fn guest_house_request() -> BookingRequest {
        BookingRequest {
            resource: "Guest House".to_string(),
            event_type: "Family Stay".to_string(),
            start_date: "2026-02-20".to_string(),
            end_date: Some("2026-02-22".to_string()),
            slot: None,
            name: "Asha Kumar".to_string(),
            phone: "9384376599".to_string(),
            guests: 4,
            message: String::new(),
        }
    }

    #[test]
    fn test_sanitize_text_strips_markup() {
        assert_eq!(
            sanitize_text("<script>alert('x')</script> hello"),
            "scriptalert('x')/script hello"
        );
        assert_eq!(sanitize_text("JaVaScRiPt:evil()"), "evil()");
        assert_eq!(sanitize_text("a onclick =b"), "a b");
        assert_eq!(sanitize_text("  &lt;b&gt; bold  "), "b bold");
    }

    #[test]
    fn test_sanitize_phone() {
        assert_eq!(sanitize_phone("+91 93843-76599"), "9193843765");
        assert_eq!(sanitize_phone("9384376599"), "9384376599");
        assert_eq!(sanitize_phone("no digits"), "");
    }

    #[test]
    fn test_valid_hall_booking() {
        let ledger = ReservationLedger::empty();
        let booking = hall_request().validate(&ledger, day("2026-01-01")).unwrap();
        assert_eq!(booking.resource, Resource::FunctionHall);
        assert_eq!(booking.end_date, booking.start_date);
        assert_eq!(booking.slot, TimeSlot::FullDay);
    }

    #[test]
    fn test_valid_guest_house_booking() {
        let ledger = ReservationLedger::empty();
        let booking = guest_house_request()
            .validate(&ledger, day("2026-01-01"))
            .unwrap();
        assert_eq!(booking.resource, Resource::GuestHouse);
        assert_eq!(booking.end_date, day("2026-02-22"));
    }

    #[test]
    fn test_rejects_unknown_resource_and_event_type() {
        let ledger = ReservationLedger::empty();
        let today = day("2026-01-01");

        let mut req = hall_request();
        req.resource = "Rooftop".to_string();
        assert_eq!(
            req.validate(&ledger, today),
            Err(ValidationError::InvalidResource)
        );

        let mut req = hall_request();
        req.event_type = "Stay".to_string(); // guest house purpose, wrong venue
        assert_eq!(
            req.validate(&ledger, today),
            Err(ValidationError::InvalidEventType)
        );
    }

    #[test]
    fn test_rejects_malformed_dates() {
        let ledger = ReservationLedger::empty();
        let today = day("2026-01-01");

        let mut req = hall_request();
        req.start_date = "01/03/2026".to_string();
        assert_eq!(
            req.validate(&ledger, today),
            Err(ValidationError::InvalidStartDate)
        );

        let mut req = guest_house_request();
        req.end_date = Some("2026-2-22".to_string());
        assert_eq!(
            req.validate(&ledger, today),
            Err(ValidationError::InvalidEndDate)
        );
    }

    #[test]
    fn test_rejects_past_dates() {
        let ledger = ReservationLedger::empty();
        assert_eq!(
            hall_request().validate(&ledger, day("2026-03-02")),
            Err(ValidationError::DateInPast)
        );
    }

    #[test]
    fn test_guest_house_range_rules() {
        let ledger = ReservationLedger::empty();
        let today = day("2026-01-01");

        let mut req = guest_house_request();
        req.end_date = Some("2026-02-20".to_string());
        assert_eq!(
            req.validate(&ledger, today),
            Err(ValidationError::CheckOutNotAfterCheckIn)
        );

        // Missing checkout collapses to start and fails the same rule.
        let mut req = guest_house_request();
        req.end_date = None;
        assert_eq!(
            req.validate(&ledger, today),
            Err(ValidationError::CheckOutNotAfterCheckIn)
        );

        let mut req = guest_house_request();
        req.end_date = Some("2027-02-25".to_string());
        assert_eq!(
            req.validate(&ledger, today),
            Err(ValidationError::StayTooLong(MAX_STAY_DAYS))
        );
    }

    #[test]
    fn test_contact_field_rules() {
        let ledger = ReservationLedger::empty();
        let today = day("2026-01-01");

        let mut req = hall_request();
        req.name = "<>".to_string();
        assert_eq!(req.validate(&ledger, today), Err(ValidationError::InvalidName));

        let mut req = hall_request();
        req.phone = "1234567890".to_string(); // leading digit out of range
        assert_eq!(req.validate(&ledger, today), Err(ValidationError::InvalidPhone));

        let mut req = hall_request();
        req.phone = "938437".to_string();
        assert_eq!(req.validate(&ledger, today), Err(ValidationError::InvalidPhone));

        let mut req = hall_request();
        req.guests = 0;
        assert_eq!(req.validate(&ledger, today), Err(ValidationError::InvalidGuests));

        let mut req = hall_request();
        req.guests = 10_001;
        assert_eq!(req.validate(&ledger, today), Err(ValidationError::InvalidGuests));

        let mut req = hall_request();
        req.message = "x".repeat(501);
        assert_eq!(
            req.validate(&ledger, today),
            Err(ValidationError::MessageTooLong)
        );
    }

    #[test]
    fn test_invalid_slot_rejected_and_defaulted() {
        let ledger = ReservationLedger::empty();
        let today = day("2026-01-01");

        let mut req = hall_request();
        req.slot = Some("MIDNIGHT".to_string());
        assert_eq!(req.validate(&ledger, today), Err(ValidationError::InvalidSlot));

        let mut req = hall_request();
        req.slot = None;
        let booking = req.validate(&ledger, today).unwrap();
        assert_eq!(booking.slot, TimeSlot::FullDay);
    }

    #[test]
    fn test_availability_rechecked_before_submit() {
        let ledger = ReservationLedger::from_raw(&[RawReservation {
            resource: Some("Guest House".to_string()),
            status: Some("CONFIRMED".to_string()),
            start_date: Some("2026-02-17".to_string()),
            end_date: Some("2026-02-20".to_string()),
        }]);
        // Candidate starts on the existing checkout day: still a conflict.
        assert_eq!(
            guest_house_request().validate(&ledger, day("2026-01-01")),
            Err(ValidationError::NotAvailable)
        );
    }

    #[test]
    fn test_name_and_message_are_sanitized_in_output() {
        let ledger = ReservationLedger::empty();
        let mut req = hall_request();
        req.name = " <b>Asha</b> ".to_string();
        req.message = "see javascript:alert(1)".to_string();
        let booking = req.validate(&ledger, day("2026-01-01")).unwrap();
        assert_eq!(booking.name, "bAsha/b");
        assert_eq!(booking.message, "see alert(1)");
    }
}
