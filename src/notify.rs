//! Owner notification links.
//!
//! Builds the pre-filled WhatsApp deep link (`https://wa.me/...`) that
//! carries the booking summary to the venue owner. This module only
//! constructs the link; opening it is left to the caller, so submission
//! outcomes can be tested without firing the notification.

use url::Url;

use crate::booking::{sanitize_text, Resource, SubmittedBooking, TimeSlot};
use crate::error::NotifyError;

/// WhatsApp rejects very long links; anything over this is dropped
/// outright rather than truncated mid-message.
pub const MAX_LINK_LEN: usize = 8000;

/// Static details that appear in the notification footer.
#[derive(Debug, Clone)]
pub struct OwnerContact {
    /// WhatsApp number in international format without `+` (e.g. `9193...`).
    pub whatsapp: String,
    /// Phone number printed in the message footer.
    pub contact_phone: String,
    /// Venue name used in the sign-off.
    pub venue_name: String,
}

/// Render the booking summary text sent to the owner.
pub fn notification_text(owner: &OwnerContact, booking: &SubmittedBooking) -> String {
    // Free-text fields are sanitized again on the way out; the link must
    // stay safe even if a caller builds a SubmittedBooking by hand.
    let name = sanitize_text(&booking.name);
    let message = sanitize_text(&booking.message);

    let mut text = String::from("BOOKING REQUEST\n\n");
    text.push_str(&format!("Hello {},\n\n", name));
    text.push_str("Thank you for your booking request.\n\n");
    text.push_str(&format!("Venue: {}\n", booking.resource));
    text.push_str(&format!("Event Type: {}\n", sanitize_text(&booking.event_type)));
    text.push_str(&format!("Date: {}\n", booking.start_date));

    if booking.end_date != booking.start_date {
        text.push_str(&format!("Check-out Date: {}\n", booking.end_date));
    }

    if booking.resource == Resource::FunctionHall {
        text.push_str(&format!("Time Slot: {}\n", booking.slot.display_name()));
    }

    text.push_str(&format!("Guests: {}\n", booking.guests));

    if !message.is_empty() {
        text.push_str(&format!("\nYour Message: {}\n", message));
    }

    text.push_str("\nYour booking is currently under review. We will confirm within 24 hours.\n\n");
    text.push_str("For any assistance or enquiries, please contact:\n");
    text.push_str(&format!("{}\n\n", owner.contact_phone));
    text.push_str("We look forward to hosting your event.\n\n");
    text.push_str(&format!("Warm regards,\n{}", owner.venue_name));

    text
}

/// Build the `wa.me` deep link for a booking.
///
/// Returns an error if the encoded link exceeds [`MAX_LINK_LEN`]; an
/// oversized message is dropped, never truncated and sent.
pub fn whatsapp_link(
    owner: &OwnerContact,
    booking: &SubmittedBooking,
) -> Result<String, NotifyError> {
    let text = notification_text(owner, booking);

    let mut url = Url::parse(&format!("https://wa.me/{}", owner.whatsapp))
        .map_err(|e| NotifyError::InvalidUrl(e.to_string()))?;
    url.query_pairs_mut().append_pair("text", &text);

    let link: String = url.into();
    if link.len() > MAX_LINK_LEN {
        return Err(NotifyError::LinkTooLong {
            limit: MAX_LINK_LEN,
            got: link.len(),
        });
    }
    Ok(link)
}
