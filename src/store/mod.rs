//! Reservation store: the trait seam and the sheet-backed HTTP
//! implementation.

mod sheet;
mod traits;

pub use sheet::SheetStore;
pub use traits::{ReservationStore, SubmitOutcome};
