//! Configuration loading and validation.

mod settings;

pub use settings::{BookingConfig, Config, OwnerConfig, SheetConfig};
