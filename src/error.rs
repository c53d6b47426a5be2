//! Error types for the Pavilion booking client.

use thiserror::Error;

/// Main error type for Pavilion operations.
#[derive(Error, Debug)]
pub enum PavilionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors talking to the sheet-backed reservation store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse reservation list: {0}")]
    Decode(String),
}

/// Rejections of user-supplied booking input.
///
/// Each variant names the field or rule that failed so the caller can show
/// a specific message per field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid venue selection")]
    InvalidResource,

    #[error("Invalid event type for this venue")]
    InvalidEventType,

    #[error("Invalid time slot")]
    InvalidSlot,

    #[error("Invalid start date format (expected yyyy-MM-dd)")]
    InvalidStartDate,

    #[error("Invalid end date format (expected yyyy-MM-dd)")]
    InvalidEndDate,

    #[error("Cannot book dates in the past")]
    DateInPast,

    #[error("Check-out must be after check-in")]
    CheckOutNotAfterCheckIn,

    #[error("Booking period cannot exceed {0} days")]
    StayTooLong(i64),

    #[error("Name must be between 2 and 100 characters")]
    InvalidName,

    #[error("Phone must be a 10-digit number starting with 6-9")]
    InvalidPhone,

    #[error("Number of guests must be between 1 and 10000")]
    InvalidGuests,

    #[error("Message is too long (maximum 500 characters)")]
    MessageTooLong,

    #[error("Selected dates are no longer available")]
    NotAvailable,

    #[error("Please wait a few seconds before submitting again")]
    SubmitCooldown,
}

/// Errors constructing the owner notification link.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Notification link exceeds {limit} characters ({got})")]
    LinkTooLong { limit: usize, got: usize },

    #[error("Invalid notification URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Pavilion operations.
pub type Result<T> = std::result::Result<T, PavilionError>;
