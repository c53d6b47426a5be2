//! Configuration settings for the Pavilion booking client.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::notify::OwnerContact;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheet: SheetConfig,
    pub owner: OwnerConfig,
    pub booking: BookingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("pavilion.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("pavilion/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".pavilion/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.sheet.url.is_empty() {
            return Err(ConfigError::MissingField("sheet.url".to_string()).into());
        }

        if self.owner.whatsapp.is_empty() {
            return Err(ConfigError::MissingField("owner.whatsapp".to_string()).into());
        }
        if !self.owner.whatsapp.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Invalid(
                "owner.whatsapp must be digits only, international format without '+'".to_string(),
            )
            .into());
        }

        if self.booking.calendar_horizon_days == 0 {
            return Err(
                ConfigError::Invalid("booking.calendar_horizon_days must be > 0".to_string())
                    .into(),
            );
        }

        Ok(())
    }

    /// Owner contact details for notification construction.
    pub fn owner_contact(&self) -> OwnerContact {
        OwnerContact {
            whatsapp: self.owner.whatsapp.clone(),
            contact_phone: self.owner.contact_phone.clone(),
            venue_name: self.owner.venue_name.clone(),
        }
    }
}

/// Sheet endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Web-app endpoint serving the reservation list and accepting
    /// booking submissions.
    pub url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            url: "https://script.google.com/macros/s/AKfycbxZJ-MTVLg9piRn1bjdfkFVvxH3L_70wzFsQx44XetUs-uv-lrcN7Qk13gahA3tkfEJ/exec".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Venue owner contact configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerConfig {
    /// WhatsApp number, international format without `+`.
    pub whatsapp: String,
    /// Contact number shown in the notification footer.
    pub contact_phone: String,
    /// Venue name used in the notification sign-off.
    pub venue_name: String,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            whatsapp: "919384376599".to_string(),
            contact_phone: "9384376599".to_string(),
            venue_name: "Banana Mahal".to_string(),
        }
    }
}

/// Booking flow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Minimum seconds between submissions.
    pub submit_cooldown_secs: u64,
    /// How many days ahead the blocked-day feed covers.
    pub calendar_horizon_days: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            submit_cooldown_secs: 3,
            calendar_horizon_days: 90,
        }
    }
}
