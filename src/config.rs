//! Engine configuration
//!
//! Capacity ceilings and listing defaults. There are no credentials here;
//! identity and media transport belong to external providers.

use crate::error::{AppError, AppResult};
use crate::models::OPEN_MEETING_CAPACITY;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upper bound an owner may pick for a video conference.
    pub max_conference_users: u32,
    /// Fixed ceiling applied to anyone-can-join meetings.
    pub open_meeting_capacity: u32,
    /// Page size listings start with.
    pub default_page_size: usize,
    /// Page sizes the listing surfaces offer.
    pub page_size_options: Vec<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_conference_users: 50,
            open_meeting_capacity: OPEN_MEETING_CAPACITY,
            default_page_size: 5,
            page_size_options: vec![5, 10],
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.max_conference_users == 0 {
            return Err(AppError::config(
                "max_conference_users must be at least 1",
            ));
        }
        if self.open_meeting_capacity < self.max_conference_users {
            return Err(AppError::config(
                "open_meeting_capacity must not be below max_conference_users",
            ));
        }
        if self.page_size_options.is_empty() || self.page_size_options.contains(&0) {
            return Err(AppError::config("page size options must be non-zero"));
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            return Err(AppError::config(
                "default_page_size must be one of page_size_options",
            ));
        }
        Ok(())
    }
}

/// Validates the application configuration at startup.
pub fn validate_config(config: &AppConfig) -> AppResult<()> {
    info!("Validating engine configuration");
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_conference_cap() {
        let config = AppConfig {
            max_conference_users: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_default_page_size_outside_options() {
        let config = AppConfig {
            default_page_size: 7,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_page_size_option() {
        let config = AppConfig {
            page_size_options: vec![0, 5],
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
