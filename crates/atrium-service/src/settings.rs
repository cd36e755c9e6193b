//! # Settings
//!
//! The venue profile behind the invoice headers, plus raw key/value access
//! for the settings screen.

use tracing::info;

use atrium_core::VenueProfile;
use atrium_db::Database;

use crate::error::ServiceResult;

/// Venue configuration.
#[derive(Clone)]
pub struct SettingsService {
    db: Database,
}

impl SettingsService {
    pub fn new(db: Database) -> Self {
        SettingsService { db }
    }

    pub async fn venue_profile(&self) -> ServiceResult<VenueProfile> {
        Ok(self.db.settings().venue_profile().await?)
    }

    pub async fn save_venue_profile(&self, profile: &VenueProfile) -> ServiceResult<()> {
        self.db.settings().save_venue_profile(profile).await?;
        info!(venue = %profile.name, "venue profile saved");
        Ok(())
    }

    pub async fn get(&self, key: &str, default: &str) -> ServiceResult<String> {
        Ok(self.db.settings().get_or(key, default).await?)
    }

    pub async fn set(&self, key: &str, value: &str) -> ServiceResult<()> {
        Ok(self.db.settings().set(key, value).await?)
    }
}
