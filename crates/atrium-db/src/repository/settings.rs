//! # Settings Repository
//!
//! Key/value settings (the venue profile lives here) and the PIN users
//! table behind the login screen.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use atrium_core::{Role, User, VenueProfile};

// Venue profile keys
const KEY_VENUE_NAME: &str = "venue_name";
const KEY_VENUE_ADDRESS: &str = "venue_address";
const KEY_VENUE_TAX_ID: &str = "venue_tax_id";
const KEY_VENUE_PHONE: &str = "venue_phone";

/// Repository for settings and user database operations.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    // =========================================================================
    // Key/Value Settings
    // =========================================================================

    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Fetches a setting, falling back to a default when unset.
    pub async fn get_or(&self, key: &str, default: &str) -> DbResult<String> {
        Ok(self.get(key).await?.unwrap_or_else(|| default.to_string()))
    }

    /// Saves or replaces a setting.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key, "saving setting");

        sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// The venue identity printed on invoice headers. Unset fields come
    /// back empty.
    pub async fn venue_profile(&self) -> DbResult<VenueProfile> {
        Ok(VenueProfile {
            name: self.get_or(KEY_VENUE_NAME, "").await?,
            address: self.get_or(KEY_VENUE_ADDRESS, "").await?,
            tax_id: self.get_or(KEY_VENUE_TAX_ID, "").await?,
            phone: self.get_or(KEY_VENUE_PHONE, "").await?,
        })
    }

    pub async fn save_venue_profile(&self, profile: &VenueProfile) -> DbResult<()> {
        self.set(KEY_VENUE_NAME, &profile.name).await?;
        self.set(KEY_VENUE_ADDRESS, &profile.address).await?;
        self.set(KEY_VENUE_TAX_ID, &profile.tax_id).await?;
        self.set(KEY_VENUE_PHONE, &profile.phone).await?;
        Ok(())
    }

    // =========================================================================
    // Users (PIN login)
    // =========================================================================

    /// Resolves a PIN to its user's role; `None` for an unknown PIN.
    pub async fn verify_pin(&self, pin: &str) -> DbResult<Option<Role>> {
        let role: Option<Role> = sqlx::query_scalar("SELECT role FROM users WHERE pin = ?1")
            .bind(pin)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role)
    }

    /// Changes the PIN for every user holding the role.
    pub async fn update_pin(&self, role: Role, new_pin: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET pin = ?2 WHERE role = ?1")
            .bind(role)
            .bind(new_pin)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User with role", format!("{role:?}")));
        }
        Ok(())
    }

    /// Adds a user. A duplicate username surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn add_user(&self, username: &str, pin: &str, role: Role) -> DbResult<User> {
        let user = User {
            id: crate::repository::new_id(),
            username: username.to_string(),
            pin: pin.to_string(),
            role,
        };

        sqlx::query("INSERT INTO users (id, username, pin, role) VALUES (?1, ?2, ?3, ?4)")
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.pin)
            .bind(user.role)
            .execute(&self.pool)
            .await?;

        Ok(user)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn settings_round_trip_with_default() {
        let db = test_db().await;
        let settings = db.settings();

        assert_eq!(settings.get("venue_name").await.unwrap(), None);
        assert_eq!(
            settings.get_or("venue_name", "GRAND HOTEL").await.unwrap(),
            "GRAND HOTEL"
        );

        settings.set("venue_name", "Atrium Suites").await.unwrap();
        settings.set("venue_name", "Atrium Suites & Spa").await.unwrap();
        assert_eq!(
            settings.get("venue_name").await.unwrap().as_deref(),
            Some("Atrium Suites & Spa")
        );
    }

    #[tokio::test]
    async fn venue_profile_round_trip() {
        let db = test_db().await;
        let settings = db.settings();

        let profile = VenueProfile {
            name: "Atrium Suites".to_string(),
            address: "123 Hospitality Lane".to_string(),
            tax_id: "27AAAAA0000A1Z5".to_string(),
            phone: "9876543210".to_string(),
        };
        settings.save_venue_profile(&profile).await.unwrap();

        let loaded = settings.venue_profile().await.unwrap();
        assert_eq!(loaded.name, "Atrium Suites");
        assert_eq!(loaded.tax_id, "27AAAAA0000A1Z5");
    }

    #[tokio::test]
    async fn pin_login_and_rotation() {
        let db = test_db().await;
        let settings = db.settings();

        // Default admin comes from the migration
        assert_eq!(
            settings.verify_pin("1234").await.unwrap(),
            Some(Role::Admin)
        );
        assert_eq!(settings.verify_pin("0000").await.unwrap(), None);

        settings.update_pin(Role::Admin, "9876").await.unwrap();
        assert_eq!(settings.verify_pin("1234").await.unwrap(), None);
        assert_eq!(
            settings.verify_pin("9876").await.unwrap(),
            Some(Role::Admin)
        );
    }

    #[tokio::test]
    async fn cashier_user_gets_their_role() {
        let db = test_db().await;
        let settings = db.settings();

        settings.add_user("cashier", "4321", Role::Cashier).await.unwrap();
        assert_eq!(
            settings.verify_pin("4321").await.unwrap(),
            Some(Role::Cashier)
        );

        // Usernames are unique
        assert!(settings.add_user("cashier", "1111", Role::Cashier).await.is_err());
    }
}
