//! # Authentication
//!
//! PIN login: the numeric PIN is the whole credential and resolves to a
//! role that gates which screens the presentation layer offers.

use tracing::{info, warn};

use atrium_core::validation::validate_pin;
use atrium_core::Role;
use atrium_db::Database;

use crate::error::{ServiceError, ServiceResult};

/// PIN login and rotation.
#[derive(Clone)]
pub struct AuthService {
    db: Database,
}

impl AuthService {
    pub fn new(db: Database) -> Self {
        AuthService { db }
    }

    /// Resolves a PIN to a role, or [`ServiceError::InvalidPin`].
    pub async fn login(&self, pin: &str) -> ServiceResult<Role> {
        validate_pin(pin)?;

        match self.db.settings().verify_pin(pin).await? {
            Some(role) => {
                info!(?role, "login succeeded");
                Ok(role)
            }
            None => {
                warn!("login failed: unknown PIN");
                Err(ServiceError::InvalidPin)
            }
        }
    }

    /// Rotates the PIN for every holder of a role.
    pub async fn update_pin(&self, role: Role, new_pin: &str) -> ServiceResult<()> {
        validate_pin(new_pin)?;
        self.db.settings().update_pin(role, new_pin).await?;
        info!(?role, "PIN updated");
        Ok(())
    }
}
