use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::db::crud::Model;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub country_code: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Model for AccountUser {
    const TABLE: &'static str = "public.account_user";
}

/// Registration payload as received on the wire. The password stays wrapped
/// until hashing.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub username: Option<String>,
    pub password: SecretBox<String>,
    pub country_code: String,
    pub phone: String,
}

impl RegisterUser {
    /// Derive-based field rules plus the checks the derive cannot express:
    /// password length on a wrapped secret and the phone/country-code
    /// pairing.
    pub fn validate_payload(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.password.expose_secret().chars().count() < 8 {
            let mut err = ValidationError::new("length");
            err.message = Some("Password must be at least 8 characters".into());
            errors.add("password", err);
        }

        if let Err(err) = validate_phone(&self.country_code, &self.phone) {
            errors.add("phone", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Default username is the local part of the email.
    pub fn username_or_default(&self) -> String {
        match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }
}

/// Validated creation input for the CRUD base; carries the hash, never the
/// raw password.
#[derive(Debug)]
pub struct NewAccountUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub country_code: String,
    pub phone: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccountUser {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserLogin {
    #[validate(email)]
    pub email: String,
    pub password: SecretBox<String>,
}

/// Accepts a dialing prefix (`+91`) or a two-letter region code (`IN`),
/// then sanity-checks the subscriber number.
fn validate_phone(country_code: &str, phone: &str) -> Result<(), ValidationError> {
    let prefix = country_code.strip_prefix('+').unwrap_or(country_code);
    let dialing_prefix =
        !prefix.is_empty() && prefix.len() <= 3 && prefix.chars().all(|c| c.is_ascii_digit());
    let region_code = prefix.len() == 2 && prefix.chars().all(|c| c.is_ascii_alphabetic());
    if !dialing_prefix && !region_code {
        let mut err = ValidationError::new("country_code");
        err.message = Some("Invalid country code".into());
        return Err(err);
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let well_formed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-'));
    if !well_formed || !(6..=14).contains(&digits) {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number for country code".into());
        return Err(err);
    }

    Ok(())
}
