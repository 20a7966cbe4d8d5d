//! Bearer credential decoding
//!
//! The username shown in the UI is always derived from the credential's
//! payload, never set independently. Only the claims are read here; the
//! server remains the authority on whether a credential is actually valid,
//! so signature and expiry checks are left to it.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Claims carried by the access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account username
    pub username: String,
    /// Issued at time (seconds since epoch)
    pub iat: u64,
    /// Expiration time (seconds since epoch)
    pub exp: u64,
}

impl Claims {
    /// Expiration time as a UTC timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp as i64, 0)
    }
}

/// Extract the claims from a bearer credential without verifying it
pub fn decode_claims(token: &str) -> ClientResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|err| ClientError::Token(err.to_string()))?;
    Ok(data.claims)
}
