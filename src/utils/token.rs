use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::models::role::AuthRole;

pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

pub fn issue_token(id: Uuid, role: AuthRole, secret: &str, issued_at: DateTime<Utc>) -> Result<String> {
    let iat = issued_at.timestamp();
    let claims = Claims {
        id,
        role,
        iat,
        exp: (issued_at + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Returns the embedded claims when the signature checks out and `now` is
/// strictly before `exp`.
pub fn verify_token(token: &str, secret: &str, now: DateTime<Utc>) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked against the caller's clock below, without leeway.
    validation.validate_exp = false;
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()?;

    (now.timestamp() < data.claims.exp).then_some(data.claims)
}
