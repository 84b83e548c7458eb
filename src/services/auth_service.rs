use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::{ProfileResponse, SigninPayload, SignupPayload, TokenResponse};
use crate::error::{Error, Result, INVALID_INPUT};
use crate::models::auth::Auth;
use crate::models::role::AuthRole;
use crate::services::{institute_service, user_service};
use crate::utils::{crypto, time, token};

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_secret: String) -> Self {
        Self { pool, jwt_secret }
    }

    /// Creates the credential row and the profile named by `role` in one
    /// transaction.
    pub async fn signup(&self, payload: SignupPayload) -> Result<ProfileResponse> {
        let email = payload.email.trim().to_lowercase();

        let taken = sqlx::query_scalar::<_, Uuid>("SELECT id FROM auth WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;
        if taken.is_some() {
            return Err(Error::Conflict("Email already registered".to_string()));
        }

        let password_hash = crypto::hash_password(&payload.password).map_err(|e| {
            Error::Internal(format!("password hashing failed: {}", e))
        })?;

        let mut tx = self.pool.begin().await?;
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO auth (email, password, role) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(payload.role.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let profile = match (payload.role, payload.user, payload.institute) {
            (AuthRole::User, Some(user), _) => {
                ProfileResponse::User(user_service::insert_profile(&mut *tx, id, user).await?)
            }
            (AuthRole::Institute, _, Some(institute)) => ProfileResponse::Institute(
                institute_service::insert_profile(&mut *tx, id, institute).await?,
            ),
            _ => return Err(Error::BadRequest(INVALID_INPUT.to_string())),
        };
        tx.commit().await?;

        tracing::info!(auth_id = %id, role = %payload.role, "Account created");
        Ok(profile)
    }

    pub async fn signin(&self, payload: SigninPayload) -> Result<TokenResponse> {
        let email = payload.email.trim().to_lowercase();

        let auth = sqlx::query_as::<_, Auth>(
            "SELECT id, email, password, role, created_at FROM auth WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let verified = crypto::verify_password(&payload.password, &auth.password)
            .map_err(|e| Error::Internal(format!("stored password hash unreadable: {}", e)))?;
        if !verified {
            tracing::warn!(auth_id = %auth.id, "Sign-in with wrong password");
            return Err(Error::Forbidden("Invalid credentials".to_string()));
        }

        let role: AuthRole = auth.role.parse().map_err(Error::Internal)?;
        let token = token::issue_token(auth.id, role, &self.jwt_secret, time::now())?;

        tracing::info!(auth_id = %auth.id, %role, "Signed in");
        Ok(TokenResponse { token })
    }
}
