use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::database::query::{contains_pattern, fetch_page, Conditions};
use crate::dto::common_dto::{split_specialty_names, Paginated, Pagination};
use crate::dto::user_dto::{
    CreateUserPayload, UpdateUserPayload, UserListQuery, UserResponse, UserSearchQuery,
};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::role::AuthRole;
use crate::models::user::{User, USER_COLUMNS};
use crate::services::specialty_service::{
    load_links, push_specialty_filter, replace_links, LinkTable,
};
use crate::utils::ownership::{ensure_can_mutate, require_role};

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the profile for an account that signed up without one.
    pub async fn create(&self, caller: &Claims, payload: CreateUserPayload) -> Result<UserResponse> {
        require_role(caller, AuthRole::User, "create user profiles")?;

        let mut tx = self.pool.begin().await?;
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1")
            .bind(caller.id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict("User profile already exists".to_string()));
        }

        let user = insert_profile(&mut *tx, caller.id, payload).await?;
        tx.commit().await?;

        tracing::info!(user_id = %user.id, "User profile created");
        Ok(user)
    }

    pub async fn list(&self, query: UserListQuery) -> Result<Paginated<UserResponse>> {
        let pagination = Pagination::new(query.page, query.page_size);
        let specialties = split_specialty_names(query.specialties.as_deref());

        let (users, total) = fetch_page::<User, _>(
            &self.pool,
            USER_COLUMNS,
            "users",
            "created_at DESC",
            pagination,
            |builder| {
                let mut conditions = Conditions::new();
                if let Some(specialty) = &query.specialty {
                    conditions
                        .next(builder)
                        .push("LOWER(specialty) = LOWER(")
                        .push_bind(specialty.trim().to_string())
                        .push(")");
                }
                push_specialty_filter(builder, &mut conditions, LinkTable::User, "users", &specialties);
                if let Some(location) = &query.location {
                    conditions
                        .next(builder)
                        .push("LOWER(location) = LOWER(")
                        .push_bind(location.trim().to_string())
                        .push(")");
                }
                if let Some(role) = query.role {
                    conditions.next(builder).push("role = ").push_bind(role.as_str());
                }
                if let Some(verified) = query.verified {
                    conditions.next(builder).push("verified = ").push_bind(verified);
                }
                if let Some(gender) = &query.gender {
                    conditions
                        .next(builder)
                        .push("LOWER(gender) = LOWER(")
                        .push_bind(gender.trim().to_string())
                        .push(")");
                }
                if let Some(name) = &query.name {
                    conditions
                        .next(builder)
                        .push("name ILIKE ")
                        .push_bind(contains_pattern(name));
                }
            },
        )
        .await?;

        let items = self.with_specialties(users).await?;
        Ok(Paginated::new(items, pagination, total))
    }

    pub async fn search(&self, query: UserSearchQuery) -> Result<Paginated<UserResponse>> {
        let pagination = Pagination::new(query.page, query.page_size);
        let needle = contains_pattern(&query.q);

        let (users, total) = fetch_page::<User, _>(
            &self.pool,
            USER_COLUMNS,
            "users",
            "created_at DESC",
            pagination,
            |builder| {
                builder
                    .push(" WHERE (name ILIKE ")
                    .push_bind(needle.clone())
                    .push(" OR specialty ILIKE ")
                    .push_bind(needle.clone())
                    .push(" OR location ILIKE ")
                    .push_bind(needle.clone())
                    .push(")");
            },
        )
        .await?;

        let items = self.with_specialties(users).await?;
        Ok(Paginated::new(items, pagination, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<UserResponse> {
        let user = self
            .find(id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        let mut items = self.with_specialties(vec![user]).await?;
        items
            .pop()
            .ok_or_else(|| Error::Internal("user vanished while loading specialties".to_string()))
    }

    pub async fn update(
        &self,
        caller: &Claims,
        id: Uuid,
        payload: UpdateUserPayload,
    ) -> Result<UserResponse> {
        let owner = self.find(id).await?.map(|user| user.id);
        ensure_can_mutate(caller, owner, Some(AuthRole::User), "User")?;

        let mut tx = self.pool.begin().await?;
        let sql = format!(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                specialty = COALESCE($4, specialty),
                gender = COALESCE($5, gender),
                role = COALESCE($6, role),
                headline = COALESCE($7, headline),
                about = COALESCE($8, about)
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(payload.name)
            .bind(payload.location)
            .bind(payload.specialty)
            .bind(payload.gender)
            .bind(payload.role.map(|role| role.as_str()))
            .bind(payload.headline)
            .bind(payload.about)
            .fetch_one(&mut *tx)
            .await?;

        let specialties = match payload.specialties {
            Some(names) => replace_links(&mut *tx, LinkTable::User, id, &names).await?,
            None => load_links(&mut *tx, LinkTable::User, &[id])
                .await?
                .remove(&id)
                .unwrap_or_default(),
        };
        tx.commit().await?;

        tracing::info!(user_id = %id, "User profile updated");
        Ok(UserResponse::new(user, specialties))
    }

    /// Removes the whole account; the profile and its links cascade.
    pub async fn delete(&self, caller: &Claims, id: Uuid) -> Result<()> {
        let owner = self.find(id).await?.map(|user| user.id);
        ensure_can_mutate(caller, owner, Some(AuthRole::User), "User")?;

        sqlx::query("DELETE FROM auth WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(user_id = %id, "User account deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn with_specialties(&self, users: Vec<User>) -> Result<Vec<UserResponse>> {
        let ids: Vec<Uuid> = users.iter().map(|user| user.id).collect();
        let mut links = load_links(&self.pool, LinkTable::User, &ids).await?;
        Ok(users
            .into_iter()
            .map(|user| {
                let specialties = links.remove(&user.id).unwrap_or_default();
                UserResponse::new(user, specialties)
            })
            .collect())
    }
}

/// Inserts the profile row and its specialty links on the caller's
/// transaction. Shared by signup and profile creation.
pub async fn insert_profile(
    conn: &mut PgConnection,
    id: Uuid,
    payload: CreateUserPayload,
) -> Result<UserResponse> {
    let sql = format!(
        r#"
        INSERT INTO users (id, name, location, specialty, gender, role, headline, about)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        USER_COLUMNS
    );
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .bind(payload.name.trim())
        .bind(payload.location.trim())
        .bind(payload.specialty.trim())
        .bind(payload.gender.trim())
        .bind(payload.role.as_str())
        .bind(payload.headline.as_deref())
        .bind(payload.about.as_deref())
        .fetch_one(&mut *conn)
        .await?;

    let specialties = replace_links(conn, LinkTable::User, id, &payload.specialties).await?;
    Ok(UserResponse::new(user, specialties))
}
