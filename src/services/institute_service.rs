use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::database::query::{contains_pattern, fetch_page, Conditions};
use crate::dto::common_dto::{split_specialty_names, Paginated, Pagination};
use crate::dto::institute_dto::{
    CreateInstitutePayload, InstituteListQuery, InstituteResponse, UpdateInstitutePayload,
};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::institute::{Institute, INSTITUTE_COLUMNS};
use crate::models::role::AuthRole;
use crate::services::specialty_service::{
    load_links, push_specialty_filter, replace_links, LinkTable,
};
use crate::utils::ownership::{ensure_can_mutate, require_role};

#[derive(Clone)]
pub struct InstituteService {
    pool: PgPool,
}

impl InstituteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        caller: &Claims,
        payload: CreateInstitutePayload,
    ) -> Result<InstituteResponse> {
        require_role(caller, AuthRole::Institute, "create institute profiles")?;

        let mut tx = self.pool.begin().await?;
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM institutes WHERE id = $1")
            .bind(caller.id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict("Institute profile already exists".to_string()));
        }

        let institute = insert_profile(&mut *tx, caller.id, payload).await?;
        tx.commit().await?;

        tracing::info!(institute_id = %institute.id, "Institute profile created");
        Ok(institute)
    }

    /// Backs both the listing and the search endpoint; they accept the same
    /// filters.
    pub async fn list(&self, query: InstituteListQuery) -> Result<Paginated<InstituteResponse>> {
        let pagination = Pagination::new(query.page, query.page_size);
        let specialties = split_specialty_names(query.specialty_filter());

        let (institutes, total) = fetch_page::<Institute, _>(
            &self.pool,
            INSTITUTE_COLUMNS,
            "institutes",
            "created_at DESC",
            pagination,
            |builder| {
                let mut conditions = Conditions::new();
                push_specialty_filter(
                    builder,
                    &mut conditions,
                    LinkTable::Institute,
                    "institutes",
                    &specialties,
                );
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
                if let Some(name) = &query.name {
                    conditions
                        .next(builder)
                        .push("name ILIKE ")
                        .push_bind(contains_pattern(name));
                }
            },
        )
        .await?;

        let items = with_specialties(&self.pool, institutes).await?;
        Ok(Paginated::new(items, pagination, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<InstituteResponse> {
        let mut found = load_responses(&self.pool, &[id]).await?;
        found
            .remove(&id)
            .ok_or_else(|| Error::NotFound("Institute not found".to_string()))
    }

    pub async fn update(
        &self,
        caller: &Claims,
        id: Uuid,
        payload: UpdateInstitutePayload,
    ) -> Result<InstituteResponse> {
        let owner = self.find_id(id).await?;
        ensure_can_mutate(caller, owner, Some(AuthRole::Institute), "Institute")?;

        let mut tx = self.pool.begin().await?;
        let sql = format!(
            r#"
            UPDATE institutes
            SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                contact_email = COALESCE($4, contact_email),
                contact_number = COALESCE($5, contact_number),
                role = COALESCE($6, role),
                affiliated_university = COALESCE($7, affiliated_university),
                year_established = COALESCE($8, year_established),
                ownership = COALESCE($9, ownership),
                headline = COALESCE($10, headline),
                about = COALESCE($11, about)
            WHERE id = $1
            RETURNING {}
            "#,
            INSTITUTE_COLUMNS
        );
        let institute = sqlx::query_as::<_, Institute>(&sql)
            .bind(id)
            .bind(payload.name)
            .bind(payload.location)
            .bind(payload.contact_email)
            .bind(payload.contact_number)
            .bind(payload.role.map(|role| role.as_str()))
            .bind(payload.affiliated_university)
            .bind(payload.year_established)
            .bind(payload.ownership)
            .bind(payload.headline)
            .bind(payload.about)
            .fetch_one(&mut *tx)
            .await?;

        let specialties = match payload.specialties {
            Some(names) => replace_links(&mut *tx, LinkTable::Institute, id, &names).await?,
            None => load_links(&mut *tx, LinkTable::Institute, &[id])
                .await?
                .remove(&id)
                .unwrap_or_default(),
        };
        tx.commit().await?;

        tracing::info!(institute_id = %id, "Institute profile updated");
        Ok(InstituteResponse::new(institute, specialties))
    }

    /// Removes the whole account; jobs, applications and links cascade.
    pub async fn delete(&self, caller: &Claims, id: Uuid) -> Result<()> {
        let owner = self.find_id(id).await?;
        ensure_can_mutate(caller, owner, Some(AuthRole::Institute), "Institute")?;

        sqlx::query("DELETE FROM auth WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(institute_id = %id, "Institute account deleted");
        Ok(())
    }

    async fn find_id(&self, id: Uuid) -> Result<Option<Uuid>> {
        let found = sqlx::query_scalar::<_, Uuid>("SELECT id FROM institutes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found)
    }
}

pub async fn insert_profile(
    conn: &mut PgConnection,
    id: Uuid,
    payload: CreateInstitutePayload,
) -> Result<InstituteResponse> {
    let sql = format!(
        r#"
        INSERT INTO institutes (
            id, name, location, contact_email, contact_number, role,
            affiliated_university, year_established, ownership, headline, about
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {}
        "#,
        INSTITUTE_COLUMNS
    );
    let institute = sqlx::query_as::<_, Institute>(&sql)
        .bind(id)
        .bind(payload.name.trim())
        .bind(payload.location.trim())
        .bind(payload.contact_email.trim())
        .bind(payload.contact_number.trim())
        .bind(payload.role.as_str())
        .bind(payload.affiliated_university.as_deref())
        .bind(payload.year_established)
        .bind(payload.ownership.as_deref())
        .bind(payload.headline.as_deref())
        .bind(payload.about.as_deref())
        .fetch_one(&mut *conn)
        .await?;

    let specialties = replace_links(conn, LinkTable::Institute, id, &payload.specialties).await?;
    Ok(InstituteResponse::new(institute, specialties))
}

/// Loads institutes with their specialties, keyed by id. Ids with no row
/// are absent from the map.
pub async fn load_responses(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, InstituteResponse>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let sql = format!("SELECT {} FROM institutes WHERE id = ANY($1)", INSTITUTE_COLUMNS);
    let institutes = sqlx::query_as::<_, Institute>(&sql)
        .bind(ids)
        .fetch_all(pool)
        .await?;

    Ok(with_specialties(pool, institutes)
        .await?
        .into_iter()
        .map(|institute| (institute.id, institute))
        .collect())
}

async fn with_specialties(
    pool: &PgPool,
    institutes: Vec<Institute>,
) -> Result<Vec<InstituteResponse>> {
    let ids: Vec<Uuid> = institutes.iter().map(|institute| institute.id).collect();
    let mut links = load_links(pool, LinkTable::Institute, &ids).await?;
    Ok(institutes
        .into_iter()
        .map(|institute| {
            let specialties = links.remove(&institute.id).unwrap_or_default();
            InstituteResponse::new(institute, specialties)
        })
        .collect())
}
