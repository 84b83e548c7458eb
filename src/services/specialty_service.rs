use std::collections::HashMap;

use sqlx::{PgConnection, PgExecutor, PgPool, Postgres};
use uuid::Uuid;

use crate::database::query::{contains_pattern, fetch_page, Conditions};
use crate::dto::common_dto::{normalize_specialty_names, Paginated, Pagination};
use crate::dto::specialty_dto::{CreateSpecialtyPayload, SpecialtySearchQuery};
use crate::error::{Error, Result, INVALID_INPUT};
use crate::models::specialty::{normalize_name, Specialty, SpecialtyLink};

/// The three many-to-many tables that tag an entity with specialties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTable {
    User,
    Institute,
    Job,
}

impl LinkTable {
    fn table(self) -> &'static str {
        match self {
            LinkTable::User => "user_specialties",
            LinkTable::Institute => "institute_specialties",
            LinkTable::Job => "job_specialties",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            LinkTable::User => "user_id",
            LinkTable::Institute => "institute_id",
            LinkTable::Job => "job_id",
        }
    }

    /// `EXISTS` predicate matching rows of `outer_table` tagged with any of
    /// the bound names. The caller binds the name array right after.
    pub fn any_name_predicate(self, outer_table: &str) -> String {
        format!(
            "EXISTS (SELECT 1 FROM {link} l JOIN specialties s ON s.id = l.specialty_id \
             WHERE l.{owner} = {outer}.id AND s.name = ANY(",
            link = self.table(),
            owner = self.owner_column(),
            outer = outer_table,
        )
    }
}

#[derive(Clone)]
pub struct SpecialtyService {
    pool: PgPool,
}

impl SpecialtyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateSpecialtyPayload) -> Result<Specialty> {
        let name = normalize_name(&payload.name)
            .ok_or_else(|| Error::BadRequest(INVALID_INPUT.to_string()))?;

        let created = sqlx::query_as::<_, Specialty>(
            "INSERT INTO specialties (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING id, name",
        )
        .bind(&name)
        .fetch_optional(&self.pool)
        .await?;

        match created {
            Some(specialty) => {
                tracing::info!(specialty_id = %specialty.id, name = %specialty.name, "Specialty created");
                Ok(specialty)
            }
            None => Err(Error::Conflict("Specialty already exists".to_string())),
        }
    }

    pub async fn search(&self, query: SpecialtySearchQuery) -> Result<Paginated<Specialty>> {
        let pagination = Pagination::new(query.page, query.page_size);
        let needle = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| contains_pattern(&q.to_lowercase()));

        let (items, total) = fetch_page::<Specialty, _>(
            &self.pool,
            "id, name",
            "specialties",
            "name ASC",
            pagination,
            |builder| {
                let mut conditions = Conditions::new();
                if let Some(needle) = &needle {
                    conditions
                        .next(builder)
                        .push("name ILIKE ")
                        .push_bind(needle.clone());
                }
            },
        )
        .await?;

        Ok(Paginated::new(items, pagination, total))
    }
}

/// Inserts any names not yet known and returns the full rows, sorted by
/// name. Names must already be normalized.
pub async fn upsert_names(conn: &mut PgConnection, names: &[String]) -> Result<Vec<Specialty>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let mut specialties = sqlx::query_as::<_, Specialty>(
        r#"
        INSERT INTO specialties (name)
        SELECT UNNEST($1::text[])
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name
        "#,
    )
    .bind(names)
    .fetch_all(&mut *conn)
    .await?;

    specialties.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(specialties)
}

/// Replaces every link of `owner_id` in `table` with the given names,
/// creating unknown specialties on the way. Runs on the caller's
/// transaction.
pub async fn replace_links(
    conn: &mut PgConnection,
    table: LinkTable,
    owner_id: Uuid,
    raw_names: &[String],
) -> Result<Vec<Specialty>> {
    let names = normalize_specialty_names(raw_names);
    let specialties = upsert_names(conn, &names).await?;

    let delete = format!(
        "DELETE FROM {} WHERE {} = $1",
        table.table(),
        table.owner_column()
    );
    sqlx::query(&delete).bind(owner_id).execute(&mut *conn).await?;

    if !specialties.is_empty() {
        let ids: Vec<Uuid> = specialties.iter().map(|s| s.id).collect();
        let insert = format!(
            "INSERT INTO {} ({}, specialty_id) SELECT $1, UNNEST($2::uuid[]) ON CONFLICT DO NOTHING",
            table.table(),
            table.owner_column()
        );
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(&ids)
            .execute(&mut *conn)
            .await?;
    }

    tracing::debug!(%owner_id, table = table.table(), count = specialties.len(), "Specialty links replaced");
    Ok(specialties)
}

/// Loads the specialties of many owners in one round trip.
pub async fn load_links<'e, E>(
    executor: E,
    table: LinkTable,
    owner_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Specialty>>>
where
    E: PgExecutor<'e>,
{
    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!(
        "SELECT l.{owner} AS owner_id, s.id, s.name FROM {link} l \
         JOIN specialties s ON s.id = l.specialty_id \
         WHERE l.{owner} = ANY($1) ORDER BY s.name",
        owner = table.owner_column(),
        link = table.table(),
    );
    let rows = sqlx::query_as::<_, SpecialtyLink>(&sql)
        .bind(owner_ids)
        .fetch_all(executor)
        .await?;

    let mut grouped: HashMap<Uuid, Vec<Specialty>> = HashMap::new();
    for row in rows {
        grouped.entry(row.owner_id).or_default().push(Specialty {
            id: row.id,
            name: row.name,
        });
    }
    Ok(grouped)
}

/// Appends `EXISTS (...)` for a comma-separated specialty filter. Does
/// nothing when the list is empty.
pub fn push_specialty_filter(
    builder: &mut sqlx::QueryBuilder<'static, Postgres>,
    conditions: &mut Conditions,
    table: LinkTable,
    outer_table: &str,
    names: &[String],
) {
    if names.is_empty() {
        return;
    }
    conditions
        .next(builder)
        .push(table.any_name_predicate(outer_table))
        .push_bind(names.to_vec())
        .push("))");
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::QueryBuilder;

    #[test]
    fn specialty_filter_targets_the_right_link_table() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs");
        let mut conditions = Conditions::new();
        push_specialty_filter(
            &mut builder,
            &mut conditions,
            LinkTable::Job,
            "jobs",
            &["cardiology".to_string()],
        );
        let sql = builder.sql();
        assert!(sql.contains("FROM job_specialties l"));
        assert!(sql.contains("l.job_id = jobs.id"));
        assert!(sql.ends_with("s.name = ANY($1))"));
    }

    #[test]
    fn empty_specialty_filter_adds_nothing() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        let mut conditions = Conditions::new();
        push_specialty_filter(&mut builder, &mut conditions, LinkTable::User, "users", &[]);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM users");
    }
}
