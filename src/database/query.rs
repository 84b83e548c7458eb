use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};

use crate::dto::common_dto::Pagination;
use crate::error::Result;

/// Tracks whether a `WHERE` has been emitted so filters can be appended
/// in any order.
#[derive(Debug, Default)]
pub struct Conditions {
    started: bool,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next<'b, 'q>(
        &mut self,
        builder: &'b mut QueryBuilder<'q, Postgres>,
    ) -> &'b mut QueryBuilder<'q, Postgres> {
        if self.started {
            builder.push(" AND ");
        } else {
            builder.push(" WHERE ");
            self.started = true;
        }
        builder
    }
}

/// `%needle%` for ILIKE with the LIKE metacharacters escaped.
pub fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Runs the count and the page for the same predicate. `push_filters` is
/// applied to both statements.
pub async fn fetch_page<T, F>(
    pool: &PgPool,
    columns: &str,
    from: &str,
    order_by: &str,
    pagination: Pagination,
    push_filters: F,
) -> Result<(Vec<T>, i64)>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    F: Fn(&mut QueryBuilder<'static, Postgres>),
{
    let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", from));
    push_filters(&mut count);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut page = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM {}", columns, from));
    push_filters(&mut page);
    page.push(format!(" ORDER BY {} LIMIT ", order_by))
        .push_bind(pagination.page_size)
        .push(" OFFSET ")
        .push_bind(pagination.offset());
    let items = page.build_query_as::<T>().fetch_all(pool).await?;

    Ok((items, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_join_with_and() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM jobs");
        let mut conditions = Conditions::new();
        conditions.next(&mut builder).push("status = ").push_bind("active");
        conditions.next(&mut builder).push("job_type = ").push_bind("Full-time");
        assert_eq!(
            builder.sql(),
            "SELECT 1 FROM jobs WHERE status = $1 AND job_type = $2"
        );
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(contains_pattern(" cardio "), "%cardio%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
