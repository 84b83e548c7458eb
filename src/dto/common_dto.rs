use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::institute_dto::InstituteResponse;
use crate::dto::job_dto::JobResponse;
use crate::dto::user_dto::UserResponse;
use crate::models::specialty::{normalize_name, Specialty};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Saturates rather than overflowing, so a huge page reads as past the end.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(
    UserPage = Paginated<UserResponse>,
    InstitutePage = Paginated<InstituteResponse>,
    JobPage = Paginated<JobResponse>,
    SpecialtyPage = Paginated<Specialty>
)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: i64) -> Self {
        Self {
            items,
            page: pagination.page,
            page_size: pagination.page_size,
            total,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Invalid input")]
    pub error: String,
}

/// Splits a comma-separated filter value into normalized specialty names.
pub fn split_specialty_names(raw: Option<&str>) -> Vec<String> {
    let parts: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::to_string)
        .collect();
    normalize_specialty_names(&parts)
}

/// Normalizes a list of specialty names from a request body, dropping blanks
/// and duplicates while keeping first-seen order.
pub fn normalize_specialty_names(raw: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw.iter().filter_map(|name| normalize_name(name)) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_bounds() {
        assert_eq!(Pagination::new(None, None), Pagination { page: 1, page_size: 20 });
        assert_eq!(Pagination::new(Some(0), Some(0)), Pagination { page: 1, page_size: 1 });
        assert_eq!(Pagination::new(Some(3), Some(500)).page_size, MAX_PAGE_SIZE);
        assert_eq!(Pagination::new(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn huge_page_numbers_saturate_the_offset() {
        assert_eq!(Pagination::new(Some(i64::MAX), Some(100)).offset(), i64::MAX);
        assert_eq!(Pagination::new(Some(i64::MAX), None).page, i64::MAX);
    }

    #[test]
    fn comma_lists_are_split_and_normalized() {
        assert_eq!(
            split_specialty_names(Some(" Cardiology, neurology ,,")),
            vec!["cardiology", "neurology"]
        );
        assert!(split_specialty_names(None).is_empty());
    }

    #[test]
    fn body_names_are_deduplicated() {
        let names = vec![
            "Cardiology".to_string(),
            " cardiology ".to_string(),
            "".to_string(),
            "Oncology".to_string(),
        ];
        assert_eq!(normalize_specialty_names(&names), vec!["cardiology", "oncology"]);
    }

    #[test]
    fn paginated_serializes_camel_case() {
        let page = Paginated::new(vec![1, 2], Pagination::new(Some(2), Some(2)), 5);
        let value = serde_json::to_value(page).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "items": [1, 2], "page": 2, "pageSize": 2, "total": 5 })
        );
    }
}
