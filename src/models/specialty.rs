use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Specialty {
    pub id: Uuid,
    pub name: String,
}

/// A specialty joined through one of the link tables, keyed by the tagged
/// entity's id.
#[derive(Debug, Clone, FromRow)]
pub struct SpecialtyLink {
    pub owner_id: Uuid,
    pub id: Uuid,
    pub name: String,
}

/// Lower-cases and trims a specialty name; `None` when nothing is left.
pub fn normalize_name(raw: &str) -> Option<String> {
    let name = raw.trim().to_lowercase();
    (!name.is_empty()).then_some(name)
}
