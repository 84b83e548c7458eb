use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::role::AuthRole;

/// The single authorization predicate for mutations: the caller must be the
/// recorded owner and, when a role is required, hold it.
pub fn can_mutate(caller: &Claims, owner_id: Uuid, required_role: Option<AuthRole>) -> bool {
    caller.id == owner_id && required_role.map_or(true, |role| caller.role == role)
}

/// Resolves an owner lookup into the 404/403 outcome. Absence is checked
/// before ownership so the two are never swapped.
pub fn ensure_can_mutate(
    caller: &Claims,
    owner_id: Option<Uuid>,
    required_role: Option<AuthRole>,
    resource: &str,
) -> Result<()> {
    let Some(owner_id) = owner_id else {
        return Err(Error::NotFound(format!("{} not found", resource)));
    };
    if !can_mutate(caller, owner_id, required_role) {
        tracing::warn!(
            caller_id = %caller.id,
            owner_id = %owner_id,
            resource,
            "Ownership check failed"
        );
        return Err(Error::Forbidden(format!(
            "cannot modify another owner's {}",
            resource.to_lowercase()
        )));
    }
    Ok(())
}

/// Like [`ensure_can_mutate`], but a mismatch is reported as absence so the
/// response does not reveal that the resource exists.
pub fn ensure_owner_or_hidden(
    caller: &Claims,
    owner_id: Option<Uuid>,
    required_role: Option<AuthRole>,
    resource: &str,
) -> Result<()> {
    match owner_id {
        Some(owner_id) if can_mutate(caller, owner_id, required_role) => Ok(()),
        _ => Err(Error::NotFound(format!(
            "{} not found or access denied",
            resource
        ))),
    }
}

pub fn require_role(caller: &Claims, role: AuthRole, action: &str) -> Result<()> {
    if caller.role != role {
        tracing::warn!(caller_id = %caller.id, role = %caller.role, action, "Role check failed");
        return Err(Error::Forbidden(format!(
            "only {} accounts may {}",
            role.as_str().to_lowercase(),
            action
        )));
    }
    Ok(())
}
