use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::middleware::auth::Claims;
use crate::AppState;

pub const JOB_ID_PARAM: &str = "job_id";

/// Records a job view before the handler runs. Anonymous callers are
/// tracked under a NULL user id. Recording is best-effort: failures are
/// logged and the request proceeds.
pub async fn track_job_view(
    State(state): State<AppState>,
    params: Option<Path<HashMap<String, String>>>,
    claims: Option<Extension<Claims>>,
    req: Request,
    next: Next,
) -> Response {
    let job_id = params
        .as_ref()
        .and_then(|Path(params)| params.get(JOB_ID_PARAM))
        .and_then(|raw| Uuid::parse_str(raw).ok());

    if let Some(job_id) = job_id {
        let user_id = claims.map(|Extension(claims)| claims.id);
        match state.view_service.record_view(job_id, user_id).await {
            Ok(true) => tracing::debug!(%job_id, ?user_id, "Recorded job view"),
            Ok(false) => tracing::debug!(%job_id, ?user_id, "Job view not recorded"),
            Err(e) => tracing::error!(error = ?e, %job_id, "Error tracking job view"),
        }
    }

    next.run(req).await
}
