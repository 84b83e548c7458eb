//! OpenAPI document for the REST API, served at `/openapi.json` and
//! rendered by the page at `/docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::dto::{
    application_dto::{
        ApplicantSummary, ApplicationJobSummary, ApplicationResponse, CreateApplicationPayload,
        UpdateApplicationPayload, UpdateApplicationStatusPayload,
    },
    auth_dto::{ProfileResponse, SigninPayload, SignupPayload, TokenResponse},
    common_dto::{ErrorBody, InstitutePage, JobPage, SpecialtyPage, UserPage},
    institute_dto::{CreateInstitutePayload, InstituteResponse, UpdateInstitutePayload},
    job_dto::{CreateJobPayload, JobResponse, UpdateJobPayload},
    specialty_dto::CreateSpecialtyPayload,
    stats_dto::{DailyTrendPoint, JobStats, WeeklyEngagementPoint},
    user_dto::{CreateUserPayload, UpdateUserPayload, UserResponse},
};
use crate::models::role::{ApplicationStatus, AuthRole, InstituteRole, JobStatus, UserRole};
use crate::models::specialty::Specialty;

pub const BEARER_SCHEME: &str = "bearer_auth";

/// Registers the JWT bearer scheme referenced by the private endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token from POST /v1/auth/signin, valid for one hour."))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pharminc API",
        description = "Job marketplace connecting healthcare professionals with hospitals, clinics, labs and pharmacies."
    ),
    paths(
        crate::routes::health::health,
        crate::routes::auth::signup,
        crate::routes::auth::signin,
        crate::routes::users::list_users,
        crate::routes::users::search_users,
        crate::routes::users::get_user,
        crate::routes::users::get_me,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::institutes::list_institutes,
        crate::routes::institutes::search_institutes,
        crate::routes::institutes::get_institute,
        crate::routes::institutes::get_my_institute,
        crate::routes::institutes::create_institute,
        crate::routes::institutes::update_institute,
        crate::routes::institutes::delete_institute,
        crate::routes::jobs::list_jobs,
        crate::routes::jobs::search_jobs,
        crate::routes::jobs::list_institution_jobs,
        crate::routes::jobs::get_job,
        crate::routes::jobs::create_job,
        crate::routes::jobs::update_job,
        crate::routes::jobs::delete_job,
        crate::routes::jobs::get_job_stats,
        crate::routes::applications::create_application,
        crate::routes::applications::get_application,
        crate::routes::applications::update_application,
        crate::routes::applications::update_application_status,
        crate::routes::applications::delete_application,
        crate::routes::applications::list_job_applications,
        crate::routes::applications::list_user_applications,
        crate::routes::applications::get_user_job_application,
        crate::routes::specialties::search_specialties,
        crate::routes::specialties::create_specialty,
    ),
    components(schemas(
        ErrorBody,
        SignupPayload,
        SigninPayload,
        TokenResponse,
        ProfileResponse,
        AuthRole,
        UserRole,
        InstituteRole,
        JobStatus,
        ApplicationStatus,
        Specialty,
        CreateSpecialtyPayload,
        CreateUserPayload,
        UpdateUserPayload,
        UserResponse,
        UserPage,
        CreateInstitutePayload,
        UpdateInstitutePayload,
        InstituteResponse,
        InstitutePage,
        CreateJobPayload,
        UpdateJobPayload,
        JobResponse,
        JobPage,
        SpecialtyPage,
        JobStats,
        DailyTrendPoint,
        WeeklyEngagementPoint,
        CreateApplicationPayload,
        UpdateApplicationPayload,
        UpdateApplicationStatusPayload,
        ApplicationResponse,
        ApplicationJobSummary,
        ApplicantSummary,
    )),
    tags(
        (name = "auth", description = "Account signup and token issue"),
        (name = "users", description = "Healthcare professional profiles"),
        (name = "institutes", description = "Hiring institute profiles"),
        (name = "jobs", description = "Job postings and their statistics"),
        (name = "applications", description = "Applications to jobs"),
        (name = "specialties", description = "Specialty vocabulary"),
        (name = "health", description = "Liveness check")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/v1/auth/signup",
            "/v1/users/{user_id}",
            "/v1/institutes/me",
            "/v1/jobs/{job_id}/stats",
            "/v1/applications/{application_id}/status",
            "/v1/applications/user/{user_id}/job/{job_id}",
            "/v1/specialties/search",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
        assert!(components.schemas.contains_key("JobStats"));
        assert!(components.schemas.contains_key("UserPage"));
    }
}
