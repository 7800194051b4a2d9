use axum::Json;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Personal Property Registry API",
        description = "Financing statement registration and discharge"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::handlers::health::health_check,
        crate::handlers::financing_statements::create_financing_statement,
        crate::handlers::financing_statements::get_financing_statement,
        crate::handlers::financing_statements::create_discharge,
        crate::handlers::financing_statements::get_discharge,
    ),
    components(schemas(
        crate::handlers::health::HealthStatus,
        crate::models::FinancingStatement,
        crate::models::DischargeStatement,
        crate::models::Payment,
        crate::models::Party,
        crate::models::PersonName,
        crate::models::Address,
        crate::models::VehicleCollateral,
        crate::models::GeneralCollateral,
        crate::models::RegistrationType,
        crate::models::RegistrationState,
        crate::models::VehicleType,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "financing-statements", description = "Base registrations"),
        (name = "discharges", description = "Total discharges of base registrations"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Identity provider access token"))
                    .build(),
            ),
        )
    }
}

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
