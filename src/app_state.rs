//! Application state shared across all handlers.

use crate::auth::jwt::JwtService;
use crate::config::Config;
use crate::services::RegistrationService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Bearer token validation
    pub jwt_service: JwtService,
    /// Financing statement and discharge operations
    pub registration_service: RegistrationService,
}
