// Business logic services
// Registration lifecycle and payload validation

pub mod registration;
pub mod validation;

pub use registration::RegistrationService;
