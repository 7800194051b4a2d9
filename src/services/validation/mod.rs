// Registration payload validation
// Checks request shape before any registry lookup happens

pub mod registration_validator;

pub use registration_validator::{
    is_registration_number, validate_discharge, validate_financing_statement,
};
