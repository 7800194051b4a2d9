// HTTP handlers
// Registry endpoints, the authorization helper they share, and health

pub mod authorization;
pub mod financing_statements;
pub mod health;

pub use financing_statements::{
    create_discharge, create_financing_statement, get_discharge, get_financing_statement,
};
pub use health::health_check;
