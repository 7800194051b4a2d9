// Registry documents: financing statements, discharges and the parties on them.

pub mod discharge;
pub mod financing_statement;
pub mod party;

pub use discharge::{DischargeStatement, Payment};
pub use financing_statement::{
    FinancingStatement, GeneralCollateral, RegistrationState, RegistrationType, VehicleCollateral,
    VehicleType,
};
pub use party::{Address, Party, PersonName};
