//! Known registrations loaded into test and development registries.
//!
//! - `TEST0001`: active security agreement, debtor `TEST BUS 2 DEBTOR`
//! - `TEST0002`: active repairers lien, individual debtor
//! - `TEST0003`: security agreement that has already been discharged

use chrono::{Duration, Utc};
use tracing::info;

use super::repository::RegistrationStore;
use crate::error::ApiError;
use crate::models::{
    Address, FinancingStatement, GeneralCollateral, Party, RegistrationState, RegistrationType,
    VehicleCollateral, VehicleType,
};

/// Account that owns the fixture registrations.
pub const FIXTURE_ACCOUNT_ID: &str = "PS12345";

fn address() -> Address {
    Address {
        street: "222 SUMMER STREET".to_string(),
        street_additional: None,
        city: "VICTORIA".to_string(),
        region: "BC".to_string(),
        postal_code: "V8W 2V8".to_string(),
        country: "CA".to_string(),
    }
}

fn with_address(mut party: Party) -> Party {
    party.address = Some(address());
    party
}

fn base_statement(
    registration_num: &str,
    registration_type: RegistrationType,
    debtor: Party,
    state: RegistrationState,
) -> FinancingStatement {
    let created = Utc::now() - Duration::days(30);

    FinancingStatement {
        registration_type,
        registering_party: Some(with_address(Party::business("TEST REGISTERING PARTY"))),
        secured_parties: vec![with_address(Party::business("TEST SECURED PARTY 1"))],
        debtors: vec![with_address(debtor)],
        vehicle_collateral: vec![VehicleCollateral {
            vehicle_type: VehicleType::MotorVehicle,
            serial_number: "KM8J3CA46JU622994".to_string(),
            year: Some(2018),
            make: Some("HYUNDAI".to_string()),
            model: Some("TUSCON".to_string()),
            manufactured_home_registration_number: None,
            vehicle_id: None,
        }],
        general_collateral: vec![GeneralCollateral {
            description: "TEST GENERAL COLLATERAL".to_string(),
            collateral_id: None,
            added_date_time: Some(created),
        }],
        client_reference_id: Some(format!("{}-REF", registration_num)),
        life_years: None,
        life_infinite: None,
        trust_indenture: Some(false),
        lien_amount: None,
        surrender_date: None,
        document_id: None,
        base_registration_number: Some(registration_num.to_string()),
        create_date_time: Some(created),
        expiry_date: None,
        registration_description: Some(registration_type.description().to_string()),
        status_type: Some(state),
    }
}

/// The fixture registrations, in insertion order.
pub fn fixture_statements() -> Vec<FinancingStatement> {
    let mut test0001 = base_statement(
        "TEST0001",
        RegistrationType::SecurityAgreement,
        Party::business("TEST BUS 2 DEBTOR"),
        RegistrationState::Active,
    );
    test0001.life_years = Some(2);
    test0001.expiry_date = test0001
        .create_date_time
        .map(|created| created + Duration::days(365 * 2));

    let mut test0002 = base_statement(
        "TEST0002",
        RegistrationType::RepairersLien,
        Party::person("TEST", "INDIVIDUAL DEBTOR"),
        RegistrationState::Active,
    );
    test0002.lien_amount = Some("2500.00".to_string());
    test0002.surrender_date = test0002.create_date_time;
    test0002.expiry_date = test0002
        .create_date_time
        .map(|created| created + Duration::days(180));

    let mut test0003 = base_statement(
        "TEST0003",
        RegistrationType::SecurityAgreement,
        Party::business("TEST BUS 3 DEBTOR"),
        RegistrationState::Historical,
    );
    test0003.life_infinite = Some(true);

    vec![test0001, test0002, test0003]
}

/// Insert any fixture registration the store does not already hold.
pub async fn seed(store: &dyn RegistrationStore) -> Result<usize, ApiError> {
    let mut inserted = 0;
    for statement in fixture_statements() {
        let registration_num = statement.registration_number().unwrap_or_default();
        if store.find_financing_statement(registration_num).await?.is_some() {
            continue;
        }
        store
            .insert_financing_statement(FIXTURE_ACCOUNT_ID, &statement)
            .await?;
        inserted += 1;
    }

    info!(inserted, "Seeded fixture registrations");
    Ok(inserted)
}
