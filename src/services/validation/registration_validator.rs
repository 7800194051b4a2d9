use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::ApiError;
use crate::models::{DischargeStatement, FinancingStatement, Party, RegistrationType};

static REGISTRATION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Z]{1,10}$").expect("valid registration number pattern"));

/// Registration numbers are 1-10 upper-case letters and digits.
pub fn is_registration_number(value: &str) -> bool {
    REGISTRATION_NUMBER.is_match(value)
}

/// Validate a discharge request. All failures are reported together.
pub fn validate_discharge(statement: &DischargeStatement) -> Result<(), ApiError> {
    let mut errors = derive_errors(statement);

    match statement.base_registration_number.as_deref() {
        None => errors.push("baseRegistrationNumber is required".to_string()),
        Some(number) if !is_registration_number(number) => {
            errors.push(format!("baseRegistrationNumber {} is not a valid registration number", number))
        }
        Some(_) => {}
    }

    match &statement.base_debtor {
        None => errors.push("baseDebtor is required".to_string()),
        Some(debtor) => check_named_party("baseDebtor", debtor, &mut errors),
    }

    if let Some(party) = &statement.registering_party {
        check_registering_party(party, &mut errors);
    }

    finish(errors)
}

/// Validate a new financing statement. All failures are reported together.
pub fn validate_financing_statement(statement: &FinancingStatement) -> Result<(), ApiError> {
    let mut errors = derive_errors(statement);

    match &statement.registering_party {
        None => errors.push("registeringParty is required".to_string()),
        Some(party) => check_registering_party(party, &mut errors),
    }

    if statement.secured_parties.is_empty() {
        errors.push("at least one secured party is required".to_string());
    }
    for (i, party) in statement.secured_parties.iter().enumerate() {
        check_named_party(&format!("securedParties[{}]", i), party, &mut errors);
    }

    if statement.debtors.is_empty() {
        errors.push("at least one debtor is required".to_string());
    }
    for (i, party) in statement.debtors.iter().enumerate() {
        check_named_party(&format!("debtors[{}]", i), party, &mut errors);
    }

    if !statement.has_collateral() {
        errors.push("at least one vehicle or general collateral is required".to_string());
    }

    check_life(statement, &mut errors);

    finish(errors)
}

fn check_life(statement: &FinancingStatement, errors: &mut Vec<String>) {
    if statement.registration_type == RegistrationType::RepairersLien {
        if statement.lien_amount.is_none() {
            errors.push("lienAmount is required for a repairers lien".to_string());
        }
        if statement.surrender_date.is_none() {
            errors.push("surrenderDate is required for a repairers lien".to_string());
        }
        return;
    }

    match (statement.life_infinite.unwrap_or(false), statement.life_years) {
        (true, Some(_)) => {
            errors.push("lifeYears must be omitted when lifeInfinite is true".to_string())
        }
        (false, None) => {
            errors.push("lifeYears is required when lifeInfinite is not true".to_string())
        }
        _ => {}
    }
}

fn check_named_party(path: &str, party: &Party, errors: &mut Vec<String>) {
    if !party.has_single_name() {
        errors.push(format!(
            "{} requires exactly one of businessName or personName",
            path
        ));
    }
}

fn check_registering_party(party: &Party, errors: &mut Vec<String>) {
    if party.code.is_none() && !party.has_single_name() {
        errors.push(
            "registeringParty requires a code or exactly one of businessName or personName"
                .to_string(),
        );
    }
}

fn finish(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        debug!(errors = ?errors, "Registration payload rejected");
        Err(ApiError::validation_errors(errors))
    }
}

fn derive_errors<T: Validate>(value: &T) -> Vec<String> {
    let mut out = Vec::new();
    if let Err(errors) = value.validate() {
        flatten("", &errors, &mut out);
        out.sort();
    }
    out
}

fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.push(format!("{}: {}", path, error.code));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::models::{GeneralCollateral, RegistrationType};

    fn discharge() -> DischargeStatement {
        DischargeStatement {
            base_registration_number: Some("023001B".to_string()),
            base_debtor: Some(Party::business("TEST BUS 2 DEBTOR")),
            registering_party: Some(Party::business("ABC SEARCHING COMPANY")),
            client_reference_id: Some("A-00000402".to_string()),
            discharge_registration_number: None,
            create_date_time: None,
            payment: None,
        }
    }

    fn financing_statement() -> FinancingStatement {
        FinancingStatement {
            registration_type: RegistrationType::SecurityAgreement,
            registering_party: Some(Party::business("ABC SEARCHING COMPANY")),
            secured_parties: vec![Party::business("BANK OF BRITISH COLUMBIA")],
            debtors: vec![Party::person("Michael", "Smith")],
            vehicle_collateral: vec![],
            general_collateral: vec![GeneralCollateral {
                description: "All present and after acquired personal property".to_string(),
                collateral_id: None,
                added_date_time: None,
            }],
            client_reference_id: None,
            life_years: Some(5),
            life_infinite: None,
            trust_indenture: Some(false),
            lien_amount: None,
            surrender_date: None,
            document_id: None,
            base_registration_number: None,
            create_date_time: None,
            expiry_date: None,
            registration_description: None,
            status_type: None,
        }
    }

    #[test]
    fn test_registration_number_format() {
        assert!(is_registration_number("023001B"));
        assert!(is_registration_number("TEST0001"));
        assert!(!is_registration_number("test0001"));
        assert!(!is_registration_number(""));
        assert!(!is_registration_number("12345678901"));
    }

    #[test]
    fn test_valid_discharge() {
        assert!(validate_discharge(&discharge()).is_ok());
    }

    #[test]
    fn test_discharge_missing_base_debtor() {
        let mut statement = discharge();
        statement.base_debtor = None;

        let err = validate_discharge(&statement).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InvalidInput);
        assert!(err.to_string().contains("validation"));
    }

    #[test]
    fn test_discharge_debtor_with_both_names() {
        let mut statement = discharge();
        let mut debtor = Party::business("ABC");
        debtor.person_name = Party::person("A", "B").person_name;
        statement.base_debtor = Some(debtor);

        assert!(validate_discharge(&statement).is_err());
    }

    #[test]
    fn test_discharge_client_reference_too_long() {
        let mut statement = discharge();
        statement.client_reference_id = Some("X".repeat(21));
        assert!(validate_discharge(&statement).is_err());
    }

    #[test]
    fn test_valid_financing_statement() {
        assert!(validate_financing_statement(&financing_statement()).is_ok());
    }

    #[test]
    fn test_financing_statement_requires_debtor_and_collateral() {
        let mut statement = financing_statement();
        statement.debtors.clear();
        statement.general_collateral.clear();

        assert!(validate_financing_statement(&statement).is_err());
    }

    #[test]
    fn test_life_years_rules() {
        let mut infinite = financing_statement();
        infinite.life_infinite = Some(true);
        assert!(validate_financing_statement(&infinite).is_err());
        infinite.life_years = None;
        assert!(validate_financing_statement(&infinite).is_ok());

        let mut too_long = financing_statement();
        too_long.life_years = Some(26);
        assert!(validate_financing_statement(&too_long).is_err());
    }

    #[test]
    fn test_repairers_lien_needs_amount_and_surrender_date() {
        let mut lien = financing_statement();
        lien.registration_type = RegistrationType::RepairersLien;
        lien.life_years = None;
        assert!(validate_financing_statement(&lien).is_err());

        lien.lien_amount = Some("2500".to_string());
        lien.surrender_date = Some(chrono::Utc::now());
        assert!(validate_financing_statement(&lien).is_ok());
    }
}
