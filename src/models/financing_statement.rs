use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::party::Party;

/// Financing statement registration types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RegistrationType {
    #[serde(rename = "SA")]
    SecurityAgreement,
    #[serde(rename = "RL")]
    RepairersLien,
    #[serde(rename = "FR")]
    MarriageSeparationAgreement,
    #[serde(rename = "LT")]
    LandTaxLien,
    #[serde(rename = "MH")]
    ManufacturedHomeLien,
    #[serde(rename = "SG")]
    SaleOfGoods,
    #[serde(rename = "FL")]
    ForestryContractorLien,
    #[serde(rename = "FA")]
    ForestryContractorChargeAgreement,
    #[serde(rename = "FS")]
    ForestrySubcontractorLien,
    #[serde(rename = "TA")]
    TransitionSecurityAgreement,
    #[serde(rename = "TG")]
    TransitionSaleOfGoods,
    #[serde(rename = "TM")]
    TransitionManufacturedHome,
    #[serde(rename = "MI")]
    MiscellaneousLien,
    #[serde(rename = "OT")]
    Other,
}

impl RegistrationType {
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationType::SecurityAgreement => "SA",
            RegistrationType::RepairersLien => "RL",
            RegistrationType::MarriageSeparationAgreement => "FR",
            RegistrationType::LandTaxLien => "LT",
            RegistrationType::ManufacturedHomeLien => "MH",
            RegistrationType::SaleOfGoods => "SG",
            RegistrationType::ForestryContractorLien => "FL",
            RegistrationType::ForestryContractorChargeAgreement => "FA",
            RegistrationType::ForestrySubcontractorLien => "FS",
            RegistrationType::TransitionSecurityAgreement => "TA",
            RegistrationType::TransitionSaleOfGoods => "TG",
            RegistrationType::TransitionManufacturedHome => "TM",
            RegistrationType::MiscellaneousLien => "MI",
            RegistrationType::Other => "OT",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RegistrationType::SecurityAgreement => "PPSA SECURITY AGREEMENT",
            RegistrationType::RepairersLien => "REPAIRERS LIEN",
            RegistrationType::MarriageSeparationAgreement => {
                "MARRIAGE/SEPARATION AGREEMENT AFFECTING MANUFACTURED HOME UNDER FAMILY LAW ACT"
            }
            RegistrationType::LandTaxLien => "LAND TAX DEFERMENT LIEN ON A MANUFACTURED HOME",
            RegistrationType::ManufacturedHomeLien => "TAX LIEN UNDER S.27/28 OF THE MANUFACTURED HOME ACT",
            RegistrationType::SaleOfGoods => "SALE OF GOODS ACT S.30(3)",
            RegistrationType::ForestryContractorLien => "FORESTRY - CONTRACTOR LIEN",
            RegistrationType::ForestryContractorChargeAgreement => "FORESTRY - CONTRACTOR CHARGE",
            RegistrationType::ForestrySubcontractorLien => "FORESTRY - SUB-CONTRACTOR CHARGE",
            RegistrationType::TransitionSecurityAgreement => "TRANSITION FINANCING STATEMENT",
            RegistrationType::TransitionSaleOfGoods => "TRANSITION SALE OF GOODS",
            RegistrationType::TransitionManufacturedHome => "TRANSITION MANUFACTURED HOME",
            RegistrationType::MiscellaneousLien => "MISCELLANEOUS REGISTRATION",
            RegistrationType::Other => "OTHER",
        }
    }
}

/// Lifecycle state of a base registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RegistrationState {
    #[serde(rename = "ACT")]
    Active,
    #[serde(rename = "HDC")]
    Historical,
}

impl RegistrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationState::Active => "ACT",
            RegistrationState::Historical => "HDC",
        }
    }
}

impl std::str::FromStr for RegistrationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACT" => Ok(RegistrationState::Active),
            "HDC" => Ok(RegistrationState::Historical),
            _ => Err(format!("Invalid registration state: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum VehicleType {
    #[serde(rename = "MV")]
    MotorVehicle,
    #[serde(rename = "MH")]
    ManufacturedHome,
    #[serde(rename = "BO")]
    Boat,
    #[serde(rename = "AC")]
    Aircraft,
    #[serde(rename = "AF")]
    Airframe,
    #[serde(rename = "TR")]
    Trailer,
    #[serde(rename = "OM")]
    OutboardMotor,
    #[serde(rename = "EV")]
    ElectricMotorVehicle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCollateral {
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[validate(length(min = 1, max = 25))]
    pub serial_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 60))]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 60))]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 6))]
    pub manufactured_home_registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneralCollateral {
    #[validate(length(min = 1, max = 4000))]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collateral_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_date_time: Option<DateTime<Utc>>,
}

/// A financing statement as submitted by clients and as stored.
///
/// `baseRegistrationNumber`, `createDateTime`, `expiryDate`,
/// `registrationDescription` and `statusType` are assigned by the registry;
/// values supplied by the client for them are discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancingStatement {
    #[serde(rename = "type")]
    pub registration_type: RegistrationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub registering_party: Option<Party>,
    #[serde(default)]
    #[validate(nested)]
    pub secured_parties: Vec<Party>,
    #[serde(default)]
    #[validate(nested)]
    pub debtors: Vec<Party>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub vehicle_collateral: Vec<VehicleCollateral>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub general_collateral: Vec<GeneralCollateral>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20))]
    pub client_reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 25))]
    pub life_years: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_infinite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_indenture: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub lien_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surrender_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 10))]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_type: Option<RegistrationState>,
}

impl FinancingStatement {
    pub fn registration_number(&self) -> Option<&str> {
        self.base_registration_number.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.status_type != Some(RegistrationState::Historical)
    }

    pub fn has_collateral(&self) -> bool {
        !self.vehicle_collateral.is_empty() || !self.general_collateral.is_empty()
    }

    /// Find the debtor whose name matches `candidate`, if any.
    pub fn matching_debtor(&self, candidate: &Party) -> Option<&Party> {
        self.debtors.iter().find(|debtor| debtor.name_matches(candidate))
    }
}
