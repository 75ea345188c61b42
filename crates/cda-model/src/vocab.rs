//! Wire-code vocabularies stamped into the assembled document.
//!
//! Each enum carries the code (and, where relevant, the code-system OID) that
//! the external serialization codec expects. Only the subset of HL7/NHS
//! vocabularies this engine actually emits is modeled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// HL7 administrative gender codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    NotKnown,
    Male,
    Female,
    NotSpecified,
}

impl Sex {
    pub fn code(&self) -> &'static str {
        match self {
            Sex::NotKnown => "0",
            Sex::Male => "1",
            Sex::Female => "2",
            Sex::NotSpecified => "9",
        }
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Sex::NotKnown),
            "1" => Ok(Sex::Male),
            "2" => Ok(Sex::Female),
            "9" => Ok(Sex::NotSpecified),
            other => Err(ModelError::UnknownCode(other.to_string())),
        }
    }
}

/// HL7 participation type codes for additional document participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipationType {
    /// ADM - admitter
    Admitter,
    /// ATND - attender
    Attender,
    /// CALLBCK - callback contact
    CallbackContact,
    /// CON - consultant
    Consultant,
    /// DIS - discharger
    Discharger,
    /// ESC - escort
    Escort,
    /// REF - referrer
    Referrer,
}

impl ParticipationType {
    pub fn code(&self) -> &'static str {
        match self {
            ParticipationType::Admitter => "ADM",
            ParticipationType::Attender => "ATND",
            ParticipationType::CallbackContact => "CALLBCK",
            ParticipationType::Consultant => "CON",
            ParticipationType::Discharger => "DIS",
            ParticipationType::Escort => "ESC",
            ParticipationType::Referrer => "REF",
        }
    }
}

/// HL7 act class codes for the documented service event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventClassCode {
    /// ACT - generic act
    Act,
    /// ENC - encounter
    Encounter,
    /// OBS - observation
    Observation,
    /// PCPR - care provision
    CareProvision,
}

impl EventClassCode {
    pub fn code(&self) -> &'static str {
        match self {
            EventClassCode::Act => "ACT",
            EventClassCode::Encounter => "ENC",
            EventClassCode::Observation => "OBS",
            EventClassCode::CareProvision => "PCPR",
        }
    }
}

/// HL7 basic confidentiality kind. Documents default to normal access rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidentialityCode {
    #[default]
    Normal,
    Restricted,
    VeryRestricted,
}

impl ConfidentialityCode {
    pub fn code(&self) -> &'static str {
        match self {
            ConfidentialityCode::Normal => "N",
            ConfidentialityCode::Restricted => "R",
            ConfidentialityCode::VeryRestricted => "V",
        }
    }
}

/// Identifier scheme for a patient id: the NHS number OID differs by whether
/// the number has been traced against the national demographics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientIdKind {
    VerifiedNhsNumber,
    UnverifiedNhsNumber,
}

impl PatientIdKind {
    pub fn oid(&self) -> &'static str {
        match self {
            PatientIdKind::VerifiedNhsNumber => "2.16.840.1.113883.2.1.4.1",
            PatientIdKind::UnverifiedNhsNumber => "2.16.840.1.113883.2.1.3.2.4.18.23",
        }
    }
}

/// Identifier scheme for staff: SDS user id or SDS role profile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonIdKind {
    SdsId,
    SdsRoleProfile,
}

impl PersonIdKind {
    pub fn oid(&self) -> &'static str {
        match self {
            PersonIdKind::SdsId => "1.2.826.0.1285.0.2.0.65",
            PersonIdKind::SdsRoleProfile => "1.2.826.0.1285.0.2.0.67",
        }
    }
}

/// Identifier scheme for organisations (ODS code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgIdKind {
    OdsOrgId,
}

impl OrgIdKind {
    pub fn oid(&self) -> &'static str {
        "2.16.840.1.113883.2.1.3.2.4.19.1"
    }
}

/// HL7 telecom use codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelecomUse {
    Home,
    WorkPlace,
    MobileContact,
}

impl TelecomUse {
    pub fn code(&self) -> &'static str {
        match self {
            TelecomUse::Home => "H",
            TelecomUse::WorkPlace => "WP",
            TelecomUse::MobileContact => "MC",
        }
    }
}

/// HL7 address use codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressUse {
    Home,
    WorkPlace,
}

impl AddressUse {
    pub fn code(&self) -> &'static str {
        match self {
            AddressUse::Home => "H",
            AddressUse::WorkPlace => "WP",
        }
    }
}

/// HL7 null flavours used where a mandatory wire slot has no real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullFlavor {
    /// NA - not applicable
    NotApplicable,
    /// NI - no information
    NoInformation,
    /// UNK - unknown
    Unknown,
}

impl NullFlavor {
    pub fn code(&self) -> &'static str {
        match self {
            NullFlavor::NotApplicable => "NA",
            NullFlavor::NoInformation => "NI",
            NullFlavor::Unknown => "UNK",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for ParticipationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_round_trips_through_codes() {
        for sex in [Sex::NotKnown, Sex::Male, Sex::Female, Sex::NotSpecified] {
            assert_eq!(sex.code().parse::<Sex>().expect("code"), sex);
        }
        assert!("3".parse::<Sex>().is_err());
    }

    #[test]
    fn confidentiality_defaults_to_normal() {
        assert_eq!(ConfidentialityCode::default().code(), "N");
    }

    #[test]
    fn nhs_number_oids_differ_by_trace_status() {
        assert_ne!(
            PatientIdKind::VerifiedNhsNumber.oid(),
            PatientIdKind::UnverifiedNhsNumber.oid()
        );
    }
}
