//! The assembled document field tree.
//!
//! These shapes mirror the input expected by the external clinical-document
//! codec: every identifier carries its scheme OID or a null flavour, telecoms
//! carry `tel:`/`fax:` URI values with use codes, and the wire constants the
//! codec expects are stamped in by the builders. Serialization to CDA XML
//! itself happens downstream and is out of scope here.

use serde::{Deserialize, Serialize};

use cda_model::{
    Address, CodedValue, ConfidentialityCode, DateRange, DateValue, EventClassCode, NullFlavor,
    OrgIdKind, ParticipationType, PatientIdKind, PersonIdKind, PersonName, Sex, TelecomUse,
};

/// A patient identifier with its id-scheme kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientId {
    pub id: String,
    pub kind: PatientIdKind,
}

/// A staff identifier; either a real SDS id/role-profile id or a null
/// flavour where the codec demands an id slot with no known value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonId {
    pub id: Option<String>,
    pub kind: Option<PersonIdKind>,
    pub null_flavor: Option<NullFlavor>,
}

impl PersonId {
    pub fn sds(kind: PersonIdKind, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            kind: Some(kind),
            null_flavor: None,
        }
    }

    pub fn null(null_flavor: NullFlavor) -> Self {
        Self {
            id: None,
            kind: None,
            null_flavor: Some(null_flavor),
        }
    }
}

/// An organisation identifier (ODS code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgId {
    pub id: String,
    pub kind: OrgIdKind,
}

impl OrgId {
    pub fn ods(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: OrgIdKind::OdsOrgId,
        }
    }
}

/// A telecom entry; `value` is a full URI (`tel:...` / `fax:...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Telecom {
    pub value: String,
    pub use_code: Option<TelecomUse>,
}

impl Telecom {
    pub fn tel(number: &str) -> Self {
        Self {
            value: format!("tel:{number}"),
            use_code: None,
        }
    }

    pub fn fax(number: &str) -> Self {
        Self {
            value: format!("fax:{number}"),
            use_code: None,
        }
    }

    pub fn with_use(mut self, use_code: TelecomUse) -> Self {
        self.use_code = Some(use_code);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSection {
    pub ids: Vec<PatientId>,
    pub names: Vec<PersonName>,
    pub addresses: Vec<Address>,
    pub telecoms: Vec<Telecom>,
    pub sex: Sex,
    pub birth_time: DateValue,
    pub registered_gp_org_id: OrgId,
    pub registered_gp_org_name: String,
    pub registered_gp_address: Option<Address>,
    pub registered_gp_telecoms: Vec<Telecom>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSection {
    pub ids: Vec<PersonId>,
    pub job_role: CodedValue,
    pub name: PersonName,
    pub organisation_id: OrgId,
    pub organisation_name: String,
    pub addresses: Vec<Address>,
    pub telecoms: Vec<Telecom>,
}

/// A bare identified person: data enterer or authenticator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSection {
    pub ids: Vec<PersonId>,
    pub name: PersonName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodianSection {
    pub id: OrgId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientSection {
    /// The codec requires a role id slot; no real id exists for recipients.
    pub role_id_null_flavor: NullFlavor,
    pub name: PersonName,
    pub address: Option<Address>,
    pub telecoms: Vec<Telecom>,
    pub job_role: Option<CodedValue>,
    pub organisation_id: OrgId,
    pub organisation_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSection {
    pub type_code: ParticipationType,
    pub name: Option<PersonName>,
    pub ids: Vec<PersonId>,
    pub address: Option<Address>,
    pub telecoms: Vec<Telecom>,
    pub organisation_id: Option<OrgId>,
    pub organisation_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerSection {
    /// The codec requires a person id; performers are identified by name
    /// only, so the slot carries a no-information null flavour.
    pub person_id: PersonId,
    pub name: PersonName,
    pub organisation_id: OrgId,
    pub organisation_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEventSection {
    pub id: String,
    pub class_code: EventClassCode,
    pub event_code: CodedValue,
    pub effective_time: Option<DateRange>,
    pub performer: Option<PerformerSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSection {
    pub id: String,
    pub effective_time: DateRange,
    pub encounter_type: CodedValue,
    pub care_setting_type: CodedValue,
    pub place_name: Option<String>,
    pub place_address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentSection {
    pub id: String,
    pub code: CodedValue,
}

/// Attachment encoding for a non-XML document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentEncoding {
    Base64,
}

impl AttachmentEncoding {
    pub fn code(&self) -> &'static str {
        "B64"
    }
}

/// The original submission carried through as a non-XML body attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonXmlBody {
    pub media_type: String,
    pub encoding: AttachmentEncoding,
    pub content: String,
}

/// The fully assembled, validated field tree handed to the external codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDocument {
    pub document_id: String,
    pub title: String,
    pub document_type: CodedValue,
    pub effective_time: DateValue,
    pub set_id: String,
    pub version: u32,
    pub confidentiality: ConfidentialityCode,
    pub authored_time: DateValue,
    pub patient: PatientSection,
    pub author: AuthorSection,
    pub data_enterer: Option<PersonSection>,
    pub custodian: CustodianSection,
    pub primary_recipients: Vec<RecipientSection>,
    pub information_only_recipients: Vec<RecipientSection>,
    pub authenticator: Option<PersonSection>,
    pub authenticated_time: Option<DateValue>,
    pub participants: Vec<ParticipantSection>,
    pub service_event: Option<ServiceEventSection>,
    pub consent: Option<ConsentSection>,
    pub encounter: Option<EncounterSection>,
    pub non_xml_body: Option<NonXmlBody>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telecom_builders_prefix_the_scheme() {
        assert_eq!(Telecom::tel("0113 2433144").value, "tel:0113 2433144");
        assert_eq!(Telecom::fax("0113 2433145").value, "fax:0113 2433145");
        let telecom = Telecom::tel("0113").with_use(TelecomUse::WorkPlace);
        assert_eq!(telecom.use_code, Some(TelecomUse::WorkPlace));
    }

    #[test]
    fn person_id_null_flavor_has_no_scheme() {
        let id = PersonId::null(NullFlavor::NoInformation);
        assert!(id.id.is_none());
        assert!(id.kind.is_none());
        assert_eq!(id.null_flavor, Some(NullFlavor::NoInformation));
    }
}
