//! The input field model: a typed property bag describing one clinical
//! encounter, grouped into the subsections the assembler builds from.
//!
//! Instances are constructed fresh per transformation request, passed through
//! shorthand resolution and normalization, and then read (never mutated) by
//! the validator/assembler.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::coded::CodedValue;
use crate::datetime::DateValue;
use crate::emptiable::{Emptiable, is_none_or_empty};
use crate::person_name::PersonName;
use crate::vocab::{EventClassCode, ParticipationType, Sex};

/// Root aggregate for one document submission.
///
/// `recipient`, `copy_recipient`, and `participant` are single-entry
/// shorthands for their backing collections: they exist only transiently and
/// are folded into the collections (and cleared) by shorthand resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentFields {
    pub title: Option<String>,
    pub document_type: Option<CodedValue>,
    pub effective_time: Option<DateValue>,
    pub set_id: Option<String>,
    /// Defaults to 1 at assembly when unspecified.
    pub version: Option<u32>,
    pub authored_time: Option<DateValue>,
    pub consent: Option<CodedValue>,

    pub patient: PatientInfo,
    pub author: AuthorInfo,
    pub data_enterer: DataEntererInfo,
    pub custodian: CustodianInfo,

    pub recipient: Option<Recipient>,
    pub recipients: Vec<Recipient>,
    pub copy_recipient: Option<Recipient>,
    pub copy_recipients: Vec<Recipient>,

    pub authenticator: AuthenticatorInfo,

    pub participant: Option<Participant>,
    pub participants: Vec<Participant>,

    pub service_event: ServiceEventInfo,
    pub encounter: EncompassingEncounterInfo,
}

impl DocumentFields {
    /// Adds a primary recipient, collapsing value-equal duplicates to one
    /// entry while preserving first-insertion order. Duplicate collapse is
    /// intentional: re-submitting the same logical recipient is a no-op.
    pub fn push_recipient(&mut self, recipient: Recipient) {
        if !self.recipients.contains(&recipient) {
            self.recipients.push(recipient);
        }
    }

    /// Adds a copy (information-only) recipient; same duplicate collapse as
    /// [`push_recipient`](Self::push_recipient).
    pub fn push_copy_recipient(&mut self, recipient: Recipient) {
        if !self.copy_recipients.contains(&recipient) {
            self.copy_recipients.push(recipient);
        }
    }

    /// Adds a participant; same duplicate collapse as
    /// [`push_recipient`](Self::push_recipient).
    pub fn push_participant(&mut self, participant: Participant) {
        if !self.participants.contains(&participant) {
            self.participants.push(participant);
        }
    }
}

/// Patient demographics plus the registered (usual) GP organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInfo {
    pub nhs_number: Option<String>,
    /// Whether the NHS number has been traced against the national
    /// demographics service; selects the id scheme in the output.
    pub nhs_number_is_traced: Option<bool>,
    pub name: Option<PersonName>,
    pub birth_date: Option<DateValue>,
    pub gender: Option<Sex>,
    pub address: Option<Address>,
    pub telephone: Option<String>,
    pub mobile: Option<String>,
    pub usual_gp_ods_code: Option<String>,
    pub usual_gp_org_name: Option<String>,
    pub usual_gp_telephone: Option<String>,
    pub usual_gp_fax: Option<String>,
    pub usual_gp_address: Option<Address>,
}

/// The document author: an identified member of staff within an organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorInfo {
    pub sds_id: Option<String>,
    pub sds_role_id: Option<String>,
    pub role: Option<CodedValue>,
    pub name: Option<PersonName>,
    pub organisation_ods_id: Option<String>,
    pub organisation_name: Option<String>,
    pub address: Option<Address>,
    pub telephone: Option<String>,
}

/// The person who keyed the document in, when different from the author.
/// Wholly absent is valid; any content activates the section's checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataEntererInfo {
    pub sds_id: Option<String>,
    pub sds_role_id: Option<String>,
    pub name: Option<PersonName>,
}

/// The organisation that maintains the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustodianInfo {
    pub ods_code: Option<String>,
    pub organisation_name: Option<String>,
}

/// A document recipient (primary or copy).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipient {
    pub name: Option<PersonName>,
    pub address: Option<Address>,
    pub telephone: Option<String>,
    pub job_role: Option<CodedValue>,
    pub ods_code: Option<String>,
    pub organisation_name: Option<String>,
}

/// The person who authenticated (signed off) the document. The section
/// activates only when a name is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticatorInfo {
    pub sds_id: Option<String>,
    pub sds_role_id: Option<String>,
    pub name: Option<PersonName>,
    pub time: Option<DateValue>,
}

/// An additional participant in the documented encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Participant {
    pub name: Option<PersonName>,
    pub sds_id: Option<String>,
    pub sds_role_id: Option<String>,
    pub address: Option<Address>,
    pub telephone: Option<String>,
    pub ods_code: Option<String>,
    pub organisation_name: Option<String>,
    pub participation_type: Option<ParticipationType>,
}

/// The clinical service event the document describes. The section activates
/// only when an event code is present; the performer group is all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceEventInfo {
    pub code: Option<CodedValue>,
    pub event_type: Option<EventClassCode>,
    pub from_time: Option<DateValue>,
    pub to_time: Option<DateValue>,
    pub performer_name: Option<PersonName>,
    pub performer_ods_code: Option<String>,
    pub performer_org_name: Option<String>,
}

/// The encounter the document was produced within. The section activates
/// only when an encounter type is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncompassingEncounterInfo {
    pub encounter_type: Option<CodedValue>,
    pub from_time: Option<DateValue>,
    pub to_time: Option<DateValue>,
    pub location_type: Option<CodedValue>,
    pub location_name: Option<String>,
    pub location_address: Option<Address>,
}

impl Emptiable for Recipient {
    fn is_empty(&self) -> bool {
        is_none_or_empty(&self.name)
            && is_none_or_empty(&self.address)
            && is_none_or_empty(&self.telephone)
            && is_none_or_empty(&self.job_role)
            && is_none_or_empty(&self.ods_code)
            && is_none_or_empty(&self.organisation_name)
    }
}

impl Emptiable for Participant {
    fn is_empty(&self) -> bool {
        is_none_or_empty(&self.name)
            && is_none_or_empty(&self.sds_id)
            && is_none_or_empty(&self.sds_role_id)
            && is_none_or_empty(&self.address)
            && is_none_or_empty(&self.telephone)
            && is_none_or_empty(&self.ods_code)
            && is_none_or_empty(&self.organisation_name)
            && self.participation_type.is_none()
    }
}

impl Emptiable for DataEntererInfo {
    fn is_empty(&self) -> bool {
        is_none_or_empty(&self.sds_id)
            && is_none_or_empty(&self.sds_role_id)
            && is_none_or_empty(&self.name)
    }
}

impl Emptiable for AuthenticatorInfo {
    fn is_empty(&self) -> bool {
        is_none_or_empty(&self.sds_id)
            && is_none_or_empty(&self.sds_role_id)
            && is_none_or_empty(&self.name)
            && is_none_or_empty(&self.time)
    }
}

impl Emptiable for ServiceEventInfo {
    fn is_empty(&self) -> bool {
        is_none_or_empty(&self.code)
            && self.event_type.is_none()
            && is_none_or_empty(&self.from_time)
            && is_none_or_empty(&self.to_time)
            && is_none_or_empty(&self.performer_name)
            && is_none_or_empty(&self.performer_ods_code)
            && is_none_or_empty(&self.performer_org_name)
    }
}

impl Emptiable for EncompassingEncounterInfo {
    fn is_empty(&self) -> bool {
        is_none_or_empty(&self.encounter_type)
            && is_none_or_empty(&self.from_time)
            && is_none_or_empty(&self.to_time)
            && is_none_or_empty(&self.location_type)
            && is_none_or_empty(&self.location_name)
            && is_none_or_empty(&self.location_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(family: &str) -> Recipient {
        Recipient {
            name: Some(PersonName::new("Jane", family)),
            ods_code: Some("V396A".to_string()),
            organisation_name: Some("Leeds Teaching Hospitals".to_string()),
            ..Recipient::default()
        }
    }

    #[test]
    fn push_recipient_collapses_value_equal_duplicates() {
        let mut fields = DocumentFields::default();
        fields.push_recipient(recipient("Jones"));
        fields.push_recipient(recipient("Jones"));
        fields.push_recipient(recipient("Smith"));
        assert_eq!(fields.recipients.len(), 2);
        assert_eq!(
            fields.recipients[0].name.as_ref().and_then(|n| n.family_name.as_deref()),
            Some("Jones")
        );
    }

    #[test]
    fn default_sections_are_empty() {
        assert!(DataEntererInfo::default().is_empty());
        assert!(AuthenticatorInfo::default().is_empty());
        assert!(ServiceEventInfo::default().is_empty());
        assert!(EncompassingEncounterInfo::default().is_empty());
        assert!(Recipient::default().is_empty());
        assert!(Participant::default().is_empty());
    }

    #[test]
    fn participation_type_alone_activates_participant() {
        let participant = Participant {
            participation_type: Some(ParticipationType::CallbackContact),
            ..Participant::default()
        };
        assert!(!participant.is_empty());
    }

    #[test]
    fn fields_round_trip_through_json() {
        let mut fields = DocumentFields {
            title: Some("Discharge Summary".to_string()),
            ..DocumentFields::default()
        };
        fields.push_recipient(recipient("Jones"));
        let json = serde_json::to_string(&fields).expect("serialize fields");
        let round: DocumentFields = serde_json::from_str(&json).expect("deserialize fields");
        assert_eq!(round, fields);
    }
}
