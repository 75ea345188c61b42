//! Emptiness normalization.
//!
//! Upstream extraction frequently populates nested objects whose every leaf
//! is blank. Validation must not let such husks satisfy a mandatory-field
//! check, so this pass rewrites the model depth-first: leaves first (blank
//! strings to `None`), then composites whose remaining content is empty, then
//! collection members. The transform is pure and idempotent.

use cda_model::{
    Address, AuthenticatorInfo, AuthorInfo, CodedValue, CustodianInfo, DataEntererInfo,
    DocumentFields, Emptiable, EncompassingEncounterInfo, Participant, PatientInfo, PersonName,
    Recipient, ServiceEventInfo, blank_to_none, empty_to_none,
};

/// Returns a fully normalized copy of the field model: every blank scalar is
/// `None`, every all-blank composite is `None`, and every collection member
/// that normalized to empty is removed.
pub fn normalize(mut fields: DocumentFields) -> DocumentFields {
    fields.title = blank_to_none(fields.title);
    fields.document_type = empty_to_none(fields.document_type.map(normalize_coded));
    fields.effective_time = empty_to_none(fields.effective_time);
    fields.set_id = blank_to_none(fields.set_id);
    fields.authored_time = empty_to_none(fields.authored_time);
    fields.consent = empty_to_none(fields.consent.map(normalize_coded));

    fields.patient = normalize_patient(fields.patient);
    fields.author = normalize_author(fields.author);
    fields.data_enterer = normalize_data_enterer(fields.data_enterer);
    fields.custodian = normalize_custodian(fields.custodian);
    fields.authenticator = normalize_authenticator(fields.authenticator);
    fields.service_event = normalize_service_event(fields.service_event);
    fields.encounter = normalize_encounter(fields.encounter);

    fields.recipient = empty_to_none(fields.recipient.map(normalize_recipient));
    fields.copy_recipient = empty_to_none(fields.copy_recipient.map(normalize_recipient));
    fields.participant = empty_to_none(fields.participant.map(normalize_participant));

    fields.recipients = normalize_members(fields.recipients, normalize_recipient);
    fields.copy_recipients = normalize_members(fields.copy_recipients, normalize_recipient);
    fields.participants = normalize_members(fields.participants, normalize_participant);

    fields
}

/// Normalizes each member, then drops members empty under their own
/// predicate. Order of surviving members is preserved.
fn normalize_members<T: Emptiable>(members: Vec<T>, normalize_one: impl Fn(T) -> T) -> Vec<T> {
    members
        .into_iter()
        .map(normalize_one)
        .filter(|member| !member.is_empty())
        .collect()
}

fn normalize_patient(mut patient: PatientInfo) -> PatientInfo {
    patient.nhs_number = blank_to_none(patient.nhs_number);
    patient.name = empty_to_none(patient.name.map(normalize_name));
    patient.birth_date = empty_to_none(patient.birth_date);
    patient.address = empty_to_none(patient.address.map(normalize_address));
    patient.telephone = blank_to_none(patient.telephone);
    patient.mobile = blank_to_none(patient.mobile);
    patient.usual_gp_ods_code = blank_to_none(patient.usual_gp_ods_code);
    patient.usual_gp_org_name = blank_to_none(patient.usual_gp_org_name);
    patient.usual_gp_telephone = blank_to_none(patient.usual_gp_telephone);
    patient.usual_gp_fax = blank_to_none(patient.usual_gp_fax);
    patient.usual_gp_address = empty_to_none(patient.usual_gp_address.map(normalize_address));
    patient
}

fn normalize_author(mut author: AuthorInfo) -> AuthorInfo {
    author.sds_id = blank_to_none(author.sds_id);
    author.sds_role_id = blank_to_none(author.sds_role_id);
    author.role = empty_to_none(author.role.map(normalize_coded));
    author.name = empty_to_none(author.name.map(normalize_name));
    author.organisation_ods_id = blank_to_none(author.organisation_ods_id);
    author.organisation_name = blank_to_none(author.organisation_name);
    author.address = empty_to_none(author.address.map(normalize_address));
    author.telephone = blank_to_none(author.telephone);
    author
}

fn normalize_data_enterer(mut data_enterer: DataEntererInfo) -> DataEntererInfo {
    data_enterer.sds_id = blank_to_none(data_enterer.sds_id);
    data_enterer.sds_role_id = blank_to_none(data_enterer.sds_role_id);
    data_enterer.name = empty_to_none(data_enterer.name.map(normalize_name));
    data_enterer
}

fn normalize_custodian(mut custodian: CustodianInfo) -> CustodianInfo {
    custodian.ods_code = blank_to_none(custodian.ods_code);
    custodian.organisation_name = blank_to_none(custodian.organisation_name);
    custodian
}

fn normalize_authenticator(mut authenticator: AuthenticatorInfo) -> AuthenticatorInfo {
    authenticator.sds_id = blank_to_none(authenticator.sds_id);
    authenticator.sds_role_id = blank_to_none(authenticator.sds_role_id);
    authenticator.name = empty_to_none(authenticator.name.map(normalize_name));
    authenticator.time = empty_to_none(authenticator.time);
    authenticator
}

fn normalize_service_event(mut event: ServiceEventInfo) -> ServiceEventInfo {
    event.code = empty_to_none(event.code.map(normalize_coded));
    event.from_time = empty_to_none(event.from_time);
    event.to_time = empty_to_none(event.to_time);
    event.performer_name = empty_to_none(event.performer_name.map(normalize_name));
    event.performer_ods_code = blank_to_none(event.performer_ods_code);
    event.performer_org_name = blank_to_none(event.performer_org_name);
    event
}

fn normalize_encounter(mut encounter: EncompassingEncounterInfo) -> EncompassingEncounterInfo {
    encounter.encounter_type = empty_to_none(encounter.encounter_type.map(normalize_coded));
    encounter.from_time = empty_to_none(encounter.from_time);
    encounter.to_time = empty_to_none(encounter.to_time);
    encounter.location_type = empty_to_none(encounter.location_type.map(normalize_coded));
    encounter.location_name = blank_to_none(encounter.location_name);
    encounter.location_address = empty_to_none(encounter.location_address.map(normalize_address));
    encounter
}

fn normalize_recipient(mut recipient: Recipient) -> Recipient {
    recipient.name = empty_to_none(recipient.name.map(normalize_name));
    recipient.address = empty_to_none(recipient.address.map(normalize_address));
    recipient.telephone = blank_to_none(recipient.telephone);
    recipient.job_role = empty_to_none(recipient.job_role.map(normalize_coded));
    recipient.ods_code = blank_to_none(recipient.ods_code);
    recipient.organisation_name = blank_to_none(recipient.organisation_name);
    recipient
}

fn normalize_participant(mut participant: Participant) -> Participant {
    participant.name = empty_to_none(participant.name.map(normalize_name));
    participant.sds_id = blank_to_none(participant.sds_id);
    participant.sds_role_id = blank_to_none(participant.sds_role_id);
    participant.address = empty_to_none(participant.address.map(normalize_address));
    participant.telephone = blank_to_none(participant.telephone);
    participant.ods_code = blank_to_none(participant.ods_code);
    participant.organisation_name = blank_to_none(participant.organisation_name);
    participant
}

fn normalize_address(mut address: Address) -> Address {
    address.lines.retain(|line| !line.trim().is_empty());
    address.city = blank_to_none(address.city);
    address.postcode = blank_to_none(address.postcode);
    address
}

fn normalize_name(mut name: PersonName) -> PersonName {
    name.title = blank_to_none(name.title);
    name.given_name = blank_to_none(name.given_name);
    name.family_name = blank_to_none(name.family_name);
    name.full_name = blank_to_none(name.full_name);
    name
}

fn normalize_coded(mut coded: CodedValue) -> CodedValue {
    coded.code = blank_to_none(coded.code);
    coded.display_name = blank_to_none(coded.display_name);
    coded.oid = blank_to_none(coded.oid);
    coded
}
