//! Subsection builders and the aggregating assembler.
//!
//! Each subsection has an independent builder that checks its mandatory and
//! conditional-group rules and either returns the assembled section or the
//! violations it found. [`assemble`] runs every builder regardless of earlier
//! failures, so the caller sees every problem in one report instead of a
//! fail-fix-retry loop per field.

use cda_model::{
    AddressUse, AuthenticatorInfo, AuthorInfo, ConfidentialityCode, CustodianInfo,
    DataEntererInfo, DateRange, DateValue, DocumentFields, Emptiable, EncompassingEncounterInfo,
    NullFlavor, Participant, PatientIdKind, PatientInfo, PersonIdKind, Recipient,
    ServiceEventInfo, TelecomUse, Violation, ViolationReport,
};

use crate::document::{
    AuthorSection, ClinicalDocument, ConsentSection, CustodianSection, EncounterSection, OrgId,
    ParticipantSection, PatientId, PatientSection, PerformerSection, PersonId, PersonSection,
    RecipientSection, ServiceEventSection, Telecom,
};
use crate::identity::IdentitySource;

/// Validates the prepared field model and assembles the document tree.
///
/// Returns the complete tree when every subsection passes, or the complete
/// aggregated violation report otherwise; never a partial assembly. Expects
/// a model that has been through shorthand resolution and normalization; an
/// unresolved shorthand slot that disagrees with its collection is reported
/// as an unresolvable reference rather than silently dropped.
pub fn assemble(
    fields: &DocumentFields,
    ids: &IdentitySource,
) -> Result<ClinicalDocument, ViolationReport> {
    let mut report = ViolationReport::new();
    check_shorthand_consistency(fields, &mut report);

    let title = fields.title.clone();
    if title.is_none() {
        report.add(Violation::missing(
            "title",
            "The document title must be provided",
        ));
    }
    let document_type = fields.document_type.clone();
    if document_type.is_none() {
        report.add(Violation::missing(
            "documentType",
            "The document type must be provided",
        ));
    }

    let patient = collect(build_patient(&fields.patient), &mut report);
    let author = collect(build_author(&fields.author), &mut report);
    let data_enterer = collect_optional(build_data_enterer(&fields.data_enterer), &mut report);
    let custodian = collect(build_custodian(&fields.custodian), &mut report);

    if fields.recipients.is_empty() {
        report.add(Violation::missing(
            "recipients",
            "At least one recipient must be provided",
        ));
    }
    let mut primary_recipients = Vec::new();
    for (index, recipient) in fields.recipients.iter().enumerate() {
        let built = build_recipient("recipients", index, recipient);
        if let Some(section) = collect(built, &mut report) {
            primary_recipients.push(section);
        }
    }
    let mut information_only_recipients = Vec::new();
    for (index, recipient) in fields.copy_recipients.iter().enumerate() {
        let built = build_recipient("copyRecipients", index, recipient);
        if let Some(section) = collect(built, &mut report) {
            information_only_recipients.push(section);
        }
    }

    let authenticated = collect_optional(build_authenticator(&fields.authenticator), &mut report);

    let mut participants = Vec::new();
    for (index, participant) in fields.participants.iter().enumerate() {
        if let Some(section) = collect(build_participant(index, participant), &mut report) {
            participants.push(section);
        }
    }

    let service_event =
        collect_optional(build_service_event(&fields.service_event, ids), &mut report);
    let encounter = collect_optional(build_encounter(&fields.encounter, ids), &mut report);

    if !report.is_empty() {
        return Err(report);
    }

    // Unreachable fallback: every absent value above recorded a violation.
    let (Some(title), Some(document_type), Some(patient), Some(author), Some(custodian)) =
        (title, document_type, patient, author, custodian)
    else {
        return Err(report);
    };

    let now = ids.now();
    let (authenticator, authenticated_time) = match authenticated {
        Some((section, time)) => (Some(section), Some(time)),
        None => (None, None),
    };

    Ok(ClinicalDocument {
        document_id: ids.new_id(),
        title,
        document_type,
        effective_time: fields.effective_time.clone().unwrap_or_else(|| now.clone()),
        set_id: fields.set_id.clone().unwrap_or_else(|| ids.new_id()),
        version: fields.version.unwrap_or(1),
        confidentiality: ConfidentialityCode::default(),
        authored_time: fields.authored_time.clone().unwrap_or(now),
        patient,
        author,
        data_enterer,
        custodian,
        primary_recipients,
        information_only_recipients,
        authenticator,
        authenticated_time,
        participants,
        service_event,
        consent: fields.consent.clone().map(|code| ConsentSection {
            id: ids.new_id(),
            code,
        }),
        encounter,
        non_xml_body: None,
    })
}

fn collect<T>(result: Result<T, Vec<Violation>>, report: &mut ViolationReport) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violations) => {
            report.extend(violations);
            None
        }
    }
}

fn collect_optional<T>(
    result: Result<Option<T>, Vec<Violation>>,
    report: &mut ViolationReport,
) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(violations) => {
            report.extend(violations);
            None
        }
    }
}

/// Defensive: shorthand slots are cleared by resolution, so a populated slot
/// that is not mirrored in its collection means the caller bypassed the
/// pipeline and the model can no longer be trusted.
fn check_shorthand_consistency(fields: &DocumentFields, report: &mut ViolationReport) {
    if let Some(recipient) = &fields.recipient
        && !fields.recipients.contains(recipient)
    {
        report.add(Violation::unresolvable(
            "recipient",
            "The shorthand recipient is not present in the recipients collection; resolve shorthand entries before assembly",
        ));
    }
    if let Some(copy_recipient) = &fields.copy_recipient
        && !fields.copy_recipients.contains(copy_recipient)
    {
        report.add(Violation::unresolvable(
            "copyRecipient",
            "The shorthand copy recipient is not present in the copy recipients collection; resolve shorthand entries before assembly",
        ));
    }
    if let Some(participant) = &fields.participant
        && !fields.participants.contains(participant)
    {
        report.add(Violation::unresolvable(
            "participant",
            "The shorthand participant is not present in the participants collection; resolve shorthand entries before assembly",
        ));
    }
}

fn build_patient(patient: &PatientInfo) -> Result<PatientSection, Vec<Violation>> {
    let mut violations = Vec::new();
    if patient.nhs_number_is_traced.is_none() {
        violations.push(Violation::missing(
            "patient.nhsNumberIsTraced",
            "The tracing status for the NHS number must be provided",
        ));
    }
    if patient.nhs_number.is_none() {
        violations.push(Violation::missing(
            "patient.nhsNumber",
            "The patient's NHS number must be provided",
        ));
    }
    if patient.address.is_none() {
        violations.push(Violation::missing(
            "patient.address",
            "The patient's address must be provided",
        ));
    }
    if patient.name.is_none() {
        violations.push(Violation::missing(
            "patient.name",
            "The patient's name must be provided",
        ));
    }
    if patient.gender.is_none() {
        violations.push(Violation::missing(
            "patient.gender",
            "The patient's gender must be provided",
        ));
    }
    if patient.birth_date.is_none() {
        violations.push(Violation::missing(
            "patient.birthDate",
            "The patient's date of birth must be provided",
        ));
    }
    if patient.usual_gp_ods_code.is_none() {
        violations.push(Violation::missing(
            "patient.usualGpOdsCode",
            "The usual GP's ODS code must be provided",
        ));
    }
    if patient.usual_gp_org_name.is_none() {
        violations.push(Violation::missing(
            "patient.usualGpOrgName",
            "The usual GP's organisation name must be provided",
        ));
    }

    let (
        Some(traced),
        Some(nhs_number),
        Some(address),
        Some(name),
        Some(gender),
        Some(birth_date),
        Some(gp_ods_code),
        Some(gp_org_name),
    ) = (
        patient.nhs_number_is_traced,
        patient.nhs_number.clone(),
        patient.address.clone(),
        patient.name.clone(),
        patient.gender,
        patient.birth_date.clone(),
        patient.usual_gp_ods_code.clone(),
        patient.usual_gp_org_name.clone(),
    )
    else {
        return Err(violations);
    };

    let kind = if traced {
        PatientIdKind::VerifiedNhsNumber
    } else {
        PatientIdKind::UnverifiedNhsNumber
    };

    let mut telecoms = Vec::new();
    if let Some(telephone) = &patient.telephone {
        telecoms.push(Telecom::tel(telephone));
    }
    if let Some(mobile) = &patient.mobile {
        telecoms.push(Telecom::tel(mobile).with_use(TelecomUse::MobileContact));
    }

    let mut gp_telecoms = Vec::new();
    if let Some(telephone) = &patient.usual_gp_telephone {
        gp_telecoms.push(Telecom::tel(telephone).with_use(TelecomUse::WorkPlace));
    }
    if let Some(fax) = &patient.usual_gp_fax {
        gp_telecoms.push(Telecom::fax(fax).with_use(TelecomUse::WorkPlace));
    }

    Ok(PatientSection {
        ids: vec![PatientId {
            id: nhs_number,
            kind,
        }],
        names: vec![name],
        addresses: vec![address],
        telecoms,
        sex: gender,
        birth_time: birth_date,
        registered_gp_org_id: OrgId::ods(gp_ods_code),
        registered_gp_org_name: gp_org_name,
        registered_gp_address: patient
            .usual_gp_address
            .clone()
            .map(|gp_address| gp_address.with_use(AddressUse::WorkPlace)),
        registered_gp_telecoms: gp_telecoms,
    })
}

fn build_author(author: &AuthorInfo) -> Result<AuthorSection, Vec<Violation>> {
    let mut violations = Vec::new();
    if author.sds_id.is_none() {
        violations.push(Violation::missing(
            "author.sdsId",
            "The SDS ID of the document author must be provided",
        ));
    }
    if author.role.is_none() {
        violations.push(Violation::missing(
            "author.role",
            "The job role of the document author must be provided",
        ));
    }
    if author.name.is_none() {
        violations.push(Violation::missing(
            "author.name",
            "The name of the document author must be provided",
        ));
    }
    if author.organisation_ods_id.is_none() {
        violations.push(Violation::missing(
            "author.organisationOdsId",
            "The ID of the organisation the document author belongs to must be provided",
        ));
    }
    if author.organisation_name.is_none() {
        violations.push(Violation::missing(
            "author.organisationName",
            "The name of the organisation the document author belongs to must be provided",
        ));
    }

    let (Some(sds_id), Some(role), Some(name), Some(org_id), Some(org_name)) = (
        author.sds_id.clone(),
        author.role.clone(),
        author.name.clone(),
        author.organisation_ods_id.clone(),
        author.organisation_name.clone(),
    ) else {
        return Err(violations);
    };

    let mut ids = vec![PersonId::sds(PersonIdKind::SdsId, sds_id)];
    if let Some(sds_role_id) = &author.sds_role_id {
        ids.push(PersonId::sds(PersonIdKind::SdsRoleProfile, sds_role_id));
    }

    Ok(AuthorSection {
        ids,
        job_role: role,
        name,
        organisation_id: OrgId::ods(org_id),
        organisation_name: org_name,
        addresses: author
            .address
            .clone()
            .map(|address| address.with_use(AddressUse::WorkPlace))
            .into_iter()
            .collect(),
        telecoms: author
            .telephone
            .as_deref()
            .map(Telecom::tel)
            .into_iter()
            .collect(),
    })
}

/// The data enterer is optional as a whole; any populated field activates
/// the section's mandatory checks.
fn build_data_enterer(
    data_enterer: &DataEntererInfo,
) -> Result<Option<PersonSection>, Vec<Violation>> {
    if data_enterer.is_empty() {
        return Ok(None);
    }

    let mut violations = Vec::new();
    if data_enterer.sds_id.is_none() {
        violations.push(Violation::missing(
            "dataEnterer.sdsId",
            "The SDS ID of the data enterer must be provided",
        ));
    }
    if data_enterer.sds_role_id.is_none() {
        violations.push(Violation::missing(
            "dataEnterer.sdsRoleId",
            "The SDS Role ID of the data enterer must be provided",
        ));
    }
    if data_enterer.name.is_none() {
        violations.push(Violation::missing(
            "dataEnterer.name",
            "The name of the data enterer must be provided",
        ));
    }

    let (Some(sds_id), Some(sds_role_id), Some(name)) = (
        data_enterer.sds_id.clone(),
        data_enterer.sds_role_id.clone(),
        data_enterer.name.clone(),
    ) else {
        return Err(violations);
    };

    Ok(Some(PersonSection {
        ids: vec![
            PersonId::sds(PersonIdKind::SdsId, sds_id),
            PersonId::sds(PersonIdKind::SdsRoleProfile, sds_role_id),
        ],
        name,
    }))
}

fn build_custodian(custodian: &CustodianInfo) -> Result<CustodianSection, Vec<Violation>> {
    let mut violations = Vec::new();
    if custodian.ods_code.is_none() {
        violations.push(Violation::missing(
            "custodian.odsCode",
            "The ODS ID of the custodian organisation must be provided",
        ));
    }
    if custodian.organisation_name.is_none() {
        violations.push(Violation::missing(
            "custodian.organisationName",
            "The name of the custodian organisation must be provided",
        ));
    }

    let (Some(ods_code), Some(name)) =
        (custodian.ods_code.clone(), custodian.organisation_name.clone())
    else {
        return Err(violations);
    };

    Ok(CustodianSection {
        id: OrgId::ods(ods_code),
        name,
    })
}

fn build_recipient(
    path: &str,
    index: usize,
    recipient: &Recipient,
) -> Result<RecipientSection, Vec<Violation>> {
    let mut violations = Vec::new();
    if recipient.name.is_none() {
        violations.push(Violation::missing(
            format!("{path}[{index}].name"),
            "The name of the recipient must be provided",
        ));
    }
    if recipient.ods_code.is_none() {
        violations.push(Violation::missing(
            format!("{path}[{index}].odsCode"),
            "The ODS code for the organisation of the recipient must be provided",
        ));
    }
    if recipient.organisation_name.is_none() {
        violations.push(Violation::missing(
            format!("{path}[{index}].organisationName"),
            "The organisation name for the recipient must be provided",
        ));
    }

    let (Some(name), Some(ods_code), Some(org_name)) = (
        recipient.name.clone(),
        recipient.ods_code.clone(),
        recipient.organisation_name.clone(),
    ) else {
        return Err(violations);
    };

    Ok(RecipientSection {
        role_id_null_flavor: NullFlavor::NotApplicable,
        name,
        address: recipient.address.clone(),
        telecoms: recipient
            .telephone
            .as_deref()
            .map(Telecom::tel)
            .into_iter()
            .collect(),
        job_role: recipient.job_role.clone(),
        organisation_id: OrgId::ods(ods_code),
        organisation_name: org_name,
    })
}

/// The authenticator section activates only when a name is present; a name
/// then requires both SDS identifiers and the authentication time.
fn build_authenticator(
    authenticator: &AuthenticatorInfo,
) -> Result<Option<(PersonSection, DateValue)>, Vec<Violation>> {
    let Some(name) = authenticator.name.clone() else {
        return Ok(None);
    };

    let mut violations = Vec::new();
    if authenticator.time.is_none() {
        violations.push(Violation::missing(
            "authenticator.time",
            "The time the document was authenticated must be provided",
        ));
    }
    if authenticator.sds_id.is_none() {
        violations.push(Violation::missing(
            "authenticator.sdsId",
            "The SDS ID for the authenticator must be provided",
        ));
    }
    if authenticator.sds_role_id.is_none() {
        violations.push(Violation::missing(
            "authenticator.sdsRoleId",
            "The SDS Role ID for the authenticator must be provided",
        ));
    }

    let (Some(time), Some(sds_id), Some(sds_role_id)) = (
        authenticator.time.clone(),
        authenticator.sds_id.clone(),
        authenticator.sds_role_id.clone(),
    ) else {
        return Err(violations);
    };

    Ok(Some((
        PersonSection {
            ids: vec![
                PersonId::sds(PersonIdKind::SdsId, sds_id),
                PersonId::sds(PersonIdKind::SdsRoleProfile, sds_role_id),
            ],
            name,
        },
        time,
    )))
}

/// Per-participant rules: the participation type is mandatory and the SDS
/// id/role-id pair is all-or-nothing.
fn build_participant(
    index: usize,
    participant: &Participant,
) -> Result<ParticipantSection, Vec<Violation>> {
    let mut violations = Vec::new();
    if participant.participation_type.is_none() {
        violations.push(Violation::missing(
            format!("participants[{index}].participationType"),
            "The participant type must be provided",
        ));
    }
    match (&participant.sds_id, &participant.sds_role_id) {
        (Some(_), None) => violations.push(Violation::conditional(
            format!("participants[{index}].sdsRoleId"),
            "If a participant SDS ID is provided, then an SDS Role ID must also be provided",
        )),
        (None, Some(_)) => violations.push(Violation::conditional(
            format!("participants[{index}].sdsId"),
            "If a participant SDS Role ID is provided, then an SDS ID must also be provided",
        )),
        _ => {}
    }

    let Some(type_code) = participant.participation_type else {
        return Err(violations);
    };
    if !violations.is_empty() {
        return Err(violations);
    }

    let ids = match (&participant.sds_id, &participant.sds_role_id) {
        (Some(sds_id), Some(sds_role_id)) => vec![
            PersonId::sds(PersonIdKind::SdsId, sds_id),
            PersonId::sds(PersonIdKind::SdsRoleProfile, sds_role_id),
        ],
        _ => Vec::new(),
    };

    Ok(ParticipantSection {
        type_code,
        name: participant.name.clone(),
        ids,
        address: participant.address.clone(),
        telecoms: participant
            .telephone
            .as_deref()
            .map(Telecom::tel)
            .into_iter()
            .collect(),
        organisation_id: participant.ods_code.clone().map(OrgId::ods),
        organisation_name: participant.organisation_name.clone(),
    })
}

/// The service event activates only when an event code is present. The event
/// type is then mandatory, and the performer group (name, ODS code,
/// organisation name) is strictly all-or-nothing.
fn build_service_event(
    event: &ServiceEventInfo,
    ids: &IdentitySource,
) -> Result<Option<ServiceEventSection>, Vec<Violation>> {
    let Some(event_code) = event.code.clone() else {
        return Ok(None);
    };

    let mut violations = Vec::new();
    let has_name = event.performer_name.is_some();
    let has_ods = event.performer_ods_code.is_some();
    let has_org = event.performer_org_name.is_some();
    let all = has_name && has_ods && has_org;
    let none = !has_name && !has_ods && !has_org;
    if !all && !none {
        violations.push(Violation::conditional(
            "serviceEvent.performerName",
            "If an event performer is provided, the name, ODS code and organisation name must all be included",
        ));
    }
    if event.event_type.is_none() {
        violations.push(Violation::missing(
            "serviceEvent.eventType",
            "If an event is provided, the type of event must also be included",
        ));
    }

    let Some(class_code) = event.event_type else {
        return Err(violations);
    };
    if !violations.is_empty() {
        return Err(violations);
    }

    let effective_time = (event.from_time.is_some() || event.to_time.is_some())
        .then(|| DateRange::new(event.from_time.clone(), event.to_time.clone()));

    let performer = match (
        event.performer_name.clone(),
        event.performer_ods_code.clone(),
        event.performer_org_name.clone(),
    ) {
        (Some(name), Some(ods_code), Some(org_name)) => Some(PerformerSection {
            person_id: PersonId::null(NullFlavor::NoInformation),
            name,
            organisation_id: OrgId::ods(ods_code),
            organisation_name: org_name,
        }),
        _ => None,
    };

    Ok(Some(ServiceEventSection {
        id: ids.new_id(),
        class_code,
        event_code,
        effective_time,
        performer,
    }))
}

/// The encompassing encounter activates only when an encounter type is
/// present; it then requires a location type and at least one bound of the
/// encounter time.
fn build_encounter(
    encounter: &EncompassingEncounterInfo,
    ids: &IdentitySource,
) -> Result<Option<EncounterSection>, Vec<Violation>> {
    let Some(encounter_type) = encounter.encounter_type.clone() else {
        return Ok(None);
    };

    let mut violations = Vec::new();
    if encounter.from_time.is_none() && encounter.to_time.is_none() {
        violations.push(Violation::missing(
            "encounter.fromTime",
            "If an encounter is included, it must have a start and/or end time",
        ));
    }
    if encounter.location_type.is_none() {
        violations.push(Violation::missing(
            "encounter.locationType",
            "If an encounter is included, it must have a location type",
        ));
    }

    let Some(care_setting_type) = encounter.location_type.clone() else {
        return Err(violations);
    };
    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(Some(EncounterSection {
        id: ids.new_id(),
        effective_time: DateRange::new(encounter.from_time.clone(), encounter.to_time.clone()),
        encounter_type,
        care_setting_type,
        place_name: encounter.location_name.clone(),
        place_address: encounter.location_address.clone(),
    }))
}
