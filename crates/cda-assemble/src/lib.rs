//! Validation and assembly of the clinical document field tree.
//!
//! The pipeline is a pure, synchronous computation over one
//! [`DocumentFields`] instance: shorthand resolution, emptiness
//! normalization, then aggregate validation and assembly. Callers receive
//! either a complete [`ClinicalDocument`] for the downstream codec or a
//! complete [`ViolationReport`] listing every missing or inconsistent field.

mod builders;
mod document;
mod identity;

pub use builders::assemble;
pub use document::{
    AttachmentEncoding, AuthorSection, ClinicalDocument, ConsentSection, CustodianSection,
    EncounterSection, NonXmlBody, OrgId, ParticipantSection, PatientId, PatientSection,
    PerformerSection, PersonId, PersonSection, RecipientSection, ServiceEventSection, Telecom,
};
pub use identity::IdentitySource;

use cda_model::{DocumentFields, ViolationReport};

/// Runs the full pipeline with freshly generated identifiers and the real
/// clock.
pub fn build_document(fields: DocumentFields) -> Result<ClinicalDocument, ViolationReport> {
    build_document_with(fields, &IdentitySource::default())
}

/// Runs the full pipeline with an injected identity source, letting tests
/// pin generated ids and timestamps.
pub fn build_document_with(
    fields: DocumentFields,
    ids: &IdentitySource,
) -> Result<ClinicalDocument, ViolationReport> {
    let fields = cda_normalize::prepare(fields);
    let result = assemble(&fields, ids);
    match &result {
        Ok(document) => tracing::debug!(
            document_id = %document.document_id,
            recipients = document.primary_recipients.len(),
            "assembled clinical document"
        ),
        Err(report) => tracing::debug!(
            violations = report.len(),
            missing = report.missing_count(),
            conditional = report.conditional_count(),
            "document rejected"
        ),
    }
    result
}

/// Attaches the original submission to an assembled document as a
/// base64-encoded non-XML body.
pub fn attach_non_xml_body(
    document: &mut ClinicalDocument,
    media_type: impl Into<String>,
    base64_content: impl Into<String>,
) {
    document.non_xml_body = Some(NonXmlBody {
        media_type: media_type.into(),
        encoding: AttachmentEncoding::Base64,
        content: base64_content.into(),
    });
}
