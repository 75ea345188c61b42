mod normalize;
mod shorthand;

pub use normalize::normalize;
pub use shorthand::resolve_shorthand;

use cda_model::DocumentFields;

/// The canonical pre-validation pipeline: shorthand resolution followed by
/// emptiness normalization. Validation must only ever see prepared models.
pub fn prepare(fields: DocumentFields) -> DocumentFields {
    let fields = normalize(resolve_shorthand(fields));
    tracing::debug!(
        recipients = fields.recipients.len(),
        copy_recipients = fields.copy_recipients.len(),
        participants = fields.participants.len(),
        "prepared field model"
    );
    fields
}
