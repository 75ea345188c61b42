//! Resolution of single-entry shorthand slots.
//!
//! The property bag accepts a recipient, copy recipient, or participant
//! either as a list or as a single flattened object. The single-object form
//! lands in a shorthand slot that exists only transiently: resolution folds
//! it into the backing collection and clears the slot, so downstream code
//! only ever deals with the collections.

use cda_model::DocumentFields;

/// Folds each populated shorthand slot into its backing collection and
/// clears the slot. Entries value-equal to an existing collection member
/// collapse to one; insertion order is preserved. Absent slots are a no-op.
///
/// A slot overwritten before resolution simply loses the earlier value, so
/// the collection ends up with exactly the last shorthand entry.
pub fn resolve_shorthand(mut fields: DocumentFields) -> DocumentFields {
    if let Some(recipient) = fields.recipient.take() {
        fields.push_recipient(recipient);
    }
    if let Some(copy_recipient) = fields.copy_recipient.take() {
        fields.push_copy_recipient(copy_recipient);
    }
    if let Some(participant) = fields.participant.take() {
        fields.push_participant(participant);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use cda_model::{Participant, PersonName, Recipient};

    fn recipient(family: &str) -> Recipient {
        Recipient {
            name: Some(PersonName::new("Jane", family)),
            ods_code: Some("V396A".to_string()),
            organisation_name: Some("Leeds Teaching Hospitals".to_string()),
            ..Recipient::default()
        }
    }

    #[test]
    fn shorthand_slot_is_folded_and_cleared() {
        let fields = DocumentFields {
            recipient: Some(recipient("Jones")),
            ..DocumentFields::default()
        };
        let resolved = resolve_shorthand(fields);
        assert!(resolved.recipient.is_none());
        assert_eq!(resolved.recipients.len(), 1);
    }

    #[test]
    fn absent_slots_are_a_no_op() {
        let resolved = resolve_shorthand(DocumentFields::default());
        assert!(resolved.recipients.is_empty());
        assert!(resolved.copy_recipients.is_empty());
        assert!(resolved.participants.is_empty());
    }

    #[test]
    fn shorthand_duplicate_of_listed_entry_collapses() {
        let fields = DocumentFields {
            recipient: Some(recipient("Jones")),
            recipients: vec![recipient("Jones"), recipient("Smith")],
            ..DocumentFields::default()
        };
        let resolved = resolve_shorthand(fields);
        assert_eq!(resolved.recipients.len(), 2);
    }

    #[test]
    fn overwritten_slot_keeps_only_the_last_value() {
        let mut fields = DocumentFields::default();
        fields.recipient = Some(recipient("Jones"));
        fields.recipient = Some(recipient("Smith"));
        let resolved = resolve_shorthand(fields);
        assert_eq!(resolved.recipients.len(), 1);
        assert_eq!(
            resolved.recipients[0]
                .name
                .as_ref()
                .and_then(|n| n.family_name.as_deref()),
            Some("Smith")
        );
    }

    #[test]
    fn participant_shorthand_resolves_too() {
        let fields = DocumentFields {
            participant: Some(Participant {
                name: Some(PersonName::full("Dr Rose")),
                ..Participant::default()
            }),
            ..DocumentFields::default()
        };
        let resolved = resolve_shorthand(fields);
        assert!(resolved.participant.is_none());
        assert_eq!(resolved.participants.len(), 1);
    }
}
