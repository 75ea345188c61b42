pub mod address;
pub mod coded;
pub mod datetime;
pub mod emptiable;
pub mod error;
pub mod fields;
pub mod person_name;
pub mod violation;
pub mod vocab;

pub use address::Address;
pub use coded::CodedValue;
pub use datetime::{DateRange, DateValue};
pub use emptiable::{Emptiable, blank_to_none, empty_to_none, is_none_or_empty};
pub use error::{ModelError, Result};
pub use fields::{
    AuthenticatorInfo, AuthorInfo, CustodianInfo, DataEntererInfo, DocumentFields,
    EncompassingEncounterInfo, Participant, PatientInfo, Recipient, ServiceEventInfo,
};
pub use person_name::PersonName;
pub use violation::{Violation, ViolationKind, ViolationReport};
pub use vocab::{
    AddressUse, ConfidentialityCode, EventClassCode, NullFlavor, OrgIdKind, ParticipationType,
    PatientIdKind, PersonIdKind, Sex, TelecomUse,
};
