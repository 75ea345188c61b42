//! Generated identifiers and clock access for default assignment.

use cda_model::DateValue;
use uuid::Uuid;

/// Supplies generated ids and the current time to the assembler. The default
/// source emits random v4 UUIDs (uppercase hyphenated, the form the codec
/// expects) and UTC now at minute precision; tests inject fixed values to
/// keep assembled output deterministic.
pub struct IdentitySource {
    id_gen: Box<dyn Fn() -> String + Send + Sync>,
    clock: Box<dyn Fn() -> DateValue + Send + Sync>,
}

impl IdentitySource {
    pub fn new(
        id_gen: impl Fn() -> String + Send + Sync + 'static,
        clock: impl Fn() -> DateValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id_gen: Box::new(id_gen),
            clock: Box::new(clock),
        }
    }

    /// A source returning the same id and timestamp on every call.
    pub fn fixed(id: impl Into<String>, now: DateValue) -> Self {
        let id = id.into();
        Self::new(move || id.clone(), move || now.clone())
    }

    pub fn new_id(&self) -> String {
        (self.id_gen)()
    }

    pub fn now(&self) -> DateValue {
        (self.clock)()
    }
}

impl Default for IdentitySource {
    fn default() -> Self {
        Self::new(
            || Uuid::new_v4().to_string().to_uppercase(),
            DateValue::now_minutes,
        )
    }
}
