use serde::{Deserialize, Serialize};

use crate::emptiable::Emptiable;

/// A coded concept: code, display name, and the OID of the code system it
/// belongs to. Document types, job roles, event codes, and encounter/location
/// types all arrive in this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodedValue {
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub oid: Option<String>,
}

impl CodedValue {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            display_name: Some(display_name.into()),
            oid: None,
        }
    }

    pub fn with_oid(mut self, oid: impl Into<String>) -> Self {
        self.oid = Some(oid.into());
        self
    }
}

impl Emptiable for CodedValue {
    fn is_empty(&self) -> bool {
        [&self.code, &self.display_name, &self.oid]
            .iter()
            .all(|part| part.as_deref().is_none_or(|v| v.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_coded_value_is_empty() {
        assert!(CodedValue::default().is_empty());
        assert!(CodedValue::new("", " ").is_empty());
    }

    #[test]
    fn code_alone_is_non_empty() {
        assert!(!CodedValue::new("886721000000107", "").is_empty());
    }
}
