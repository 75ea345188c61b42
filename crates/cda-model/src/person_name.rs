use serde::{Deserialize, Serialize};

use crate::emptiable::Emptiable;

/// A structured person name, with a free-text fallback for names that the
/// upstream extraction could not split into parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonName {
    pub title: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub full_name: Option<String>,
}

impl PersonName {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given_name: Some(given.into()),
            family_name: Some(family.into()),
            ..Self::default()
        }
    }

    pub fn full(name: impl Into<String>) -> Self {
        Self {
            full_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Emptiable for PersonName {
    fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.given_name,
            &self.family_name,
            &self.full_name,
        ]
        .iter()
        .all(|part| part.as_deref().is_none_or(|v| v.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_empty() {
        assert!(PersonName::default().is_empty());
        assert!(PersonName::new("", "  ").is_empty());
    }

    #[test]
    fn any_part_makes_non_empty() {
        assert!(!PersonName::new("Mark", "Smith").is_empty());
        assert!(!PersonName::full("Dr Mark Smith").is_empty());
        assert!(!PersonName::default().with_title("Dr").is_empty());
    }
}
