use serde::{Deserialize, Serialize};

use crate::emptiable::Emptiable;
use crate::vocab::AddressUse;

/// A postal address as supplied in the property bag.
///
/// Address lines arrive either as a list or as individually numbered
/// properties already folded into `lines` by the upstream binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub lines: Vec<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    /// Stamped by the assembler for workplace addresses; never makes an
    /// otherwise blank address non-empty.
    pub use_code: Option<AddressUse>,
}

impl Address {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    pub fn with_use(mut self, use_code: AddressUse) -> Self {
        self.use_code = Some(use_code);
        self
    }
}

impl Emptiable for Address {
    fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
            && self.city.as_deref().is_none_or(|c| c.trim().is_empty())
            && self.postcode.as_deref().is_none_or(|p| p.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_address_is_empty() {
        assert!(Address::default().is_empty());
        assert!(Address::new(vec![String::new(), "  ".to_string()]).is_empty());
    }

    #[test]
    fn use_code_alone_is_still_empty() {
        let address = Address::default().with_use(AddressUse::WorkPlace);
        assert!(address.is_empty());
    }

    #[test]
    fn any_content_makes_non_empty() {
        assert!(!Address::new(vec!["1 High Street".to_string()]).is_empty());
        assert!(!Address::default().with_postcode("LS1 4HT").is_empty());
    }
}
