use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// A required scalar or object is absent after normalization.
    MissingMandatoryField,
    /// An all-or-nothing field group is partially populated.
    ConditionalGroupViolation,
    /// A shorthand slot disagrees with its backing collection. Defensive
    /// only; cannot occur when inputs pass through shorthand resolution.
    UnresolvableReference,
}

/// One validation failure, directly presentable to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field identifier using the model's JSON names, e.g. `patient.birthDate`
    /// or `recipients[1].organisationName`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn missing(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind: ViolationKind::MissingMandatoryField,
        }
    }

    pub fn conditional(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind: ViolationKind::ConditionalGroupViolation,
        }
    }

    pub fn unresolvable(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind: ViolationKind::UnresolvableReference,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The aggregated violation report for one submission: every failure found
/// across every subsection, in evaluation order.
///
/// Doubles as the error type of the assembly operation, so callers get either
/// a complete document or a complete report, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    pub violations: Vec<Violation>,
}

impl ViolationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    pub fn missing_count(&self) -> usize {
        self.count(ViolationKind::MissingMandatoryField)
    }

    pub fn conditional_count(&self) -> usize {
        self.count(ViolationKind::ConditionalGroupViolation)
    }

    fn count(&self, kind: ViolationKind) -> usize {
        self.violations
            .iter()
            .filter(|violation| violation.kind == kind)
            .count()
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "; {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ViolationReport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_kind() {
        let mut report = ViolationReport::new();
        report.add(Violation::missing(
            "documentTitle",
            "The document title must be provided",
        ));
        report.add(Violation::conditional(
            "participants[0].sdsRoleId",
            "If a participant SDS ID is provided, then an SDS Role ID must also be provided",
        ));
        assert_eq!(report.len(), 2);
        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.conditional_count(), 1);
        assert!(!report.is_empty());
    }

    #[test]
    fn display_lists_every_entry() {
        let mut report = ViolationReport::new();
        report.add(Violation::missing("documentTitle", "title required"));
        report.add(Violation::missing("documentType", "type required"));
        let rendered = report.to_string();
        assert!(rendered.starts_with("2 violation(s)"));
        assert!(rendered.contains("documentTitle: title required"));
        assert!(rendered.contains("documentType: type required"));
    }

    #[test]
    fn report_serializes() {
        let mut report = ViolationReport::new();
        report.add(Violation::missing("patient.birthDate", "dob required"));
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: ViolationReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
    }
}
