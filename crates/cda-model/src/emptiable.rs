//! Emptiness predicates for composite values.
//!
//! A value object arriving from an upstream property bag is frequently
//! non-null but carries no content (every attribute blank). Each value type
//! declares its own emptiness rule via [`Emptiable`] so the normalization
//! pass can collapse such values to absence without runtime introspection.

/// A value that can be semantically empty despite being present.
pub trait Emptiable {
    /// Returns true when the value carries no meaningful content.
    fn is_empty(&self) -> bool;
}

impl Emptiable for String {
    fn is_empty(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Emptiable for bool {
    /// A boolean flag is content in itself; presence is never empty.
    fn is_empty(&self) -> bool {
        false
    }
}

/// Collapses `Some(empty)` to `None`, leaving non-empty values untouched.
pub fn empty_to_none<T: Emptiable>(value: Option<T>) -> Option<T> {
    value.filter(|inner| !inner.is_empty())
}

/// Treats a blank or whitespace-only string as absent.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}

/// Returns true when the optional value is absent or empty under its own
/// predicate.
pub fn is_none_or_empty<T: Emptiable>(value: &Option<T>) -> bool {
    value.as_ref().is_none_or(Emptiable::is_empty)
}
