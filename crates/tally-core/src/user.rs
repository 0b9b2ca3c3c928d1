//! # User Record
//!
//! A small value type pairing a first and last name.
//!
//! `User::new` stores the string form of whatever it is given, so numeric
//! input becomes its decimal text. `User::create` is the normalising
//! factory: it also trims surrounding whitespace. `User::validated` is the
//! entry point for untrusted input and adds the name limits on top.

use crate::TallyError;
use crate::primitives::check_name_length;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A person identified by first and last name.
///
/// Serializes as `{"first_name": .., "last_name": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Create a user from the string form of both names, verbatim.
    #[must_use]
    pub fn new(first_name: impl Display, last_name: impl Display) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    /// Create a user with surrounding whitespace trimmed from both names.
    #[must_use]
    pub fn create(first_name: impl Display, last_name: impl Display) -> Self {
        Self {
            first_name: first_name.to_string().trim().to_string(),
            last_name: last_name.to_string().trim().to_string(),
        }
    }

    /// Check both names against the length limit, then trim them.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a name is too long or empty after trimming.
    pub fn validated(first_name: &str, last_name: &str) -> Result<Self, TallyError> {
        check_name_length(first_name, "first_name")?;
        check_name_length(last_name, "last_name")?;

        let user = Self::create(first_name, last_name);
        if user.first_name.is_empty() || user.last_name.is_empty() {
            return Err(TallyError::InvalidArgument(
                "first_name and last_name must be non-empty".to_string(),
            ));
        }
        Ok(user)
    }

    /// First and last name joined by a single space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stores_names() {
        let user = User::new("John", "Doe");
        assert_eq!(user.first_name, "John");
        assert_eq!(user.last_name, "Doe");
    }

    #[test]
    fn full_name_joins_with_space() {
        assert_eq!(User::new("John", "Doe").full_name(), "John Doe");
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let value = serde_json::to_value(User::new("John", "Doe")).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"first_name": "John", "last_name": "Doe"})
        );
    }

    #[test]
    fn create_trims_whitespace() {
        let plain = User::create("John", "Doe");
        assert_eq!(plain, User::new("John", "Doe"));

        let padded = User::create("  Jane  ", "  Smith  ");
        assert_eq!(padded.first_name, "Jane");
        assert_eq!(padded.last_name, "Smith");
    }

    #[test]
    fn non_string_names_become_text() {
        let user = User::new(123, 456);
        assert_eq!(user.first_name, "123");
        assert_eq!(user.last_name, "456");
    }

    #[test]
    fn validated_trims_and_checks() {
        assert_eq!(
            User::validated(" Jane ", "Smith"),
            Ok(User::new("Jane", "Smith"))
        );
        assert!(matches!(
            User::validated("   ", "Smith"),
            Err(TallyError::InvalidArgument(_))
        ));
        let long = "x".repeat(crate::primitives::MAX_NAME_LENGTH + 1);
        assert!(User::validated("Jane", &long).is_err());
    }

    #[test]
    fn new_keeps_whitespace() {
        assert_eq!(User::new(" a ", "b").first_name, " a ");
    }
}
