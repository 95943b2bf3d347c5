//! Identifier validation for user-supplied names.
//!
//! Pure functions only: no I/O, no async.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::FieldError;

/// Letters, digits, hyphen and underscore. Unlike DNS-1123 labels,
/// uppercase and underscores are accepted.
pub static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: compile-time constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex")
});

/// A name that passed [`IDENTIFIER_RE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `value` as an identifier for the field labelled `field`.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] quoting the field and the offending value when
    /// `value` is empty or contains a character outside `[A-Za-z0-9_-]`.
    pub fn parse(value: &str, field: &str) -> Result<Self, FieldError> {
        if value.is_empty() {
            return Err(FieldError::new(field, "must not be empty"));
        }
        if !IDENTIFIER_RE.is_match(value) {
            return Err(FieldError::new(
                field,
                format!(
                    "must include only letters, digits, hyphen (-) and underscore (_): {value:?}"
                ),
            ));
        }
        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `true` if `value` is a valid identifier.
#[must_use]
pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER_RE.is_match(value)
}
