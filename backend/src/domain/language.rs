//! Language catalogue entry.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Validation errors returned by [`Language::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageValidationError {
    EmptyCode,
    EmptyName,
}

impl fmt::Display for LanguageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "language code must not be empty"),
            Self::EmptyName => write!(f, "language name must not be empty"),
        }
    }
}

impl std::error::Error for LanguageValidationError {}

/// A language lessons can be written in, keyed by a short code such as `"es"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Language {
    /// Both the code and the display name must be present.
    pub fn validate(&self) -> Result<(), LanguageValidationError> {
        if self.code.is_empty() {
            return Err(LanguageValidationError::EmptyCode);
        }
        if self.name.is_empty() {
            return Err(LanguageValidationError::EmptyName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("es", "Spanish", Ok(()))]
    #[case("", "Spanish", Err(LanguageValidationError::EmptyCode))]
    #[case("es", "", Err(LanguageValidationError::EmptyName))]
    fn validates_code_and_name(
        #[case] code: &str,
        #[case] name: &str,
        #[case] expected: Result<(), LanguageValidationError>,
    ) {
        let now = Utc::now();
        let language = Language {
            code: code.to_owned(),
            name: name.to_owned(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(language.validate(), expected);
    }
}
