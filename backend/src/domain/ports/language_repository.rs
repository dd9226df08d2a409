//! Port for the language catalogue.

use async_trait::async_trait;

use crate::domain::Language;

use super::RepositoryError;

/// Storage for [`Language`] entries keyed by code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    /// Insert a new language; a duplicate code is a conflict.
    async fn create(&self, language: &Language) -> Result<(), RepositoryError>;

    /// Every language in the catalogue.
    async fn list(&self) -> Result<Vec<Language>, RepositoryError>;

    /// Rename the language with `language.code`.
    ///
    /// Returns `false` when the code is unknown.
    async fn update(&self, language: &Language) -> Result<bool, RepositoryError>;

    /// Remove one language. Returns `false` when the code is unknown.
    async fn delete(&self, code: &str) -> Result<bool, RepositoryError>;

    /// Remove every language.
    async fn delete_all(&self) -> Result<(), RepositoryError>;
}
