//! Driving port for the language catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Language};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageService: Send + Sync {
    async fn create_language(&self, code: &str, name: &str) -> Result<Language, Error>;

    async fn list_languages(&self) -> Result<Vec<Language>, Error>;

    /// Rename an existing language; unknown codes are `ResourceNotFound`.
    async fn update_language(&self, code: &str, name: &str) -> Result<(), Error>;

    async fn delete_language(&self, code: &str) -> Result<(), Error>;

    /// Empty the catalogue.
    async fn delete_languages(&self) -> Result<(), Error>;
}
