//! Language catalogue domain logic.
//!
//! Any authenticated caller may manage the catalogue; there is no admin role.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{LanguageRepository, LanguageService};
use crate::domain::service_support::{read_failed, write_failed};
use crate::domain::{Error, Language};

const EMPTY_FIELDS: &str = "language name and code must not be empty";

/// Language service implementing the [`LanguageService`] driving port.
#[derive(Clone)]
pub struct LanguageServiceImpl<L> {
    languages: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L> LanguageServiceImpl<L> {
    pub fn new(languages: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self { languages, clock }
    }
}

#[async_trait]
impl<L> LanguageService for LanguageServiceImpl<L>
where
    L: LanguageRepository,
{
    async fn create_language(&self, code: &str, name: &str) -> Result<Language, Error> {
        let now = self.clock.utc();
        let language = Language {
            code: code.to_owned(),
            name: name.to_owned(),
            created_at: now,
            updated_at: now,
        };
        language
            .validate()
            .map_err(|err| Error::invalid_input(EMPTY_FIELDS).with_cause(err))?;

        self.languages.create(&language).await.map_err(write_failed(
            "failed to create language",
            "language code already exists",
        ))?;
        Ok(language)
    }

    async fn list_languages(&self) -> Result<Vec<Language>, Error> {
        self.languages
            .list()
            .await
            .map_err(read_failed("failed to retrieve languages"))
    }

    async fn update_language(&self, code: &str, name: &str) -> Result<(), Error> {
        if code.is_empty() || name.is_empty() {
            return Err(Error::invalid_input(EMPTY_FIELDS));
        }
        let now = self.clock.utc();
        let language = Language {
            code: code.to_owned(),
            name: name.to_owned(),
            created_at: now,
            updated_at: now,
        };
        let updated = self
            .languages
            .update(&language)
            .await
            .map_err(read_failed("failed to update language"))?;
        if updated {
            Ok(())
        } else {
            Err(Error::not_found("language does not exist"))
        }
    }

    async fn delete_language(&self, code: &str) -> Result<(), Error> {
        if code.is_empty() {
            return Err(Error::invalid_input("language code must not be empty"));
        }
        self.languages
            .delete(code)
            .await
            .map_err(read_failed("failed to delete language"))?;
        Ok(())
    }

    async fn delete_languages(&self) -> Result<(), Error> {
        self.languages
            .delete_all()
            .await
            .map_err(read_failed("failed to delete languages"))
    }
}
