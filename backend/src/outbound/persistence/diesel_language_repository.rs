//! PostgreSQL-backed `LanguageRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Language;
use crate::domain::ports::{LanguageRepository, RepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::LanguageRow;
use super::pool::DbPool;
use super::schema::languages;

#[derive(Clone)]
pub struct DieselLanguageRepository {
    pool: DbPool,
}

impl DieselLanguageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LanguageRepository for DieselLanguageRepository {
    async fn create(&self, language: &Language) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(languages::table)
            .values(LanguageRow::from(language))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Language>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<LanguageRow> = languages::table
            .select(LanguageRow::as_select())
            .order_by(languages::code.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Language::from).collect())
    }

    async fn update(&self, language: &Language) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(languages::table.find(language.code.as_str()))
            .set((
                languages::name.eq(&language.name),
                languages::updated_at.eq(language.updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, code: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(languages::table.find(code))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(languages::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
