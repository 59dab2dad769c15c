//! Reference-data (dictionary) management.
//!
//! Reads are open to any authenticated caller; writes are admin-only.

use tracing::info;

use inlive_core::types::pagination::{PageRequest, PageResponse};
use inlive_core::{AppError, AppResult};
use inlive_database::repositories::DictionaryRepository;
use inlive_entity::dictionary::{CreateDictionary, Dictionary, DictionaryKey, UpdateDictionary};

use crate::context::RequestContext;

#[derive(Clone)]
pub struct DictionaryService {
    dictionaries: DictionaryRepository,
}

impl DictionaryService {
    pub fn new(dictionaries: DictionaryRepository) -> Self {
        Self { dictionaries }
    }

    /// Fetch a single dictionary entry.
    pub async fn get(&self, id: i64) -> AppResult<Dictionary> {
        self.dictionaries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Dictionary entry {id} not found")))
    }

    /// List all entries, optionally scoped to one key category.
    pub async fn list(&self, key: Option<DictionaryKey>) -> AppResult<Vec<Dictionary>> {
        match key {
            Some(key) => self.dictionaries.find_by_key(key).await,
            None => self.dictionaries.find_all().await,
        }
    }

    /// Search entries by optional key and value substring, paginated.
    pub async fn search(
        &self,
        key: Option<DictionaryKey>,
        value: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Dictionary>> {
        self.dictionaries.search(key, value, page).await
    }

    /// Create a new entry. Admin only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateDictionary,
    ) -> AppResult<Dictionary> {
        ctx.require_admin()?;

        let entry = self.dictionaries.create(&data).await?;
        info!(id = entry.id, key = %entry.key, value = %entry.value, "dictionary entry created");
        Ok(entry)
    }

    /// Update an entry's value. Admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        data: UpdateDictionary,
    ) -> AppResult<Dictionary> {
        ctx.require_admin()?;
        self.dictionaries.update(id, &data).await
    }

    /// Soft-delete an entry. Admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        ctx.require_admin()?;

        if !self.dictionaries.soft_delete(id).await? {
            return Err(AppError::not_found(format!(
                "Dictionary entry {id} not found"
            )));
        }
        info!(id, "dictionary entry deleted");
        Ok(())
    }
}
