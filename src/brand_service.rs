//! # Brand Service
//!
//! Business rules for brands on top of any [`BrandStore`]: validation before
//! any store call, name uniqueness on create and rename, full-replacement
//! updates, and the read-only queries.

use metrics::counter;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{BrandError, RepositoryError};
use crate::models::BrandDraft;
use crate::models::brand::Model as BrandModel;
use crate::repositories::BrandStore;
use crate::validation::{self, ValidatedBrand};

/// Brand operations exposed to the transport layer.
pub struct BrandService<S> {
    store: S,
}

impl<S: BrandStore> BrandService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new brand.
    ///
    /// The name lookup gives an early, friendly rejection; the unique index
    /// remains authoritative and its violation is reported the same way.
    pub async fn create(&self, draft: BrandDraft) -> Result<BrandModel, BrandError> {
        let brand = validated(draft)?;

        if self
            .store
            .get_by_name(brand.name())
            .await
            .map_err(BrandError::Store)?
            .is_some()
        {
            return Err(duplicate_name(brand.name()));
        }

        let name = brand.name().to_string();
        let created = self
            .store
            .insert(brand)
            .await
            .map_err(|err| store_error(err, &name))?;

        counter!("brands_created_total").increment(1);
        info!(brand_id = %created.id, name = %created.name, "Brand created");

        Ok(created)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BrandModel, BrandError> {
        self.store
            .get_by_id(id)
            .await
            .map_err(BrandError::Store)?
            .ok_or_else(|| BrandError::not_found_id(id))
    }

    pub async fn get_by_name(&self, name: &str) -> Result<BrandModel, BrandError> {
        self.store
            .get_by_name(name)
            .await
            .map_err(BrandError::Store)?
            .ok_or_else(|| BrandError::not_found_name(name))
    }

    pub async fn list_all(&self) -> Result<Vec<BrandModel>, BrandError> {
        self.store.list_all().await.map_err(BrandError::Store)
    }

    /// Case-insensitive substring search on the name.
    pub async fn search_by_name(&self, needle: &str) -> Result<Vec<BrandModel>, BrandError> {
        debug!(needle, "Searching brands by name");
        self.store
            .search_by_name_contains(needle)
            .await
            .map_err(BrandError::Store)
    }

    pub async fn list_with_website(&self) -> Result<Vec<BrandModel>, BrandError> {
        self.store.list_with_website().await.map_err(BrandError::Store)
    }

    pub async fn list_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Vec<BrandModel>, BrandError> {
        self.store
            .list_by_mobile_number(mobile_number)
            .await
            .map_err(BrandError::Store)
    }

    /// Replaces every mutable field of the brand with the payload's values.
    ///
    /// Fields absent from the payload are cleared. Renaming onto another
    /// brand's name fails with `DuplicateName`; keeping the current name is fine.
    pub async fn update(&self, id: Uuid, draft: BrandDraft) -> Result<BrandModel, BrandError> {
        let replacement = validated(draft)?;

        let existing = self
            .store
            .get_by_id(id)
            .await
            .map_err(BrandError::Store)?
            .ok_or_else(|| BrandError::not_found_id(id))?;

        if existing.name != replacement.name()
            && let Some(holder) = self
                .store
                .get_by_name(replacement.name())
                .await
                .map_err(BrandError::Store)?
            && holder.id != id
        {
            return Err(duplicate_name(replacement.name()));
        }

        let name = replacement.name().to_string();
        let updated = self
            .store
            .save(apply_replacement(existing, replacement))
            .await
            .map_err(|err| match err {
                // Deleted between the read and the write.
                RepositoryError::NotFound(_) => BrandError::not_found_id(id),
                other => store_error(other, &name),
            })?;

        counter!("brands_updated_total").increment(1);
        info!(brand_id = %updated.id, "Brand updated");

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), BrandError> {
        let removed = self
            .store
            .delete_by_id(id)
            .await
            .map_err(BrandError::Store)?;

        if !removed {
            return Err(BrandError::not_found_id(id));
        }

        counter!("brands_deleted_total").increment(1);
        info!(brand_id = %id, "Brand deleted");

        Ok(())
    }
}

/// Overwrites the mutable fields of `existing`; id and timestamps are kept.
pub fn apply_replacement(existing: BrandModel, replacement: ValidatedBrand) -> BrandModel {
    BrandModel {
        name: replacement.name().to_string(),
        logo_url: replacement.logo_url().map(str::to_string),
        website_link: replacement.website_link().map(str::to_string),
        certificate_urls: replacement.certificate_urls().map(str::to_string),
        mobile_number: replacement.mobile_number().map(str::to_string),
        address: replacement.address().map(str::to_string),
        ..existing
    }
}

fn validated(draft: BrandDraft) -> Result<ValidatedBrand, BrandError> {
    validation::validate(draft).map_err(|found| {
        counter!("brands_validation_failed_total").increment(1);
        debug!(violations = found.len(), "Brand validation failed");
        BrandError::ValidationFailed(found)
    })
}

fn duplicate_name(name: &str) -> BrandError {
    counter!("brands_duplicate_name_total").increment(1);
    warn!(name, "Rejected duplicate brand name");
    BrandError::DuplicateName(name.to_string())
}

/// Unique-index rejections surface as the same error as the pre-check.
fn store_error(err: RepositoryError, name: &str) -> BrandError {
    match err {
        RepositoryError::UniqueViolation(_) => duplicate_name(name),
        other => BrandError::Store(other),
    }
}
