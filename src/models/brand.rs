//! Brand entity model
//!
//! This module contains the SeaORM entity model for the brands table, which
//! stores advertiser/company profiles, and the [`BrandDraft`] candidate type
//! used by create and update requests before validation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelBehavior, Set};

/// Brand entity representing an advertiser profile
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    /// Unique identifier for the brand (primary key, assigned on insert)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Display name, unique across all brands (case-sensitive)
    #[sea_orm(unique)]
    pub name: String,

    /// Logo location
    pub logo_url: Option<String>,

    /// Public website of the brand
    pub website_link: Option<String>,

    /// Serialized list of certificate URLs (opaque)
    #[sea_orm(column_type = "Text", nullable)]
    pub certificate_urls: Option<String>,

    /// Contact number; not unique
    pub mobile_number: Option<String>,

    /// Postal address, free text
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,

    /// Timestamp when the brand was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp of the last successful mutation
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Assigns the identifier and creation time on insert and refreshes
    /// `updated_at` on every save. `created_at` is never written on update.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();

        if insert {
            if self.id.is_not_set() {
                self.id = Set(Uuid::new_v4());
            }
            self.created_at = Set(now);
        } else {
            self.created_at = sea_orm::ActiveValue::NotSet;
        }
        self.updated_at = Set(now);

        Ok(self)
    }
}

/// Candidate brand as supplied by a caller.
///
/// Every field is optional so that a missing name can be reported by the
/// validator instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandDraft {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub website_link: Option<String>,
    pub certificate_urls: Option<String>,
    pub mobile_number: Option<String>,
    pub address: Option<String>,
}

impl BrandDraft {
    /// Starts a draft with only the name populated.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}
