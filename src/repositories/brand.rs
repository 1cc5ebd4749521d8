//! # Brand Repository
//!
//! The store seam for brands: [`BrandStore`] is what the service depends on,
//! [`BrandRepository`] is the SeaORM implementation over the `brands` table.

use async_trait::async_trait;
use sea_orm::sea_query::{BinOper, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Unchanged, ColumnTrait, Condition,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select, Set,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::brand::{
    ActiveModel as BrandActiveModel, Column, Entity as Brand, Model as BrandModel,
};
use crate::validation::ValidatedBrand;

const LIKE_ESCAPE: char = '\\';

/// Persistence operations the brand service relies on.
#[async_trait]
pub trait BrandStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<BrandModel>, RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<BrandModel>, RepositoryError>;

    /// Exact, case-sensitive name lookup.
    async fn get_by_name(&self, name: &str) -> Result<Option<BrandModel>, RepositoryError>;

    /// Case-insensitive substring match on the name.
    async fn search_by_name_contains(
        &self,
        needle: &str,
    ) -> Result<Vec<BrandModel>, RepositoryError>;

    /// Brands whose website link is present and non-empty.
    async fn list_with_website(&self) -> Result<Vec<BrandModel>, RepositoryError>;

    async fn list_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Vec<BrandModel>, RepositoryError>;

    /// Persists a new brand; the store assigns id and both timestamps.
    async fn insert(&self, brand: ValidatedBrand) -> Result<BrandModel, RepositoryError>;

    /// Writes every mutable field of `brand` and refreshes `updated_at`.
    async fn save(&self, brand: BrandModel) -> Result<BrandModel, RepositoryError>;

    /// Returns false when no row had the given id.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// Repository for Brand database operations
#[derive(Clone)]
pub struct BrandRepository {
    db: DatabaseConnection,
}

impl BrandRepository {
    /// Create a new BrandRepository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn ordered(select: Select<Brand>) -> Select<Brand> {
        select
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
    }
}

/// Escapes `LIKE` metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// `LOWER(name) LIKE LOWER(pattern) ESCAPE '\'`.
///
/// Both sides are folded by the database so they always agree, whatever
/// case mapping the backend's `LOWER` implements.
fn name_contains_ignoring_case(needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    let escaped_pattern = SimpleExpr::Binary(
        Box::new(Func::lower(Expr::val(pattern)).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant(LIKE_ESCAPE.into())),
    );

    Expr::expr(Func::lower(Expr::col(Column::Name))).binary(BinOper::Like, escaped_pattern)
}

#[async_trait]
impl BrandStore for BrandRepository {
    async fn list_all(&self) -> Result<Vec<BrandModel>, RepositoryError> {
        let brands = Self::ordered(Brand::find())
            .all(&self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(brands)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<BrandModel>, RepositoryError> {
        let brand = Brand::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(brand)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<BrandModel>, RepositoryError> {
        let brand = Brand::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(brand)
    }

    async fn search_by_name_contains(
        &self,
        needle: &str,
    ) -> Result<Vec<BrandModel>, RepositoryError> {
        let brands = Self::ordered(Brand::find().filter(name_contains_ignoring_case(needle)))
            .all(&self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(brands)
    }

    async fn list_with_website(&self) -> Result<Vec<BrandModel>, RepositoryError> {
        let brands = Self::ordered(
            Brand::find().filter(
                Condition::all()
                    .add(Column::WebsiteLink.is_not_null())
                    .add(Column::WebsiteLink.ne("")),
            ),
        )
        .all(&self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        Ok(brands)
    }

    async fn list_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Vec<BrandModel>, RepositoryError> {
        let brands = Self::ordered(Brand::find().filter(Column::MobileNumber.eq(mobile_number)))
            .all(&self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(brands)
    }

    async fn insert(&self, brand: ValidatedBrand) -> Result<BrandModel, RepositoryError> {
        let active = BrandActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(brand.name().to_string()),
            logo_url: Set(brand.logo_url().map(str::to_string)),
            website_link: Set(brand.website_link().map(str::to_string)),
            certificate_urls: Set(brand.certificate_urls().map(str::to_string)),
            mobile_number: Set(brand.mobile_number().map(str::to_string)),
            address: Set(brand.address().map(str::to_string)),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let result = active
            .insert(&self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    async fn save(&self, brand: BrandModel) -> Result<BrandModel, RepositoryError> {
        let active = BrandActiveModel {
            id: Unchanged(brand.id),
            name: Set(brand.name),
            logo_url: Set(brand.logo_url),
            website_link: Set(brand.website_link),
            certificate_urls: Set(brand.certificate_urls),
            mobile_number: Set(brand.mobile_number),
            address: Set(brand.address),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let result = active
            .update(&self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = Brand::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result.rows_affected > 0)
    }
}
