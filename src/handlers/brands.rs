//! # Brands API Handlers
//!
//! HTTP endpoints for creating, querying, updating and deleting brands.

use axum::{
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::brand_service::BrandService;
use crate::error::ApiError;
use crate::models::BrandDraft;
use crate::models::brand::Model as BrandModel;
use crate::repositories::BrandRepository;
use crate::server::AppState;

/// Request payload for creating or replacing a brand
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandRequestDto {
    /// Display name (required, 2-255 characters, unique)
    #[schema(example = "Acme Corp")]
    pub name: Option<String>,
    /// Logo URL (max 500 characters)
    #[schema(example = "https://cdn.acme.com/logo.png")]
    pub logo_url: Option<String>,
    /// Website, with optional http(s) scheme (max 500 characters)
    #[schema(example = "https://www.acme.com")]
    pub website_link: Option<String>,
    /// Serialized list of certificate URLs, stored as-is
    #[schema(example = "[\"https://acme.com/iso9001.pdf\"]")]
    pub certificate_urls: Option<String>,
    /// Contact number: optional `+`, then 10-20 digits, spaces, hyphens or parentheses
    #[schema(example = "+1 (555) 123-4567")]
    pub mobile_number: Option<String>,
    /// Postal address
    pub address: Option<String>,
}

impl From<BrandRequestDto> for BrandDraft {
    fn from(dto: BrandRequestDto) -> Self {
        BrandDraft {
            name: dto.name,
            logo_url: dto.logo_url,
            website_link: dto.website_link,
            certificate_urls: dto.certificate_urls,
            mobile_number: dto.mobile_number,
            address: dto.address,
        }
    }
}

/// Brand representation returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandResponseDto {
    /// Unique identifier for the brand (UUID)
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Acme Corp")]
    pub name: String,
    pub logo_url: Option<String>,
    pub website_link: Option<String>,
    pub certificate_urls: Option<String>,
    pub mobile_number: Option<String>,
    pub address: Option<String>,
    /// Creation timestamp (RFC 3339)
    #[schema(example = "2024-01-15T10:30:00+00:00")]
    pub created_at: String,
    /// Last modification timestamp (RFC 3339)
    #[schema(example = "2024-01-15T10:30:00+00:00")]
    pub updated_at: String,
}

impl From<BrandModel> for BrandResponseDto {
    fn from(brand: BrandModel) -> Self {
        Self {
            id: brand.id,
            name: brand.name,
            logo_url: brand.logo_url,
            website_link: brand.website_link,
            certificate_urls: brand.certificate_urls,
            mobile_number: brand.mobile_number,
            address: brand.address,
            created_at: brand.created_at.to_rfc3339(),
            updated_at: brand.updated_at.to_rfc3339(),
        }
    }
}

/// Query parameters for the name search
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the brand name
    pub name: String,
}

fn service(state: &AppState) -> BrandService<BrandRepository> {
    BrandService::new(BrandRepository::new(state.db.clone()))
}

fn to_dtos(brands: Vec<BrandModel>) -> Json<Vec<BrandResponseDto>> {
    Json(brands.into_iter().map(BrandResponseDto::from).collect())
}

/// List all brands
#[utoipa::path(
    get,
    path = "/api/brands",
    responses(
        (status = 200, description = "All brands, oldest first", body = [BrandResponseDto]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "brands"
)]
pub async fn list_brands(
    State(state): State<AppState>,
) -> Result<Json<Vec<BrandResponseDto>>, ApiError> {
    let brands = service(&state).list_all().await?;
    Ok(to_dtos(brands))
}

/// Search brands by name (case-insensitive substring)
#[utoipa::path(
    get,
    path = "/api/brands/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching brands", body = [BrandResponseDto]),
        (status = 400, description = "Missing name parameter", body = ApiError)
    ),
    tag = "brands"
)]
pub async fn search_brands(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<BrandResponseDto>>, ApiError> {
    let Query(query) = query?;
    let brands = service(&state).search_by_name(&query.name).await?;
    Ok(to_dtos(brands))
}

/// List brands that have a website link
#[utoipa::path(
    get,
    path = "/api/brands/with-website",
    responses(
        (status = 200, description = "Brands with a non-empty website link", body = [BrandResponseDto])
    ),
    tag = "brands"
)]
pub async fn list_brands_with_website(
    State(state): State<AppState>,
) -> Result<Json<Vec<BrandResponseDto>>, ApiError> {
    let brands = service(&state).list_with_website().await?;
    Ok(to_dtos(brands))
}

/// Get a brand by its exact name
#[utoipa::path(
    get,
    path = "/api/brands/name/{name}",
    params(("name" = String, Path, description = "Exact, case-sensitive brand name")),
    responses(
        (status = 200, description = "Brand found", body = BrandResponseDto),
        (status = 404, description = "No brand with that name", body = ApiError)
    ),
    tag = "brands"
)]
pub async fn get_brand_by_name(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<BrandResponseDto>, ApiError> {
    let Path(name) = name?;
    let brand = service(&state).get_by_name(&name).await?;
    Ok(Json(brand.into()))
}

/// List brands sharing a mobile number
#[utoipa::path(
    get,
    path = "/api/brands/mobile/{mobileNumber}",
    params(("mobileNumber" = String, Path, description = "Exact mobile number")),
    responses(
        (status = 200, description = "Brands with that number", body = [BrandResponseDto])
    ),
    tag = "brands"
)]
pub async fn list_brands_by_mobile(
    State(state): State<AppState>,
    mobile_number: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<BrandResponseDto>>, ApiError> {
    let Path(mobile_number) = mobile_number?;
    let brands = service(&state)
        .list_by_mobile_number(&mobile_number)
        .await?;
    Ok(to_dtos(brands))
}

/// Get a brand by ID
#[utoipa::path(
    get,
    path = "/api/brands/{id}",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand found", body = BrandResponseDto),
        (status = 400, description = "Malformed brand ID", body = ApiError),
        (status = 404, description = "Brand not found", body = ApiError)
    ),
    tag = "brands"
)]
pub async fn get_brand(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<BrandResponseDto>, ApiError> {
    let Path(id) = id?;
    let brand = service(&state).get_by_id(id).await?;
    Ok(Json(brand.into()))
}

/// Create a new brand
#[utoipa::path(
    post,
    path = "/api/brands",
    request_body = BrandRequestDto,
    responses(
        (status = 201, description = "Brand created", body = BrandResponseDto, headers(
            ("Location", description = "URL of the created brand"),
            ("X-Trace-Id", description = "Trace identifier for request correlation")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "A brand with that name already exists", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "brands"
)]
pub async fn create_brand(
    State(state): State<AppState>,
    payload: Result<Json<BrandRequestDto>, JsonRejection>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<BrandResponseDto>), ApiError> {
    let Json(request) = payload?;
    let brand = service(&state).create(request.into()).await?;
    let location = format!("/api/brands/{}", brand.id);

    Ok((
        StatusCode::CREATED,
        [("Location", location)],
        Json(brand.into()),
    ))
}

/// Replace every mutable field of a brand
#[utoipa::path(
    put,
    path = "/api/brands/{id}",
    params(("id" = Uuid, Path, description = "Brand ID")),
    request_body = BrandRequestDto,
    responses(
        (status = 200, description = "Brand updated", body = BrandResponseDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Brand not found", body = ApiError),
        (status = 409, description = "Another brand already has that name", body = ApiError)
    ),
    tag = "brands"
)]
pub async fn update_brand(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BrandRequestDto>, JsonRejection>,
) -> Result<Json<BrandResponseDto>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let brand = service(&state).update(id, request.into()).await?;
    Ok(Json(brand.into()))
}

/// Delete a brand
#[utoipa::path(
    delete,
    path = "/api/brands/{id}",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 404, description = "Brand not found", body = ApiError)
    ),
    tag = "brands"
)]
pub async fn delete_brand(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
