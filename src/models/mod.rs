//! # Data Models
//!
//! This module contains the data models used throughout the Brands service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod brand;

pub use brand::{BrandDraft, Entity as Brand};

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "brands".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
