//! # Repository Layer
//!
//! Repository implementations that encapsulate SeaORM operations behind the
//! store traits the service layer depends on.

pub mod brand;

pub use brand::{BrandRepository, BrandStore};
