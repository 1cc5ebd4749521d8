//! # Brands API Library
//!
//! Core of the Brands service: the brand entity and its validation rules,
//! the store and service layers, HTTP handlers and server wiring.

pub mod brand_service;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub mod validation;
pub use migration;
