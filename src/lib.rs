//! Core library exports for the VOD catalog service.
//!
//! The `data` feature exposes the domain types, Diesel models and schema. The
//! `server` feature adds the repository, upstream collector, services and the
//! Actix-web routes used by the binary.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod db;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod upstream;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
