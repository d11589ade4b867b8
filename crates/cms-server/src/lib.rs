//! Data-access and view-model mapping layer for a headless CMS front-end.
//!
//! Services in [`services`] read from a [`db::DocumentStore`] and return the
//! view models defined in `cms_shared`; [`routes`] exposes them as JSON.

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metadata;
pub mod routes;
pub mod services;

pub use config::Config;
pub use services::{ServiceContext, ServiceError, TimestampFallback};
