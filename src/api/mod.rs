//! Site access module.
//!
//! This module provides:
//! - Cookie-backed HTTP session client
//! - Form login with CSRF token extraction

pub mod auth;
pub mod client;

pub use auth::login;
pub use client::{SiteClient, DOWNLOAD_MAX_REDIRECTS};
