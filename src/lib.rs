//! Statusmono - monochrome status icons
//!
//! Classifies small application icons as colored or monochrome, synthesizes
//! white silhouettes for colored ones and keeps the results in bounded
//! concurrent caches. Pixel algorithms live in the `mono-silhouette` crate.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
