//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the blob keys, validation and provider calls so
//! route handlers stay focused on request parsing and status mapping.

pub mod audit;
pub mod documents;
pub mod files;
pub mod generate;
