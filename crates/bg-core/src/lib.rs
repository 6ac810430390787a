//! brandguard/crates/bg-core/src/lib.rs
//!
//! The domain types and interface definitions shared by both BrandGuard services.

pub mod models;
pub mod traits;
pub mod error;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;

/// Default DynamoDB table for analysis records.
pub const DEFAULT_DESTINATION: &str = "brandguard-reviews";
