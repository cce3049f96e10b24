//! Data models for the stand-in services
//!
//! Records stored in the caches and decoded from database rows.

pub mod product;
pub mod user;

// Re-export commonly used types
pub use product::{Product, ProductCategory};
pub use user::{User, UserUpdate};
