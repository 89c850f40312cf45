//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP) can
//! serialize/deserialize without reaching into domain services.

pub mod encounter;

pub use encounter::*;
