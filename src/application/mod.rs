//! Application layer - Use cases, DTOs and ports
//!
//! Services here orchestrate the pure domain services and talk to storage only
//! through the outbound ports.

pub mod dto;
pub mod ports;
pub mod services;
