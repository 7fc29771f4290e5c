//! Domain layer - Pure business abstractions
//!
//! This layer contains NO web framework dependencies (no Axum).
//! Trait definitions, domain error types and the circulation/membership rules.

pub mod circulation;
pub mod clock;
pub mod errors;
pub mod membership;
pub mod repositories;

pub use clock::Clock;
pub use errors::DomainError;
pub use repositories::*;
