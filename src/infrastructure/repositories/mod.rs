//! Repository implementations using SeaORM

pub mod catalog_repository;
pub mod circulation_repository;
pub mod membership_repository;

pub use catalog_repository::SeaOrmCatalogRepository;
pub use circulation_repository::SeaOrmCirculationRepository;
pub use membership_repository::SeaOrmMembershipRepository;
