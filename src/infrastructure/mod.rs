//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Database connection and table bootstrap (db)
//! - HTTP server setup (server)
//! - Configuration loading (config)
//! - Staff credential hashing (auth)
//! - Clock implementations (clock)
//! - Repository implementations (repositories)
//! - Demo data (seed)
//! - Application state (state)

pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod repositories;
pub mod seed;
pub mod server;
pub mod state;

pub use repositories::*;
pub use state::AppState;
