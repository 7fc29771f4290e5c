//! Services Layer
//!
//! Read models that span several repositories.

pub mod dashboard_service;

pub use dashboard_service::{Dashboard, DashboardCounts, load_dashboard};
