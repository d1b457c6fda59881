//! HTTP handlers for the look service.

pub mod analyze;
pub mod health;

pub use analyze::analyze_look;
pub use health::health_check;
