//! Data models shared across database access and API handlers.

pub mod audit_log;
pub mod treaty;
pub mod user;

pub use audit_log::*;
pub use treaty::*;
pub use user::*;
