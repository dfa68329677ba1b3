pub mod audit_log;
pub mod treaty;

pub use audit_log::*;
pub use treaty::*;
