pub mod audit_logs;
pub mod notifications;
pub mod reports;
pub mod treaties;
