// Core enforcement module - the platform port, the admin audit log and the
// enforcer that carries out decisions.

pub mod audit_log;
pub mod enforcer;
pub mod platform;

pub use audit_log::AuditLog;
pub use enforcer::Enforcer;
pub use platform::*;
