pub mod browser;
pub mod lighthouse;
pub mod runner;

pub use lighthouse::LighthouseRunner;
pub use runner::AuditRunner;
