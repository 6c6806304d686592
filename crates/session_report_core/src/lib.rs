pub mod domain;
pub mod filter;
pub mod inactivity;
pub mod normalize;
pub mod ports;
pub mod token;

pub use domain::{FilterState, SessionPayload, SessionReportRow, TenantCredential, TriggerOutcome};
pub use ports::{CredentialStore, EngineTrigger, PortError, PortResult, ReportStore};
pub use token::TokenCodec;
