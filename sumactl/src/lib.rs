pub mod config;
pub mod constants;
pub mod errors;
pub mod fleet;
pub mod http;
pub mod scheduler;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use fleet::{FleetSnapshot, Host, PackageUpgrade, ScheduledJob};
pub use http::{build_client, RetryPolicy, SumaClient};
pub use session::{Credentials, ServerIdentity, Session, SessionToken};
