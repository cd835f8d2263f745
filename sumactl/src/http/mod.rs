pub mod client;
pub mod transport;

pub use client::{RetryPolicy, SumaClient};
pub use transport::build_client;
