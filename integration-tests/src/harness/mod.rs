pub mod fixture;
pub mod tracing;

pub use fixture::*;
pub use tracing::*;
