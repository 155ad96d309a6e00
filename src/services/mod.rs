//! Service layer: naming, token signing and metrics.

pub mod identity;
pub mod metrics;
pub mod token;

pub use identity::*;
pub use metrics::*;
pub use token::*;
