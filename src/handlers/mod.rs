//! HTTP request handlers and the app factory.

pub mod health;
pub mod metrics;
pub mod openapi;
pub mod token;
pub mod version;

pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use token::*;
pub use version::*;
