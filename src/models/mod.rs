//! Data models shared by handlers, services and tests.

pub mod api;
pub mod audit;

pub use api::*;
pub use audit::*;
