//! Utility functions for request inspection.

pub mod http;
pub mod route;

pub use http::*;
pub use route::*;
