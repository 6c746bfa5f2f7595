//! # Ecom SDK Core
//!
//! This crate provides the foundational pieces of the ecommerce payment API
//! SDK: API constants, the error type every call returns, request and
//! response types, ordered parameter maps with their default-merge rule,
//! RFC 3986 query encoding and the configuration layer.

pub mod config;
pub mod constants;
pub mod error;
pub mod params;
pub mod query;
pub mod types;

// Re-export commonly used items at the crate root
pub use config::{
    load_config, ApiPaths, ClientSettings, ConfigError, EcomSettings, Environment,
    TransportOptions,
};
pub use error::{EcomError, EcomResult, ErrorKind};
pub use params::{merge_defaults, params, Params};
pub use query::{build_query, number_to_string};
pub use types::{ApiResponse, Method, ReceiptType, RequestSpec};
