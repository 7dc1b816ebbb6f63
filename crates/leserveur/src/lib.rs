// leserveur - HTTP Server
//
// *Le Serveur* (The Server) - Axum-based HTTP front for the LeQR factorization pipeline

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// API error types
pub mod error;

/// Bearer-token validation
pub mod auth;

/// HTTP handlers and request orchestration
pub mod handlers;

/// Server configuration from environment
pub mod config;

/// API response types matching the wire contract
pub mod responses;

/// Server instance management
pub mod server;

pub use auth::{Claims, JwtVerifier};
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use server::Server;
