//! Core domain logic (transport-agnostic)
//!
//! This module contains all business logic that is independent of the
//! TCP wire protocol.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **xdg**: XDG directory handling
//! - **auth**: PSK prefix authentication gate
//! - **search**: exact-match line search (reread and cached modes)
//! - **services**: Unified service container

pub mod auth;
pub mod config;
pub mod error;
pub mod search;
pub mod services;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{LineQueryError, Result};
pub use services::Services;
