//! linequery - Exact-Match Line Search over TCP
//!
//! A small network service answering one question: does this exact
//! line exist in the configured reference file? Clients send one
//! UTF-8 line per query and receive `STRING EXISTS` or
//! `STRING NOT FOUND`.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (transport-agnostic)
//!   - config, error, xdg
//!   - auth (PSK prefix gate)
//!   - search (reread and cached engines)
//!   - services (unified service container)
//!
//! - **tcp**: wire adapter (depends on core)
//!   - listener, per-connection handler
//!
//! - **cli**: client adapter (depends on tcp constants only)
//!   - query command, completions
//!
//! # Key Features
//!
//! - Exact full-line matching (terminator-normalized)
//! - Two search modes: reread-per-query or cached-in-memory
//! - Optional PSK prefix authentication
//! - One concurrent task per connection, persistent connections
//! - Structured per-query logging with timings

// Core domain logic (transport-agnostic)
pub mod core;

// TCP wire adapter
pub mod tcp;

// Client CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{LineQueryError, Result};
pub use core::services::Services;
