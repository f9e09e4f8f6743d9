//! CLI command implementations

pub mod completions;
pub mod query;

pub use completions::CompletionsArgs;
pub use query::QueryArgs;
