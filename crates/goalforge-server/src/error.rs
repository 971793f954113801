//! Error types for the GoalForge server binary.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: goalforge_core::ConfigError,
    },

    /// The REST API failed to bind or serve.
    #[error("api error: {source}")]
    Api {
        /// The underlying server error.
        #[from]
        source: goalforge_api::ServerError,
    },
}
