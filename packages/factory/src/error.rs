//! Error types for the element factory.
//!
//! Registration and instancing failures are reported synchronously to the
//! immediate caller; none of them poison the registry. Collisions and
//! malformed input are additionally logged as warnings at the point where
//! they are detected.

use thiserror::Error;

/// Main error type for the factory library.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Instancer name does not match the required format.
    #[error("Invalid instancer name: '{0}'. Expected a non-empty lowercase name (e.g., attr, my-view)")]
    InvalidInstancerName(String),

    /// A name was registered twice within one namespace.
    #[error("Could not register data {kind} instancer '{name}'. The given name is already registered")]
    DuplicateInstancer { kind: &'static str, name: String },

    /// A text run contained a malformed data expression.
    #[error("Failed to instance text element '{text}'. {reason}")]
    MalformedExpression { text: String, reason: String },

    /// The markup parser rejected re-parsed embedded markup.
    #[error("Markup parsing failed: {message}")]
    MarkupParse { message: String },

    /// The style engine rejected a style sheet source.
    #[error("Style sheet parsing failed: {message}")]
    StyleSheetParse { message: String },

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for factory operations.
pub type Result<T> = std::result::Result<T, FactoryError>;
