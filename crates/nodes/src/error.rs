use kpu_core::error::CoreError;

/// Violations of the host contract.
///
/// Node logic itself never fails; these cover lookups and inputs that do
/// not match the declared schema.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Input '{field}' expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
