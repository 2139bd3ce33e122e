use ifacegen_schema::SchemaError;

/// Errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("unknown syntax `{0}`")]
    UnknownSyntax(String),
}
