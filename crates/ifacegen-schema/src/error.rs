/// Errors raised while loading or querying a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema document must be a JSON object")]
    NotAnObject,

    #[error("schema has no `layout` array")]
    MissingLayout,

    #[error("schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("malformed declaration `{key}`: {reason}")]
    MalformedSchema { key: String, reason: String },

    #[error("unknown declaration key `{0}`")]
    UnknownKey(String),
}

impl SchemaError {
    pub(crate) fn malformed(key: &str, reason: impl std::fmt::Display) -> Self {
        SchemaError::MalformedSchema {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
