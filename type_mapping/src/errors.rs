//! Error types shared by every conversion in the sqljson ecosystem

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypeMappingError {
    /// The driver value has a shape the target type cannot be built from
    #[error("Conversion error: cannot convert {found} into {target}")]
    Conversion { target: &'static str, found: String },

    /// JSON input is malformed or violates the expected text format
    #[error("Format error: {0}")]
    Format(String),

    #[error("{0}: unmarshal into missing receiver")]
    NilReceiver(&'static str),

    #[error("unable to decode payload to: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unable to encode payload: {0}")]
    Encode(#[source] serde_json::Error),
}

impl TypeMappingError {
    pub fn conversion(target: &'static str, found: impl Into<String>) -> Self {
        TypeMappingError::Conversion {
            target,
            found: found.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TypeMappingError>;
