//! Best-effort context for decode failures.
//!
//! A missing key is hard to place from its path alone, so the object that
//! lacks it is looked up in the raw tree and shown next to the error. No
//! failure is swallowed here; every error comes back out.
use serde_json::Value;
use thiserror::Error;

use super::{DecodeError, decode_node};
use crate::ast::AnyNode;

#[derive(Debug, Error)]
pub enum Diagnosed {
    #[error("{error}\n  in {ancestor}")]
    MissingKey {
        #[source]
        error: DecodeError,
        ancestor: String,
    },
    #[error(transparent)]
    Other(DecodeError),
}

impl Diagnosed {
    pub fn decode_error(&self) -> &DecodeError {
        match self {
            Self::MissingKey { error, .. } | Self::Other(error) => error,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.decode_error().is_fatal()
    }
}

/// Decode `root`, attaching the surrounding raw value to missing-key errors.
pub fn decode_with_diagnostics(root: &Value) -> Result<AnyNode, Diagnosed> {
    decode_node(root).map_err(|error| report(root, error))
}

/// Classify `error` and, for a missing key, dump the object that lacks it.
pub fn report(root: &Value, error: DecodeError) -> Diagnosed {
    match &error {
        DecodeError::KeyNotFound { key, path } => {
            let ancestor = path
                .parent()
                .and_then(|parent| parent.resolve(root))
                .map(Value::to_string)
                .unwrap_or_else(|| String::from("nil"));
            log::error!("key `{key}` not found in {ancestor}");
            Diagnosed::MissingKey { error, ancestor }
        }
        _ => Diagnosed::Other(error),
    }
}
