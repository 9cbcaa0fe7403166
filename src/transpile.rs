//! One AST file in, one block of Swift out.
use std::cell::RefCell;

use serde_json::Value;
use thiserror::Error;

use crate::codegen::{GenerateError, SwiftCode};
use crate::decode::diagnostic::{Diagnosed, decode_with_diagnostics};
use crate::path_de::HintError;
use crate::types::{TypeContext, TypeHints, TypeRecords};

#[derive(Debug, Error)]
pub enum TranspileError {
    #[error(transparent)]
    Decode(#[from] Diagnosed),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Hints(#[from] HintError),
}

#[derive(Debug)]
pub struct FileOutput {
    /// `// MARK: - name` followed by the generated code.
    pub swift: String,
    /// Every type path visited while generating, for the next run's hints.
    pub records: TypeRecords,
}

impl TranspileError {
    /// Unknown discriminators, malformed scalars or hints, and unsupported
    /// shapes cannot be fixed by rerunning on the same inputs.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Decode(error) => error.is_fatal(),
            Self::Generate(_) | Self::Hints(_) => true,
        }
    }
}

/// Decode `ast` and render it. Type paths start at `source_name` when given,
/// so one hint table can describe many files.
pub fn transpile_file(
    source_name: Option<&str>,
    ast: &Value,
    hints: &TypeHints,
) -> Result<FileOutput, TranspileError> {
    let program = decode_with_diagnostics(ast)?;
    let records = RefCell::new(TypeRecords::new());
    let root = TypeContext::root(hints, &records);
    let cx = match source_name {
        Some(name) => root.descend(name),
        None => root,
    };
    let code = program.swift_code(&cx)?;
    let swift = match source_name {
        Some(name) => format!("// MARK: - {name}\n\n{code}\n"),
        None => format!("{code}\n"),
    };
    log::info!("generated {} lines for {}", swift.lines().count(), source_name.unwrap_or("<input>"));
    Ok(FileOutput { swift, records: records.into_inner() })
}
