//! ESTree JSON syntax trees to Swift source, with path-keyed type hints.
pub mod ast;
pub mod cli;
pub mod codegen;
pub mod decode;
pub mod literal;
pub mod path_de;
pub mod scalar;
pub mod transpile;
pub mod types;
