//! Minimal CLI: ESTree JSON → (swift | types)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde_json::Value;

use crate::path_de;
use crate::transpile::{TranspileError, transpile_file};
use crate::types::{TypeHints, TypeRecords};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// transpile ESTree JSON syntax trees into Swift, annotating bindings from a type hint file
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate Swift source for every input
    Swift(SwiftOut),
    /// generate only to collect the type paths, and print the record tree
    Types(TypesOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more JSON AST files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// type hint file (JSON); read if it exists
    #[arg(long)]
    types: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct SwiftOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// where to write the record tree (defaults to rewriting --types)
    #[arg(long)]
    types_out: Option<PathBuf>,

    /// dump the raw input trees, keyed by source name
    #[arg(long)]
    ast: Option<PathBuf>,

    /// output .swift file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct TypesOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One parsed input file.
struct Source {
    /// file stem of the AST file, e.g. `BinarySearch.js` for `BinarySearch.js.json`
    name: String,
    ast: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_sources(&self) -> anyhow::Result<Vec<Source>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_iter()
            .map(|source_path| {
                let source = std::fs::read_to_string(&source_path)
                    .with_context(|| format!("failed to read source file {}", source_path.display()))?;
                let ast = serde_json::from_str::<Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file {}", source_path.display()))?;
                Ok::<_, anyhow::Error>(Source { name: source_name(&source_path), ast })
            })
            .collect()
    }

    fn load_hints(&self) -> Result<TypeHints, TranspileError> {
        match &self.types {
            Some(path) => Ok(path_de::load_hints(path)?),
            None => Ok(TypeHints::default()),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Swift(target) => {
                // 1) load inputs
                let hints = target.input_settings.load_hints()?;
                let sources = target.input_settings.load_sources()?;
                if let Some(ast) = target.ast.as_ref() {
                    let dump = sources
                        .iter()
                        .map(|source| (source.name.clone(), source.ast.clone()))
                        .collect::<serde_json::Map<_, _>>();
                    write_output(Some(ast.as_path()), &serde_json::to_string_pretty(&dump)?)?;
                }

                // 2) generate
                let (swift, records) = transpile_all(&sources, &hints)?;
                write_output(target.out.as_deref(), &swift)?;

                // 3) persist what was learned
                let types_out = target.types_out.as_ref().or(target.input_settings.types.as_ref());
                if let Some(types_out) = types_out {
                    write_output(Some(types_out.as_path()), &serde_json::to_string_pretty(&records)?)?;
                }
            }
            Command::Types(target) => {
                let hints = target.input_settings.load_hints()?;
                let sources = target.input_settings.load_sources()?;
                let (_, records) = transpile_all(&sources, &hints)?;
                write_output(target.out.as_deref(), &serde_json::to_string_pretty(&records)?)?;
            }
        }
        Ok(())
    }
}

/// Files are independent: each gets its own accumulator. Results come back in
/// input order and the record trees are merged in that order.
fn transpile_all(sources: &[Source], hints: &TypeHints) -> Result<(String, TypeRecords), TranspileError> {
    let outputs = sources
        .par_iter()
        .map(|source| transpile_file(Some(&source.name), &source.ast, hints))
        .collect::<Result<Vec<_>, _>>()?;
    let mut swift = Vec::with_capacity(outputs.len());
    let mut records = TypeRecords::new();
    for output in outputs {
        swift.push(output.swift);
        records.merge(output.records);
    }
    Ok((swift.join("\n"), records))
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn source_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn write_output(out: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    let Some(out) = out else {
        print!("{contents}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(entry?);
            }
            if !matched_any {
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
