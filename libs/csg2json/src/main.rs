//! csg2json - convert between CSG text and structured CSG documents
//!
//! The input and output formats are picked from the file extensions:
//! `.csg` for CSG text, `.csgjs` for the JSON document form.

use anyhow::{bail, Result};
use clap::Parser;
use config::constants::{CSGJS_EXTENSION, CSG_EXTENSION};
use csg_parser::{parse_file, parse_json_file, write_file, write_json_file, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "csg2json")]
#[command(about = "Convert between .csg text and .csgjs documents", long_about = None)]
struct Cli {
    /// Input file (.csg or .csgjs)
    input: PathBuf,
    /// Output file (.csg or .csgjs)
    output: PathBuf,
}

/// On-disk document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csg,
    CsgJs,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            CSG_EXTENSION => Ok(Format::Csg),
            CSGJS_EXTENSION => Ok(Format::CsgJs),
            _ => bail!("Unrecognized extension: {}", ext),
        }
    }

    fn read(self, path: &Path) -> Result<Value> {
        Ok(match self {
            Format::Csg => parse_file(path)?,
            Format::CsgJs => parse_json_file(path)?,
        })
    }

    fn write(self, document: &Value, path: &Path) -> Result<()> {
        match self {
            Format::Csg => write_file(document, path)?,
            Format::CsgJs => write_json_file(document, path)?,
        }
        Ok(())
    }
}

/// Reads `input` and writes it to `output`, converting between formats.
///
/// Both extensions are checked before any file is touched.
fn convert(input: &Path, output: &Path) -> Result<()> {
    let source = Format::from_path(input)?;
    let target = Format::from_path(output)?;

    let document = source.read(input)?;
    target.write(&document, output)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        "converted"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 0.
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    match convert(&cli.input, &cli.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
