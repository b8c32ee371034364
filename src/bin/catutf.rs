//! Concatenates UTF-8/UTF-16 text files to stdout as UTF-8.
//!
//! The goal is to "just do the right thing" no matter which UTF flavor the input files
//! use: a BOM is honored and stripped, BOM-less files are decoded per `--hint`, and CRLF
//! line endings are normalized to LF.

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use anyutf::EncodingHint;

#[derive(Parser)]
#[command(version, about = "Concatenate UTF-8/UTF-16 text files to stdout as UTF-8")]
struct Args {
    /// Files to print.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Encoding to assume for files without a BOM.
    #[arg(long, value_enum, default_value_t = Hint::Html5)]
    hint: Hint,
}

/// Command-line spelling of [`EncodingHint`], including the named aliases.
#[derive(Clone, Copy, ValueEnum)]
enum Hint {
    Utf8,
    Utf16le,
    Utf16be,
    /// Same as utf16le.
    Windows,
    /// Same as utf8.
    Posix,
    /// Same as utf8.
    Html5,
}

impl From<Hint> for EncodingHint {
    fn from(value: Hint) -> Self {
        match value {
            Hint::Utf8 => EncodingHint::Utf8,
            Hint::Utf16le => EncodingHint::Utf16Le,
            Hint::Utf16be => EncodingHint::Utf16Be,
            Hint::Windows => EncodingHint::WINDOWS,
            Hint::Posix => EncodingHint::POSIX,
            Hint::Html5 => EncodingHint::HTML5,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut stdout = io::stdout().lock();
    for path in &args.files {
        let text = match anyutf::read_to_string(path, args.hint.into()) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("catutf: {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = stdout.write_all(text.replace("\r\n", "\n").as_bytes()) {
            eprintln!("catutf: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
