//! Markup conversion boundary.
//!
//! The pipeline never parses markup itself; it hands the full document
//! text to a [`Converter`] together with a source and target [`Format`]
//! and takes back the converted text. The production implementation
//! shells out to pandoc ([`PandocConverter`]); tests substitute their
//! own.

mod pandoc;

pub use pandoc::PandocConverter;

use clap::ValueEnum;

/// A markup format, identified by the tag the external converter
/// understands and the file extension it is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Html,
    Rst,
}

impl Format {
    /// Format tag passed to the converter (`-f`/`-t` values).
    pub fn tag(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Rst => "rst",
        }
    }

    /// File extension for documents in this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Rst => "rst",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Failure kinds at the converter boundary.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to spawn {program}: {source}. Is it installed?")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("converter I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("converter exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("converter produced non-UTF-8 output")]
    NonUtf8(#[from] std::string::FromUtf8Error),
    #[error("converter produced no content")]
    Empty,
}

/// A document converter: full text in one format to full text in another.
///
/// Synchronous and blocking, no timeout, no retry. Implementations must
/// not depend on shared mutable state so the pipeline stays free to
/// process files independently.
pub trait Converter {
    fn convert(&self, input: &str, from: Format, to: Format) -> Result<String, ConvertError>;
}
