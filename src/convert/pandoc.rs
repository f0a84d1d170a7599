//! Pandoc-backed [`Converter`].
//!
//! Runs `pandoc -f <from> -t <to>`, streaming the document over stdin and
//! collecting stdout. The executable can be overridden with the
//! `TREECONV_PANDOC` env var (useful for tests and non-PATH installs).

use std::io::Write;
use std::process::{Command, Stdio};

use super::{ConvertError, Converter, Format};

/// Environment variable naming an alternative converter executable.
pub const PANDOC_ENV: &str = "TREECONV_PANDOC";

pub struct PandocConverter {
    program: String,
}

impl PandocConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use `TREECONV_PANDOC` if set, otherwise `pandoc` from PATH.
    pub fn from_env() -> Self {
        Self::new(std::env::var(PANDOC_ENV).unwrap_or_else(|_| "pandoc".to_string()))
    }
}

impl Converter for PandocConverter {
    fn convert(&self, input: &str, from: Format, to: Format) -> Result<String, ConvertError> {
        let _span = tracing::info_span!("pandoc", from = %from, to = %to).entered();

        let mut child = Command::new(&self.program)
            .args(["-f", from.tag(), "-t", to.tag()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin from a separate thread; writing the whole document
        // before draining stdout can deadlock once the pipe buffer fills.
        let mut stdin = child.stdin.take().ok_or_else(|| {
            ConvertError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stdin not captured",
            ))
        })?;
        let bytes = input.as_bytes().to_vec();
        let writer = std::thread::spawn(move || {
            let res = stdin.write_all(&bytes);
            drop(stdin);
            res
        });

        let output = child.wait_with_output()?;
        let write_res = writer.join().unwrap_or_else(|_| {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stdin writer panicked",
            ))
        });

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(status = %output.status, stderr = %stderr, "Conversion failed");
            return Err(ConvertError::Failed {
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }
        // A failed stdin write with a clean exit still means truncated input
        write_res?;

        let converted = String::from_utf8(output.stdout)?;
        if converted.trim().is_empty() {
            tracing::warn!("Conversion produced empty output");
            return Err(ConvertError::Empty);
        }

        tracing::info!(bytes = converted.len(), "Converted");
        Ok(converted)
    }
}
