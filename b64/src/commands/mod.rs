//! Command implementations

mod decode;
mod encode;

pub use decode::decode;
pub use encode::encode;

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads command input: inline text first, then a file, then stdin.
pub fn read_input(text: Option<String>, path: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(text) = text {
        return Ok(text.into_bytes());
    }

    if let Some(path) = path {
        let data =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        debug!(path = %path.display(), bytes = data.len(), "read input file");
        return Ok(data);
    }

    let mut data = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut data)
        .context("failed to read stdin")?;
    debug!(bytes = data.len(), "read stdin");
    Ok(data)
}

/// Output destination of a command.
pub enum Sink {
    Stdout(BufWriter<io::Stdout>),
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
}

impl Sink {
    /// Creates (or truncates) `path`, or falls back to stdout.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                Ok(Sink::File {
                    path: path.to_path_buf(),
                    writer: BufWriter::new(file),
                })
            }
            None => Ok(Sink::Stdout(BufWriter::new(io::stdout()))),
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Sink::Stdout(_))
    }

    /// Flushes buffered output.
    pub fn finish(mut self) -> Result<()> {
        self.flush().context("failed to flush output")?;
        if let Sink::File { path, .. } = &self {
            info!(path = %path.display(), "wrote output file");
        }
        Ok(())
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(writer) => writer.write(buf),
            Sink::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(writer) => writer.flush(),
            Sink::File { writer, .. } => writer.flush(),
        }
    }
}
