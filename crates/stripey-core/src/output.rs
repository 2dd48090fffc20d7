//! Writes the finished image.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PipelineError;

/// Where the image goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => OutputTarget::File(path.to_path_buf()),
            _ => OutputTarget::Stdout,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::File(path) => write!(f, "file {}", path.display()),
            OutputTarget::Stdout => f.write_str("stdout"),
        }
    }
}

/// Write `data` to `path` (created or truncated), or to `stdout` when no
/// path is given.
pub fn write_output<W: Write>(
    data: &[u8],
    path: Option<&Path>,
    mut stdout: W,
) -> Result<(), PipelineError> {
    let target = OutputTarget::from_path(path);
    let result = match &target {
        OutputTarget::File(path) => std::fs::write(path, data),
        OutputTarget::Stdout => stdout.write_all(data).and_then(|()| stdout.flush()),
    };

    match result {
        Ok(()) => {
            debug!(bytes = data.len(), destination = %target, "Image written");
            Ok(())
        }
        Err(source) => Err(PipelineError::OutputWrite {
            destination: target,
            source,
        }),
    }
}
