use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("file name '{0}' has no extension")]
    MissingExtension(String),

    #[error("unable to open file [{}]: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed reading '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("'{name}' is truncated: expected {expected} bytes of {what}, found {found}")]
    Truncated {
        name: String,
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("'{name}' is {size} bytes, which does not fit the 16-bit address space")]
    AddressOverflow { name: String, size: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DumpError {
    /// Whether the failure belongs to a single input file. Anything else
    /// (stdout, stdin, directory listing) ends the run even with `--keep-going`.
    #[must_use]
    pub const fn is_per_file(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
