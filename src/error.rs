//! Library-wide error and result types.

use std::fmt;
use std::io;

/// Result alias used throughout ndsfnt.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Error messages are kept terse; callers that need richer context (file
/// paths, for instance) should wrap `Error` in their own type.
#[derive(Debug)]
pub enum Error {
    /// The input ended before all expected bytes could be read.
    UnexpectedEof,
    /// An offset or size field would fall outside the representable range.
    InvalidRange,
    /// A structural constraint was violated (message describes which one).
    Parse(&'static str),
    /// A name is longer than the 7-bit length field allows.
    NameTooLong(usize),
    /// A name contains a character outside the single-byte encoding.
    InvalidName(String),
    /// The tree holds more folders than the 12-bit folder index can address.
    TooManyFolders(usize),
    /// A subfolder entry points at a folder that was already loaded.
    FolderRevisited(u16),
    /// An underlying I/O operation failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEof => write!(f, "unexpected end of file"),
            Error::InvalidRange => write!(f, "invalid offset or size"),
            Error::Parse(s) => write!(f, "parse error: {s}"),
            Error::NameTooLong(len) => write!(f, "name too long: {len} characters (max 127)"),
            Error::InvalidName(name) => write!(f, "name is not single-byte encodable: {name:?}"),
            Error::TooManyFolders(n) => write!(f, "too many folders: {n} (max 4096)"),
            Error::FolderRevisited(id) => write!(f, "folder {id:#06X} referenced more than once"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Error::Io(e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof
        } else {
            Error::Io(e)
        }
    }
}
