//! Error types.
//!
//! Every failure is fatal for the current run. Variants carry the section, field or
//! path involved so the diagnostic printed by `main` identifies what went wrong.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::section::SectionName;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to invoke `{tool}`: {source}")]
    ToolInvocationFailed {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("`{tool}` reported an error: {message}")]
    ToolReportedError { tool: String, message: String },

    #[error("no {0} section found")]
    SectionNotFound(SectionName),

    #[error("malformed {field} field for {section} section: {value:?}")]
    MetadataParseError {
        section: SectionName,
        field: &'static str,
        value: String,
    },

    #[error(
        "binary truncated reading {section}: wanted {wanted} bytes at offset {offset:#x}, got {available}"
    )]
    TruncatedRead {
        section: SectionName,
        offset: u64,
        wanted: u64,
        available: u64,
    },

    #[error("failed to read {section} from the binary: {source}")]
    Read {
        section: SectionName,
        #[source]
        source: io::Error,
    },

    #[error("invalid layout at {section} section: {reason}")]
    InvalidLayout {
        section: SectionName,
        reason: String,
    },

    #[error("unsupported architecture {0}, expected RISC-V")]
    UnsupportedArchitecture(String),

    #[error("malformed binary: {0}")]
    MalformedBinary(#[from] object::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn layout(section: SectionName, reason: impl Into<String>) -> Self {
        Error::InvalidLayout {
            section,
            reason: reason.into(),
        }
    }
}
