// error.rs
//
// Copyright (c) 2026  monogif developers
//
use std::fmt;

/// Errors encountered while parsing a GIF stream
///
/// Only the preamble (signature and logical screen descriptor) can fail
/// hard; everything after it degrades without an error so that playback of
/// damaged files stays best-effort.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Stream too short or signature not `GIF`.
    MalformedHeader,
    /// GIF version not supported (87a or 89a only).
    UnsupportedVersion([u8; 3]),
    /// Stream ends inside the preamble.
    UnexpectedEndOfStream,
}

/// Monogif result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedHeader => write!(fmt, "malformed GIF header"),
            Error::UnsupportedVersion(v) => {
                write!(fmt, "unsupported GIF version: {}", String::from_utf8_lossy(v))
            }
            Error::UnexpectedEndOfStream => {
                write!(fmt, "unexpected end of stream")
            }
        }
    }
}

impl std::error::Error for Error {}
