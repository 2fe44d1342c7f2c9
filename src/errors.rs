/*!
 * Error types for the subfmt library.
 *
 * This module contains custom error types for the parsing pipeline and the
 * writer, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while parsing a subtitle stream
///
/// Every parser failure is a reported, catchable outcome; the dispatcher
/// recovers per-format errors locally and only ever surfaces them folded
/// into [`ParseError::AllFormatsFailed`]. A direct single-parser invocation
/// surfaces the specific kind.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The stream is not both readable and randomly seekable
    #[error("Stream is not readable and seekable: {0}")]
    InvalidStream(String),

    /// The stream has no recognizable subtitle structure, or a required
    /// section/column is absent
    #[error("Invalid subtitle structure: {0}")]
    Structural(String),

    /// A required timecode could not be resolved for a block
    #[error("Missing or invalid timecode in block: {0}")]
    Timecode(String),

    /// The parser ran to completion but produced zero cues
    #[error("Parsing produced no cues: {0}")]
    EmptyResult(String),

    /// Every candidate parser failed or returned an empty result
    #[error("All formats failed to parse the content. Content preview: {preview}")]
    AllFormatsFailed {
        /// First ~500 characters of the input, decoded with the configured
        /// encoding, to aid diagnosis
        preview: String,
    },
}

/// Errors that can occur while writing subtitles
#[derive(Error, Debug)]
pub enum WriteError {
    /// Error from the underlying output sink
    #[error("Failed to write subtitle output: {0}")]
    Io(#[from] std::io::Error),
}

/// Main library error type that wraps all other errors
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the parsing pipeline
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from the writer
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for SubtitleError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for SubtitleError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
