/*!
 * Format descriptors and the shared parser contract.
 *
 * This module contains the three interchangeable format parsers:
 * - SRT: SubRip, numbered blocks with comma-separated millisecond timestamps
 * - SSA: SubStation Alpha, a line-oriented `[Events]` table
 * - VTT: WebVTT, blank-line blocks with period-separated timestamps
 *
 * Each parser implements the same function-shaped contract so the dispatcher
 * can treat them as an ordered strategy set.
 */

use std::fmt::Debug;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cue::Cue;
use crate::errors::ParseError;
use crate::parse_options::{ParseOptions, TextEncoding};

pub mod srt;
pub mod ssa;
pub mod vtt;

pub use srt::SrtParser;
pub use ssa::SsaParser;
pub use vtt::VttParser;

/// Descriptor for one of the supported subtitle formats
///
/// Used only for detection and priority ordering, never for parsing logic.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    // @format: SubRip (.srt)
    Srt,
    // @format: SubStation Alpha (.ssa, .ass)
    Ssa,
    // @format: WebVTT (.vtt)
    Vtt,
}

impl SubtitleFormat {
    /// All supported formats, in the dispatcher's default candidate order
    pub const ALL: [SubtitleFormat; 3] = [
        SubtitleFormat::Srt,
        SubtitleFormat::Ssa,
        SubtitleFormat::Vtt,
    ];

    // @returns: Human-readable format name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Srt => "SubRip",
            Self::Ssa => "SubStationAlpha",
            Self::Vtt => "WebVTT",
        }
    }

    /// Filename extensions associated with this format, lowercase
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Srt => &["srt"],
            Self::Ssa => &["ssa", "ass"],
            Self::Vtt => &["vtt"],
        }
    }

    /// Typical file extension for this format
    pub fn extension(&self) -> &'static str {
        self.extensions()[0]
    }

    /// Check whether a path carries one of this format's extensions,
    /// case-insensitively
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_lowercase();
        self.extensions().contains(&ext.as_str())
    }
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for SubtitleFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "srt" | "subrip" => Ok(Self::Srt),
            "ssa" | "ass" | "substationalpha" => Ok(Self::Ssa),
            "vtt" | "webvtt" => Ok(Self::Vtt),
            _ => Err(anyhow::anyhow!("Invalid subtitle format: {}", s)),
        }
    }
}

/// Readable, randomly seekable byte stream
///
/// Parsers reset the position to the start before reading; the dispatcher is
/// responsible for buffering non-seekable input into memory before any
/// parser runs.
pub trait SubtitleStream: Read + Seek {}

impl<T: Read + Seek> SubtitleStream for T {}

/// Common trait for all format parsers
///
/// This trait defines the interface every format implementation must follow,
/// allowing the dispatcher to try them interchangeably against one input.
pub trait FormatParser: Send + Sync + Debug {
    /// The format this parser handles
    fn format(&self) -> SubtitleFormat;

    /// Parse the stream into an ordered list of cues
    ///
    /// # Arguments
    /// * `stream` - Seekable byte stream; position is reset to the start
    /// * `options` - Encoding, timecode mode and dummy schedule
    ///
    /// # Returns
    /// * `Result<Vec<Cue>, ParseError>` - Cues in display order, or the
    ///   specific failure kind
    fn parse(
        &self,
        stream: &mut dyn SubtitleStream,
        options: &ParseOptions,
    ) -> Result<Vec<Cue>, ParseError>;
}

/// Rewind a stream and decode its full contents with the given encoding
pub(crate) fn read_stream_text(
    stream: &mut dyn SubtitleStream,
    encoding: TextEncoding,
) -> Result<String, ParseError> {
    stream.seek(SeekFrom::Start(0)).map_err(|e| {
        ParseError::InvalidStream(format!("Stream does not support seeking: {}", e))
    })?;

    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes).map_err(|e| {
        ParseError::InvalidStream(format!("Stream is not readable: {}", e))
    })?;

    encoding.decode(&bytes)
}

/// Deterministic schedule for dummy timecodes
///
/// Starts at 0 ms and advances by the configured duration per dummy cue, so
/// substituted cues are strictly increasing and reproducible.
#[derive(Debug)]
pub(crate) struct DummyClock {
    next_start_ms: i64,
    duration_ms: i64,
}

impl DummyClock {
    pub(crate) fn new(duration_ms: i64) -> Self {
        DummyClock {
            next_start_ms: 0,
            duration_ms,
        }
    }

    /// Next dummy interval
    pub(crate) fn next_interval(&mut self) -> (i64, i64) {
        let start = self.next_start_ms;
        self.next_start_ms += self.duration_ms;
        (start, start + self.duration_ms)
    }
}
