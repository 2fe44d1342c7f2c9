use std::cmp::Ordering;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::cue::Cue;
use crate::errors::ParseError;
use crate::formats::{
    FormatParser, SrtParser, SsaParser, SubtitleFormat, SubtitleStream, VttParser,
};
use crate::parse_options::ParseOptions;

// @module: Multi-format dispatch with fallback across candidate parsers

// @const: Length of the diagnostic content preview, in characters
const PREVIEW_CHARS: usize = 500;

/// Multi-format subtitle parser
///
/// Holds an ordered collection of (descriptor, parser) pairs - SRT, SSA, VTT
/// by default - and tries each candidate against the same underlying bytes
/// until one returns a non-empty cue list. Per-format failures are always
/// recovered locally and folded into an aggregate error when every candidate
/// fails.
#[derive(Debug)]
pub struct SubtitleParser {
    parsers: Vec<(SubtitleFormat, Box<dyn FormatParser>)>,
}

impl Default for SubtitleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleParser {
    /// Create a parser with the default candidate order
    pub fn new() -> Self {
        SubtitleParser {
            parsers: vec![
                (SubtitleFormat::Srt, Box::new(SrtParser::new())),
                (SubtitleFormat::Ssa, Box::new(SsaParser::new())),
                (SubtitleFormat::Vtt, Box::new(VttParser::new())),
            ],
        }
    }

    /// Parse a seekable stream, trying candidate formats in order
    ///
    /// Each parser attempt repositions the stream to offset 0. Any failure,
    /// of any kind, advances to the next candidate; no partial results are
    /// merged across formats.
    ///
    /// # Returns
    /// * `Ok(cues)` - The first non-empty cue list
    /// * `Err(ParseError::AllFormatsFailed)` - When every candidate produced
    ///   an error or an empty list
    pub fn parse_stream<S: Read + Seek>(
        &self,
        stream: &mut S,
        options: &ParseOptions,
    ) -> Result<Vec<Cue>, ParseError> {
        for (format, parser) in self.candidate_order(options.prioritized_format) {
            stream.seek(SeekFrom::Start(0)).map_err(|e| {
                ParseError::InvalidStream(format!("Stream does not support seeking: {}", e))
            })?;

            match parser.parse(stream, options) {
                Ok(cues) if !cues.is_empty() => {
                    debug!("Parsed {} cues as {}", cues.len(), format.name());
                    return Ok(cues);
                }
                Ok(_) => {
                    debug!("Parser {} returned an empty cue list", format.name());
                }
                Err(e) => {
                    debug!("Parser {} failed: {}", format.name(), e);
                }
            }
        }

        warn!("No candidate format could parse the input");
        Err(ParseError::AllFormatsFailed {
            preview: self.content_preview(stream, options),
        })
    }

    /// Parse a non-seekable reader by buffering it fully into memory first
    ///
    /// The input is copied exactly once; all parser attempts reuse the
    /// buffer.
    pub fn parse_reader<R: Read>(
        &self,
        mut reader: R,
        options: &ParseOptions,
    ) -> Result<Vec<Cue>, ParseError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).map_err(|e| {
            ParseError::InvalidStream(format!("Failed to buffer input stream: {}", e))
        })?;

        let mut cursor = Cursor::new(buffer);
        self.parse_stream(&mut cursor, options)
    }

    /// Parse a text string
    ///
    /// The string is encoded with the configured encoding into an in-memory
    /// buffer and delegated to the stream path.
    pub fn parse_str(&self, content: &str, options: &ParseOptions) -> Result<Vec<Cue>, ParseError> {
        let bytes = options.encoding.encode(content);
        let mut cursor = Cursor::new(bytes);
        self.parse_stream(&mut cursor, options)
    }

    /// Parse an asynchronous reader
    ///
    /// Suspends only while buffering the input; block and timecode parsing
    /// stay CPU-bound on the synchronous path, so ordering and outcomes are
    /// identical to [`SubtitleParser::parse_stream`].
    pub async fn parse_async<R: AsyncRead + Unpin>(
        &self,
        mut reader: R,
        options: &ParseOptions,
    ) -> Result<Vec<Cue>, ParseError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await.map_err(|e| {
            ParseError::InvalidStream(format!("Failed to buffer input stream: {}", e))
        })?;

        let mut cursor = Cursor::new(buffer);
        self.parse_stream(&mut cursor, options)
    }

    /// Invoke one specific format parser directly, bypassing the fallback
    ///
    /// Unlike the dispatch path this surfaces the parser's specific error
    /// kind and message.
    pub fn parse_with_format<S: Read + Seek>(
        &self,
        format: SubtitleFormat,
        stream: &mut S,
        options: &ParseOptions,
    ) -> Result<Vec<Cue>, ParseError> {
        let (_, parser) = self
            .parsers
            .iter()
            .find(|(f, _)| *f == format)
            .expect("every supported format has a registered parser");

        stream.seek(SeekFrom::Start(0)).map_err(|e| {
            ParseError::InvalidStream(format!("Stream does not support seeking: {}", e))
        })?;
        parser.parse(stream, options)
    }

    /// Detect the most likely format from a filename extension
    ///
    /// Case-insensitive, first structural match wins. Informational only:
    /// the parse path always runs the fallback order regardless.
    pub fn detect_format<P: AsRef<Path>>(path: P) -> Option<SubtitleFormat> {
        SubtitleFormat::ALL
            .iter()
            .copied()
            .find(|format| format.matches_extension(path.as_ref()))
    }

    /// Candidate parsers in the order they should be tried
    ///
    /// When a prioritized format is set, candidates are reordered by
    /// ascending lexical distance of their name from the prioritized name.
    /// The sort is stable, so ties keep the original insertion order. This
    /// is a deliberately crude heuristic kept for compatibility with
    /// consumers that depend on today's exact fallback order.
    fn candidate_order(
        &self,
        prioritized: Option<SubtitleFormat>,
    ) -> Vec<&(SubtitleFormat, Box<dyn FormatParser>)> {
        let mut candidates: Vec<&(SubtitleFormat, Box<dyn FormatParser>)> =
            self.parsers.iter().collect();

        if let Some(preferred) = prioritized {
            candidates
                .sort_by_key(|(format, _)| name_distance(format.name(), preferred.name()));
        }

        candidates
    }

    /// Human-readable preview of the content for the aggregate error
    fn content_preview<S: Read + Seek>(&self, stream: &mut S, options: &ParseOptions) -> String {
        let mut bytes = Vec::new();
        if stream.seek(SeekFrom::Start(0)).is_err()
            || stream.read_to_end(&mut bytes).is_err()
        {
            return String::from("<unreadable stream>");
        }

        let decoded = options
            .encoding
            .decode(&bytes)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
        decoded.chars().take(PREVIEW_CHARS).collect()
    }
}

/// Lexical distance between a format name and the prioritized name
///
/// Zero for an exact match, one otherwise - the observable behavior of the
/// original absolute string-compare ordering for the shipped formats.
fn name_distance(name: &str, preferred: &str) -> u32 {
    match name.cmp(preferred) {
        Ordering::Equal => 0,
        _ => 1,
    }
}
