use log::debug;

use crate::block_splitter::split_blocks;
use crate::cue::Cue;
use crate::errors::ParseError;
use crate::formats::{read_stream_text, DummyClock, FormatParser, SubtitleFormat, SubtitleStream};
use crate::parse_options::{ParseOptions, TimecodeMode};
use crate::timecode::{has_timecode_delimiter, parse_vtt_timecode, try_parse_timecode_line};

// @module: WebVTT (.vtt) format parser

// @const: First-line keywords marking a structural (non-cue) block
const STRUCTURAL_KEYWORDS: [&str; 4] = ["WEBVTT", "NOTE", "STYLE", "REGION"];

/// WebVTT parser
///
/// Identical block handling to SubRip but with the VTT timecode grammars. A
/// cue identifier line is distinguished by position: any line before the
/// first successful timecode match that is not the timing line itself is
/// silently dropped, not kept as text. Structural blocks (the WEBVTT header,
/// NOTE, STYLE and REGION) are skipped. No plaintext stripping is performed.
#[derive(Debug, Default)]
pub struct VttParser;

impl VttParser {
    pub fn new() -> Self {
        VttParser
    }

    fn is_structural_block(lines: &[&str]) -> bool {
        lines
            .first()
            .map(|first| {
                STRUCTURAL_KEYWORDS
                    .iter()
                    .any(|keyword| first.starts_with(keyword))
            })
            .unwrap_or(false)
    }

    fn parse_block(
        block: &str,
        options: &ParseOptions,
        dummy: &mut DummyClock,
    ) -> Result<Option<Cue>, ParseError> {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() || Self::is_structural_block(&lines) {
            return Ok(None);
        }

        if options.timecode_mode == TimecodeMode::None {
            let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
            let (start, end) = dummy.next_interval();
            return Ok(Some(Cue::new(start, end, text)));
        }

        let mut timing: Option<(i64, i64)> = None;
        let mut bad_timing_line: Option<&str> = None;
        let mut text_lines: Vec<String> = Vec::new();

        for line in &lines {
            match timing {
                None => {
                    let (start, end, success) = try_parse_timecode_line(line, parse_vtt_timecode);
                    if success {
                        timing = Some((start, end));
                    } else if bad_timing_line.is_none() && has_timecode_delimiter(line) {
                        bad_timing_line = Some(line);
                    }
                    // Cue identifiers and other pre-timecode lines are dropped
                }
                Some(_) => text_lines.push(line.to_string()),
            }
        }

        let (start, end) = match timing {
            Some(timing) => timing,
            None => match options.timecode_mode {
                TimecodeMode::Required => {
                    let offending = bad_timing_line.unwrap_or(lines[0]);
                    return Err(ParseError::Timecode(offending.to_string()));
                }
                _ => {
                    // No timing line at all: every line is text under the
                    // tolerant modes
                    text_lines = lines.iter().map(|l| l.to_string()).collect();
                    dummy.next_interval()
                }
            },
        };

        if text_lines.is_empty() {
            if options.timecode_mode == TimecodeMode::Required {
                return Err(ParseError::Structural(format!(
                    "Block is missing text lines: {}",
                    block.trim()
                )));
            }
            debug!("Skipping WebVTT block with no text lines");
            return Ok(None);
        }

        Ok(Some(Cue::new(start, end, text_lines)))
    }
}

impl FormatParser for VttParser {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Vtt
    }

    fn parse(
        &self,
        stream: &mut dyn SubtitleStream,
        options: &ParseOptions,
    ) -> Result<Vec<Cue>, ParseError> {
        let text = read_stream_text(stream, options.encoding)?;

        let blocks: Vec<String> = split_blocks(&text).collect();
        if blocks.is_empty() {
            return Err(ParseError::Structural(
                "No subtitle blocks found in stream".to_string(),
            ));
        }

        let mut cues = Vec::new();
        let mut dummy = DummyClock::new(options.dummy_cue_duration_ms);
        for block in &blocks {
            if let Some(cue) = Self::parse_block(block, options, &mut dummy)? {
                cues.push(cue);
            }
        }

        if cues.is_empty() {
            return Err(ParseError::EmptyResult(
                "Parsing as WebVTT produced no cues".to_string(),
            ));
        }

        Ok(cues)
    }
}
