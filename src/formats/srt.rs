use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::block_splitter::{split_blocks, split_on_numeric_markers, NUMERIC_LINE_REGEX};
use crate::cue::Cue;
use crate::errors::ParseError;
use crate::formats::{read_stream_text, DummyClock, FormatParser, SubtitleFormat, SubtitleStream};
use crate::parse_options::{ParseOptions, TimecodeMode};
use crate::timecode::{has_timecode_delimiter, parse_srt_timecode, try_parse_timecode_line};

// @module: SubRip (.srt) format parser

// @const: Inline formatting markup, {...} control codes and <...> tags
static FORMATTING_MARKUP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]*\}|<[^>]*>").unwrap());

/// Strip bracketed control codes and angle-bracket tags from a text line
pub(crate) fn strip_formatting(line: &str) -> String {
    FORMATTING_MARKUP_REGEX.replace_all(line, "").to_string()
}

/// SubRip parser
///
/// Blocks are delimited by blank lines; when no blank-line-delimited block
/// exists the parser falls back to treating digit-only lines as block-start
/// markers, which tolerates files with stripped separators. Within a block
/// the first line matching the timecode grammar is the timing line and all
/// other non-blank lines are text, with numeric sequence counters filtered
/// out before the timecode search.
#[derive(Debug, Default)]
pub struct SrtParser;

impl SrtParser {
    pub fn new() -> Self {
        SrtParser
    }

    /// Parse one block into at most one cue
    ///
    /// Returns `Ok(None)` for blocks skipped under the tolerant modes.
    fn parse_block(
        block: &str,
        options: &ParseOptions,
        dummy: &mut DummyClock,
    ) -> Result<Option<Cue>, ParseError> {
        // Sequence counters are structural, never text
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !NUMERIC_LINE_REGEX.is_match(l))
            .collect();

        if lines.is_empty() {
            return Ok(None);
        }

        if options.timecode_mode == TimecodeMode::None {
            let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
            let plaintext: Vec<String> = lines.iter().map(|l| strip_formatting(l)).collect();
            let (start, end) = dummy.next_interval();
            return Ok(Some(Cue::with_plaintext(start, end, text, plaintext)));
        }

        let mut timing: Option<(i64, i64)> = None;
        let mut bad_timing_line: Option<&str> = None;
        let mut text_lines: Vec<String> = Vec::new();
        let mut plaintext_lines: Vec<String> = Vec::new();

        for line in &lines {
            if timing.is_none() {
                let (start, end, success) = try_parse_timecode_line(line, parse_srt_timecode);
                if success {
                    timing = Some((start, end));
                    continue;
                }
                if bad_timing_line.is_none() && has_timecode_delimiter(line) {
                    bad_timing_line = Some(line);
                }
            }
            text_lines.push(line.to_string());
            plaintext_lines.push(strip_formatting(line));
        }

        let (start, end) = match timing {
            Some(timing) => timing,
            None => match options.timecode_mode {
                TimecodeMode::Required => {
                    let offending = bad_timing_line.unwrap_or(lines[0]);
                    return Err(ParseError::Timecode(offending.to_string()));
                }
                _ => dummy.next_interval(),
            },
        };

        if text_lines.is_empty() {
            if options.timecode_mode == TimecodeMode::Required {
                return Err(ParseError::Structural(format!(
                    "Block is missing text lines: {}",
                    block.trim()
                )));
            }
            debug!("Skipping SubRip block with no text lines");
            return Ok(None);
        }

        Ok(Some(Cue::with_plaintext(
            start,
            end,
            text_lines,
            plaintext_lines,
        )))
    }
}

impl FormatParser for SrtParser {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Srt
    }

    fn parse(
        &self,
        stream: &mut dyn SubtitleStream,
        options: &ParseOptions,
    ) -> Result<Vec<Cue>, ParseError> {
        let text = read_stream_text(stream, options.encoding)?;

        let mut blocks: Vec<String> = split_blocks(&text).collect();
        if blocks.len() <= 1 {
            // No blank-line separators: try numeric sequence markers instead
            let fallback = split_on_numeric_markers(&text);
            if fallback.len() > blocks.len() {
                debug!(
                    "No blank-line-delimited blocks, using {} numeric-marker blocks",
                    fallback.len()
                );
                blocks = fallback;
            }
        }

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
                "Parsing as SubRip produced no cues".to_string(),
            ));
        }

        Ok(cues)
    }
}
