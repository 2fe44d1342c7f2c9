use log::{debug, warn};

use crate::cue::Cue;
use crate::errors::ParseError;
use crate::formats::srt::strip_formatting;
use crate::formats::{read_stream_text, DummyClock, FormatParser, SubtitleFormat, SubtitleStream};
use crate::parse_options::{ParseOptions, TimecodeMode};
use crate::timecode::{parse_ssa_timecode, TIMECODE_FAILURE};

// @module: SubStation Alpha (.ssa/.ass) format parser

// @const: Section marker opening the dialogue table
const EVENTS_SECTION: &str = "[Events]";
// @const: Script Info directive declaring the wrap style
const WRAP_STYLE_PREFIX: &str = "WrapStyle:";
// @const: Column separator of the events table
const COLUMN_SEPARATOR: char = ',';
// @const: Required column headers
const START_COLUMN: &str = "Start";
const END_COLUMN: &str = "End";
const TEXT_COLUMN: &str = "Text";

/// SSA wrap style, controlling which escape sequences denote line breaks
/// within cue text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SsaWrapStyle {
    /// Smart wrapping; only `\N` forces a break
    #[default]
    Smart,
    /// End-of-line wrapping; only `\N` forces a break
    EndOfLine,
    /// No wrapping; both `\n` and `\N` force breaks
    None,
    /// Smart wrapping, lower line wider; only `\N` forces a break
    Smart2,
}

impl SsaWrapStyle {
    /// Parse the numeric value of a `WrapStyle:` directive
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "1" => Self::EndOfLine,
            "2" => Self::None,
            "3" => Self::Smart2,
            _ => Self::Smart,
        }
    }
}

/// SubStation Alpha parser
///
/// Line-oriented table parse: header lines are skipped until the literal
/// `[Events]` marker (capturing a `WrapStyle:` directive along the way), the
/// following `Format:` row is split on `,` to locate the `Start`/`End`/`Text`
/// column indices, and each subsequent data row yields one cue. Text columns
/// are re-joined with `,` because dialogue text may itself contain commas.
/// A missing section or column header is a structural failure that aborts
/// the whole parse immediately.
#[derive(Debug, Default)]
pub struct SsaParser;

impl SsaParser {
    pub fn new() -> Self {
        SsaParser
    }

    /// Split joined dialogue text into display lines per the wrap style
    fn split_text_lines(text: &str, wrap_style: SsaWrapStyle) -> Vec<String> {
        let normalized = match wrap_style {
            SsaWrapStyle::None => text.replace("\\n", "\\N"),
            _ => text.to_string(),
        };

        normalized
            .split("\\N")
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect()
    }
}

impl FormatParser for SsaParser {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Ssa
    }

    fn parse(
        &self,
        stream: &mut dyn SubtitleStream,
        options: &ParseOptions,
    ) -> Result<Vec<Cue>, ParseError> {
        let text = read_stream_text(stream, options.encoding)?;
        let mut lines = text.lines();

        // Scan the script headers up to the events table
        let mut wrap_style = SsaWrapStyle::default();
        let mut found_events = false;
        for line in lines.by_ref() {
            let trimmed = line.trim();
            if let Some(value) = trimmed.strip_prefix(WRAP_STYLE_PREFIX) {
                wrap_style = SsaWrapStyle::from_value(value);
            }
            if trimmed == EVENTS_SECTION {
                found_events = true;
                break;
            }
        }
        if !found_events {
            return Err(ParseError::Structural(format!(
                "Missing {} section in SubStation Alpha stream",
                EVENTS_SECTION
            )));
        }

        // The header row directly follows the section marker
        let header = lines
            .by_ref()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or_else(|| {
                ParseError::Structural(format!(
                    "Missing format header row after {}",
                    EVENTS_SECTION
                ))
            })?;

        let columns: Vec<&str> = header.split(COLUMN_SEPARATOR).map(str::trim).collect();
        let column_index = |name: &str| {
            columns.iter().position(|c| *c == name).ok_or_else(|| {
                ParseError::Structural(format!(
                    "Missing '{}' column in {} header row",
                    name, EVENTS_SECTION
                ))
            })
        };
        let start_index = column_index(START_COLUMN)?;
        let end_index = column_index(END_COLUMN)?;
        let text_index = column_index(TEXT_COLUMN)?;

        let mut cues = Vec::new();
        let mut dummy = DummyClock::new(options.dummy_cue_duration_ms);

        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('[') {
                // Next section: the events table is over
                break;
            }

            let cells: Vec<&str> = trimmed.split(COLUMN_SEPARATOR).collect();
            if cells.len() <= text_index || cells.len() <= start_index || cells.len() <= end_index {
                warn!("Skipping malformed SubStation Alpha row: {}", trimmed);
                continue;
            }

            // Dialogue text may contain commas, so re-join the tail
            let joined_text = cells[text_index..].join(",");

            let start = parse_ssa_timecode(cells[start_index]);
            let end = parse_ssa_timecode(cells[end_index]);
            let timing = if start != TIMECODE_FAILURE
                && end != TIMECODE_FAILURE
                && options.timecode_mode != TimecodeMode::None
            {
                (start, end)
            } else if options.timecode_mode == TimecodeMode::Required {
                debug!("Dropping SubStation Alpha row with unparseable timecodes");
                continue;
            } else {
                dummy.next_interval()
            };

            let text_lines = Self::split_text_lines(&joined_text, wrap_style);
            let plaintext_lines: Vec<String> =
                text_lines.iter().map(|l| strip_formatting(l)).collect();
            if text_lines.is_empty()
                || plaintext_lines.iter().all(|l| l.trim().is_empty())
            {
                debug!("Skipping SubStation Alpha row with empty text");
                continue;
            }

            cues.push(Cue::with_plaintext(
                timing.0,
                timing.1,
                text_lines,
                plaintext_lines,
            ));
        }

        if cues.is_empty() {
            return Err(ParseError::EmptyResult(
                "Parsing as SubStation Alpha produced no cues".to_string(),
            ));
        }

        Ok(cues)
    }
}
