/*!
 * Tests for the SubRip format parser
 */

use std::io::Cursor;

use subfmt::errors::ParseError;
use subfmt::formats::{FormatParser, SrtParser, SubtitleFormat};
use subfmt::parse_options::{ParseOptions, TimecodeMode};

use crate::common;

#[test]
fn test_parse_withWellFormedContent_shouldReturnAllCues() {
    let parser = SrtParser::new();
    let mut stream = Cursor::new(common::sample_srt().as_bytes().to_vec());

    let cues = parser
        .parse(&mut stream, &ParseOptions::default())
        .expect("sample should parse");

    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0].start_time_ms, 1000);
    assert_eq!(cues[0].end_time_ms, 4000);
    assert_eq!(cues[0].lines, vec!["This is a test subtitle."]);
    assert_eq!(
        cues[1].lines,
        vec!["It contains multiple entries.", "Across two lines."]
    );
    assert_eq!(cues[2].start_time_ms, 10_000);
}

#[test]
fn test_parse_withCrlfContent_shouldReturnAllCues() {
    let parser = SrtParser::new();
    let content = common::sample_srt().replace('\n', "\r\n");
    let mut stream = Cursor::new(content.into_bytes());

    let cues = parser
        .parse(&mut stream, &ParseOptions::default())
        .expect("CRLF sample should parse");

    assert_eq!(cues.len(), 3);
}

#[test]
fn test_parse_withFormattingMarkup_shouldStripIntoPlaintext() {
    let parser = SrtParser::new();
    let content = "1\n00:00:01,000 --> 00:00:04,000\n<i>Styled</i> {\\an8}text\n";
    let mut stream = Cursor::new(content.as_bytes().to_vec());

    let cues = parser
        .parse(&mut stream, &ParseOptions::default())
        .expect("markup block should parse");

    assert_eq!(cues[0].lines, vec!["<i>Styled</i> {\\an8}text"]);
    assert_eq!(cues[0].plaintext_lines, vec!["Styled text"]);
}

#[test]
fn test_parse_withStrippedSeparators_shouldFallBackToNumericMarkers() {
    let parser = SrtParser::new();
    // Blank-line separators removed, only sequence counters remain
    let content =
        "1\n00:00:01,000 --> 00:00:04,000\nFirst\n2\n00:00:05,000 --> 00:00:08,000\nSecond\n";
    let mut stream = Cursor::new(content.as_bytes().to_vec());

    let cues = parser
        .parse(&mut stream, &ParseOptions::default())
        .expect("marker fallback should parse");

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].lines, vec!["First"]);
    assert_eq!(cues[1].start_time_ms, 5000);
    assert_eq!(cues[1].lines, vec!["Second"]);
}

#[test]
fn test_parse_withInvalidTimecodeInRequiredMode_shouldNameOffendingLine() {
    let parser = SrtParser::new();
    let content = "1\ninvalid_timecode --> 00:00:04,000\nSome text\n";
    let mut stream = Cursor::new(content.as_bytes().to_vec());

    let err = parser
        .parse(&mut stream, &ParseOptions::default())
        .expect_err("required mode should reject bad timing");

    match err {
        ParseError::Timecode(line) => {
            assert_eq!(line, "invalid_timecode --> 00:00:04,000");
        }
        other => panic!("Expected timecode error, got: {other:?}"),
    }
}

#[test]
fn test_parse_withMissingTextInRequiredMode_shouldReturnStructuralError() {
    let parser = SrtParser::new();
    let content = "1\n00:00:01,000 --> 00:00:04,000\n";
    let mut stream = Cursor::new(content.as_bytes().to_vec());

    let err = parser
        .parse(&mut stream, &ParseOptions::default())
        .expect_err("timecode-only block should be rejected");

    match err {
        ParseError::Structural(message) => {
            assert!(message.contains("missing text lines"));
        }
        other => panic!("Expected structural error, got: {other:?}"),
    }
}

#[test]
fn test_parse_withOptionalMode_shouldSubstituteDummySchedule() {
    let parser = SrtParser::new();
    // No timing lines at all
    let content = "Plain line one\n\nPlain line two\n\nPlain line three\n";
    let mut stream = Cursor::new(content.as_bytes().to_vec());
    let options = ParseOptions::with_mode(TimecodeMode::Optional);

    let cues = parser
        .parse(&mut stream, &options)
        .expect("optional mode should tolerate missing timing");

    assert_eq!(cues.len(), 3);
    assert_eq!((cues[0].start_time_ms, cues[0].end_time_ms), (0, 1000));
    assert_eq!((cues[1].start_time_ms, cues[1].end_time_ms), (1000, 2000));
    assert_eq!((cues[2].start_time_ms, cues[2].end_time_ms), (2000, 3000));
}

#[test]
fn test_parse_withNoneMode_shouldTreatTimingLinesAsText() {
    let parser = SrtParser::new();
    let content = "1\n00:00:01,000 --> 00:00:04,000\nFirst\n";
    let mut stream = Cursor::new(content.as_bytes().to_vec());
    let options = ParseOptions::with_mode(TimecodeMode::None);

    let cues = parser
        .parse(&mut stream, &options)
        .expect("none mode should never fail on timing");

    assert_eq!(cues.len(), 1);
    // The timing line is kept as ordinary text
    assert_eq!(
        cues[0].lines,
        vec!["00:00:01,000 --> 00:00:04,000", "First"]
    );
    assert_eq!((cues[0].start_time_ms, cues[0].end_time_ms), (0, 1000));
}

#[test]
fn test_parse_withEmptyStream_shouldReturnStructuralError() {
    let parser = SrtParser::new();
    let mut stream = Cursor::new(Vec::<u8>::new());

    let err = parser
        .parse(&mut stream, &ParseOptions::default())
        .expect_err("empty stream should not parse");

    assert!(matches!(err, ParseError::Structural(_)));
}

#[test]
fn test_parse_withOnlyCounters_shouldReturnEmptyResultError() {
    let parser = SrtParser::new();
    let content = "1\n\n2\n\n3\n";
    let mut stream = Cursor::new(content.as_bytes().to_vec());
    let options = ParseOptions::with_mode(TimecodeMode::Optional);

    let err = parser
        .parse(&mut stream, &options)
        .expect_err("counters alone carry no cues");

    assert!(matches!(err, ParseError::EmptyResult(_)));
}

#[test]
fn test_format_shouldReportSrt() {
    assert_eq!(SrtParser::new().format(), SubtitleFormat::Srt);
}
