/*!
 * Tests for multi-format dispatch and fallback
 */

use std::io::Cursor;
use std::path::Path;

use subfmt::dispatcher::SubtitleParser;
use subfmt::errors::ParseError;
use subfmt::formats::SubtitleFormat;
use subfmt::parse_options::{ParseOptions, TimecodeMode};

use crate::common;

#[test]
fn test_parse_str_withSrtContent_shouldParseAsSrt() {
    let parser = SubtitleParser::new();

    let cues = parser
        .parse_str(common::sample_srt(), &ParseOptions::default())
        .expect("SubRip content should dispatch");

    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0].start_time_ms, 1000);
}

#[test]
fn test_parse_str_withVttContent_shouldFallThroughToVtt() {
    let parser = SubtitleParser::new();

    let cues = parser
        .parse_str(common::sample_vtt(), &ParseOptions::default())
        .expect("WebVTT content should dispatch");

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[1].start_time_ms, 65_500);
}

#[test]
fn test_parse_str_withSsaContent_shouldFallThroughToSsa() {
    let parser = SubtitleParser::new();

    let cues = parser
        .parse_str(common::sample_ssa(), &ParseOptions::default())
        .expect("SubStation Alpha content should dispatch");

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].lines, vec!["Hello, world!"]);
}

#[test]
fn test_parse_str_withGarbage_shouldReturnAllFormatsFailedWithPreview() {
    let parser = SubtitleParser::new();
    let content = "this is not any known subtitle format";

    let err = parser
        .parse_str(content, &ParseOptions::default())
        .expect_err("garbage should fail every candidate");

    match err {
        ParseError::AllFormatsFailed { preview } => {
            assert_eq!(preview, content);
        }
        other => panic!("Expected aggregate failure, got: {other:?}"),
    }
}

#[test]
fn test_parse_str_withLongGarbage_shouldTruncatePreview() {
    let parser = SubtitleParser::new();
    let content = "x".repeat(2000);

    let err = parser
        .parse_str(&content, &ParseOptions::default())
        .expect_err("garbage should fail every candidate");

    match err {
        ParseError::AllFormatsFailed { preview } => {
            assert_eq!(preview.chars().count(), 500);
        }
        other => panic!("Expected aggregate failure, got: {other:?}"),
    }
}

#[test]
fn test_parse_stream_withSeekableCursor_shouldMatchParseStr() {
    let parser = SubtitleParser::new();
    let options = ParseOptions::default();

    let from_str = parser
        .parse_str(common::sample_srt(), &options)
        .expect("string path should parse");

    let mut cursor = Cursor::new(common::sample_srt().as_bytes().to_vec());
    let from_stream = parser
        .parse_stream(&mut cursor, &options)
        .expect("stream path should parse");

    assert_eq!(from_str, from_stream);
}

#[test]
fn test_parse_reader_withNonSeekableReader_shouldBufferAndParse() {
    let parser = SubtitleParser::new();
    // &[u8] is Read but the dispatcher never needs it to be Seek
    let reader: &[u8] = common::sample_srt().as_bytes();

    let cues = parser
        .parse_reader(reader, &ParseOptions::default())
        .expect("buffered reader should parse");

    assert_eq!(cues.len(), 3);
}

#[test]
fn test_parse_with_format_shouldSurfaceSpecificError() {
    let parser = SubtitleParser::new();
    let mut stream = Cursor::new(common::sample_srt().as_bytes().to_vec());

    // The dispatch path would recover this; a direct invocation must not
    let err = parser
        .parse_with_format(SubtitleFormat::Ssa, &mut stream, &ParseOptions::default())
        .expect_err("SubRip content is not SubStation Alpha");

    assert!(matches!(err, ParseError::Structural(_)));
}

#[test]
fn test_parse_with_format_withMatchingFormat_shouldParse() {
    let parser = SubtitleParser::new();
    let mut stream = Cursor::new(common::sample_vtt().as_bytes().to_vec());

    let cues = parser
        .parse_with_format(SubtitleFormat::Vtt, &mut stream, &ParseOptions::default())
        .expect("matching format should parse directly");

    assert_eq!(cues.len(), 2);
}

#[test]
fn test_prioritized_format_shouldChangeWhichParserWins() {
    // A plain text block under the optional mode parses with any candidate;
    // SubRip populates plaintext lines while WebVTT leaves them empty, which
    // makes the winning parser observable.
    let content = "Just an untimed line\n";
    let options = ParseOptions::with_mode(TimecodeMode::Optional);

    let default_winner = SubtitleParser::new()
        .parse_str(content, &options)
        .expect("default order should parse");
    assert!(!default_winner[0].plaintext_lines.is_empty());

    let options = options.prioritize(SubtitleFormat::Vtt);
    let prioritized_winner = SubtitleParser::new()
        .parse_str(content, &options)
        .expect("prioritized order should parse");
    assert!(prioritized_winner[0].plaintext_lines.is_empty());
}

#[test]
fn test_prioritized_format_withTies_shouldKeepInsertionOrder() {
    // Prioritizing the format that is already first changes nothing
    let options =
        ParseOptions::with_mode(TimecodeMode::Optional).prioritize(SubtitleFormat::Srt);

    let cues = SubtitleParser::new()
        .parse_str("Just an untimed line\n", &options)
        .expect("prioritizing the default winner should still parse");

    assert!(!cues[0].plaintext_lines.is_empty());
}

#[test]
fn test_detect_format_withKnownExtensions_shouldMatchCaseInsensitively() {
    assert_eq!(
        SubtitleParser::detect_format("movie.srt"),
        Some(SubtitleFormat::Srt)
    );
    assert_eq!(
        SubtitleParser::detect_format("movie.SRT"),
        Some(SubtitleFormat::Srt)
    );
    assert_eq!(
        SubtitleParser::detect_format("movie.ssa"),
        Some(SubtitleFormat::Ssa)
    );
    assert_eq!(
        SubtitleParser::detect_format("movie.ass"),
        Some(SubtitleFormat::Ssa)
    );
    assert_eq!(
        SubtitleParser::detect_format(Path::new("/some/dir/movie.vtt")),
        Some(SubtitleFormat::Vtt)
    );
}

#[test]
fn test_detect_format_withUnknownOrMissingExtension_shouldReturnNone() {
    assert_eq!(SubtitleParser::detect_format("movie.txt"), None);
    assert_eq!(SubtitleParser::detect_format("movie"), None);
}
