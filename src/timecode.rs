use once_cell::sync::Lazy;
use regex::Regex;

// @module: Per-format timecode grammars

/// Sentinel returned when a timecode string cannot be parsed
///
/// Parsing failure is a value, never an error - the caller decides fatality.
pub const TIMECODE_FAILURE: i64 = -1;

/// Delimiters accepted between the start and end timecodes of a timing line,
/// checked in this order
pub const TIMECODE_DELIMITERS: [&str; 3] = ["-->", "- >", "->"];

// @const: SRT timestamp grammar, exactly HH:MM:SS,mmm
static SRT_TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

// @const: VTT long form, HH:MM:SS.mmm with variable digit width
static VTT_LONG_TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})\.(\d+)$").unwrap()
});

// @const: VTT short form, MM:SS.mmm without hours
static VTT_SHORT_TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2})\.(\d+)$").unwrap()
});

/// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
///
/// Returns [`TIMECODE_FAILURE`] on a wrong separator, non-digit content or
/// wrong digit count.
pub fn parse_srt_timecode(timecode: &str) -> i64 {
    let Some(caps) = SRT_TIMECODE_REGEX.captures(timecode.trim()) else {
        return TIMECODE_FAILURE;
    };

    let hours: i64 = caps[1].parse().unwrap_or(0);
    let minutes: i64 = caps[2].parse().unwrap_or(0);
    let seconds: i64 = caps[3].parse().unwrap_or(0);
    let millis: i64 = caps[4].parse().unwrap_or(0);

    hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis
}

/// Parse a VTT timestamp to milliseconds
///
/// Matches the long form (HH:MM:SS.mmm) first, then the short form
/// (MM:SS.mmm). Returns [`TIMECODE_FAILURE`] when neither grammar matches.
pub fn parse_vtt_timecode(timecode: &str) -> i64 {
    let timecode = timecode.trim();

    if let Some(caps) = VTT_LONG_TIMECODE_REGEX.captures(timecode) {
        let hours: i64 = caps[1].parse().unwrap_or(0);
        let minutes: i64 = caps[2].parse().unwrap_or(0);
        let seconds: i64 = caps[3].parse().unwrap_or(0);
        let millis: i64 = caps[4].parse().unwrap_or(0);
        return hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis;
    }

    if let Some(caps) = VTT_SHORT_TIMECODE_REGEX.captures(timecode) {
        let minutes: i64 = caps[1].parse().unwrap_or(0);
        let seconds: i64 = caps[2].parse().unwrap_or(0);
        let millis: i64 = caps[3].parse().unwrap_or(0);
        return minutes * 60_000 + seconds * 1_000 + millis;
    }

    TIMECODE_FAILURE
}

/// Parse an SSA timestamp (H:MM:SS with a fractional seconds component, e.g.
/// `0:00:01.50`) to milliseconds
///
/// Accepts anything a generic hours:minutes:seconds duration parser would.
/// Returns [`TIMECODE_FAILURE`] on failure.
pub fn parse_ssa_timecode(timecode: &str) -> i64 {
    let parts: Vec<&str> = timecode.trim().split(':').collect();
    if parts.len() != 3 {
        return TIMECODE_FAILURE;
    }

    let Ok(hours) = parts[0].parse::<i64>() else {
        return TIMECODE_FAILURE;
    };
    let Ok(minutes) = parts[1].parse::<i64>() else {
        return TIMECODE_FAILURE;
    };
    let Ok(seconds) = parts[2].parse::<f64>() else {
        return TIMECODE_FAILURE;
    };
    if hours < 0 || minutes < 0 || !seconds.is_finite() || seconds < 0.0 {
        return TIMECODE_FAILURE;
    }

    hours * 3_600_000 + minutes * 60_000 + (seconds * 1_000.0).round() as i64
}

/// Try to parse a timing line such as `00:00:01,000 --> 00:00:04,000`
///
/// The line is split on the first delimiter found (`-->`, `- >` or `->`) and
/// both halves are parsed with the supplied per-format timecode parser.
///
/// # Returns
/// * `(start_ms, end_ms, true)` when both halves parse; equal start and end
///   is a valid zero-length cue
/// * `(TIMECODE_FAILURE, TIMECODE_FAILURE, false)` otherwise
pub fn try_parse_timecode_line(line: &str, parse: fn(&str) -> i64) -> (i64, i64, bool) {
    let trimmed = line.trim();

    for delimiter in TIMECODE_DELIMITERS {
        if let Some((left, right)) = trimmed.split_once(delimiter) {
            let start = parse(left.trim());
            let end = parse(right.trim());
            if start != TIMECODE_FAILURE && end != TIMECODE_FAILURE {
                return (start, end, true);
            }
            return (TIMECODE_FAILURE, TIMECODE_FAILURE, false);
        }
    }

    (TIMECODE_FAILURE, TIMECODE_FAILURE, false)
}

/// Check whether a line contains any timing delimiter
pub fn has_timecode_delimiter(line: &str) -> bool {
    TIMECODE_DELIMITERS.iter().any(|d| line.contains(d))
}
