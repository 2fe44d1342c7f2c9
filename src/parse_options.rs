use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;
use crate::formats::SubtitleFormat;

/// Parsing options module
/// This module holds the configuration passed into every parse invocation:
/// the text encoding used to decode the byte stream, the timecode handling
/// mode, an optional prioritized format hint and the dummy cue schedule.
/// Default duration of a dummy cue, in milliseconds
pub const DEFAULT_DUMMY_CUE_DURATION_MS: i64 = 1_000;

/// Timecode handling mode
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimecodeMode {
    // @mode: A missing or invalid timecode is fatal for a block
    #[default]
    Required,
    // @mode: A missing timecode is replaced by a deterministic dummy schedule
    Optional,
    // @mode: Timecodes are not expected; all non-structural lines become text
    None,
}

impl std::fmt::Display for TimecodeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::None => "none",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for TimecodeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "required" => Ok(Self::Required),
            "optional" => Ok(Self::Optional),
            "none" => Ok(Self::None),
            _ => Err(anyhow!("Invalid timecode mode: {}", s)),
        }
    }
}

/// Text encoding used to decode the input byte stream
///
/// The pack of supported encodings is deliberately small: strict and lossy
/// UTF-8 plus Latin-1, which covers the subtitle files seen in the wild
/// without pulling in a charset detection layer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// Strict UTF-8; invalid byte sequences are a structural failure
    #[default]
    Utf8,
    /// UTF-8 with invalid sequences replaced by U+FFFD
    Utf8Lossy,
    /// ISO-8859-1, decoded byte-wise
    Latin1,
}

impl TextEncoding {
    /// Decode raw bytes into text
    pub fn decode(&self, bytes: &[u8]) -> Result<String, ParseError> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                ParseError::Structural(format!("Stream is not valid UTF-8: {}", e))
            }),
            Self::Utf8Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
            Self::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    /// Encode text back into bytes with this encoding
    ///
    /// Characters outside Latin-1 are replaced by '?' when encoding Latin-1.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 | Self::Utf8Lossy => text.as_bytes().to_vec(),
            Self::Latin1 => text
                .chars()
                .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
                .collect(),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Utf8 => "utf8",
            Self::Utf8Lossy => "utf8lossy",
            Self::Latin1 => "latin1",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "").as_str() {
            "utf8" => Ok(Self::Utf8),
            "utf8lossy" => Ok(Self::Utf8Lossy),
            "latin1" | "iso88591" => Ok(Self::Latin1),
            _ => Err(anyhow!("Invalid text encoding: {}", s)),
        }
    }
}

/// Options controlling a parse invocation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Text encoding used to decode the byte stream
    #[serde(default)]
    pub encoding: TextEncoding,

    /// Timecode handling mode
    #[serde(default)]
    pub timecode_mode: TimecodeMode,

    /// Format tried first by the dispatcher, if set
    #[serde(default)]
    pub prioritized_format: Option<SubtitleFormat>,

    /// Duration of a dummy cue substituted under the Optional and None modes
    #[serde(default = "default_dummy_cue_duration_ms")]
    pub dummy_cue_duration_ms: i64,
}

fn default_dummy_cue_duration_ms() -> i64 {
    DEFAULT_DUMMY_CUE_DURATION_MS
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            encoding: TextEncoding::default(),
            timecode_mode: TimecodeMode::default(),
            prioritized_format: None,
            dummy_cue_duration_ms: DEFAULT_DUMMY_CUE_DURATION_MS,
        }
    }
}

impl ParseOptions {
    /// Options with the given timecode mode and defaults for the rest
    pub fn with_mode(timecode_mode: TimecodeMode) -> Self {
        ParseOptions {
            timecode_mode,
            ..Default::default()
        }
    }

    /// Set the prioritized format hint
    pub fn prioritize(mut self, format: SubtitleFormat) -> Self {
        self.prioritized_format = Some(format);
        self
    }
}
