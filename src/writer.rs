use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cue::Cue;
use crate::errors::WriteError;

// @module: SRT writer for the unified cue model

/// Options controlling how cues are rendered
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write `lines` when true, `plaintext_lines` when false
    #[serde(default = "default_true")]
    pub include_formatting: bool,

    /// Include the `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing line
    #[serde(default = "default_true")]
    pub include_timecode: bool,

    /// Separator written after every rendered line
    #[serde(default = "default_line_separator")]
    pub line_separator: String,
}

fn default_true() -> bool {
    true
}

fn default_line_separator() -> String {
    "\n".to_string()
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            include_formatting: true,
            include_timecode: true,
            line_separator: default_line_separator(),
        }
    }
}

/// Renders cues as SRT-style numbered blocks
///
/// Each block is a 1-based sequence number, an optional timing line, one
/// line per text entry and a blank-line separator.
#[derive(Debug, Default)]
pub struct SrtWriter;

impl SrtWriter {
    pub fn new() -> Self {
        SrtWriter
    }

    /// Render cues to a string
    pub fn write_string(&self, cues: &[Cue], options: &WriteOptions) -> String {
        let separator = &options.line_separator;
        let mut output = String::new();

        for (index, cue) in cues.iter().enumerate() {
            output.push_str(&(index + 1).to_string());
            output.push_str(separator);

            if options.include_timecode {
                output.push_str(&cue.format_start_time());
                output.push_str(" --> ");
                output.push_str(&cue.format_end_time());
                output.push_str(separator);
            }

            for line in Self::select_lines(cue, options) {
                output.push_str(line);
                output.push_str(separator);
            }

            output.push_str(separator);
        }

        output
    }

    /// Render cues to an output sink
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        cues: &[Cue],
        options: &WriteOptions,
    ) -> Result<(), WriteError> {
        writer.write_all(self.write_string(cues, options).as_bytes())?;
        Ok(())
    }

    /// Write cues to an SRT file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        cues: &[Cue],
        options: &WriteOptions,
    ) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        self.write_to(&mut file, cues, options)
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }

    /// Pick the line set for a cue per the formatting flag
    ///
    /// Falls back to `lines` when plaintext was not populated by the
    /// producing parser.
    fn select_lines<'a>(cue: &'a Cue, options: &WriteOptions) -> &'a [String] {
        if options.include_formatting || cue.plaintext_lines.is_empty() {
            &cue.lines
        } else {
            &cue.plaintext_lines
        }
    }
}
