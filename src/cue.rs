use std::fmt;

// @module: Shared cue model produced by all format parsers

// @struct: Single timed subtitle cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Start time in ms
    pub start_time_ms: i64,

    // @field: End time in ms
    pub end_time_ms: i64,

    // @field: Text lines as they appeared, formatting markup included
    pub lines: Vec<String>,

    // @field: Same lines with inline markup stripped; empty when the
    // producing parser does not populate it
    pub plaintext_lines: Vec<String>,
}

impl Cue {
    /// Creates a new cue without plaintext lines
    pub fn new(start_time_ms: i64, end_time_ms: i64, lines: Vec<String>) -> Self {
        Cue {
            start_time_ms,
            end_time_ms,
            lines,
            plaintext_lines: Vec::new(),
        }
    }

    // @creates: Cue carrying both raw and markup-stripped lines
    pub fn with_plaintext(
        start_time_ms: i64,
        end_time_ms: i64,
        lines: Vec<String>,
        plaintext_lines: Vec<String>,
    ) -> Self {
        Cue {
            start_time_ms,
            end_time_ms,
            lines,
            plaintext_lines,
        }
    }

    /// Duration in milliseconds; zero-length cues are valid
    pub fn duration_ms(&self) -> i64 {
        self.end_time_ms - self.start_time_ms
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: i64) -> String {
        let ms = ms.max(0);
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
