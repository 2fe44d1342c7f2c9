use once_cell::sync::Lazy;
use regex::Regex;

// @module: Splitting raw subtitle text into candidate blocks

// @const: A line consisting solely of digits (an SRT sequence counter)
pub(crate) static NUMERIC_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Lazy iterator over blank-line-delimited blocks of subtitle text
///
/// Blocks are separated by blank lines (`\r\n` and `\n` treated as
/// equivalent). Whitespace-only blocks are discarded; a trailing non-empty
/// remainder after the last delimiter is still yielded. The iterator
/// produces one block at a time so parsers can short-circuit without
/// materializing the whole block list.
pub struct BlockSplitter<'a> {
    lines: std::str::Lines<'a>,
}

/// Split text into blank-line-delimited blocks
pub fn split_blocks(text: &str) -> BlockSplitter<'_> {
    BlockSplitter {
        lines: text.lines(),
    }
}

impl Iterator for BlockSplitter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut block: Vec<&str> = Vec::new();

        for line in self.lines.by_ref() {
            if line.trim().is_empty() {
                if block.iter().any(|l| !l.trim().is_empty()) {
                    return Some(block.join("\n"));
                }
                // Consecutive or leading blank lines: keep scanning
                block.clear();
                continue;
            }
            block.push(line);
        }

        if block.iter().any(|l| !l.trim().is_empty()) {
            Some(block.join("\n"))
        } else {
            None
        }
    }
}

/// Fallback splitting strategy for SRT files with stripped blank lines
///
/// Lines consisting solely of digits are treated as block-start markers and
/// excluded from the block's content. Blocks that end up whitespace-only are
/// discarded.
pub fn split_on_numeric_markers(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if NUMERIC_LINE_REGEX.is_match(trimmed) {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
            continue;
        }

        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}
