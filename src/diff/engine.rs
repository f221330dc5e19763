use std::fmt::{self, Write as _};
use std::iter::Peekable;
use std::ops::Range;

use similar::{Algorithm, ChangeTag, DiffTag, TextDiff};

use super::types::*;
use crate::execution::ExecutionResult;

/// Context lines kept around each change.
pub const DEFAULT_CONTEXT_LINES: usize = 4;

const FILE_SEPARATOR: &str =
    "===================================================================";
const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

pub struct DiffEngine;

impl DiffEngine {
    /// Unified line diff of two response bodies, labelled with the request
    /// names. The file header is always written, so identical bodies still
    /// produce a document (one without hunks).
    pub fn diff_pair(
        old: &ExecutionResult,
        new: &ExecutionResult,
        context_lines: usize,
    ) -> DiffDocument {
        let old_name = header_label(&old.name);
        let new_name = header_label(&new.name);

        let mut text = String::new();
        let _ = writeln!(text, "{FILE_SEPARATOR}");
        let _ = writeln!(text, "--- {old_name}");
        let _ = writeln!(text, "+++ {new_name}");

        // Lines end at `\n` only; a lone `\r` stays inside its line.
        let old_lines: Vec<&str> = old.body.split_inclusive('\n').collect();
        let new_lines: Vec<&str> = new.body.split_inclusive('\n').collect();
        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_slices(old_lines.as_slice(), new_lines.as_slice());

        for group in diff.grouped_ops(context_lines) {
            if group.iter().all(|op| op.tag() == DiffTag::Equal) {
                continue;
            }
            let (Some(first), Some(last)) = (group.first(), group.last()) else {
                continue;
            };
            let old_range = first.old_range().start..last.old_range().end;
            let new_range = first.new_range().start..last.new_range().end;
            let _ = writeln!(
                text,
                "@@ -{} +{} @@",
                HunkRange(old_range),
                HunkRange(new_range)
            );

            for op in &group {
                for change in diff.iter_changes(op) {
                    let sign = match change.tag() {
                        ChangeTag::Equal => ' ',
                        ChangeTag::Delete => '-',
                        ChangeTag::Insert => '+',
                    };
                    let value = change.value();
                    text.push(sign);
                    text.push_str(value);
                    if !value.ends_with('\n') {
                        text.push('\n');
                        text.push_str(NO_NEWLINE_MARKER);
                        text.push('\n');
                    }
                }
            }
        }

        DiffDocument {
            old_name,
            new_name,
            text,
        }
    }

    /// Read unified diff text back into per-file deltas.
    ///
    /// Hunk bodies are consumed by the counts in their `@@` header, so body
    /// lines that look like `---`/`+++` headers stay inside their hunk. Lines
    /// outside any file (`Index:`, separators) are skipped.
    pub fn parse_unified(text: &str) -> Vec<FileDelta> {
        let mut deltas: Vec<FileDelta> = Vec::new();
        let mut lines = text.split_terminator('\n').peekable();

        while let Some(line) = lines.next() {
            if let Some(old) = line.strip_prefix("--- ") {
                if let Some(new) = lines.peek().and_then(|l| l.strip_prefix("+++ ")) {
                    deltas.push(FileDelta::new(parsed_label(old), parsed_label(new)));
                    lines.next();
                }
                continue;
            }

            let Some(ranges) = parse_hunk_header(line) else {
                continue;
            };
            let Some(delta) = deltas.last_mut() else {
                continue;
            };
            let hunk = Self::read_hunk(line, ranges, &mut lines);
            delta.push_hunk(hunk);
        }

        deltas
    }

    fn read_hunk<'a, I>(header: &str, ranges: HunkRanges, lines: &mut Peekable<I>) -> Hunk
    where
        I: Iterator<Item = &'a str>,
    {
        let mut hunk = Hunk {
            header: header.to_string(),
            old_start: ranges.old_start,
            old_lines: ranges.old_lines,
            new_start: ranges.new_start,
            new_lines: ranges.new_lines,
            lines: Vec::new(),
        };

        let mut old_left = ranges.old_lines;
        let mut new_left = ranges.new_lines;
        let mut old_lineno = ranges.old_start;
        let mut new_lineno = ranges.new_start;

        loop {
            let Some(&line) = lines.peek() else {
                break;
            };

            if line.starts_with('\\') {
                if let Some(last) = hunk.lines.last_mut() {
                    last.missing_newline = true;
                }
                lines.next();
                continue;
            }

            if old_left == 0 && new_left == 0 {
                break;
            }

            let (origin, content) = match line.chars().next() {
                Some('-') if old_left > 0 => (DiffLineOrigin::Deletion, &line[1..]),
                Some('+') if new_left > 0 => (DiffLineOrigin::Addition, &line[1..]),
                Some(' ') => (DiffLineOrigin::Context, &line[1..]),
                // Some tools strip the lone space of empty context lines.
                None => (DiffLineOrigin::Context, ""),
                _ => break,
            };
            lines.next();

            let (old_no, new_no) = match origin {
                DiffLineOrigin::Context => {
                    old_left = old_left.saturating_sub(1);
                    new_left = new_left.saturating_sub(1);
                    (Some(old_lineno), Some(new_lineno))
                }
                DiffLineOrigin::Deletion => {
                    old_left -= 1;
                    (Some(old_lineno), None)
                }
                DiffLineOrigin::Addition => {
                    new_left -= 1;
                    (None, Some(new_lineno))
                }
            };
            if old_no.is_some() {
                old_lineno = old_lineno.saturating_add(1);
            }
            if new_no.is_some() {
                new_lineno = new_lineno.saturating_add(1);
            }

            hunk.lines.push(DiffLine {
                origin,
                old_lineno: old_no,
                new_lineno: new_no,
                content: content.to_string(),
                missing_newline: false,
            });
        }

        hunk
    }
}

/// Line breaks and tabs would corrupt the header, so they become spaces.
fn header_label(name: &str) -> String {
    name.replace(['\r', '\n', '\t'], " ")
}

/// Drop the optional `\t<timestamp>` part of a `---`/`+++` label.
fn parsed_label(label: &str) -> &str {
    label.split('\t').next().unwrap_or(label)
}

/// GNU-style hunk range: `3` for one line, `2,0` for none, `3,5` otherwise.
struct HunkRange(Range<usize>);

impl fmt::Display for HunkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.end.saturating_sub(self.0.start);
        match len {
            0 => write!(f, "{},0", self.0.start),
            1 => write!(f, "{}", self.0.start + 1),
            _ => write!(f, "{},{}", self.0.start + 1, len),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HunkRanges {
    old_start: u32,
    old_lines: u32,
    new_start: u32,
    new_lines: u32,
}

fn parse_hunk_header(line: &str) -> Option<HunkRanges> {
    let rest = line.strip_prefix("@@ -")?;
    let (ranges, _) = rest.split_once(" @@")?;
    let (old, new) = ranges.split_once(" +")?;
    let (old_start, old_lines) = parse_range(old)?;
    let (new_start, new_lines) = parse_range(new)?;
    Some(HunkRanges {
        old_start,
        old_lines,
        new_start,
        new_lines,
    })
}

fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, len)) => Some((start.parse().ok()?, len.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}
